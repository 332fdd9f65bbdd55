//! Tiles: round, bonus, favor and town.
//!
//! ## Tile kinds
//!
//! - Round tiles: one per round, drawn at setup. Reward builds during the
//!   round and pay a cult bonus at round end.
//! - Bonus tiles: one per player, swapped when passing.
//! - Favor tiles: taken when building temples and the sanctuary.
//! - Town tiles: taken when founding a town.
//!
//! Tiles are static data looked up by `TileId`. Snapshots only hold ids.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ability::SpecialAbility;
use super::cult::{Cult, CultDelta};
use super::structure::{PlayerStructureState, StructureType};
use crate::core::TileId;
use crate::economy::ResourceDelta;

/// Kind of tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Round,
    #[default]
    Bonus,
    Favor,
    Town,
}

/// Something a player did that tiles can reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    BuildDwelling,
    BuildTradingPost,
    BuildTemple,
    BuildStronghold,
    BuildSanctuary,
    FoundTown,
    /// One spade used on a transformation.
    Dig,
}

impl EventType {
    /// The build event for a structure type.
    #[must_use]
    pub const fn built(structure_type: StructureType) -> Self {
        match structure_type {
            StructureType::Dwelling => EventType::BuildDwelling,
            StructureType::TradingPost => EventType::BuildTradingPost,
            StructureType::Temple => EventType::BuildTemple,
            StructureType::Stronghold => EventType::BuildStronghold,
            StructureType::Sanctuary => EventType::BuildSanctuary,
        }
    }
}

/// Resources paid every time a listened-for event happens.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventTrigger {
    pub listens_for: SmallVec<[EventType; 2]>,
    pub provides: ResourceDelta,
}

impl EventTrigger {
    /// Listen for a single event type.
    #[must_use]
    pub fn on(event: EventType, provides: ResourceDelta) -> Self {
        Self {
            listens_for: SmallVec::from_slice(&[event]),
            provides,
        }
    }

    /// Total reward for a batch of events.
    #[must_use]
    pub fn reward(&self, events: &[EventType]) -> ResourceDelta {
        let hits = events
            .iter()
            .filter(|e| self.listens_for.contains(e))
            .count() as i32;
        self.provides * hits
    }
}

/// Victory points scored when passing while holding the tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassTrigger {
    /// Points per structure of the listed types.
    Structures {
        types: SmallVec<[StructureType; 2]>,
        victory_points: i32,
    },
    /// Points per shipping level.
    ShipLevel { victory_points: i32 },
}

impl PassTrigger {
    /// Points for a player with these structures and shipping level.
    #[must_use]
    pub fn score(&self, structures: &PlayerStructureState, ship_level: u8) -> i32 {
        match self {
            PassTrigger::Structures {
                types,
                victory_points,
            } => {
                let count: usize = types.iter().map(|&t| structures.count(t)).sum();
                count as i32 * victory_points
            }
            PassTrigger::ShipLevel { victory_points } => i32::from(ship_level) * victory_points,
        }
    }
}

/// Round-end reward per `steps` on a cult track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CultBonus {
    pub cult: Cult,
    pub steps: u8,
    #[serde(default)]
    pub bonus_resources: ResourceDelta,
    #[serde(default)]
    pub bonus_spades: u8,
}

impl CultBonus {
    /// How many times a player at `position` collects the bonus.
    #[must_use]
    pub fn multiplier(&self, position: u8) -> u8 {
        if self.steps == 0 {
            0
        } else {
            position / self.steps
        }
    }
}

/// Static description of a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tile {
    pub id: TileId,
    pub tile_type: TileType,
    pub action: Option<SpecialAbility>,
    pub event_trigger: Option<EventTrigger>,
    pub pass_trigger: Option<PassTrigger>,
    pub immediate_resources: ResourceDelta,
    pub immediate_cult: CultDelta,
    pub income: ResourceDelta,
    pub shipping_modifier: u8,
    /// Reduction of the power a town needs.
    pub town_power_modifier: u32,
    pub cult_bonus: Option<CultBonus>,
    /// Copies of the tile in the game.
    pub copies: u8,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            id: TileId::default(),
            tile_type: TileType::default(),
            action: None,
            event_trigger: None,
            pass_trigger: None,
            immediate_resources: ResourceDelta::ZERO,
            immediate_cult: CultDelta::new(),
            income: ResourceDelta::ZERO,
            shipping_modifier: 0,
            town_power_modifier: 0,
            cult_bonus: None,
            copies: 1,
        }
    }
}

impl Tile {
    /// Create a tile with no effects.
    #[must_use]
    pub fn new(id: TileId, tile_type: TileType) -> Self {
        Self {
            id,
            tile_type,
            ..Self::default()
        }
    }

    /// Set the action slot.
    #[must_use]
    pub fn with_action(mut self, action: SpecialAbility) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the event trigger.
    #[must_use]
    pub fn with_event_trigger(mut self, trigger: EventTrigger) -> Self {
        self.event_trigger = Some(trigger);
        self
    }

    /// Set the pass trigger.
    #[must_use]
    pub fn with_pass_trigger(mut self, trigger: PassTrigger) -> Self {
        self.pass_trigger = Some(trigger);
        self
    }

    /// Set resources paid on taking the tile.
    #[must_use]
    pub fn with_immediate_resources(mut self, resources: ResourceDelta) -> Self {
        self.immediate_resources = resources;
        self
    }

    /// Set cult steps granted on taking the tile.
    #[must_use]
    pub fn with_immediate_cult(mut self, cult: CultDelta) -> Self {
        self.immediate_cult = cult;
        self
    }

    /// Set income paid each round while held.
    #[must_use]
    pub fn with_income(mut self, income: ResourceDelta) -> Self {
        self.income = income;
        self
    }

    /// Set the shipping bonus while held.
    #[must_use]
    pub fn with_shipping_modifier(mut self, modifier: u8) -> Self {
        self.shipping_modifier = modifier;
        self
    }

    /// Set the town power reduction while held.
    #[must_use]
    pub fn with_town_power_modifier(mut self, modifier: u32) -> Self {
        self.town_power_modifier = modifier;
        self
    }

    /// Set the round-end cult bonus.
    #[must_use]
    pub fn with_cult_bonus(mut self, bonus: CultBonus) -> Self {
        self.cult_bonus = Some(bonus);
        self
    }

    /// Set the number of copies.
    #[must_use]
    pub fn with_copies(mut self, copies: u8) -> Self {
        self.copies = copies;
        self
    }
}

/// Tile ids held by a player or by the shared pool, grouped by kind.
///
/// A kind may hold the same id several times when the game has copies of
/// a tile. Round tiles are never held.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSet {
    pub bonus_tiles: im::Vector<TileId>,
    pub favor_tiles: im::Vector<TileId>,
    pub town_tiles: im::Vector<TileId>,
}

impl TileSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn kind(&self, tile_type: TileType) -> Option<&im::Vector<TileId>> {
        match tile_type {
            TileType::Bonus => Some(&self.bonus_tiles),
            TileType::Favor => Some(&self.favor_tiles),
            TileType::Town => Some(&self.town_tiles),
            TileType::Round => None,
        }
    }

    fn kind_mut(&mut self, tile_type: TileType) -> Option<&mut im::Vector<TileId>> {
        match tile_type {
            TileType::Bonus => Some(&mut self.bonus_tiles),
            TileType::Favor => Some(&mut self.favor_tiles),
            TileType::Town => Some(&mut self.town_tiles),
            TileType::Round => None,
        }
    }

    /// Ids of one kind, with copies.
    pub fn ids(&self, tile_type: TileType) -> impl Iterator<Item = &TileId> {
        self.kind(tile_type).into_iter().flat_map(|v| v.iter())
    }

    /// Distinct ids of one kind, in first-seen order.
    #[must_use]
    pub fn distinct(&self, tile_type: TileType) -> Vec<TileId> {
        let mut seen: Vec<TileId> = Vec::new();
        for id in self.ids(tile_type) {
            if !seen.contains(id) {
                seen.push(id.clone());
            }
        }
        seen
    }

    /// Every held id, bonus first, then favor, then town.
    pub fn all(&self) -> impl Iterator<Item = &TileId> {
        self.bonus_tiles
            .iter()
            .chain(self.favor_tiles.iter())
            .chain(self.town_tiles.iter())
    }

    /// Check if a tile is held.
    #[must_use]
    pub fn contains(&self, tile: &Tile) -> bool {
        self.ids(tile.tile_type).any(|id| *id == tile.id)
    }

    /// A copy with one more copy of `tile`.
    #[must_use]
    pub fn with_added(&self, tile: &Tile) -> Self {
        let mut next = self.clone();
        if let Some(kind) = next.kind_mut(tile.tile_type) {
            kind.push_back(tile.id.clone());
        }
        next
    }

    /// A copy with one copy of `tile` removed, `None` if it is not held.
    #[must_use]
    pub fn without(&self, tile: &Tile) -> Option<Self> {
        let mut next = self.clone();
        let kind = next.kind_mut(tile.tile_type)?;
        let index = kind.index_of(&tile.id)?;
        kind.remove(index);
        Some(next)
    }

    /// Total number of held tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bonus_tiles.len() + self.favor_tiles.len() + self.town_tiles.len()
    }

    /// Check if no tiles are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
