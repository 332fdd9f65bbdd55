//! Players and their per-game state.
//!
//! Every update returns a new value. A `GameState` that changes one player
//! builds a new `Player` through the `with_*`/`update_*` methods and leaves
//! the old snapshot's player untouched.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cult::{Cult, PlayerCultState};
use super::faction::Faction;
use super::structure::PlayerStructureState;
use super::tile::TileSet;
use crate::core::{BridgeId, FactionId, LocationId, PlayerId};
use crate::economy::{LeechOpportunity, PlayerResourceState};

/// Information about the person or program behind a player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMetadata {
    pub name: String,
}

impl PlayerMetadata {
    /// Create metadata.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Mutable-by-replacement game state of one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub dig_level: u8,
    pub ship_level: u8,
    pub tiles: TileSet,
    pub structures: PlayerStructureState,
    pub bridges: im::Vector<BridgeId>,
    pub resources: PlayerResourceState,
    pub cult: PlayerCultState,
    pub has_passed: bool,

    /// Offers waiting for this player's decision, oldest first.
    pub leech_opportunities: im::Vector<LeechOpportunity>,
    /// Free cult steps to place.
    pub cultist_steps: u8,
    /// Free spades to use from the round-end cult bonus.
    pub bonus_spades: u8,
    /// Tracks competing for the player's remaining cult keys.
    pub key_candidates: SmallVec<[Cult; 4]>,

    /// Towns founded. Each grants one cult key.
    pub towns: u32,
    /// Locations already part of a town.
    pub town_locations: im::OrdSet<LocationId>,
}

impl PlayerState {
    /// State right after choosing `faction`.
    #[must_use]
    pub fn starting(faction: &Faction, victory_points: i32) -> Self {
        let bundle = faction.starting_resources.victory_points(victory_points);
        let mut cult = PlayerCultState::default();
        for c in Cult::ALL {
            cult = cult.with(c, faction.starting_cult.by_cult(c));
        }

        Self {
            ship_level: faction.starting_ship_level,
            resources: PlayerResourceState::starting(faction.starting_power, bundle),
            cult,
            ..Self::default()
        }
    }

    /// Cult keys not yet used to reach the top of a track.
    #[must_use]
    pub fn keys_available(&self) -> u32 {
        self.towns.saturating_sub(self.cult.tops_held())
    }

    /// A copy with new resources.
    #[must_use]
    pub fn with_resources(&self, resources: PlayerResourceState) -> Self {
        Self {
            resources,
            ..self.clone()
        }
    }
}

/// A seat in the game.
///
/// `player_id` is derived from the initial turn position and never changes,
/// even when turn order does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub metadata: PlayerMetadata,
    pub initial_turn_position: usize,
    pub player_id: PlayerId,
    /// `None` until the faction is chosen. Never changes afterwards.
    pub faction: Option<FactionId>,
    pub state: PlayerState,
}

impl Player {
    /// Create a player that has not chosen a faction yet.
    #[must_use]
    pub fn create(metadata: PlayerMetadata, initial_turn_position: usize) -> Self {
        Self {
            metadata,
            initial_turn_position,
            player_id: PlayerId::new(initial_turn_position as u8),
            faction: None,
            state: PlayerState::default(),
        }
    }

    /// A copy with the faction set.
    #[must_use]
    pub fn with_faction(&self, faction: FactionId, state: PlayerState) -> Self {
        Self {
            faction: Some(faction),
            state,
            ..self.clone()
        }
    }

    /// A copy with new state.
    #[must_use]
    pub fn with_state(&self, state: PlayerState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }

    /// A copy with new structures.
    #[must_use]
    pub fn update_structures(&self, structures: PlayerStructureState) -> Self {
        self.with_state(PlayerState {
            structures,
            ..self.state.clone()
        })
    }

    /// A copy with new resources.
    #[must_use]
    pub fn update_resources(&self, resources: PlayerResourceState) -> Self {
        self.with_state(self.state.with_resources(resources))
    }

    /// A copy with new cult positions.
    #[must_use]
    pub fn update_cult(&self, cult: PlayerCultState) -> Self {
        self.with_state(PlayerState {
            cult,
            ..self.state.clone()
        })
    }
}
