//! Ruleset configuration.
//!
//! A game is configured once, before `GameState::create`, by providing:
//! - `RulesConfig`: factions, tiles, power actions and scoring constants
//! - a `MapView`: the board geometry
//!
//! Both are bundled into `Rules` and shared by every snapshot of the game
//! through an `Arc`. Nothing in here changes during a game.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::ids::{ActionId, FactionId, TileId};
use super::player::MAX_PLAYERS;
use crate::actions::PowerAction;
use crate::entities::{CultReward, Faction, Tile, TileType};
use crate::economy::{ConversionTable, ResourceDelta};
use crate::error::ConfigError;
use crate::map::{same_geometry, MapView};

/// Static tables and constants of a ruleset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub factions: Vec<Faction>,
    pub round_tiles: Vec<Tile>,
    pub bonus_tiles: Vec<Tile>,
    pub favor_tiles: Vec<Tile>,
    pub town_tiles: Vec<Tile>,
    pub power_actions: Vec<PowerAction>,

    /// Rates used by players whose faction has no table of its own.
    pub conversion_rates: ConversionTable,

    /// Number of rounds (one round tile each).
    pub rounds: u32,
    pub starting_victory_points: i32,
    /// Bonus tiles in play beyond one per player.
    pub extra_bonus_tiles: usize,

    /// Power paid for reaching cult positions.
    pub cult_rewards: Vec<CultReward>,
    /// Victory points for first, second, third place on each cult track.
    pub final_cult_scoring: Vec<i32>,

    /// Structure power a town needs.
    pub town_power: u32,
    /// Structures a town needs.
    pub town_size: usize,
    /// Structures a town needs when it contains a sanctuary.
    pub town_size_with_sanctuary: usize,
    /// Bridges each player may build.
    pub max_bridges: usize,

    /// Reward for each dig advance.
    pub dig_advance_reward: ResourceDelta,
    /// Reward for reaching shipping level 1, 2, 3, ...
    pub ship_advance_rewards: Vec<ResourceDelta>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            factions: Vec::new(),
            round_tiles: Vec::new(),
            bonus_tiles: Vec::new(),
            favor_tiles: Vec::new(),
            town_tiles: Vec::new(),
            power_actions: Vec::new(),
            conversion_rates: ConversionTable::standard(),
            rounds: 6,
            starting_victory_points: 20,
            extra_bonus_tiles: 3,
            cult_rewards: vec![
                CultReward { position: 3, power: 1 },
                CultReward { position: 5, power: 2 },
                CultReward { position: 7, power: 2 },
                CultReward { position: 10, power: 3 },
            ],
            final_cult_scoring: vec![8, 4, 2],
            town_power: 7,
            town_size: 4,
            town_size_with_sanctuary: 3,
            max_bridges: 3,
            dig_advance_reward: ResourceDelta::new().victory_points(6),
            ship_advance_rewards: vec![
                ResourceDelta::new().victory_points(2),
                ResourceDelta::new().victory_points(3),
                ResourceDelta::new().victory_points(4),
                ResourceDelta::new().victory_points(5),
                ResourceDelta::new().victory_points(6),
            ],
        }
    }
}

impl RulesConfig {
    /// Constants only, with empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard tables.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_factions(crate::data::factions())
            .with_round_tiles(crate::data::round_tiles())
            .with_bonus_tiles(crate::data::bonus_tiles())
            .with_favor_tiles(crate::data::favor_tiles())
            .with_town_tiles(crate::data::town_tiles())
            .with_power_actions(crate::data::power_actions())
    }

    /// Load and validate a ruleset from JSON.
    ///
    /// Missing fields take their default values, so a file only needs the
    /// tables it provides.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the factions.
    #[must_use]
    pub fn with_factions(mut self, factions: Vec<Faction>) -> Self {
        self.factions = factions;
        self
    }

    /// Add one faction.
    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.factions.push(faction);
        self
    }

    /// Set the round tiles.
    #[must_use]
    pub fn with_round_tiles(mut self, tiles: Vec<Tile>) -> Self {
        self.round_tiles = tiles;
        self
    }

    /// Set the bonus tiles.
    #[must_use]
    pub fn with_bonus_tiles(mut self, tiles: Vec<Tile>) -> Self {
        self.bonus_tiles = tiles;
        self
    }

    /// Set the favor tiles.
    #[must_use]
    pub fn with_favor_tiles(mut self, tiles: Vec<Tile>) -> Self {
        self.favor_tiles = tiles;
        self
    }

    /// Set the town tiles.
    #[must_use]
    pub fn with_town_tiles(mut self, tiles: Vec<Tile>) -> Self {
        self.town_tiles = tiles;
        self
    }

    /// Set the power actions.
    #[must_use]
    pub fn with_power_actions(mut self, actions: Vec<PowerAction>) -> Self {
        self.power_actions = actions;
        self
    }

    /// Set the default conversion table.
    #[must_use]
    pub fn with_conversion_rates(mut self, rates: ConversionTable) -> Self {
        self.conversion_rates = rates;
        self
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the starting victory points.
    #[must_use]
    pub fn with_starting_victory_points(mut self, victory_points: i32) -> Self {
        self.starting_victory_points = victory_points;
        self
    }

    /// Get a faction by ID.
    #[must_use]
    pub fn faction(&self, id: &FactionId) -> Option<&Faction> {
        self.factions.iter().find(|f| f.id == *id)
    }

    /// Get a faction by ID, panicking if not found.
    ///
    /// Use for ids taken from a snapshot of a validated game.
    #[must_use]
    pub fn faction_unchecked(&self, id: &FactionId) -> &Faction {
        self.faction(id).expect("Faction not found in ruleset")
    }

    /// All tiles of every kind.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.round_tiles
            .iter()
            .chain(&self.bonus_tiles)
            .chain(&self.favor_tiles)
            .chain(&self.town_tiles)
    }

    /// Get a tile by ID.
    #[must_use]
    pub fn tile(&self, id: &TileId) -> Option<&Tile> {
        self.tiles().find(|t| t.id == *id)
    }

    /// Get a tile by ID, panicking if not found.
    #[must_use]
    pub fn tile_unchecked(&self, id: &TileId) -> &Tile {
        self.tile(id).expect("Tile not found in ruleset")
    }

    /// Get a power action by ID.
    #[must_use]
    pub fn power_action(&self, id: &ActionId) -> Option<&PowerAction> {
        self.power_actions.iter().find(|a| a.id == *id)
    }

    /// Longest shipping range any player can reach: the highest faction
    /// ship level plus every tile modifier.
    #[must_use]
    pub fn max_shipping_range(&self) -> u32 {
        let level = self
            .factions
            .iter()
            .map(|f| u32::from(f.max_ship_level))
            .max()
            .unwrap_or(0);
        let modifiers: u32 = [
            &self.round_tiles,
            &self.bonus_tiles,
            &self.favor_tiles,
            &self.town_tiles,
        ]
        .into_iter()
        .flatten()
        .map(|t| u32::from(t.shipping_modifier))
        .sum();
        level + modifiers
    }

    /// Conversion table for a faction, or the default one.
    #[must_use]
    pub fn conversion_rates_for(&self, faction: Option<&FactionId>) -> &ConversionTable {
        faction
            .and_then(|id| self.faction(id))
            .map_or(&self.conversion_rates, |f| &f.conversion_rates)
    }

    /// Check the tables for duplicate ids and kind mismatches.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut factions = FxHashSet::default();
        for faction in &self.factions {
            if !factions.insert(&faction.id) {
                return Err(ConfigError::DuplicateFaction(faction.id.clone()));
            }
        }

        let mut tiles = FxHashSet::default();
        for tile in self.tiles() {
            if !tiles.insert(&tile.id) {
                return Err(ConfigError::DuplicateTile(tile.id.clone()));
            }
        }
        for (tiles, kind) in [
            (&self.round_tiles, TileType::Round),
            (&self.bonus_tiles, TileType::Bonus),
            (&self.favor_tiles, TileType::Favor),
            (&self.town_tiles, TileType::Town),
        ] {
            if let Some(tile) = tiles.iter().find(|t| t.tile_type != kind) {
                return Err(ConfigError::WrongTileType {
                    tile: tile.id.clone(),
                    expected: kind,
                });
            }
        }

        let mut actions = FxHashSet::default();
        let special = self
            .factions
            .iter()
            .filter_map(|f| f.stronghold_action.as_ref())
            .chain(self.tiles().filter_map(|t| t.action.as_ref()))
            .map(|a| &a.id);
        for id in self.power_actions.iter().map(|a| &a.id).chain(special) {
            if !actions.insert(id) {
                return Err(ConfigError::DuplicateAction(id.clone()));
            }
        }

        Ok(())
    }

    /// Check that the tables can host a game of `player_count` players.
    pub fn validate_for(&self, player_count: usize) -> Result<(), ConfigError> {
        if player_count == 0 || player_count > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount(player_count));
        }
        self.validate()?;

        let checks = [
            ("factions", player_count, self.factions.len()),
            ("round tiles", self.rounds as usize, self.round_tiles.len()),
            (
                "bonus tiles",
                player_count + self.extra_bonus_tiles,
                self.bonus_tiles.len(),
            ),
        ];
        for (table, required, found) in checks {
            if found < required {
                return Err(ConfigError::TableTooSmall {
                    table,
                    required,
                    found,
                });
            }
        }
        Ok(())
    }
}

/// A ruleset bound to a map.
#[derive(Clone, Debug)]
pub struct Rules {
    pub config: RulesConfig,
    pub map: Arc<dyn MapView>,
}

impl Rules {
    /// Bind a configuration to a map.
    #[must_use]
    pub fn new(config: RulesConfig, map: Arc<dyn MapView>) -> Self {
        Self { config, map }
    }
}

/// Rulesets are equal when their tables match and their maps agree on every
/// query a game can make.
impl PartialEq for Rules {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && (Arc::ptr_eq(&self.map, &other.map)
                || same_geometry(
                    self.map.as_ref(),
                    other.map.as_ref(),
                    self.config.max_shipping_range(),
                ))
    }
}
