//! Standard static tables.
//!
//! Used by `RulesConfig::standard`. A driver with other tables loads them
//! with `RulesConfig::from_json` instead.

pub mod actions;
pub mod factions;
pub mod tiles;

pub use actions::power_actions;
pub use factions::{factions, AUREN_CULT, CHAOS_DOUBLE_TURN, WITCHES_RIDE};
pub use tiles::{bonus_tiles, favor_tiles, round_tiles, town_tiles};
