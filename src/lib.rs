//! # terra-rules
//!
//! A deterministic rules engine for a territory and economy board game for
//! one to five players: terraforming, building, power leeching, cult tracks
//! and round scoring.
//!
//! ## Design Principles
//!
//! 1. **Immutable Snapshots**: A `GameState` never changes. `submit`
//!    validates a submission against one snapshot and returns the next one,
//!    or an error and no change at all.
//!
//! 2. **Enumerate, Then Execute**: Legal moves are listed as concrete
//!    `ActionExecution`s. A submission is legal exactly when it is one of
//!    them.
//!
//! 3. **Configuration Over Convention**: Factions, tiles and power actions
//!    are data in `RulesConfig`; board geometry comes through `MapView`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot clone via `im-rs`, so a
//!   driver can keep every snapshot of a game for undo and replay.
//!
//! - **Deterministic**: All randomness is drawn at creation from a seeded
//!   ChaCha8 stream. Equal inputs give equal snapshots.
//!
//! ## Modules
//!
//! - `core`: Identifiers, players, RNG, ruleset configuration
//! - `economy`: Resource bundles, power bowls, conversions, leeching
//! - `entities`: Cults, structures, tiles, factions, player state
//! - `map`: The `MapView` collaborator and terrain ring
//! - `actions`: Action catalog, executions and their steps
//! - `rules`: Phases, the transition engine, round flow and scoring
//! - `state`: Game snapshots, derived queries and snapshot history
//! - `data`: Standard static tables

pub mod core;
pub mod economy;
pub mod entities;
pub mod map;
pub mod actions;
pub mod rules;
pub mod state;
pub mod data;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use crate::core::{
    ActionId, BridgeId, FactionId, LocationId, SnapshotId, TileId,
    PlayerId, PlayerMap, MAX_PLAYERS,
    GameRng, Rules, RulesConfig,
};

pub use crate::economy::{
    Conversion, ConversionTable, LeechOpportunity, PlayerResourceState, PowerBowlState,
    ResourceDelta, ResourceType,
};

pub use crate::entities::{
    Cult, Faction, Player, PlayerMetadata, PlayerState, Structure, StructureType, Tile, TileType,
};

pub use crate::map::{BridgeSlot, HexMap, MapView, Terrain};

pub use crate::actions::{Action, ActionExecution, Step};

pub use crate::rules::{submit, GameResult, Phase};

pub use crate::state::{GameState, PendingDecision, Setup, SnapshotHistory};

pub use crate::error::{ConfigError, RulesError};
