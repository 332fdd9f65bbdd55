//! Core types: ids, players, RNG, configuration.
//!
//! Everything here is shared by the rest of the crate and knows nothing
//! about phases or actions.

pub mod ids;
pub mod player;
pub mod rng;
pub mod config;

pub use ids::{ActionId, BridgeId, FactionId, LocationId, SnapshotId, TileId};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::GameRng;
pub use config::{Rules, RulesConfig};
