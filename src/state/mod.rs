//! Snapshots and the queries over them.
//!
//! - `game`: the `GameState` snapshot, its creation and serialization
//! - `query`: derived lookups (terrain, reachability, held tiles)
//! - `history`: driver-side resolution of snapshot back-references

mod game;
mod query;
pub mod history;

pub use game::{ActionSlot, GameState, LogEntry, PendingDecision, RulesHandle, Setup};
pub use history::SnapshotHistory;
