//! Error types.
//!
//! `RulesError` covers rule violations: a submission or operation the rules
//! forbid. Every variant carries enough detail (expected vs. actual) for a
//! driver to explain the rejection. The snapshot a rejected call was made on
//! is never modified.
//!
//! `ConfigError` covers malformed static tables handed to `RulesConfig`.
//! Configuration problems discovered later, inside the engine, are bugs and
//! panic instead.

use thiserror::Error;

use crate::core::{ActionId, FactionId, PlayerId, TileId};
use crate::economy::ResourceType;
use crate::entities::TileType;
use crate::rules::Phase;

/// A rejected operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("illegal submission in phase {phase:?}: {reason}")]
    IllegalSubmission { phase: Phase, reason: String },

    #[error("action {action} is not available in phase {phase:?}")]
    ActionNotAvailable { action: ActionId, phase: Phase },

    #[error("execution of {action} is not legal in the current state")]
    IllegalExecution { action: ActionId },

    #[error("expected {expected} leech decisions, got {actual}")]
    MalformedDecisionSet { expected: usize, actual: usize },

    #[error("leech costs {required} victory points, only {available} available")]
    InsufficientVictoryPoints { required: i32, available: i32 },

    #[error("tried to spend {requested} power, only {available} available")]
    InsufficientPower { requested: u32, available: u32 },

    #[error("no conversion from {from:?} to {to:?}")]
    NoSuchConversion { from: ResourceType, to: ResourceType },

    #[error("cannot convert {quantity} {from:?} to {to:?}")]
    InvalidConversionQuantity {
        from: ResourceType,
        to: ResourceType,
        quantity: u32,
    },

    #[error("{resource:?} would exceed the counter range")]
    ResourceOverflow { resource: ResourceType },

    #[error("{player} would end with {amount} {resource:?}")]
    NegativeResourceState {
        player: PlayerId,
        resource: ResourceType,
        amount: i32,
    },

    #[error("the game is over")]
    GameOver,

    #[error("snapshot encoding failed: {0}")]
    Encoding(String),
}

/// A malformed static table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate faction id: {0}")]
    DuplicateFaction(FactionId),

    #[error("duplicate tile id: {0}")]
    DuplicateTile(TileId),

    #[error("tile {tile} is listed with the {expected:?} tiles")]
    WrongTileType { tile: TileId, expected: TileType },

    #[error("unknown tile id: {0}")]
    UnknownTile(TileId),

    #[error("duplicate action id: {0}")]
    DuplicateAction(ActionId),

    #[error("need at least {required} {table}, found {found}")]
    TableTooSmall {
        table: &'static str,
        required: usize,
        found: usize,
    },

    #[error("unsupported player count {0}")]
    PlayerCount(usize),
}
