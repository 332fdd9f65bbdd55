//! Phase state machine and transition engine.
//!
//! - `Phase`: what the game is waiting for
//! - `submit`: the transition pipeline, the only way to produce a successor
//!   snapshot
//! - `flow`: which decision, player or round comes next
//! - `round`: income, round-end cult bonus and final cult scoring

pub mod engine;
pub(crate) mod flow;
pub mod phase;
pub mod round;

pub use engine::{submit, GameResult};
pub use phase::Phase;
pub use round::{cult_track_scores, income};
