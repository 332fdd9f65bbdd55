//! Once-per-round special abilities granted by strongholds and tiles.

use serde::{Deserialize, Serialize};

use crate::core::ActionId;

/// What a special ability does when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialEffect {
    /// Take another turn right after this one.
    ExtraTurn,
    /// Transform one reachable hex with free spades, optionally building
    /// a dwelling on it at the usual cost.
    Spades(u8),
    /// Advance on one cult track of the player's choice.
    CultSteps(u8),
    /// Build a dwelling for free on any unoccupied hex of home terrain.
    FreeDwelling,
}

/// A special ability bound to an action slot.
///
/// The slot id is expended when the ability is used and becomes available
/// again next round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialAbility {
    pub id: ActionId,
    pub effect: SpecialEffect,
}

impl SpecialAbility {
    /// Create an ability.
    #[must_use]
    pub const fn new(id: ActionId, effect: SpecialEffect) -> Self {
        Self { id, effect }
    }
}
