//! Leeching: power offered to neighbours of a build.
//!
//! When a player builds or upgrades, every other player with adjacent
//! structures is offered power equal to the power value of those
//! structures. Accepting costs victory points: one less than the power
//! actually received, so the first point of every offer is free. The power
//! received is capped by the recipient's remaining bowl capacity at the
//! moment the offer is taken.

use serde::{Deserialize, Serialize};

use super::player_resources::PlayerResourceState;
use crate::core::PlayerId;
use crate::error::RulesError;

/// An offer of power to a non-active player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeechOpportunity {
    /// The builder whose action created the offer.
    pub from: PlayerId,
    /// Power offered before capacity clamping.
    pub amount: u32,
}

impl LeechOpportunity {
    /// Create an offer.
    #[must_use]
    pub const fn new(from: PlayerId, amount: u32) -> Self {
        Self { from, amount }
    }
}

/// Result of resolving a set of leech decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeechOutcome {
    pub resources: PlayerResourceState,
    /// Power actually received across accepted offers.
    pub power_gained: u32,
    /// Victory points paid.
    pub victory_point_cost: i32,
    /// Number of offers accepted.
    pub accepted: usize,
}

/// Resolve one decision per pending offer, in order.
///
/// Fails with `MalformedDecisionSet` if the decision count differs from the
/// offer count, and with `InsufficientVictoryPoints` if the accepted offers
/// cost more victory points than the player holds.
pub fn resolve_leech(
    resources: &PlayerResourceState,
    opportunities: &[LeechOpportunity],
    decisions: &[bool],
) -> Result<LeechOutcome, RulesError> {
    if opportunities.len() != decisions.len() {
        return Err(RulesError::MalformedDecisionSet {
            expected: opportunities.len(),
            actual: decisions.len(),
        });
    }

    let mut power = resources.power;
    let mut power_gained = 0;
    let mut cost = 0i32;
    let mut accepted = 0;

    for (opportunity, _) in opportunities
        .iter()
        .zip(decisions)
        .filter(|(_, accept)| **accept)
    {
        let granted = opportunity.amount.min(power.gain_capacity());
        power = power.gain(granted);
        power_gained += granted;
        cost += granted.saturating_sub(1) as i32;
        accepted += 1;
    }

    if cost > resources.victory_points {
        return Err(RulesError::InsufficientVictoryPoints {
            required: cost,
            available: resources.victory_points,
        });
    }

    Ok(LeechOutcome {
        resources: PlayerResourceState {
            power,
            victory_points: resources.victory_points - cost,
            ..*resources
        },
        power_gained,
        victory_point_cost: cost,
        accepted,
    })
}
