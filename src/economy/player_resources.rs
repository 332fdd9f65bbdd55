//! A player's resource holdings.

use serde::{Deserialize, Serialize};

use super::power::PowerBowlState;
use super::resource::{ResourceDelta, ResourceType};
use crate::error::RulesError;

/// Priests a player can hold in hand, on the board, or in supply combined.
pub const PRIEST_POOL_SIZE: i32 = 7;

/// Coins, workers, priests, victory points and power bowls of one player.
///
/// Scalars are signed so that a multi-stage submission can pass through a
/// negative intermediate value. The transition engine rejects any
/// submission that leaves a negative scalar behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerResourceState {
    pub coins: i32,
    pub workers: i32,
    pub priests: i32,
    /// Priests not yet permanently placed on a cult track.
    pub priest_pool_size: i32,
    pub victory_points: i32,
    pub power: PowerBowlState,
}

impl Default for PlayerResourceState {
    fn default() -> Self {
        Self {
            coins: 0,
            workers: 0,
            priests: 0,
            priest_pool_size: PRIEST_POOL_SIZE,
            victory_points: 0,
            power: PowerBowlState::default(),
        }
    }
}

impl PlayerResourceState {
    /// Starting holdings: the given bowls plus a starting bundle.
    ///
    /// The bundle's power component is ignored; starting power is expressed
    /// through the bowls.
    #[must_use]
    pub fn starting(power: PowerBowlState, bundle: ResourceDelta) -> Self {
        Self {
            coins: bundle.coins,
            workers: bundle.workers,
            priests: bundle.priests.min(PRIEST_POOL_SIZE),
            priest_pool_size: PRIEST_POOL_SIZE,
            victory_points: bundle.victory_points,
            power,
        }
    }

    /// Get the quantity of one resource. Power reports spendable power.
    #[must_use]
    pub fn get(&self, resource: ResourceType) -> i32 {
        match resource {
            ResourceType::Coins => self.coins,
            ResourceType::Workers => self.workers,
            ResourceType::Priests => self.priests,
            ResourceType::Power => self.power.available_power() as i32,
            ResourceType::VictoryPoints => self.victory_points,
        }
    }

    /// Fold a delta into the holdings.
    ///
    /// Positive power is gained (clamped by the bowls), negative power is
    /// spent and fails with `InsufficientPower` if unavailable. Priests are
    /// clamped to the pool size. Other scalars may go negative but not
    /// leave the `i32` range.
    pub fn apply(&self, delta: &ResourceDelta) -> Result<Self, RulesError> {
        let power = match delta.power {
            p if p > 0 => self.power.gain(p.unsigned_abs()),
            p if p < 0 => self.power.spend(p.unsigned_abs())?,
            _ => self.power,
        };
        let add = |resource: ResourceType, held: i32| {
            held.checked_add(delta.get(resource))
                .ok_or(RulesError::ResourceOverflow { resource })
        };

        Ok(Self {
            coins: add(ResourceType::Coins, self.coins)?,
            workers: add(ResourceType::Workers, self.workers)?,
            priests: add(ResourceType::Priests, self.priests)?.min(self.priest_pool_size),
            priest_pool_size: self.priest_pool_size,
            victory_points: add(ResourceType::VictoryPoints, self.victory_points)?,
            power,
        })
    }

    /// Pay a cost expressed with positive quantities.
    pub fn pay(&self, cost: &ResourceDelta) -> Result<Self, RulesError> {
        self.apply(&-*cost)
    }

    /// Check if a cost (positive quantities) can be paid without any scalar
    /// going negative.
    #[must_use]
    pub fn can_afford(&self, cost: &ResourceDelta) -> bool {
        self.coins >= cost.coins
            && self.workers >= cost.workers
            && self.priests >= cost.priests
            && self.victory_points >= cost.victory_points
            && self.power.available_power() as i32 >= cost.power
    }

    /// Place one priest permanently, shrinking the pool.
    #[must_use]
    pub fn retire_priest(&self) -> Self {
        Self {
            priest_pool_size: self.priest_pool_size - 1,
            ..*self
        }
    }

    /// The first scalar that is negative, if any.
    #[must_use]
    pub fn first_negative(&self) -> Option<(ResourceType, i32)> {
        [
            (ResourceType::Coins, self.coins),
            (ResourceType::Workers, self.workers),
            (ResourceType::Priests, self.priests),
            (ResourceType::VictoryPoints, self.victory_points),
        ]
        .into_iter()
        .find(|(_, amount)| *amount < 0)
    }

    /// Check if every scalar is non-negative.
    #[must_use]
    pub fn is_nonnegative(&self) -> bool {
        self.first_negative().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdings() -> PlayerResourceState {
        PlayerResourceState::starting(
            PowerBowlState::new(5, 7, 0),
            ResourceDelta::new().coins(15).workers(3).victory_points(20),
        )
    }

    #[test]
    fn test_starting() {
        let state = holdings();

        assert_eq!(state.coins, 15);
        assert_eq!(state.workers, 3);
        assert_eq!(state.priests, 0);
        assert_eq!(state.victory_points, 20);
        assert_eq!(state.get(ResourceType::Power), 3);
    }

    #[test]
    fn test_apply_gain_and_spend() {
        let state = holdings();

        let gained = state
            .apply(&ResourceDelta::new().coins(2).power(5))
            .unwrap();
        assert_eq!(gained.coins, 17);
        assert_eq!(gained.power, PowerBowlState::new(0, 12, 0));

        let spent = gained.apply(&ResourceDelta::new().power(-3)).unwrap();
        assert_eq!(spent.power, PowerBowlState::new(0, 6, 0));
    }

    #[test]
    fn test_apply_may_go_negative() {
        let state = holdings().pay(&ResourceDelta::new().coins(20)).unwrap();

        assert_eq!(state.coins, -5);
        assert!(!state.is_nonnegative());
        assert_eq!(state.first_negative(), Some((ResourceType::Coins, -5)));
    }

    #[test]
    fn test_apply_rejects_counter_overflow() {
        let err = holdings()
            .apply(&ResourceDelta::new().workers(-1).coins(i32::MAX))
            .unwrap_err();

        assert_eq!(
            err,
            RulesError::ResourceOverflow {
                resource: ResourceType::Coins
            }
        );
    }

    #[test]
    fn test_apply_insufficient_power() {
        let err = holdings()
            .apply(&ResourceDelta::new().power(-4))
            .unwrap_err();
        assert_eq!(
            err,
            RulesError::InsufficientPower {
                requested: 4,
                available: 3
            }
        );
    }

    #[test]
    fn test_priests_clamp_to_pool() {
        let state = holdings()
            .retire_priest()
            .apply(&ResourceDelta::new().priests(9))
            .unwrap();

        assert_eq!(state.priest_pool_size, 6);
        assert_eq!(state.priests, 6);
    }

    #[test]
    fn test_can_afford() {
        let state = holdings();

        assert!(state.can_afford(&ResourceDelta::new().coins(15).workers(3)));
        assert!(!state.can_afford(&ResourceDelta::new().coins(16)));
        assert!(state.can_afford(&ResourceDelta::new().power(3)));
        assert!(!state.can_afford(&ResourceDelta::new().power(4)));
    }
}
