//! The three-bowl power model.
//!
//! Power tokens sit in three bowls. Gaining power moves tokens forward,
//! bowl one to bowl two first, then bowl two to bowl three. Spending power
//! returns tokens from bowl three to bowl one. A shortfall in bowl three can
//! be covered from bowl two at two tokens per power ("burning"); those
//! tokens leave the cycle.
//!
//! Gain never fails: anything beyond the remaining capacity is lost.
//!
//! ```
//! use terra_rules::economy::PowerBowlState;
//!
//! let bowls = PowerBowlState::new(3, 5, 4);
//! assert_eq!(bowls.gain(7), PowerBowlState::new(0, 4, 8));
//! assert_eq!(bowls.spend(3).unwrap(), PowerBowlState::new(6, 5, 1));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Token counts of the three power bowls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerBowlState {
    pub bowl_one: u32,
    pub bowl_two: u32,
    pub bowl_three: u32,
}

impl Default for PowerBowlState {
    fn default() -> Self {
        Self::new(12, 0, 0)
    }
}

impl PowerBowlState {
    /// Create bowls with the given token counts.
    #[must_use]
    pub const fn new(bowl_one: u32, bowl_two: u32, bowl_three: u32) -> Self {
        Self {
            bowl_one,
            bowl_two,
            bowl_three,
        }
    }

    /// Total tokens across all bowls.
    #[must_use]
    pub const fn num_tokens(&self) -> u32 {
        self.bowl_one + self.bowl_two + self.bowl_three
    }

    /// Power that could be spent right now, burning as much as needed.
    #[must_use]
    pub const fn available_power(&self) -> u32 {
        self.bowl_three + self.bowl_two / 2
    }

    /// Power that could still be gained before every token is in bowl three.
    #[must_use]
    pub const fn gain_capacity(&self) -> u32 {
        2 * self.bowl_one + self.bowl_two
    }

    /// Gain `power`, clamped to `gain_capacity`.
    #[must_use]
    pub fn gain(&self, power: u32) -> Self {
        let power = power.min(self.gain_capacity());

        let first = power.min(self.bowl_one);
        let second = (power - first).min(self.bowl_two + first);

        let next = Self {
            bowl_one: self.bowl_one - first,
            bowl_two: self.bowl_two + first - second,
            bowl_three: self.bowl_three + second,
        };
        debug_assert_eq!(next.num_tokens(), self.num_tokens(), "gain moved tokens out of the bowls");
        next
    }

    /// Spend `power`, burning from bowl two if bowl three runs short.
    ///
    /// Fails with `InsufficientPower` if `power` exceeds `available_power`.
    pub fn spend(&self, power: u32) -> Result<Self, RulesError> {
        let available = self.available_power();
        if power > available {
            return Err(RulesError::InsufficientPower {
                requested: power,
                available,
            });
        }

        let from_three = power.min(self.bowl_three);
        let shortfall = power - from_three;

        let next = Self {
            bowl_one: self.bowl_one + from_three,
            bowl_two: self.bowl_two - 2 * shortfall,
            bowl_three: self.bowl_three - from_three,
        };
        debug_assert_eq!(
            next.num_tokens() + 2 * shortfall,
            self.num_tokens(),
            "spend lost tokens beyond the burn"
        );
        Ok(next)
    }
}

impl std::fmt::Display for PowerBowlState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.bowl_one, self.bowl_two, self.bowl_three)
    }
}
