//! Resource bundles.
//!
//! `ResourceDelta` is a signed bundle of the five resources. Deltas form an
//! abelian group: addition is componentwise, negation flips every sign, and
//! the default value is the identity. The same type is used for costs
//! (positive numbers, subtracted) and gains (added).
//!
//! ```
//! use terra_rules::economy::ResourceDelta;
//!
//! let dwelling = ResourceDelta::new().coins(2).workers(1);
//! let income = ResourceDelta::new().workers(1).power(2);
//!
//! assert_eq!(dwelling + income - income, dwelling);
//! assert!((dwelling + -dwelling).is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// One of the five exchangeable resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceType {
    Coins,
    Workers,
    Priests,
    Power,
    VictoryPoints,
}

impl ResourceType {
    /// All resource types, in bundle order.
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Coins,
        ResourceType::Workers,
        ResourceType::Priests,
        ResourceType::Power,
        ResourceType::VictoryPoints,
    ];
}

/// Signed quantities of every resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDelta {
    #[serde(default)]
    pub coins: i32,
    #[serde(default)]
    pub workers: i32,
    #[serde(default)]
    pub priests: i32,
    #[serde(default)]
    pub power: i32,
    #[serde(default)]
    pub victory_points: i32,
}

impl ResourceDelta {
    /// The zero delta.
    pub const ZERO: ResourceDelta = ResourceDelta {
        coins: 0,
        workers: 0,
        priests: 0,
        power: 0,
        victory_points: 0,
    };

    /// Create a zero delta, for use with the builder methods.
    #[must_use]
    pub const fn new() -> Self {
        Self::ZERO
    }

    /// A delta holding `amount` of a single resource.
    #[must_use]
    pub fn of(resource: ResourceType, amount: i32) -> Self {
        let mut delta = Self::ZERO;
        *delta.get_mut(resource) = amount;
        delta
    }

    /// Set coins.
    #[must_use]
    pub const fn coins(mut self, amount: i32) -> Self {
        self.coins = amount;
        self
    }

    /// Set workers.
    #[must_use]
    pub const fn workers(mut self, amount: i32) -> Self {
        self.workers = amount;
        self
    }

    /// Set priests.
    #[must_use]
    pub const fn priests(mut self, amount: i32) -> Self {
        self.priests = amount;
        self
    }

    /// Set power.
    #[must_use]
    pub const fn power(mut self, amount: i32) -> Self {
        self.power = amount;
        self
    }

    /// Set victory points.
    #[must_use]
    pub const fn victory_points(mut self, amount: i32) -> Self {
        self.victory_points = amount;
        self
    }

    /// Get the quantity of one resource.
    #[must_use]
    pub fn get(&self, resource: ResourceType) -> i32 {
        match resource {
            ResourceType::Coins => self.coins,
            ResourceType::Workers => self.workers,
            ResourceType::Priests => self.priests,
            ResourceType::Power => self.power,
            ResourceType::VictoryPoints => self.victory_points,
        }
    }

    fn get_mut(&mut self, resource: ResourceType) -> &mut i32 {
        match resource {
            ResourceType::Coins => &mut self.coins,
            ResourceType::Workers => &mut self.workers,
            ResourceType::Priests => &mut self.priests,
            ResourceType::Power => &mut self.power,
            ResourceType::VictoryPoints => &mut self.victory_points,
        }
    }

    /// Check if every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for ResourceDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            coins: self.coins + rhs.coins,
            workers: self.workers + rhs.workers,
            priests: self.priests + rhs.priests,
            power: self.power + rhs.power,
            victory_points: self.victory_points + rhs.victory_points,
        }
    }
}

impl AddAssign for ResourceDelta {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Neg for ResourceDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            coins: -self.coins,
            workers: -self.workers,
            priests: -self.priests,
            power: -self.power,
            victory_points: -self.victory_points,
        }
    }
}

impl Sub for ResourceDelta {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl SubAssign for ResourceDelta {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for ResourceDelta {
    type Output = Self;

    fn mul(self, factor: i32) -> Self {
        Self {
            coins: self.coins * factor,
            workers: self.workers * factor,
            priests: self.priests * factor,
            power: self.power * factor,
            victory_points: self.victory_points * factor,
        }
    }
}

impl std::iter::Sum for ResourceDelta {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for ResourceDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = [
            (self.coins, "C"),
            (self.workers, "W"),
            (self.priests, "P"),
            (self.power, "PW"),
            (self.victory_points, "VP"),
        ]
        .iter()
        .filter(|(amount, _)| *amount != 0)
        .map(|(amount, label)| format!("{amount}{label}"))
        .collect();

        if parts.is_empty() {
            f.write_str("nothing")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}
