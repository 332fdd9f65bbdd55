//! Resource conversions.
//!
//! A `Conversion` asks for `quantity` units of `to`, paid for with
//! `quantity × rate` units of `from`. Rates come from a `ConversionTable`
//! keyed by `(from, to)`; factions may carry their own table, otherwise the
//! default table of the ruleset applies. Pairs missing from the table are
//! rejected.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::resource::{ResourceDelta, ResourceType};
use crate::error::RulesError;

/// One exchange request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conversion {
    pub from: ResourceType,
    pub to: ResourceType,
    /// Units of `to` produced.
    pub quantity: u32,
}

impl Conversion {
    /// Create a conversion request.
    #[must_use]
    pub const fn new(from: ResourceType, to: ResourceType, quantity: u32) -> Self {
        Self { from, to, quantity }
    }

    /// The delta this conversion applies under `table`.
    ///
    /// Fails with `NoSuchConversion` if the table has no rate for the pair
    /// and with `InvalidConversionQuantity` if the quantity or its cost does
    /// not fit a resource counter.
    pub fn resource_delta(&self, table: &ConversionTable) -> Result<ResourceDelta, RulesError> {
        let rate = table.rate(self.from, self.to).ok_or(RulesError::NoSuchConversion {
            from: self.from,
            to: self.to,
        })?;

        let invalid = || RulesError::InvalidConversionQuantity {
            from: self.from,
            to: self.to,
            quantity: self.quantity,
        };
        let quantity = i32::try_from(self.quantity).map_err(|_| invalid())?;
        let cost = quantity.checked_mul(rate).ok_or_else(invalid)?;
        Ok(ResourceDelta::of(self.to, quantity) - ResourceDelta::of(self.from, cost))
    }
}

/// One table row: `rate` units of `from` buy one unit of `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRate {
    pub from: ResourceType,
    pub to: ResourceType,
    pub rate: i32,
}

/// Conversion rates keyed by `(from, to)`.
///
/// Serialized as a list of rows since JSON object keys must be strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ConversionRate>", into = "Vec<ConversionRate>")]
pub struct ConversionTable {
    rates: FxHashMap<(ResourceType, ResourceType), i32>,
}

impl ConversionTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard exchange rates.
    ///
    /// - 5 power → 1 priest
    /// - 3 power → 1 worker
    /// - 1 power → 1 coin
    /// - 1 priest → 1 worker
    /// - 1 priest → 1 coin
    /// - 1 worker → 1 coin
    #[must_use]
    pub fn standard() -> Self {
        use ResourceType::*;

        Self::new()
            .with_rate(Power, Priests, 5)
            .with_rate(Power, Workers, 3)
            .with_rate(Power, Coins, 1)
            .with_rate(Priests, Workers, 1)
            .with_rate(Priests, Coins, 1)
            .with_rate(Workers, Coins, 1)
    }

    /// Add or replace a rate.
    #[must_use]
    pub fn with_rate(mut self, from: ResourceType, to: ResourceType, rate: i32) -> Self {
        self.rates.insert((from, to), rate);
        self
    }

    /// Get the rate for a pair.
    #[must_use]
    pub fn rate(&self, from: ResourceType, to: ResourceType) -> Option<i32> {
        self.rates.get(&(from, to)).copied()
    }

    /// Number of pairs in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<Vec<ConversionRate>> for ConversionTable {
    fn from(rows: Vec<ConversionRate>) -> Self {
        rows.into_iter()
            .fold(Self::new(), |table, row| table.with_rate(row.from, row.to, row.rate))
    }
}

impl From<ConversionTable> for Vec<ConversionRate> {
    fn from(table: ConversionTable) -> Self {
        let mut rows: Vec<ConversionRate> = table
            .rates
            .into_iter()
            .map(|((from, to), rate)| ConversionRate { from, to, rate })
            .collect();
        rows.sort_by_key(|row| (row.from, row.to));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ResourceType::*;

    #[test]
    fn test_power_to_priest() {
        let delta = Conversion::new(Power, Priests, 1)
            .resource_delta(&ConversionTable::standard())
            .unwrap();

        assert_eq!(delta, ResourceDelta::new().power(-5).priests(1));
    }

    #[test]
    fn test_quantity_scales_cost() {
        let delta = Conversion::new(Workers, Coins, 3)
            .resource_delta(&ConversionTable::standard())
            .unwrap();

        assert_eq!(delta, ResourceDelta::new().workers(-3).coins(3));
    }

    #[test]
    fn test_unknown_pair() {
        let err = Conversion::new(Coins, Priests, 1)
            .resource_delta(&ConversionTable::standard())
            .unwrap_err();

        assert_eq!(
            err,
            RulesError::NoSuchConversion {
                from: Coins,
                to: Priests
            }
        );
    }

    #[test]
    fn test_priest_to_coin() {
        let delta = Conversion::new(Priests, Coins, 2)
            .resource_delta(&ConversionTable::standard())
            .unwrap();

        assert_eq!(delta, ResourceDelta::new().priests(-2).coins(2));
    }

    #[test]
    fn test_oversized_quantity_rejected() {
        let table = ConversionTable::standard();

        // does not fit an i32
        let err = Conversion::new(Workers, Coins, u32::MAX)
            .resource_delta(&table)
            .unwrap_err();
        assert_eq!(
            err,
            RulesError::InvalidConversionQuantity {
                from: Workers,
                to: Coins,
                quantity: u32::MAX
            }
        );

        // fits, but the cost overflows
        let err = Conversion::new(Power, Priests, 1_000_000_000)
            .resource_delta(&table)
            .unwrap_err();
        assert!(matches!(
            err,
            RulesError::InvalidConversionQuantity {
                quantity: 1_000_000_000,
                ..
            }
        ));
    }

    #[test]
    fn test_faction_table_extends_standard() {
        let table = ConversionTable::standard().with_rate(VictoryPoints, Coins, 1);

        assert_eq!(table.len(), 7);
        let delta = Conversion::new(VictoryPoints, Coins, 2).resource_delta(&table).unwrap();
        assert_eq!(delta, ResourceDelta::new().victory_points(-2).coins(2));
    }

    #[test]
    fn test_table_serialization() {
        let table = ConversionTable::standard();
        let json = serde_json::to_string(&table).unwrap();
        let deserialized: ConversionTable = serde_json::from_str(&json).unwrap();

        assert_eq!(table, deserialized);
    }
}
