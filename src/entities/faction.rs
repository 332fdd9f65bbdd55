//! Faction definitions.
//!
//! A faction is static data: home terrain, building costs, income
//! schedules, conversion rates and the abilities that set it apart.
//! Players refer to their faction by `FactionId`; the definition lives in
//! `RulesConfig`.
//!
//! `Faction::new` fills in the standard values. Factions that differ
//! override them with the `with_*` methods.

use serde::{Deserialize, Serialize};

use super::ability::SpecialAbility;
use super::cult::CultDelta;
use super::structure::{PlayerStructureState, StructureType};
use crate::core::FactionId;
use crate::economy::{ConversionTable, PowerBowlState, ResourceDelta};
use crate::map::Terrain;

/// Static faction data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faction {
    pub id: FactionId,
    pub home_terrain: Terrain,

    pub starting_power: PowerBowlState,
    /// Coins, workers and priests at setup. Victory points come from the
    /// ruleset.
    pub starting_resources: ResourceDelta,
    pub starting_cult: CultDelta,
    pub starting_ship_level: u8,

    pub max_ship_level: u8,
    pub max_dig_level: u8,

    pub dwelling_cost: ResourceDelta,
    pub trading_post_cost_with_neighbours: ResourceDelta,
    pub trading_post_cost_without_neighbours: ResourceDelta,
    pub temple_cost: ResourceDelta,
    pub stronghold_cost: ResourceDelta,
    pub sanctuary_cost: ResourceDelta,

    pub shipping_advance_cost: ResourceDelta,
    pub dig_advance_cost: ResourceDelta,
    /// Workers per spade at dig level 0. Each dig level saves one.
    pub workers_per_spade: i32,

    /// Paid every round regardless of structures.
    pub base_income: ResourceDelta,
    /// Income of the n-th dwelling, trading post and temple built.
    pub dwelling_income: Vec<ResourceDelta>,
    pub trading_post_income: Vec<ResourceDelta>,
    pub temple_income: Vec<ResourceDelta>,
    pub stronghold_income: ResourceDelta,
    pub sanctuary_income: ResourceDelta,

    pub conversion_rates: ConversionTable,

    /// Places its single initial dwelling after everyone else.
    pub place_last: bool,
    /// Places a third initial dwelling after the second round of placement.
    pub extra_initial_dwelling: bool,
    /// Gains a cult step when any neighbour accepts a leech offer it caused.
    pub cultist_bonus: bool,

    /// Unlocked by building the stronghold.
    pub stronghold_action: Option<SpecialAbility>,
}

impl Default for Faction {
    fn default() -> Self {
        let worker = ResourceDelta::new().workers(1);
        let mut dwelling_income = vec![worker; 7];
        dwelling_income.push(ResourceDelta::ZERO);

        Self {
            id: FactionId::default(),
            home_terrain: Terrain::Plains,
            starting_power: PowerBowlState::new(5, 7, 0),
            starting_resources: ResourceDelta::new().coins(15).workers(3),
            starting_cult: CultDelta::new(),
            starting_ship_level: 0,
            max_ship_level: 3,
            max_dig_level: 2,
            dwelling_cost: ResourceDelta::new().coins(2).workers(1),
            trading_post_cost_with_neighbours: ResourceDelta::new().coins(3).workers(2),
            trading_post_cost_without_neighbours: ResourceDelta::new().coins(6).workers(2),
            temple_cost: ResourceDelta::new().coins(5).workers(2),
            stronghold_cost: ResourceDelta::new().coins(6).workers(4),
            sanctuary_cost: ResourceDelta::new().coins(6).workers(4),
            shipping_advance_cost: ResourceDelta::new().coins(4).priests(1),
            dig_advance_cost: ResourceDelta::new().coins(5).workers(2).priests(1),
            workers_per_spade: 3,
            base_income: worker,
            dwelling_income,
            trading_post_income: vec![
                ResourceDelta::new().coins(2).power(1),
                ResourceDelta::new().coins(2).power(1),
                ResourceDelta::new().coins(2).power(2),
                ResourceDelta::new().coins(2).power(2),
            ],
            temple_income: vec![ResourceDelta::new().priests(1); 3],
            stronghold_income: ResourceDelta::new().power(2),
            sanctuary_income: ResourceDelta::new().priests(1),
            conversion_rates: ConversionTable::standard(),
            place_last: false,
            extra_initial_dwelling: false,
            cultist_bonus: false,
            stronghold_action: None,
        }
    }
}

impl Faction {
    /// A faction with standard values.
    #[must_use]
    pub fn new(id: impl Into<FactionId>, home_terrain: Terrain) -> Self {
        Self {
            id: id.into(),
            home_terrain,
            ..Self::default()
        }
    }

    /// Set the starting bowls.
    #[must_use]
    pub fn with_starting_power(mut self, power: PowerBowlState) -> Self {
        self.starting_power = power;
        self
    }

    /// Set the starting coins, workers and priests.
    #[must_use]
    pub fn with_starting_resources(mut self, resources: ResourceDelta) -> Self {
        self.starting_resources = resources;
        self
    }

    /// Set the starting cult positions.
    #[must_use]
    pub fn with_starting_cult(mut self, cult: CultDelta) -> Self {
        self.starting_cult = cult;
        self
    }

    /// Set the starting shipping level.
    #[must_use]
    pub fn with_starting_ship_level(mut self, level: u8) -> Self {
        self.starting_ship_level = level;
        self
    }

    /// Set the cost of one structure type.
    #[must_use]
    pub fn with_cost(mut self, structure_type: StructureType, cost: ResourceDelta) -> Self {
        match structure_type {
            StructureType::Dwelling => self.dwelling_cost = cost,
            StructureType::TradingPost => {
                self.trading_post_cost_with_neighbours = cost;
                self.trading_post_cost_without_neighbours = cost;
            }
            StructureType::Temple => self.temple_cost = cost,
            StructureType::Stronghold => self.stronghold_cost = cost,
            StructureType::Sanctuary => self.sanctuary_cost = cost,
        }
        self
    }

    /// Set the highest shipping level.
    #[must_use]
    pub fn with_max_ship_level(mut self, level: u8) -> Self {
        self.max_ship_level = level;
        self
    }

    /// Set the cost of one dig advance.
    #[must_use]
    pub fn with_dig_advance_cost(mut self, cost: ResourceDelta) -> Self {
        self.dig_advance_cost = cost;
        self
    }

    /// Set the stronghold income.
    #[must_use]
    pub fn with_stronghold_income(mut self, income: ResourceDelta) -> Self {
        self.stronghold_income = income;
        self
    }

    /// Set the conversion table.
    #[must_use]
    pub fn with_conversion_rates(mut self, rates: ConversionTable) -> Self {
        self.conversion_rates = rates;
        self
    }

    /// Place the single initial dwelling last.
    #[must_use]
    pub fn with_place_last(mut self) -> Self {
        self.place_last = true;
        self
    }

    /// Place a third initial dwelling.
    #[must_use]
    pub fn with_extra_initial_dwelling(mut self) -> Self {
        self.extra_initial_dwelling = true;
        self
    }

    /// Gain cult steps from accepted leech offers.
    #[must_use]
    pub fn with_cultist_bonus(mut self) -> Self {
        self.cultist_bonus = true;
        self
    }

    /// Set the stronghold special action.
    #[must_use]
    pub fn with_stronghold_action(mut self, action: SpecialAbility) -> Self {
        self.stronghold_action = Some(action);
        self
    }

    /// Cost of building `structure_type`. `has_neighbours` matters only for
    /// trading posts.
    #[must_use]
    pub fn cost_of(&self, structure_type: StructureType, has_neighbours: bool) -> ResourceDelta {
        match structure_type {
            StructureType::Dwelling => self.dwelling_cost,
            StructureType::TradingPost if has_neighbours => self.trading_post_cost_with_neighbours,
            StructureType::TradingPost => self.trading_post_cost_without_neighbours,
            StructureType::Temple => self.temple_cost,
            StructureType::Stronghold => self.stronghold_cost,
            StructureType::Sanctuary => self.sanctuary_cost,
        }
    }

    /// Workers for one spade at `dig_level`.
    #[must_use]
    pub fn spade_cost(&self, dig_level: u8) -> ResourceDelta {
        ResourceDelta::new().workers((self.workers_per_spade - i32::from(dig_level)).max(1))
    }

    /// Round income from structures.
    #[must_use]
    pub fn income(&self, structures: &PlayerStructureState) -> ResourceDelta {
        let schedule = |table: &[ResourceDelta], count: usize| -> ResourceDelta {
            table.iter().take(count).copied().sum()
        };

        let mut income = self.base_income;
        income += schedule(&self.dwelling_income, structures.count(StructureType::Dwelling));
        income += schedule(
            &self.trading_post_income,
            structures.count(StructureType::TradingPost),
        );
        income += schedule(&self.temple_income, structures.count(StructureType::Temple));
        if structures.count(StructureType::Stronghold) > 0 {
            income += self.stronghold_income;
        }
        if structures.count(StructureType::Sanctuary) > 0 {
            income += self.sanctuary_income;
        }
        income
    }
}
