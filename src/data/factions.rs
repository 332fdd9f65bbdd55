//! Standard factions.

use crate::core::ActionId;
use crate::economy::{ConversionTable, PowerBowlState, ResourceDelta, ResourceType};
use crate::entities::{Cult, CultDelta, Faction, SpecialAbility, SpecialEffect, StructureType};
use crate::map::Terrain;

/// Stronghold action of the Witches.
pub const WITCHES_RIDE: ActionId = ActionId::new("SH-Witches");
/// Stronghold action of the Auren.
pub const AUREN_CULT: ActionId = ActionId::new("SH-Auren");
/// Stronghold action of the Chaos Magicians.
pub const CHAOS_DOUBLE_TURN: ActionId = ActionId::new("SH-ChaosMagicians");

/// The standard faction table.
#[must_use]
pub fn factions() -> Vec<Faction> {
    vec![
        Faction::new("Alchemists", Terrain::Swamp)
            .with_starting_cult(CultDelta::new().steps(Cult::Fire, 1).steps(Cult::Water, 1))
            .with_stronghold_income(ResourceDelta::new().coins(6))
            .with_conversion_rates(
                ConversionTable::standard()
                    .with_rate(ResourceType::VictoryPoints, ResourceType::Coins, 1)
                    .with_rate(ResourceType::Coins, ResourceType::VictoryPoints, 2),
            ),
        Faction::new("Witches", Terrain::Forest)
            .with_starting_cult(CultDelta::new().steps(Cult::Air, 2))
            .with_stronghold_action(SpecialAbility::new(WITCHES_RIDE, SpecialEffect::FreeDwelling)),
        Faction::new("ChaosMagicians", Terrain::Wasteland)
            .with_starting_resources(ResourceDelta::new().coins(15).workers(4))
            .with_starting_cult(CultDelta::new().steps(Cult::Fire, 2))
            .with_cost(StructureType::Stronghold, ResourceDelta::new().coins(4).workers(4))
            .with_place_last()
            .with_stronghold_action(SpecialAbility::new(CHAOS_DOUBLE_TURN, SpecialEffect::ExtraTurn)),
        Faction::new("Halflings", Terrain::Plains)
            .with_starting_cult(CultDelta::new().steps(Cult::Earth, 1).steps(Cult::Air, 1))
            .with_dig_advance_cost(ResourceDelta::new().coins(1).workers(2).priests(1)),
        Faction::new("Engineers", Terrain::Mountains)
            .with_starting_resources(ResourceDelta::new().coins(10).workers(2))
            .with_starting_power(PowerBowlState::new(3, 9, 0))
            .with_cost(StructureType::Dwelling, ResourceDelta::new().coins(1).workers(1))
            .with_cost(StructureType::TradingPost, ResourceDelta::new().coins(2).workers(1))
            .with_cost(StructureType::Temple, ResourceDelta::new().coins(4).workers(1))
            .with_cost(StructureType::Stronghold, ResourceDelta::new().coins(6).workers(3))
            .with_cost(StructureType::Sanctuary, ResourceDelta::new().coins(6).workers(3)),
        Faction::new("Nomads", Terrain::Desert)
            .with_starting_resources(ResourceDelta::new().coins(15).workers(2))
            .with_starting_cult(CultDelta::new().steps(Cult::Fire, 1).steps(Cult::Earth, 1))
            .with_extra_initial_dwelling(),
        Faction::new("Mermaids", Terrain::Lakes)
            .with_starting_power(PowerBowlState::new(3, 9, 0))
            .with_starting_cult(CultDelta::new().steps(Cult::Water, 2))
            .with_starting_ship_level(1)
            .with_max_ship_level(5),
        Faction::new("Cultists", Terrain::Plains)
            .with_starting_cult(CultDelta::new().steps(Cult::Fire, 1).steps(Cult::Earth, 1))
            .with_cost(StructureType::Stronghold, ResourceDelta::new().coins(8).workers(4))
            .with_cultist_bonus(),
        Faction::new("Auren", Terrain::Forest)
            .with_starting_cult(CultDelta::new().steps(Cult::Water, 1).steps(Cult::Air, 1))
            .with_stronghold_action(SpecialAbility::new(AUREN_CULT, SpecialEffect::CultSteps(2))),
    ]
}
