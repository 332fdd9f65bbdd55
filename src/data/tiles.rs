//! Standard round, bonus, favor and town tiles.

use smallvec::smallvec;

use crate::core::{ActionId, TileId};
use crate::economy::ResourceDelta;
use crate::entities::{
    Cult, CultBonus, CultDelta, EventTrigger, EventType, PassTrigger, SpecialAbility,
    SpecialEffect, StructureType, Tile, TileType,
};

fn vp(points: i32) -> ResourceDelta {
    ResourceDelta::new().victory_points(points)
}

fn round(
    id: &'static str,
    trigger: EventTrigger,
    cult: Cult,
    steps: u8,
    bonus_resources: ResourceDelta,
    bonus_spades: u8,
) -> Tile {
    Tile::new(TileId::new(id), TileType::Round)
        .with_event_trigger(trigger)
        .with_cult_bonus(CultBonus {
            cult,
            steps,
            bonus_resources,
            bonus_spades,
        })
}

/// Round tiles. Six are drawn for a game.
#[must_use]
pub fn round_tiles() -> Vec<Tile> {
    let big = EventTrigger {
        listens_for: smallvec![EventType::BuildStronghold, EventType::BuildSanctuary],
        provides: vp(5),
    };

    vec![
        round(
            "SCORE1",
            EventTrigger::on(EventType::Dig, vp(2)),
            Cult::Earth,
            1,
            ResourceDelta::new().coins(1),
            0,
        ),
        round(
            "SCORE2",
            EventTrigger::on(EventType::FoundTown, vp(5)),
            Cult::Earth,
            4,
            ResourceDelta::ZERO,
            1,
        ),
        round(
            "SCORE3",
            EventTrigger::on(EventType::BuildDwelling, vp(2)),
            Cult::Water,
            4,
            ResourceDelta::new().priests(1),
            0,
        ),
        round(
            "SCORE4",
            big.clone(),
            Cult::Fire,
            2,
            ResourceDelta::new().workers(1),
            0,
        ),
        round(
            "SCORE5",
            EventTrigger::on(EventType::BuildDwelling, vp(2)),
            Cult::Fire,
            4,
            ResourceDelta::new().power(4),
            0,
        ),
        round(
            "SCORE6",
            EventTrigger::on(EventType::BuildTradingPost, vp(3)),
            Cult::Air,
            4,
            ResourceDelta::ZERO,
            1,
        ),
        round(
            "SCORE7",
            big,
            Cult::Air,
            2,
            ResourceDelta::new().workers(1),
            0,
        ),
        round(
            "SCORE8",
            EventTrigger::on(EventType::BuildTradingPost, vp(3)),
            Cult::Water,
            4,
            ResourceDelta::ZERO,
            1,
        ),
    ]
}

/// Bonus tiles. Player count plus three are drawn for a game.
#[must_use]
pub fn bonus_tiles() -> Vec<Tile> {
    let bonus = |id: &'static str| Tile::new(TileId::new(id), TileType::Bonus);

    vec![
        bonus("BON1")
            .with_action(SpecialAbility::new(
                ActionId::new("BON1"),
                SpecialEffect::Spades(1),
            ))
            .with_income(ResourceDelta::new().coins(2)),
        bonus("BON2")
            .with_action(SpecialAbility::new(
                ActionId::new("BON2"),
                SpecialEffect::CultSteps(1),
            ))
            .with_income(ResourceDelta::new().coins(4)),
        bonus("BON3").with_income(ResourceDelta::new().coins(6)),
        bonus("BON4")
            .with_shipping_modifier(1)
            .with_income(ResourceDelta::new().power(3)),
        bonus("BON5").with_income(ResourceDelta::new().workers(1).power(3)),
        bonus("BON6")
            .with_pass_trigger(PassTrigger::Structures {
                types: smallvec![StructureType::Stronghold, StructureType::Sanctuary],
                victory_points: 4,
            })
            .with_income(ResourceDelta::new().workers(2)),
        bonus("BON7")
            .with_pass_trigger(PassTrigger::Structures {
                types: smallvec![StructureType::TradingPost],
                victory_points: 2,
            })
            .with_income(ResourceDelta::new().workers(1)),
        bonus("BON8").with_income(ResourceDelta::new().priests(1)),
        bonus("BON9")
            .with_pass_trigger(PassTrigger::Structures {
                types: smallvec![StructureType::Dwelling],
                victory_points: 1,
            })
            .with_income(ResourceDelta::new().coins(2)),
    ]
}

/// Favor tiles. The three-step tiles exist once, the others three times.
#[must_use]
pub fn favor_tiles() -> Vec<Tile> {
    let favor = |id: &'static str, cult: Cult, steps: u8| {
        let tile = Tile::new(TileId::new(id), TileType::Favor)
            .with_immediate_cult(CultDelta::new().steps(cult, steps));
        if steps == 3 {
            tile
        } else {
            tile.with_copies(3)
        }
    };

    vec![
        favor("FAV1", Cult::Fire, 3),
        favor("FAV2", Cult::Water, 3),
        favor("FAV3", Cult::Earth, 3),
        favor("FAV4", Cult::Air, 3),
        favor("FAV5", Cult::Fire, 2).with_town_power_modifier(1),
        favor("FAV6", Cult::Water, 2).with_action(SpecialAbility::new(
            ActionId::new("FAV6"),
            SpecialEffect::CultSteps(1),
        )),
        favor("FAV7", Cult::Earth, 2).with_income(ResourceDelta::new().workers(1).power(1)),
        favor("FAV8", Cult::Air, 2).with_income(ResourceDelta::new().power(4)),
        favor("FAV9", Cult::Fire, 1).with_income(ResourceDelta::new().coins(3)),
        favor("FAV10", Cult::Water, 1)
            .with_event_trigger(EventTrigger::on(EventType::BuildTradingPost, vp(3))),
        favor("FAV11", Cult::Earth, 1)
            .with_event_trigger(EventTrigger::on(EventType::BuildDwelling, vp(2))),
        favor("FAV12", Cult::Air, 1).with_pass_trigger(PassTrigger::Structures {
            types: smallvec![StructureType::TradingPost],
            victory_points: 1,
        }),
    ]
}

/// Town tiles, two copies each.
#[must_use]
pub fn town_tiles() -> Vec<Tile> {
    let town = |id: &'static str, immediate: ResourceDelta| {
        Tile::new(TileId::new(id), TileType::Town)
            .with_immediate_resources(immediate)
            .with_copies(2)
    };

    vec![
        town("TW1", vp(5).coins(6)),
        town("TW2", vp(7).workers(2)),
        town("TW3", vp(9).priests(1)),
        town("TW4", vp(6).power(8)),
        town("TW5", vp(8)).with_immediate_cult(
            CultDelta::new()
                .steps(Cult::Fire, 1)
                .steps(Cult::Water, 1)
                .steps(Cult::Earth, 1)
                .steps(Cult::Air, 1),
        ),
    ]
}
