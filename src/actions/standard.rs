//! Actions every player has on their turn.

use super::build::{self, SpadeUse, Transform};
use super::step::Step;
use super::ActionExecution;
use crate::core::{LocationId, TileId};
use crate::economy::ResourceDelta;
use crate::entities::{
    Cult, EventType, Structure, StructureType, TileType, CULT_TRACK_TOP, PRIEST_SLOT_STEPS,
};
use crate::rules::Phase;
use crate::state::GameState;

pub(crate) fn transform_and_build_executions(state: &GameState) -> Vec<ActionExecution> {
    build::transform_options(state, state.active_player(), SpadeUse::Paid)
        .into_iter()
        .map(ActionExecution::TransformAndBuild)
        .collect()
}

pub(crate) fn compute_transform_and_build(state: &GameState, transform: &Transform) -> Step {
    let mut step = Step::new(match transform.terrain {
        Some(terrain) if transform.build_dwelling => {
            format!("transform {} to {terrain:?} and build a dwelling", transform.location)
        }
        Some(terrain) => format!("transform {} to {terrain:?}", transform.location),
        None => format!("build a dwelling on {}", transform.location),
    });
    build::apply_transform(
        state,
        state.active_player(),
        transform,
        SpadeUse::Paid,
        &mut step,
    );
    step
}

pub(crate) fn advance_dig_executions(state: &GameState) -> Vec<ActionExecution> {
    let player = state.active_player();
    let Some(faction) = state.faction_of(player) else {
        return Vec::new();
    };
    let player_state = &state.player(player).state;
    if player_state.dig_level < faction.max_dig_level
        && player_state.resources.can_afford(&faction.dig_advance_cost)
    {
        vec![ActionExecution::AdvanceDig]
    } else {
        Vec::new()
    }
}

pub(crate) fn compute_advance_dig(state: &GameState) -> Step {
    let player = state.active_player();
    let faction = state
        .faction_of(player)
        .expect("Faction not chosen before advancing digging");

    let mut step = Step::new("advance digging");
    step.resource_delta = state.config().dig_advance_reward - faction.dig_advance_cost;
    step.dig_levels = 1;
    step
}

pub(crate) fn advance_ship_executions(state: &GameState) -> Vec<ActionExecution> {
    let player = state.active_player();
    let Some(faction) = state.faction_of(player) else {
        return Vec::new();
    };
    let player_state = &state.player(player).state;
    if player_state.ship_level < faction.max_ship_level
        && player_state.resources.can_afford(&faction.shipping_advance_cost)
    {
        vec![ActionExecution::AdvanceShip]
    } else {
        Vec::new()
    }
}

pub(crate) fn compute_advance_ship(state: &GameState) -> Step {
    let player = state.active_player();
    let faction = state
        .faction_of(player)
        .expect("Faction not chosen before advancing shipping");
    let rewards = &state.config().ship_advance_rewards;
    let level = usize::from(state.player(player).state.ship_level);
    let reward = rewards
        .get(level)
        .or_else(|| rewards.last())
        .copied()
        .unwrap_or_default();

    let mut step = Step::new("advance shipping");
    step.resource_delta = reward - faction.shipping_advance_cost;
    step.ship_levels = 1;
    step
}

pub(crate) fn upgrade_executions(state: &GameState) -> Vec<ActionExecution> {
    let player = state.active_player();
    let Some(faction) = state.faction_of(player) else {
        return Vec::new();
    };
    let player_state = &state.player(player).state;
    let structures = &player_state.structures;

    let mut executions = Vec::new();
    for structure in structures.iter() {
        for &to in structure.structure_type.upgrades() {
            if structures.count(to) >= to.supply() {
                continue;
            }
            let cost = faction.cost_of(to, state.has_neighbours(player, structure.location));
            if player_state.resources.can_afford(&cost) {
                executions.push(ActionExecution::Upgrade {
                    location: structure.location,
                    to,
                });
            }
        }
    }
    executions
}

pub(crate) fn compute_upgrade(state: &GameState, location: LocationId, to: StructureType) -> Step {
    let player = state.active_player();
    let faction = state
        .faction_of(player)
        .expect("Faction not chosen before upgrading");

    let mut step = Step::new(format!("upgrade {location} to {to:?}"));
    step.resource_delta -= faction.cost_of(to, state.has_neighbours(player, location));
    step.resource_delta += build::event_rewards(state, player, &[EventType::built(to)]);
    if matches!(to, StructureType::Temple | StructureType::Sanctuary) {
        step.new_tile_decisions.push(Phase::SelectFavorTile);
    }
    build::place_structure(state, player, Structure::new(to, location), &mut step);
    step
}

pub(crate) fn send_priest_executions(state: &GameState) -> Vec<ActionExecution> {
    let player = state.active_player();
    let player_state = &state.player(player).state;
    if player_state.resources.priests < 1 {
        return Vec::new();
    }

    let mut executions = Vec::new();
    for cult in Cult::ALL {
        if player_state.cult.get(cult) >= CULT_TRACK_TOP {
            continue;
        }
        let mut seen_steps = Vec::new();
        for (slot, steps) in state.cult_board().free_slots(cult) {
            if !seen_steps.contains(&steps) {
                seen_steps.push(steps);
                executions.push(ActionExecution::SendPriest {
                    cult,
                    slot: Some(slot),
                });
            }
        }
        executions.push(ActionExecution::SendPriest { cult, slot: None });
    }
    executions
}

pub(crate) fn compute_send_priest(cult: Cult, slot: Option<u8>) -> Step {
    let steps = slot.map_or(1, |s| PRIEST_SLOT_STEPS[s as usize]);
    let mut step = Step::new(match slot {
        Some(s) => format!("send a priest to {cult:?} slot {s}"),
        None => format!("send a priest to {cult:?} and return it"),
    });
    step.resource_delta = ResourceDelta::new().priests(-1);
    step.cult_delta = step.cult_delta.steps(cult, steps);
    step.priest_slot = slot.map(|s| (cult, s));
    step
}

pub(crate) fn pass_executions(state: &GameState) -> Vec<ActionExecution> {
    if state.is_final_round() {
        return vec![ActionExecution::Pass { bonus_tile: None }];
    }
    state
        .pool()
        .distinct(TileType::Bonus)
        .into_iter()
        .map(|tile| ActionExecution::Pass {
            bonus_tile: Some(tile),
        })
        .collect()
}

pub(crate) fn compute_pass(state: &GameState, bonus_tile: Option<&TileId>) -> Step {
    let player = state.active_player();
    let player_state = &state.player(player).state;

    let mut step = Step::new(match bonus_tile {
        Some(tile) => format!("pass and take {tile}"),
        None => "pass".to_string(),
    });
    step.passed = true;

    let points: i32 = state
        .held_tiles(player)
        .filter_map(|t| t.pass_trigger.as_ref())
        .map(|trigger| trigger.score(&player_state.structures, player_state.ship_level))
        .sum();
    step.resource_delta.victory_points += points;

    if let Some(tile) = bonus_tile {
        step.returned_tile = player_state.tiles.bonus_tiles.front().cloned();
        step.new_tiles.push(tile.clone());
    }
    step
}
