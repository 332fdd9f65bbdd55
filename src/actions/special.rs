//! Special actions from strongholds and tiles.

use serde::{Deserialize, Serialize};

use super::build::{self, SpadeUse, Transform};
use super::step::Step;
use super::ActionExecution;
use crate::core::{ActionId, LocationId};
use crate::entities::{
    Cult, CultDelta, EventType, SpecialAbility, SpecialEffect, Structure, StructureType,
    CULT_TRACK_TOP,
};
use crate::state::{ActionSlot, GameState};

/// The choice attached to a special action execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialTarget {
    None,
    Cult(Cult),
    Transform(Transform),
    Dwelling(LocationId),
}

pub(crate) fn executions(state: &GameState, ability: &SpecialAbility) -> Vec<ActionExecution> {
    let player = state.active_player();
    if state.is_expended(&ActionSlot::owned(ability.id.clone(), player)) {
        return Vec::new();
    }
    let execution = |target| ActionExecution::Special {
        id: ability.id.clone(),
        target,
    };
    let player_state = &state.player(player).state;

    match ability.effect {
        SpecialEffect::ExtraTurn => vec![execution(SpecialTarget::None)],
        SpecialEffect::Spades(spades) => {
            build::transform_options(state, player, SpadeUse::Free(spades))
                .into_iter()
                .map(|t| execution(SpecialTarget::Transform(t)))
                .collect()
        }
        SpecialEffect::CultSteps(_) => Cult::ALL
            .into_iter()
            .filter(|&c| player_state.cult.get(c) < CULT_TRACK_TOP)
            .map(|c| execution(SpecialTarget::Cult(c)))
            .collect(),
        SpecialEffect::FreeDwelling => {
            let dwellings = player_state.structures.count(StructureType::Dwelling);
            match state.home_terrain(player) {
                Some(home) if dwellings < StructureType::Dwelling.supply() => state
                    .free_hexes_of(home)
                    .into_iter()
                    .map(|l| execution(SpecialTarget::Dwelling(l)))
                    .collect(),
                _ => Vec::new(),
            }
        }
    }
}

pub(crate) fn compute(state: &GameState, id: &ActionId, target: &SpecialTarget) -> Step {
    let player = state.active_player();
    let ability = state
        .special_abilities(player)
        .into_iter()
        .find(|a| a.id == *id)
        .expect("Special action not unlocked by the active player");

    let mut step = Step::new(format!("special action {id}"));
    step.action_slot_expended = Some(ActionSlot::owned(id.clone(), player));

    match (ability.effect, target) {
        (SpecialEffect::ExtraTurn, _) => step.extra_turns = 1,
        (SpecialEffect::Spades(spades), SpecialTarget::Transform(transform)) => {
            build::apply_transform(state, player, transform, SpadeUse::Free(spades), &mut step);
        }
        (SpecialEffect::CultSteps(steps), SpecialTarget::Cult(cult)) => {
            step.cult_delta = CultDelta::new().steps(*cult, steps);
        }
        (SpecialEffect::FreeDwelling, SpecialTarget::Dwelling(location)) => {
            step.resource_delta += build::event_rewards(state, player, &[EventType::BuildDwelling]);
            build::place_structure(
                state,
                player,
                Structure::new(StructureType::Dwelling, *location),
                &mut step,
            );
        }
        (effect, target) => panic!("Special effect {effect:?} cannot take target {target:?}"),
    }
    step
}
