//! Power actions on the shared board.
//!
//! Each power action can be taken once per round by one player. Taking it
//! spends power (burning if needed) and expends its shared slot until the
//! next round.

use serde::{Deserialize, Serialize};

use super::build::{self, SpadeUse, Transform};
use super::step::Step;
use super::ActionExecution;
use crate::core::{ActionId, BridgeId};
use crate::economy::ResourceDelta;
use crate::state::{ActionSlot, GameState};

/// What a power action gives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerEffect {
    /// Build a bridge from one of the player's structures.
    Bridge,
    /// Gain a fixed bundle.
    Resources(ResourceDelta),
    /// Transform one reachable hex with free spades.
    Spades(u8),
}

/// A power action definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerAction {
    pub id: ActionId,
    pub power_cost: u32,
    pub effect: PowerEffect,
}

impl PowerAction {
    /// Create a power action.
    #[must_use]
    pub const fn new(id: ActionId, power_cost: u32, effect: PowerEffect) -> Self {
        Self {
            id,
            power_cost,
            effect,
        }
    }
}

/// The choice attached to a power action execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerTarget {
    None,
    Bridge(BridgeId),
    Transform(Transform),
}

pub(crate) fn executions(state: &GameState, action: &PowerAction) -> Vec<ActionExecution> {
    let player = state.active_player();
    if state.is_expended(&ActionSlot::shared(action.id.clone())) {
        return Vec::new();
    }
    let resources = &state.player(player).state.resources;
    if resources.power.available_power() < action.power_cost {
        return Vec::new();
    }

    let execution = |target| ActionExecution::Power {
        id: action.id.clone(),
        target,
    };
    match action.effect {
        PowerEffect::Resources(_) => vec![execution(PowerTarget::None)],
        PowerEffect::Bridge => bridge_targets(state)
            .into_iter()
            .map(|b| execution(PowerTarget::Bridge(b)))
            .collect(),
        PowerEffect::Spades(spades) => {
            build::transform_options(state, player, SpadeUse::Free(spades))
                .into_iter()
                .map(|t| execution(PowerTarget::Transform(t)))
                .collect()
        }
    }
}

/// Free bridge slots with at least one end at a structure of the active
/// player, while the player has bridges left.
fn bridge_targets(state: &GameState) -> Vec<BridgeId> {
    let player = state.active_player();
    let player_state = &state.player(player).state;
    if player_state.bridges.len() >= state.config().max_bridges {
        return Vec::new();
    }

    let structures = &player_state.structures;
    let mut targets: Vec<BridgeId> = state
        .rules()
        .map
        .bridge_slots()
        .into_iter()
        .filter(|slot| !state.bridges().contains_key(&slot.id))
        .filter(|slot| structures.at(slot.ends.0).is_some() || structures.at(slot.ends.1).is_some())
        .map(|slot| slot.id)
        .collect();
    targets.sort_unstable();
    targets
}

pub(crate) fn compute(state: &GameState, id: &ActionId, target: &PowerTarget) -> Step {
    let player = state.active_player();
    let action = state
        .config()
        .power_action(id)
        .expect("Power action not found in ruleset");

    let mut step = Step::new(format!("power action {id}"));
    step.resource_delta = ResourceDelta::new().power(-(action.power_cost as i32));
    step.action_slot_expended = Some(ActionSlot::shared(id.clone()));

    match (action.effect, target) {
        (PowerEffect::Resources(gain), _) => step.resource_delta += gain,
        (PowerEffect::Bridge, PowerTarget::Bridge(bridge)) => {
            step.new_bridges.push(*bridge);
            step.description = format!("power action {id}: bridge {bridge}");
            if let Some(slot) = state
                .rules()
                .map
                .bridge_slots()
                .into_iter()
                .find(|s| s.id == *bridge)
            {
                let mut bridges = state.player(player).state.bridges.clone();
                bridges.push_back(*bridge);
                let structures = &state.player(player).state.structures;
                let from = if structures.at(slot.ends.0).is_some() {
                    slot.ends.0
                } else {
                    slot.ends.1
                };
                let with_bridge = state.with_player_bridges(player, bridges);
                build::check_town(&with_bridge, player, structures, from, &mut step);
            }
        }
        (PowerEffect::Spades(spades), PowerTarget::Transform(transform)) => {
            step.description = format!("power action {id}: transform {}", transform.location);
            build::apply_transform(state, player, transform, SpadeUse::Free(spades), &mut step);
        }
        (effect, target) => panic!("Power effect {effect:?} cannot take target {target:?}"),
    }
    step
}
