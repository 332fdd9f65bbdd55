//! Action catalog.
//!
//! ## Action
//!
//! The kinds of thing a player can do. A closed sum type: the standard turn
//! actions, power actions from the shared board, special actions unlocked
//! by strongholds and tiles, and the off-turn decisions.
//!
//! ## ActionExecution
//!
//! One fully specified instance of an action: which hex, which track, which
//! tile. `Action::available_executions` lists every legal execution for the
//! active player; an action with nothing legal simply has none.
//!
//! ## Step
//!
//! `ActionExecution::compute` resolves a legal execution into a `Step`, a
//! pure description of the change. The transition engine validates the
//! execution first and is the only place a `Step` is folded into a
//! snapshot.
//!
//! ```
//! use std::sync::Arc;
//! use terra_rules::actions::{Action, OffTurnAction};
//! use terra_rules::core::{Rules, RulesConfig};
//! use terra_rules::entities::PlayerMetadata;
//! use terra_rules::map::HexMap;
//! use terra_rules::state::GameState;
//!
//! let rules = Arc::new(Rules::new(RulesConfig::standard(), Arc::new(HexMap::default())));
//! let players = vec![PlayerMetadata::new("ada"), PlayerMetadata::new("grace")];
//! let state = GameState::create(rules, players, false, None, 7).unwrap();
//!
//! let actions = state.get_available_actions();
//! assert_eq!(actions, vec![Action::OffTurn(OffTurnAction::SelectFaction)]);
//! assert_eq!(actions[0].available_executions(&state).len(), 9);
//! ```

pub mod build;
pub mod off_turn;
pub mod power;
pub mod special;
pub mod standard;
pub mod step;

pub use build::Transform;
pub use off_turn::OffTurnAction;
pub use power::{PowerAction, PowerEffect, PowerTarget};
pub use special::SpecialTarget;
pub use step::Step;

use serde::{Deserialize, Serialize};

use crate::core::{ActionId, FactionId, LocationId, TileId};
use crate::entities::{Cult, SpecialAbility, StructureType};
use crate::state::GameState;

/// Id of the transform-and-build action.
pub const TRANSFORM_AND_BUILD: ActionId = ActionId::new("transform-and-build");
/// Id of the dig advance action.
pub const ADVANCE_DIG: ActionId = ActionId::new("advance-dig");
/// Id of the shipping advance action.
pub const ADVANCE_SHIP: ActionId = ActionId::new("advance-ship");
/// Id of the upgrade action.
pub const UPGRADE: ActionId = ActionId::new("upgrade");
/// Id of the send-priest action.
pub const SEND_PRIEST: ActionId = ActionId::new("send-priest");
/// Id of the pass action.
pub const PASS: ActionId = ActionId::new("pass");

/// A kind of action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    TransformAndBuild,
    AdvanceDig,
    AdvanceShip,
    UpgradeStructure,
    SendPriest,
    Pass,
    Power(PowerAction),
    Special(SpecialAbility),
    OffTurn(OffTurnAction),
}

impl Action {
    /// The actions available on every turn.
    #[must_use]
    pub fn standard() -> Vec<Action> {
        vec![
            Action::TransformAndBuild,
            Action::AdvanceDig,
            Action::AdvanceShip,
            Action::UpgradeStructure,
            Action::SendPriest,
            Action::Pass,
        ]
    }

    /// Action id. Power and special actions use their slot id.
    #[must_use]
    pub fn id(&self) -> ActionId {
        match self {
            Action::TransformAndBuild => TRANSFORM_AND_BUILD,
            Action::AdvanceDig => ADVANCE_DIG,
            Action::AdvanceShip => ADVANCE_SHIP,
            Action::UpgradeStructure => UPGRADE,
            Action::SendPriest => SEND_PRIEST,
            Action::Pass => PASS,
            Action::Power(action) => action.id.clone(),
            Action::Special(ability) => ability.id.clone(),
            Action::OffTurn(action) => action.id(),
        }
    }

    /// Every legal execution for the active player. Empty if the action
    /// cannot be taken right now.
    #[must_use]
    pub fn available_executions(&self, state: &GameState) -> Vec<ActionExecution> {
        match self {
            Action::TransformAndBuild => standard::transform_and_build_executions(state),
            Action::AdvanceDig => standard::advance_dig_executions(state),
            Action::AdvanceShip => standard::advance_ship_executions(state),
            Action::UpgradeStructure => standard::upgrade_executions(state),
            Action::SendPriest => standard::send_priest_executions(state),
            Action::Pass => standard::pass_executions(state),
            Action::Power(action) => power::executions(state, action),
            Action::Special(ability) => special::executions(state, ability),
            Action::OffTurn(action) => action.available_executions(state),
        }
    }
}

/// One fully specified action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionExecution {
    TransformAndBuild(Transform),
    AdvanceDig,
    AdvanceShip,
    Upgrade { location: LocationId, to: StructureType },
    SendPriest { cult: Cult, slot: Option<u8> },
    Pass { bonus_tile: Option<TileId> },
    Power { id: ActionId, target: PowerTarget },
    Special { id: ActionId, target: SpecialTarget },

    SelectFaction { faction: FactionId },
    PlaceInitialDwelling { location: LocationId },
    SelectInitialBonusTile { tile: TileId },
    SelectTownTile { tile: TileId },
    SelectFavorTile { tile: TileId },
    MakeLeechDecision { accept: Vec<bool> },
    MakeBonusSpadeDecision { transform: Option<Transform> },
    MakeCultistDecision { cult: Cult },
    MakeCultTrackDecision { cult: Cult },
}

impl ActionExecution {
    /// Id of the action this executes.
    #[must_use]
    pub fn action_id(&self) -> ActionId {
        match self {
            ActionExecution::TransformAndBuild(_) => TRANSFORM_AND_BUILD,
            ActionExecution::AdvanceDig => ADVANCE_DIG,
            ActionExecution::AdvanceShip => ADVANCE_SHIP,
            ActionExecution::Upgrade { .. } => UPGRADE,
            ActionExecution::SendPriest { .. } => SEND_PRIEST,
            ActionExecution::Pass { .. } => PASS,
            ActionExecution::Power { id, .. } | ActionExecution::Special { id, .. } => id.clone(),
            ActionExecution::SelectFaction { .. } => OffTurnAction::SelectFaction.id(),
            ActionExecution::PlaceInitialDwelling { .. } => OffTurnAction::PlaceInitialDwelling.id(),
            ActionExecution::SelectInitialBonusTile { .. } => {
                OffTurnAction::SelectInitialBonusTile.id()
            }
            ActionExecution::SelectTownTile { .. } => OffTurnAction::SelectTownTile.id(),
            ActionExecution::SelectFavorTile { .. } => OffTurnAction::SelectFavorTile.id(),
            ActionExecution::MakeLeechDecision { .. } => OffTurnAction::MakeLeechDecision.id(),
            ActionExecution::MakeBonusSpadeDecision { .. } => {
                OffTurnAction::MakeBonusSpadeDecision.id()
            }
            ActionExecution::MakeCultistDecision { .. } => OffTurnAction::MakeCultistDecision.id(),
            ActionExecution::MakeCultTrackDecision { .. } => {
                OffTurnAction::MakeCultTrackDecision.id()
            }
        }
    }

    /// Resolve into a `Step`.
    ///
    /// The execution must be one of `available_executions` for `state`;
    /// the transition engine checks this before calling. Anything else may
    /// panic or produce a meaningless step.
    #[must_use]
    pub fn compute(&self, state: &GameState) -> Step {
        match self {
            ActionExecution::TransformAndBuild(transform) => {
                standard::compute_transform_and_build(state, transform)
            }
            ActionExecution::AdvanceDig => standard::compute_advance_dig(state),
            ActionExecution::AdvanceShip => standard::compute_advance_ship(state),
            ActionExecution::Upgrade { location, to } => {
                standard::compute_upgrade(state, *location, *to)
            }
            ActionExecution::SendPriest { cult, slot } => standard::compute_send_priest(*cult, *slot),
            ActionExecution::Pass { bonus_tile } => standard::compute_pass(state, bonus_tile.as_ref()),
            ActionExecution::Power { id, target } => power::compute(state, id, target),
            ActionExecution::Special { id, target } => special::compute(state, id, target),
            ActionExecution::SelectFaction { faction } => off_turn::compute_select_faction(faction),
            ActionExecution::PlaceInitialDwelling { location } => {
                off_turn::compute_place_initial_dwelling(*location)
            }
            ActionExecution::SelectInitialBonusTile { tile }
            | ActionExecution::SelectTownTile { tile }
            | ActionExecution::SelectFavorTile { tile } => off_turn::compute_take_tile(state, tile),
            ActionExecution::MakeLeechDecision { accept } => off_turn::compute_leech_decision(accept),
            ActionExecution::MakeBonusSpadeDecision { transform } => {
                off_turn::compute_bonus_spade_decision(state, transform.as_ref())
            }
            ActionExecution::MakeCultistDecision { cult } => {
                off_turn::compute_cultist_decision(state, *cult)
            }
            ActionExecution::MakeCultTrackDecision { cult } => {
                off_turn::compute_cult_track_decision(*cult)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_execution_ids_match_actions() {
        let state = testing::in_turn(2);

        for action in state.get_available_actions() {
            for execution in action.available_executions(&state) {
                assert_eq!(execution.action_id(), action.id());
            }
        }
    }

    #[test]
    fn test_turn_actions() {
        let state = testing::in_turn(2);
        let ids: Vec<_> = state.get_available_actions().iter().map(Action::id).collect();

        assert!(ids.contains(&TRANSFORM_AND_BUILD));
        assert!(ids.contains(&PASS));
        assert!(ids.contains(&ActionId::new("ACT1")));
        assert!(ids.contains(&ActionId::new("ACT6")));
        // the bonus tile action of the active player
        assert!(ids.contains(&ActionId::new("BON2")));
    }

    #[test]
    fn test_pass_is_always_possible_in_turn() {
        let state = testing::in_turn(3);
        assert!(!Action::Pass.available_executions(&state).is_empty());
    }
}
