//! Decisions made outside a regular turn.
//!
//! Every decision phase has exactly one off-turn action. The mapping is
//! total over the decision phases: `OffTurnAction::for_phase` returns
//! `None` only for `Turn` and `Over`.

use serde::{Deserialize, Serialize};

use super::build::{self, SpadeUse, Transform};
use super::step::Step;
use super::ActionExecution;
use crate::core::{ActionId, FactionId, LocationId, TileId};
use crate::economy::resolve_leech;
use crate::entities::{Cult, CultDelta, Structure, StructureType, TileType, CULT_TRACK_TOP};
use crate::rules::Phase;
use crate::state::GameState;

/// The off-turn action of one decision phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffTurnAction {
    SelectFaction,
    PlaceInitialDwelling,
    SelectInitialBonusTile,
    SelectTownTile,
    SelectFavorTile,
    MakeLeechDecision,
    MakeBonusSpadeDecision,
    MakeCultistDecision,
    MakeCultTrackDecision,
}

impl OffTurnAction {
    /// All off-turn actions.
    pub const ALL: [OffTurnAction; 9] = [
        OffTurnAction::SelectFaction,
        OffTurnAction::PlaceInitialDwelling,
        OffTurnAction::SelectInitialBonusTile,
        OffTurnAction::SelectTownTile,
        OffTurnAction::SelectFavorTile,
        OffTurnAction::MakeLeechDecision,
        OffTurnAction::MakeBonusSpadeDecision,
        OffTurnAction::MakeCultistDecision,
        OffTurnAction::MakeCultTrackDecision,
    ];

    /// The phase this action serves.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            OffTurnAction::SelectFaction => Phase::SelectFaction,
            OffTurnAction::PlaceInitialDwelling => Phase::PlaceInitialDwelling,
            OffTurnAction::SelectInitialBonusTile => Phase::SelectInitialBonusTile,
            OffTurnAction::SelectTownTile => Phase::SelectTownTile,
            OffTurnAction::SelectFavorTile => Phase::SelectFavorTile,
            OffTurnAction::MakeLeechDecision => Phase::LeechDecision,
            OffTurnAction::MakeBonusSpadeDecision => Phase::BonusSpadeDecision,
            OffTurnAction::MakeCultistDecision => Phase::CultistDecision,
            OffTurnAction::MakeCultTrackDecision => Phase::CultTrackDecision,
        }
    }

    /// The action registered for a phase.
    #[must_use]
    pub fn for_phase(phase: Phase) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.phase() == phase)
    }

    /// Action id.
    #[must_use]
    pub const fn id(self) -> ActionId {
        ActionId::new(match self {
            OffTurnAction::SelectFaction => "select-faction",
            OffTurnAction::PlaceInitialDwelling => "place-initial-dwelling",
            OffTurnAction::SelectInitialBonusTile => "select-initial-bonus-tile",
            OffTurnAction::SelectTownTile => "select-town-tile",
            OffTurnAction::SelectFavorTile => "select-favor-tile",
            OffTurnAction::MakeLeechDecision => "make-leech-decision",
            OffTurnAction::MakeBonusSpadeDecision => "make-bonus-spade-decision",
            OffTurnAction::MakeCultistDecision => "make-cultist-decision",
            OffTurnAction::MakeCultTrackDecision => "make-cult-track-decision",
        })
    }

    /// Every legal execution for the active player.
    #[must_use]
    pub fn available_executions(self, state: &GameState) -> Vec<ActionExecution> {
        let player = state.active_player();
        let player_state = &state.player(player).state;

        match self {
            OffTurnAction::SelectFaction => {
                let taken: Vec<_> = state
                    .players()
                    .iter()
                    .filter_map(|p| state.faction_of(p.player_id))
                    .map(|f| f.home_terrain)
                    .collect();
                state
                    .config()
                    .factions
                    .iter()
                    .filter(|f| !taken.contains(&f.home_terrain))
                    .map(|f| ActionExecution::SelectFaction {
                        faction: f.id.clone(),
                    })
                    .collect()
            }
            OffTurnAction::PlaceInitialDwelling => match state.home_terrain(player) {
                Some(home) => state
                    .free_hexes_of(home)
                    .into_iter()
                    .map(|location| ActionExecution::PlaceInitialDwelling { location })
                    .collect(),
                None => Vec::new(),
            },
            OffTurnAction::SelectInitialBonusTile => state
                .pool()
                .distinct(TileType::Bonus)
                .into_iter()
                .map(|tile| ActionExecution::SelectInitialBonusTile { tile })
                .collect(),
            OffTurnAction::SelectTownTile => state
                .pool()
                .distinct(TileType::Town)
                .into_iter()
                .map(|tile| ActionExecution::SelectTownTile { tile })
                .collect(),
            OffTurnAction::SelectFavorTile => {
                let held = &player_state.tiles.favor_tiles;
                state
                    .pool()
                    .distinct(TileType::Favor)
                    .into_iter()
                    .filter(|tile| !held.contains(tile))
                    .map(|tile| ActionExecution::SelectFavorTile { tile })
                    .collect()
            }
            OffTurnAction::MakeLeechDecision => {
                let offers: Vec<_> = player_state.leech_opportunities.iter().copied().collect();
                if offers.is_empty() {
                    return Vec::new();
                }
                decision_sets(offers.len())
                    .filter(|accept| {
                        resolve_leech(&player_state.resources, &offers, accept).is_ok()
                    })
                    .map(|accept| ActionExecution::MakeLeechDecision { accept })
                    .collect()
            }
            OffTurnAction::MakeBonusSpadeDecision => {
                if player_state.bonus_spades == 0 {
                    return Vec::new();
                }
                let mut executions = vec![ActionExecution::MakeBonusSpadeDecision { transform: None }];
                executions.extend(
                    build::transform_options(
                        state,
                        player,
                        SpadeUse::Bonus(player_state.bonus_spades),
                    )
                    .into_iter()
                    .map(|t| ActionExecution::MakeBonusSpadeDecision { transform: Some(t) }),
                );
                executions
            }
            OffTurnAction::MakeCultistDecision => {
                if player_state.cultist_steps == 0 {
                    return Vec::new();
                }
                Cult::ALL
                    .into_iter()
                    .filter(|&c| player_state.cult.get(c) < CULT_TRACK_TOP)
                    .map(|cult| ActionExecution::MakeCultistDecision { cult })
                    .collect()
            }
            OffTurnAction::MakeCultTrackDecision => {
                if player_state.keys_available() == 0 {
                    return Vec::new();
                }
                let taken = state.top_taken(player);
                player_state
                    .key_candidates
                    .iter()
                    .filter(|c| !taken[c.index()] && player_state.cult.get(**c) < CULT_TRACK_TOP)
                    .map(|&cult| ActionExecution::MakeCultTrackDecision { cult })
                    .collect()
            }
        }
    }
}

/// Every accept/decline combination for `count` offers, all-accept first.
fn decision_sets(count: usize) -> impl Iterator<Item = Vec<bool>> {
    (0..1u32 << count)
        .rev()
        .map(move |mask| (0..count).map(|i| mask & (1 << (count - 1 - i)) != 0).collect())
}

pub(crate) fn compute_select_faction(faction: &FactionId) -> Step {
    let mut step = Step::new(format!("select {faction}"));
    step.faction_selected = Some(faction.clone());
    step
}

pub(crate) fn compute_place_initial_dwelling(location: LocationId) -> Step {
    let mut step = Step::new(format!("place an initial dwelling on {location}"));
    step.new_structures
        .push(Structure::new(StructureType::Dwelling, location));
    step
}

/// Taking a tile from the pool, with its immediate rewards.
pub(crate) fn compute_take_tile(state: &GameState, tile: &TileId) -> Step {
    let definition = state.config().tile_unchecked(tile);

    let mut step = Step::new(format!("take {tile}"));
    step.new_tiles.push(tile.clone());
    step.resource_delta = definition.immediate_resources;
    step.cult_delta = definition.immediate_cult.clone();
    step
}

pub(crate) fn compute_leech_decision(accept: &[bool]) -> Step {
    let accepted = accept.iter().filter(|a| **a).count();
    let mut step = Step::new(format!("accept {accepted} of {} leech offers", accept.len()));
    step.leech_decisions = Some(accept.to_vec());
    step
}

pub(crate) fn compute_bonus_spade_decision(state: &GameState, transform: Option<&Transform>) -> Step {
    let player = state.active_player();
    let spades = state.player(player).state.bonus_spades;

    let mut step = Step::new("forfeit bonus spades");
    step.bonus_spades_used = true;
    if let Some(transform) = transform {
        step.description = format!("use bonus spades on {}", transform.location);
        build::apply_transform(state, player, transform, SpadeUse::Bonus(spades), &mut step);
    }
    step
}

pub(crate) fn compute_cultist_decision(state: &GameState, cult: Cult) -> Step {
    let steps = state.player(state.active_player()).state.cultist_steps;

    let mut step = Step::new(format!("advance {steps} on {cult:?}"));
    step.cult_delta = CultDelta::new().steps(cult, steps);
    step.cultist_steps_used = true;
    step
}

pub(crate) fn compute_cult_track_decision(cult: Cult) -> Step {
    let mut step = Step::new(format!("use a key on {cult:?}"));
    step.key_choice = Some(cult);
    step
}
