//! Phase advance.
//!
//! After a step is folded in, play moves on in this order:
//!
//! 1. The front of the decision queue is served. Entries whose decision has
//!    no legal execution are dropped.
//! 2. During setup, an empty queue starts the next setup stage: initial
//!    dwellings, then initial bonus tiles, then round 1.
//! 3. Once everyone has passed, the next round begins, or the game ends
//!    after the final round.
//! 4. Otherwise the player whose turn was interrupted either takes an extra
//!    turn or hands over to the next player who has not passed.

use crate::actions::OffTurnAction;
use crate::core::PlayerId;
use crate::entities::Faction;
use crate::error::RulesError;
use crate::state::{GameState, PendingDecision};

use super::{round, Phase};

/// Choose the next phase and active player.
pub(crate) fn advance(state: &mut GameState) -> Result<(), RulesError> {
    loop {
        if serve_next_decision(state) {
            return Ok(());
        }

        if state.round == 0 {
            match state.phase {
                Phase::SelectFaction => {
                    state.decisions = placement_queue(state);
                    state.phase = Phase::PlaceInitialDwelling;
                }
                Phase::PlaceInitialDwelling => {
                    state.decisions = bonus_tile_queue(state);
                    state.phase = Phase::SelectInitialBonusTile;
                }
                _ => return round::begin_round(state),
            }
            continue;
        }

        if state.players.iter().all(|p| p.state.has_passed) {
            if state.is_final_round() {
                round::finish_game(state);
                return Ok(());
            }
            return round::begin_round(state);
        }

        next_turn(state);
        return Ok(());
    }
}

/// Make the first servable queue entry current. Returns `false` once the
/// queue is empty.
fn serve_next_decision(state: &mut GameState) -> bool {
    while let Some(&decision) = state.decisions.front() {
        state.active_player = decision.player;
        state.phase = decision.phase;

        let action = OffTurnAction::for_phase(decision.phase)
            .unwrap_or_else(|| panic!("No off-turn action registered for {:?}", decision.phase));
        if !action.available_executions(state).is_empty() {
            tracing::debug!(
                target: "terra_rules::engine",
                player = %decision.player,
                phase = ?decision.phase,
                "decision.served"
            );
            return true;
        }

        tracing::debug!(
            target: "terra_rules::engine",
            player = %decision.player,
            phase = ?decision.phase,
            "decision.skipped"
        );
        state.decisions.pop_front();
    }
    false
}

/// Turn order, then reverse turn order, then the extra dwelling factions,
/// then the factions that place last.
fn placement_queue(state: &GameState) -> im::Vector<PendingDecision> {
    let order: Vec<PlayerId> = state.turn_order.iter().copied().collect();
    let faction_has = |player: PlayerId, flag: fn(&Faction) -> bool| {
        state.faction_of(player).is_some_and(flag)
    };
    let regular: Vec<PlayerId> = order
        .iter()
        .copied()
        .filter(|&p| !faction_has(p, |f| f.place_last))
        .collect();

    let placements = regular
        .iter()
        .chain(regular.iter().rev())
        .chain(order.iter().filter(|&&p| faction_has(p, |f| f.extra_initial_dwelling)))
        .chain(order.iter().filter(|&&p| faction_has(p, |f| f.place_last)));

    placements
        .map(|&p| PendingDecision::new(p, Phase::PlaceInitialDwelling))
        .collect()
}

/// Reverse turn order.
fn bonus_tile_queue(state: &GameState) -> im::Vector<PendingDecision> {
    state
        .turn_order
        .iter()
        .rev()
        .map(|&p| PendingDecision::new(p, Phase::SelectInitialBonusTile))
        .collect()
}

fn next_turn(state: &mut GameState) {
    let current = state.turn_player;
    let next = if state.extra_turns > 0 && !state.player(current).state.has_passed {
        state.extra_turns -= 1;
        current
    } else {
        state.extra_turns = 0;
        let candidates: Vec<PlayerId> = state.players_after(current).collect();
        match candidates
            .into_iter()
            .find(|&p| !state.player(p).state.has_passed)
        {
            Some(player) => player,
            None => return,
        }
    };

    state.active_player = next;
    state.turn_player = next;
    state.phase = Phase::Turn;
}
