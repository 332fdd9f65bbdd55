//! Transition engine.
//!
//! `submit` is the only way a game moves forward. It takes a snapshot and
//! one submission and either returns the successor snapshot or rejects the
//! submission. A rejected submission leaves no trace: every stage works on
//! a private copy of the snapshot and the copy is dropped on the first
//! error.
//!
//! ## Pipeline
//!
//! 1. Leech decisions of the active player (turns only)
//! 2. Conversions before the action (turns only)
//! 3. The action: validate the execution, compute its `Step`, fold it in
//! 4. Conversions after the action (turns only)
//! 5. Non-negative check, round end bookkeeping, phase advance

use crate::actions::{ActionExecution, Step};
use crate::core::PlayerId;
use crate::economy::{resolve_leech, Conversion, LeechOpportunity};
use crate::entities::{reward_between, PlayerState, CULT_TRACK_TOP};
use crate::error::RulesError;
use crate::state::{GameState, LogEntry, PendingDecision};

use super::{flow, round, Phase};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Every player tied.
    Draw,
    /// Several players share the lead.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

/// Apply one submission to `state`.
///
/// Leech decisions and conversions are only accepted in `Turn`; anywhere
/// else they fail with `IllegalSubmission`. On success the new snapshot has
/// the next snapshot id, links back to `state` and carries one more log
/// entry. On failure `state` is untouched.
pub fn submit(
    state: &GameState,
    execution: &ActionExecution,
    leech_decisions: &[bool],
    conversions_before: &[Conversion],
    conversions_after: &[Conversion],
) -> Result<GameState, RulesError> {
    let result = run(
        state,
        execution,
        leech_decisions,
        conversions_before,
        conversions_after,
    );

    match &result {
        Ok(next) => tracing::info!(
            target: "terra_rules::engine",
            snapshot = %next.snapshot_id,
            player = %state.active_player,
            action = %execution.action_id(),
            phase = ?next.phase,
            "submit.accepted"
        ),
        Err(err) => tracing::debug!(
            target: "terra_rules::engine",
            snapshot = %state.snapshot_id,
            player = %state.active_player,
            action = %execution.action_id(),
            error = %err,
            "submit.rejected"
        ),
    }
    result
}

fn run(
    state: &GameState,
    execution: &ActionExecution,
    leech_decisions: &[bool],
    conversions_before: &[Conversion],
    conversions_after: &[Conversion],
) -> Result<GameState, RulesError> {
    let phase = state.phase;
    if phase == Phase::Over {
        return Err(RulesError::GameOver);
    }
    if phase != Phase::Turn {
        if !leech_decisions.is_empty() {
            return Err(RulesError::IllegalSubmission {
                phase,
                reason: "leech decisions are only accepted during a turn".to_string(),
            });
        }
        if !conversions_before.is_empty() || !conversions_after.is_empty() {
            return Err(RulesError::IllegalSubmission {
                phase,
                reason: "conversions are only accepted during a turn".to_string(),
            });
        }
    }

    let player = state.active_player;
    let action_id = execution.action_id();
    let action = state
        .get_available_actions()
        .into_iter()
        .find(|a| a.id() == action_id)
        .ok_or_else(|| RulesError::ActionNotAvailable {
            action: action_id.clone(),
            phase,
        })?;

    let mut next = state.clone();
    let mut others: Vec<PendingDecision> = Vec::new();

    if phase == Phase::Turn {
        next.turn_player = player;
        apply_leech(&mut next, player, leech_decisions, &mut others)?;
        apply_conversions(&mut next, player, conversions_before)?;
        tracing::debug!(
            target: "terra_rules::engine",
            player = %player,
            leech = leech_decisions.len(),
            conversions = conversions_before.len(),
            "submit.before_action"
        );
    }

    if !action.available_executions(&next).contains(execution) {
        return Err(RulesError::IllegalExecution { action: action_id });
    }
    let step = execution.compute(&next);
    if phase.is_decision() {
        next.decisions.pop_front();
    }
    fold(&mut next, player, &step, &mut others)?;
    tracing::debug!(
        target: "terra_rules::engine",
        player = %player,
        step = %step.description,
        "submit.step"
    );

    apply_conversions(&mut next, player, conversions_after)?;
    if let Some((resource, amount)) = next.player(player).state.resources.first_negative() {
        return Err(RulesError::NegativeResourceState {
            player,
            resource,
            amount,
        });
    }

    let round_over = step.passed && next.players.iter().all(|p| p.state.has_passed);
    if round_over && !next.is_final_round() {
        round::apply_cult_bonus(&mut next)?;
    }

    let previous = state.snapshot_id;
    next.previous_state = Some(previous);
    next.snapshot_id = previous.next();
    next.log.push_back(LogEntry {
        description: step.description.clone(),
        active_player: player,
        previous_state: previous,
        resulting_state: next.snapshot_id,
    });

    flow::advance(&mut next)?;
    Ok(next)
}

/// Resolve the pending leech offers of `player` with one decision each.
fn apply_leech(
    next: &mut GameState,
    player: PlayerId,
    decisions: &[bool],
    others: &mut Vec<PendingDecision>,
) -> Result<(), RulesError> {
    let mut player_state = next.player(player).state.clone();
    let offers: Vec<LeechOpportunity> = player_state.leech_opportunities.iter().copied().collect();
    let outcome = resolve_leech(&player_state.resources, &offers, decisions)?;
    if offers.is_empty() {
        return Ok(());
    }

    player_state.resources = outcome.resources;
    player_state.leech_opportunities = im::Vector::new();
    next.set_player_state(player, player_state);

    for (offer, _) in offers.iter().zip(decisions).filter(|(_, accept)| **accept) {
        if !next.faction_of(offer.from).is_some_and(|f| f.cultist_bonus) {
            continue;
        }
        let mut builder = next.player(offer.from).state.clone();
        builder.cultist_steps = builder.cultist_steps.saturating_add(1);
        next.set_player_state(offer.from, builder);
        push_unique(others, PendingDecision::new(offer.from, Phase::CultistDecision));
    }

    tracing::debug!(
        target: "terra_rules::engine",
        player = %player,
        accepted = outcome.accepted,
        power = outcome.power_gained,
        victory_points = outcome.victory_point_cost,
        "leech.resolved"
    );
    Ok(())
}

/// Fold conversions into the resources of `player`, one at a time.
fn apply_conversions(
    next: &mut GameState,
    player: PlayerId,
    conversions: &[Conversion],
) -> Result<(), RulesError> {
    if conversions.is_empty() {
        return Ok(());
    }
    let table = next.conversion_rates(player).clone();
    let mut player_state = next.player(player).state.clone();
    for conversion in conversions {
        let delta = conversion.resource_delta(&table)?;
        player_state.resources = player_state.resources.apply(&delta)?;
    }
    next.set_player_state(player, player_state);
    Ok(())
}

/// Fold a step into the snapshot under construction.
///
/// Decisions caused for `player` are queued first, then decisions for
/// other players, all ahead of anything already waiting.
fn fold(
    next: &mut GameState,
    player: PlayerId,
    step: &Step,
    others: &mut Vec<PendingDecision>,
) -> Result<(), RulesError> {
    let rules = next.rules.clone();
    let config = &rules.config;

    if let Some(faction_id) = &step.faction_selected {
        let starting = PlayerState::starting(
            config.faction_unchecked(faction_id),
            config.starting_victory_points,
        );
        let updated = next.player(player).with_faction(faction_id.clone(), starting);
        next.players.set(player.index(), updated);
    }

    let top_taken = next.top_taken(player);
    let mut own: Vec<PendingDecision> = Vec::new();
    let mut state = next.player(player).state.clone();

    state.resources = state.resources.apply(&step.resource_delta)?;
    if let Some((cult, slot)) = step.priest_slot {
        next.cult_board = next.cult_board.occupy(cult, slot, player);
        state.resources = state.resources.retire_priest();
    }

    for &(location, terrain) in &step.terrain_changes {
        next.terrain.insert(location, terrain);
    }
    if !step.new_structures.is_empty() {
        state.structures = state.structures.with_built(&step.new_structures);
    }
    for &bridge in &step.new_bridges {
        state.bridges.push_back(bridge);
        next.bridges.insert(bridge, player);
    }

    if let Some(tile_id) = &step.returned_tile {
        let tile = config.tile_unchecked(tile_id);
        if let Some(tiles) = state.tiles.without(tile) {
            state.tiles = tiles;
            next.pool = next.pool.with_added(tile);
        }
    }
    for tile_id in &step.new_tiles {
        let tile = config.tile_unchecked(tile_id);
        state.tiles = state.tiles.with_added(tile);
        if let Some(pool) = next.pool.without(tile) {
            next.pool = pool;
        }
    }

    state.dig_level += step.dig_levels;
    state.ship_level += step.ship_levels;
    if step.passed {
        state.has_passed = true;
        next.pass_order.push_back(player);
    }

    state.town_locations.extend(step.town_locations.iter().copied());
    if step.town_founded {
        state.towns += 1;
    }
    own.extend(
        step.new_tile_decisions
            .iter()
            .map(|&phase| PendingDecision::new(player, phase)),
    );

    if !step.cult_delta.is_empty() {
        let advance = state.cult.advance(
            &step.cult_delta,
            state.keys_available(),
            top_taken,
            &config.cult_rewards,
        );
        state.cult = advance.state;
        state.resources.power = state.resources.power.gain(advance.power_gained);
        if !advance.key_candidates.is_empty() {
            state.key_candidates = advance.key_candidates;
            own.push(PendingDecision::new(player, Phase::CultTrackDecision));
        }
    }

    if let Some(cult) = step.key_choice {
        let position = state.cult.get(cult);
        if !top_taken[cult.index()] && position < CULT_TRACK_TOP {
            let power = reward_between(position, CULT_TRACK_TOP, &config.cult_rewards);
            state.cult = state.cult.with(cult, CULT_TRACK_TOP);
            state.resources.power = state.resources.power.gain(power);
        }
        let cult_state = state.cult;
        state
            .key_candidates
            .retain(|c| *c != cult && !top_taken[c.index()] && cult_state.get(*c) < CULT_TRACK_TOP);
        if state.keys_available() > 0 && !state.key_candidates.is_empty() {
            own.push(PendingDecision::new(player, Phase::CultTrackDecision));
        } else {
            state.key_candidates.clear();
        }
    }

    if step.bonus_spades_used {
        state.bonus_spades = 0;
    }
    if step.cultist_steps_used {
        state.cultist_steps = 0;
    }
    next.set_player_state(player, state);

    if let Some(decisions) = &step.leech_decisions {
        apply_leech(next, player, decisions, others)?;
    }

    for (&recipient, &offer) in &step.new_leech_opportunities {
        let mut recipient_state = next.player(recipient).state.clone();
        recipient_state.leech_opportunities.push_back(offer);
        let passed = recipient_state.has_passed;
        next.set_player_state(recipient, recipient_state);
        if passed {
            push_unique(others, PendingDecision::new(recipient, Phase::LeechDecision));
        }
    }

    if let Some(slot) = &step.action_slot_expended {
        next.expended_action_slots.insert(slot.clone());
    }
    next.extra_turns = next.extra_turns.saturating_add(step.extra_turns);

    for decision in own.into_iter().chain(others.drain(..)).rev() {
        if matches!(decision.phase, Phase::LeechDecision | Phase::CultistDecision)
            && next.decisions.contains(&decision)
        {
            continue;
        }
        next.decisions.push_front(decision);
    }
    Ok(())
}

fn push_unique(decisions: &mut Vec<PendingDecision>, decision: PendingDecision) {
    if !decisions.contains(&decision) {
        decisions.push(decision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Action;
    use crate::core::FactionId;
    use crate::economy::{PowerBowlState, ResourceDelta, ResourceType};
    use crate::entities::Cult;
    use crate::testing;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));

        let shared = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(shared.is_winner(PlayerId::new(0)));
        assert!(!shared.is_winner(PlayerId::new(1)));
        assert!(shared.is_winner(PlayerId::new(2)));
    }

    #[test]
    fn test_leech_and_conversions_rejected_outside_turn() {
        let state = testing::new_game(2);
        let execution = ActionExecution::SelectFaction {
            faction: FactionId::new("Witches"),
        };

        let err = submit(&state, &execution, &[true], &[], &[]).unwrap_err();
        assert!(matches!(err, RulesError::IllegalSubmission { .. }));

        let conversion = Conversion::new(ResourceType::Power, ResourceType::Coins, 1);
        let err = submit(&state, &execution, &[], &[], &[conversion]).unwrap_err();
        assert!(matches!(err, RulesError::IllegalSubmission { .. }));
    }

    #[test]
    fn test_wrong_action_for_phase() {
        let state = testing::new_game(2);
        let err = submit(&state, &ActionExecution::AdvanceDig, &[], &[], &[]).unwrap_err();

        assert_eq!(
            err,
            RulesError::ActionNotAvailable {
                action: crate::actions::ADVANCE_DIG,
                phase: Phase::SelectFaction
            }
        );
    }

    #[test]
    fn test_illegal_execution() {
        let state = testing::new_game(2);
        let execution = ActionExecution::SelectFaction {
            faction: FactionId::new("Nobody"),
        };

        let err = submit(&state, &execution, &[], &[], &[]).unwrap_err();
        assert!(matches!(err, RulesError::IllegalExecution { .. }));
    }

    #[test]
    fn test_accepted_submission_links_snapshots() {
        let state = testing::new_game(2);
        let next = testing::submit(
            &state,
            &ActionExecution::SelectFaction {
                faction: FactionId::new("Witches"),
            },
        );

        assert_eq!(next.snapshot_id(), state.snapshot_id().next());
        assert_eq!(next.previous_state(), Some(state.snapshot_id()));
        assert_eq!(next.log().len(), 1);
        assert_eq!(next.log()[0].active_player, PlayerId::new(0));
        assert_eq!(next.log()[0].resulting_state, next.snapshot_id());

        let witches = next.player(PlayerId::new(0));
        assert_eq!(witches.faction, Some(FactionId::new("Witches")));
        assert_eq!(witches.state.resources.victory_points, 20);
        assert_eq!(witches.state.cult.get(Cult::Air), 2);
    }

    #[test]
    fn test_leech_decision_count_must_match() {
        let state = testing::in_turn(2);
        let pass = Action::Pass.available_executions(&state).remove(0);

        let err = submit(&state, &pass, &[true], &[], &[]).unwrap_err();
        assert_eq!(
            err,
            RulesError::MalformedDecisionSet {
                expected: 0,
                actual: 1
            }
        );
    }

    #[test]
    fn test_leech_resolved_before_action() {
        let state = testing::in_turn(2);
        let player = state.active_player();
        let mut player_state = state.player(player).state.clone();
        player_state.resources.power = PowerBowlState::new(5, 7, 0);
        player_state.leech_opportunities =
            [LeechOpportunity::new(PlayerId::new(1), 4)].into_iter().collect();
        let state = state.with_player(state.player(player).with_state(player_state));
        let before = state.player(player).state.resources.victory_points;

        let pass = Action::Pass.available_executions(&state).remove(0);
        let pass_points = pass.compute(&state).resource_delta.victory_points;
        let next = submit(&state, &pass, &[true], &[], &[]).unwrap();

        let after = &next.player(player).state;
        assert!(after.leech_opportunities.is_empty());
        assert_eq!(after.resources.power, PowerBowlState::new(1, 11, 0));
        assert_eq!(after.resources.victory_points, before - 3 + pass_points);
    }

    #[test]
    fn test_negative_end_state_rejected() {
        let state = testing::in_turn(2);
        let player = state.active_player();
        let workers = state.player(player).state.resources.workers;
        let conversion = Conversion::new(
            ResourceType::Workers,
            ResourceType::Coins,
            workers as u32 + 1,
        );
        let pass = Action::Pass.available_executions(&state).remove(0);

        let err = submit(&state, &pass, &[], &[], &[conversion]).unwrap_err();
        assert_eq!(
            err,
            RulesError::NegativeResourceState {
                player,
                resource: ResourceType::Workers,
                amount: -1
            }
        );
    }

    #[test]
    fn test_conversion_before_enables_action() {
        let state = testing::in_turn(2);
        let player = state.active_player();
        let state = testing::with_resources(&state, player, ResourceDelta::new().power(12));
        assert_eq!(state.player(player).state.resources.priests, 0);
        assert!(Action::AdvanceShip.available_executions(&state).is_empty());

        let priest = Conversion::new(ResourceType::Power, ResourceType::Priests, 1);
        let next = submit(&state, &ActionExecution::AdvanceShip, &[], &[priest], &[]).unwrap();

        assert_eq!(next.player(player).state.ship_level, 1);
        assert_eq!(next.player(player).state.resources.priests, 0);
    }
}
