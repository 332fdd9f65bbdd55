//! Round flow, game end and whole-game invariants.

mod common;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use terra_rules::actions::{Action, ActionExecution};
use terra_rules::core::PlayerId;
use terra_rules::error::RulesError;
use terra_rules::rules::{income, Phase};
use terra_rules::state::{GameState, SnapshotHistory};

use common::{all_executions, in_turn, pass, play};

/// Pass every turn and take the first option of every decision.
fn pass_only(state: &GameState) -> GameState {
    if state.phase() == Phase::Turn {
        play(state, &pass(state))
    } else {
        play(state, &all_executions(state).remove(0))
    }
}

fn leech_decisions(state: &GameState, accept: bool) -> Vec<bool> {
    if state.phase() != Phase::Turn {
        return Vec::new();
    }
    let offers = state.player(state.active_player()).state.leech_opportunities.len();
    vec![accept; offers]
}

// =============================================================================
// Rounds
// =============================================================================

#[test]
fn test_round_ends_when_everyone_passed() {
    let state = in_turn(3);
    let state = pass_only(&state);
    assert_eq!(state.active_player(), PlayerId::new(1));
    assert!(state.player(PlayerId::new(0)).state.has_passed);

    let state = pass_only(&state);
    let state = pass_only(&state);

    assert_eq!(state.round(), 2);
    assert_eq!(state.phase(), Phase::Turn);
    assert!(state.players().iter().all(|p| !p.state.has_passed));
    assert!(state.pass_order().is_empty());
    assert_eq!(
        state.turn_order().iter().copied().collect::<Vec<_>>(),
        vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]
    );
}

#[test]
fn test_income_paid_when_round_starts() {
    let state = in_turn(2);
    let player = PlayerId::new(0);

    let passed = pass_only(&state);
    let expected = income(&passed, player);
    let before = passed.player(player).state.resources;

    let next_round = pass_only(&passed);
    assert_eq!(next_round.round(), 2);

    let after = next_round.player(player).state.resources;
    assert_eq!(after.workers, before.workers + expected.workers);
    assert_eq!(after.priests, before.priests + expected.priests);
}

#[test]
fn test_pass_returns_bonus_tile_to_pool() {
    let state = in_turn(2);
    let player = state.active_player();
    let held = state.player(player).state.tiles.bonus_tiles.clone();

    let ActionExecution::Pass {
        bonus_tile: Some(taken),
    } = pass(&state)
    else {
        panic!("expected a bonus tile to take");
    };
    let next = play(&state, &pass(&state));

    let now_held = &next.player(player).state.tiles.bonus_tiles;
    assert_eq!(now_held.len(), 1);
    assert!(now_held.contains(&taken));
    assert!(held.iter().all(|t| next.pool().bonus_tiles.contains(t)));
    assert!(!next.pool().bonus_tiles.contains(&taken));
}

// =============================================================================
// Game end
// =============================================================================

#[test]
fn test_game_ends_after_final_round() {
    let mut state = in_turn(2);
    for _ in 0..200 {
        if state.phase() == Phase::Over {
            break;
        }
        state = pass_only(&state);
    }

    assert_eq!(state.phase(), Phase::Over);
    assert_eq!(state.round(), 6);
    assert!(state.get_available_actions().is_empty());
    assert!(state.pending_decisions().is_empty());
    assert!(state.result().is_some());

    let err = state
        .submit(&ActionExecution::Pass { bonus_tile: None }, &[], &[], &[])
        .unwrap_err();
    assert_eq!(err, RulesError::GameOver);
}

#[test]
fn test_final_round_pass_takes_no_tile() {
    let mut state = in_turn(2);
    while state.round() < 6 {
        state = pass_only(&state);
    }

    assert_eq!(state.phase(), Phase::Turn);
    assert_eq!(
        Action::Pass.available_executions(&state),
        vec![ActionExecution::Pass { bonus_tile: None }]
    );
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_history_replays_a_game() {
    let mut history = SnapshotHistory::new();
    let mut state = history.record(in_turn(2));
    let start = state.snapshot_id();

    while state.phase() != Phase::Over {
        state = history.record(pass_only(&state));
    }

    let chain: Vec<_> = history.chain(state.snapshot_id()).collect();
    assert_eq!(chain.len(), history.len());
    assert_eq!(chain.last().map(|s| s.snapshot_id()), Some(start));

    let restored = history.undo().unwrap();
    assert_eq!(restored.phase(), Phase::Turn);
    assert_eq!(Some(restored.snapshot_id()), state.previous_state());
}

#[test]
fn test_encoded_snapshots_decode_equal() {
    let state = pass_only(&in_turn(3));
    let bytes = state.encode().unwrap();
    let decoded = GameState::decode(common::rules(), &bytes).unwrap();

    assert_eq!(decoded.encode().unwrap(), bytes);
    assert_eq!(decoded.phase(), state.phase());
    assert_eq!(decoded.active_player(), state.active_player());
    assert_eq!(all_executions(&decoded), all_executions(&state));
}

// =============================================================================
// Random play
// =============================================================================

#[test]
fn test_every_listed_execution_is_accepted() {
    for seed in 0..4u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = in_turn(3);

        for _ in 0..300 {
            if state.phase() == Phase::Over {
                assert!(state.get_available_actions().is_empty());
                break;
            }

            let executions = all_executions(&state);
            assert!(
                !executions.is_empty(),
                "no legal execution in {:?} for {}",
                state.phase(),
                state.active_player()
            );

            let execution = executions.choose(&mut rng).unwrap();
            let leech = leech_decisions(&state, false);
            state = state
                .submit(execution, &leech, &[], &[])
                .unwrap_or_else(|e| panic!("{execution:?} rejected: {e}"));

            for player in state.players() {
                assert!(player.state.resources.is_nonnegative());
                assert!(player.state.resources.power.num_tokens() <= 12);
            }
        }
    }
}
