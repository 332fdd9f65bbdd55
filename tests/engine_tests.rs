//! Transition engine integration tests.
//!
//! These tests drive whole submissions through `GameState::submit` and
//! check the snapshot contract: accepted submissions link snapshots, rejected
//! ones leave everything untouched.

mod common;

use terra_rules::actions::{Action, ActionExecution, Transform};
use terra_rules::core::{LocationId, PlayerId};
use terra_rules::economy::{Conversion, LeechOpportunity, ResourceType};
use terra_rules::entities::StructureType;
use terra_rules::error::RulesError;
use terra_rules::rules::Phase;
use terra_rules::state::PendingDecision;

use common::{in_turn, pass, play};

// =============================================================================
// Atomicity
// =============================================================================

#[test]
fn test_rejected_submission_changes_nothing() {
    let state = in_turn(2);
    let player = state.active_player();
    let bytes = state.encode().unwrap();

    let workers = state.player(player).state.resources.workers;
    let too_many = Conversion::new(ResourceType::Workers, ResourceType::Coins, workers as u32 + 1);
    let err = state.submit(&pass(&state), &[], &[], &[too_many]).unwrap_err();
    assert!(matches!(
        err,
        RulesError::NegativeResourceState {
            resource: ResourceType::Workers,
            ..
        }
    ));

    let err = state
        .submit(&ActionExecution::SelectFaction { faction: "Witches".into() }, &[], &[], &[])
        .unwrap_err();
    assert!(matches!(err, RulesError::ActionNotAvailable { phase: Phase::Turn, .. }));

    assert_eq!(state.encode().unwrap(), bytes);
}

#[test]
fn test_oversized_conversion_rejected() {
    let state = in_turn(2);
    let bytes = state.encode().unwrap();

    let conversions = [
        Conversion::new(ResourceType::Workers, ResourceType::Coins, u32::MAX),
        Conversion::new(ResourceType::Power, ResourceType::Priests, 1_000_000_000),
        Conversion::new(ResourceType::Workers, ResourceType::Coins, i32::MAX as u32),
    ];
    for conversion in conversions {
        let before = state.submit(&pass(&state), &[], &[conversion], &[]);
        let after = state.submit(&pass(&state), &[], &[], &[conversion]);

        for result in [before, after] {
            let err = result.unwrap_err();
            assert!(
                matches!(
                    err,
                    RulesError::InvalidConversionQuantity { .. }
                        | RulesError::ResourceOverflow { .. }
                ),
                "{conversion:?} gave {err:?}"
            );
        }
    }

    assert_eq!(state.encode().unwrap(), bytes);
}

#[test]
fn test_priests_convert_to_coins() {
    let state = in_turn(2);
    let player = state.active_player();
    let priests = state.player(player).state.resources.priests;

    // the pair is known, so only the priest count can stop it
    let conversion = Conversion::new(ResourceType::Priests, ResourceType::Coins, priests as u32 + 1);
    let err = state.submit(&pass(&state), &[], &[conversion], &[]).unwrap_err();
    assert_eq!(
        err,
        RulesError::NegativeResourceState {
            player,
            resource: ResourceType::Priests,
            amount: -1
        }
    );
}

#[test]
fn test_unknown_conversion_rejected() {
    let state = in_turn(2);
    let conversion = Conversion::new(ResourceType::Coins, ResourceType::Priests, 1);

    let err = state.submit(&pass(&state), &[], &[conversion], &[]).unwrap_err();
    assert_eq!(
        err,
        RulesError::NoSuchConversion {
            from: ResourceType::Coins,
            to: ResourceType::Priests
        }
    );
}

// =============================================================================
// Snapshot chain
// =============================================================================

#[test]
fn test_snapshots_link_to_their_predecessor() {
    let first = in_turn(2);
    let second = play(&first, &pass(&first));
    let third = play(&second, &pass(&second));

    assert_eq!(second.previous_state(), Some(first.snapshot_id()));
    assert_eq!(third.previous_state(), Some(second.snapshot_id()));
    assert_eq!(third.snapshot_id().0, first.snapshot_id().0 + 2);

    let entry = third.log().last().unwrap();
    assert_eq!(entry.active_player, PlayerId::new(1));
    assert_eq!(entry.previous_state, second.snapshot_id());
    assert_eq!(entry.resulting_state, third.snapshot_id());

    // the earlier snapshot is still intact
    assert_eq!(first.phase(), Phase::Turn);
    assert!(!first.player(PlayerId::new(0)).state.has_passed);
}

// =============================================================================
// Conversions
// =============================================================================

#[test]
fn test_conversion_before_action() {
    let state = in_turn(2);
    let player = state.active_player();
    let before = state.player(player).state.resources;

    let conversion = Conversion::new(ResourceType::Workers, ResourceType::Coins, 1);
    let next = state.submit(&pass(&state), &[], &[conversion], &[]).unwrap();
    let after = next.player(player).state.resources;

    assert_eq!(after.workers, before.workers - 1);
    assert_eq!(after.coins, before.coins + 1);
}

// =============================================================================
// Leeching
// =============================================================================

#[test]
fn test_build_offers_power_to_passed_neighbour() {
    let state = in_turn(2);
    let halflings = PlayerId::new(0);
    let witches = PlayerId::new(1);

    let state = play(&state, &pass(&state));
    assert_eq!(state.active_player(), witches);

    let build = ActionExecution::TransformAndBuild(Transform::build(LocationId::new(6)));
    assert!(Action::TransformAndBuild
        .available_executions(&state)
        .contains(&build));
    let state = play(&state, &build);

    assert_eq!(
        state.occupant(LocationId::new(6)),
        Some((witches, StructureType::Dwelling))
    );
    assert_eq!(state.phase(), Phase::LeechDecision);
    assert_eq!(state.active_player(), halflings);
    assert_eq!(
        state.pending_decisions().front(),
        Some(&PendingDecision::new(halflings, Phase::LeechDecision))
    );
    assert_eq!(
        state
            .player(halflings)
            .state
            .leech_opportunities
            .iter()
            .copied()
            .collect::<Vec<_>>(),
        vec![LeechOpportunity::new(witches, 1)]
    );

    let before = state.player(halflings).state.resources;
    let state = play(&state, &ActionExecution::MakeLeechDecision { accept: vec![true] });
    let after = state.player(halflings).state.resources;

    // one power is free
    assert_eq!(after.victory_points, before.victory_points);
    assert_eq!(after.power, before.power.gain(1));
    assert!(state.player(halflings).state.leech_opportunities.is_empty());
    assert_eq!(state.phase(), Phase::Turn);
    assert_eq!(state.active_player(), witches);
}

#[test]
fn test_declined_offer_changes_nothing_but_the_queue() {
    let state = in_turn(2);
    let halflings = PlayerId::new(0);

    let state = play(&state, &pass(&state));
    let state = play(
        &state,
        &ActionExecution::TransformAndBuild(Transform::build(LocationId::new(6))),
    );
    let before = state.player(halflings).state.resources;

    let state = play(&state, &ActionExecution::MakeLeechDecision { accept: vec![false] });

    assert_eq!(state.player(halflings).state.resources, before);
    assert!(state.player(halflings).state.leech_opportunities.is_empty());
    assert!(state.pending_decisions().is_empty());
}
