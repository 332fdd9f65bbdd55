//! Round lifecycle.
//!
//! A round starts with income and ends when every player has passed. The
//! last pass of a round triggers the round tile's cult bonus (except after
//! the final round). After the final round the cult tracks are scored and
//! the game is over.

use crate::core::{PlayerId, PlayerMap};
use crate::economy::ResourceDelta;
use crate::entities::Cult;
use crate::error::RulesError;
use crate::state::{GameState, PendingDecision};

use super::Phase;

/// Income of one player: faction base and structure schedules plus held
/// tiles.
#[must_use]
pub fn income(state: &GameState, player: PlayerId) -> ResourceDelta {
    let Some(faction) = state.faction_of(player) else {
        return ResourceDelta::ZERO;
    };
    let tiles: ResourceDelta = state.held_tiles(player).map(|t| t.income).sum();
    faction.income(&state.player(player).state.structures) + tiles
}

/// Start the next round: new turn order from pass order, fresh action
/// slots, income, first player to act.
pub(crate) fn begin_round(state: &mut GameState) -> Result<(), RulesError> {
    if !state.pass_order.is_empty() {
        let order = std::mem::take(&mut state.pass_order);
        *state = state.with_turn_order(order);
    }
    state.round += 1;
    state.expended_action_slots = im::OrdSet::new();
    state.extra_turns = 0;

    for player in PlayerId::all(state.player_count()) {
        let income = income(state, player);
        let mut player_state = state.player(player).state.clone();
        player_state.has_passed = false;
        player_state.resources = player_state.resources.apply(&income)?;
        state.set_player_state(player, player_state);

        tracing::debug!(
            target: "terra_rules::round",
            player = %player,
            income = %income,
            "round.income"
        );
    }

    let first = state.turn_order[0];
    state.active_player = first;
    state.turn_player = first;
    state.phase = Phase::Turn;

    tracing::info!(
        target: "terra_rules::round",
        round = state.round,
        first = %first,
        "round.started"
    );
    Ok(())
}

/// Pay the current round tile's cult bonus. Bonus spades are queued as
/// decisions in turn order.
pub(crate) fn apply_cult_bonus(state: &mut GameState) -> Result<(), RulesError> {
    let Some(bonus) = state.round_tile().and_then(|t| t.cult_bonus) else {
        return Ok(());
    };

    let order: Vec<PlayerId> = state.turn_order.iter().copied().collect();
    for player in order {
        let mut player_state = state.player(player).state.clone();
        let times = bonus.multiplier(player_state.cult.get(bonus.cult));
        if times == 0 {
            continue;
        }

        player_state.resources = player_state
            .resources
            .apply(&(bonus.bonus_resources * i32::from(times)))?;
        player_state.bonus_spades = bonus.bonus_spades.saturating_mul(times);
        if player_state.bonus_spades > 0 {
            state
                .decisions
                .push_back(PendingDecision::new(player, Phase::BonusSpadeDecision));
        }
        state.set_player_state(player, player_state);

        tracing::debug!(
            target: "terra_rules::round",
            player = %player,
            cult = ?bonus.cult,
            times,
            "round.cult_bonus"
        );
    }
    Ok(())
}

/// Victory points per player for one cult track.
///
/// Players are ranked by position; players still at 0 score nothing. Tied
/// players split the points of the ranks they occupy, rounded down.
#[must_use]
pub fn cult_track_scores(state: &GameState, cult: Cult) -> Vec<(PlayerId, i32)> {
    let table = &state.config().final_cult_scoring;
    let mut positions: Vec<(PlayerId, u8)> = state
        .players
        .iter()
        .map(|p| (p.player_id, p.state.cult.get(cult)))
        .filter(|(_, position)| *position > 0)
        .collect();
    positions.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut scores = Vec::new();
    let mut rank = 0;
    while rank < positions.len() {
        let position = positions[rank].1;
        let tied = positions[rank..]
            .iter()
            .take_while(|(_, p)| *p == position)
            .count();
        let points: i32 = (rank..rank + tied).filter_map(|r| table.get(r)).sum();
        let share = points / tied as i32;
        scores.extend(positions[rank..rank + tied].iter().map(|(player, _)| (*player, share)));
        rank += tied;
    }
    scores
}

/// Score the cult tracks and end the game.
pub(crate) fn finish_game(state: &mut GameState) {
    let mut totals = PlayerMap::filled(state.player_count(), 0);
    for cult in Cult::ALL {
        for (player, points) in cult_track_scores(state, cult) {
            totals[player] += points;
        }
    }
    for (player, &points) in totals.iter() {
        let mut player_state = state.player(player).state.clone();
        player_state.resources.victory_points += points;
        state.set_player_state(player, player_state);

        tracing::debug!(
            target: "terra_rules::round",
            player = %player,
            points,
            "game.cult_scoring"
        );
    }
    state.phase = Phase::Over;
    state.decisions = im::Vector::new();

    tracing::info!(
        target: "terra_rules::round",
        round = state.round,
        "game.over"
    );
}
