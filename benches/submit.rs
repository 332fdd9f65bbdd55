//! Benchmarks for the transition engine.
//!
//! Covers the hot paths of a search driver: enumerating executions,
//! submitting one, and cloning snapshots.

#![allow(missing_docs)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use terra_rules::actions::ActionExecution;
use terra_rules::core::{LocationId, Rules, RulesConfig};
use terra_rules::entities::PlayerMetadata;
use terra_rules::map::{HexMap, Terrain};
use terra_rules::rules::Phase;
use terra_rules::state::GameState;

const COLUMNS: u16 = 8;
const ROWS: u16 = 6;

/// An offset grid cycling through the land terrains with a river column.
fn board() -> HexMap {
    let id = |r: u16, c: u16| LocationId::new(r * COLUMNS + c);
    let mut builder = HexMap::builder();
    for r in 0..ROWS {
        for c in 0..COLUMNS {
            let terrain = if c == 4 {
                Terrain::River
            } else {
                Terrain::LAND[usize::from((r * 3 + c) % 7)]
            };
            builder = builder.hex(id(r, c), terrain);
        }
    }
    for r in 0..ROWS {
        for c in 0..COLUMNS {
            if c + 1 < COLUMNS {
                builder = builder.edge(id(r, c), id(r, c + 1));
            }
            if r + 1 < ROWS {
                builder = builder.edge(id(r, c), id(r + 1, c));
            }
        }
    }
    builder.build()
}

fn all_executions(state: &GameState) -> Vec<ActionExecution> {
    state
        .get_available_actions()
        .iter()
        .flat_map(|a| a.available_executions(state))
        .collect()
}

/// Play the setup round taking the first option every time.
fn first_turn(players: usize) -> GameState {
    let rules = Arc::new(Rules::new(RulesConfig::standard(), Arc::new(board())));
    let metadata = (0..players)
        .map(|i| PlayerMetadata::new(format!("p{i}")))
        .collect();
    let mut state = GameState::create(rules, metadata, false, None, 42).expect("valid game");
    while state.phase() != Phase::Turn {
        let execution = all_executions(&state).remove(0);
        state = state
            .submit(&execution, &[], &[], &[])
            .expect("listed execution is legal");
    }
    state
}

fn bench_enumerate(c: &mut Criterion) {
    let state = first_turn(4);

    c.bench_function("enumerate_turn_4p", |b| {
        b.iter(|| black_box(all_executions(black_box(&state))));
    });
}

fn bench_submit_pass(c: &mut Criterion) {
    let state = first_turn(4);
    let pass = terra_rules::actions::Action::Pass
        .available_executions(&state)
        .remove(0);

    c.bench_function("submit_pass_4p", |b| {
        b.iter(|| black_box(state.submit(black_box(&pass), &[], &[], &[])));
    });
}

fn bench_snapshot_clone(c: &mut Criterion) {
    let state = first_turn(5);

    c.bench_function("snapshot_clone_5p", |b| {
        b.iter(|| black_box(black_box(&state).clone()));
    });
}

fn bench_encode(c: &mut Criterion) {
    let state = first_turn(4);

    c.bench_function("encode_4p", |b| {
        b.iter(|| black_box(black_box(&state).encode()));
    });
}

criterion_group!(
    benches,
    bench_enumerate,
    bench_submit_pass,
    bench_snapshot_clone,
    bench_encode
);
criterion_main!(benches);
