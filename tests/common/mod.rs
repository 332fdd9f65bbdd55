//! Fixtures for integration tests.
//!
//! The board is a 6x5 offset grid. Hex `r * 6 + c` touches its right
//! neighbour and the two hexes below it. Rivers split the middle of the
//! board; a bridge slot spans the river between hexes 1 and 13.

#![allow(dead_code)]

use std::sync::Arc;

use terra_rules::actions::{Action, ActionExecution};
use terra_rules::core::{BridgeId, FactionId, LocationId, Rules, RulesConfig, TileId};
use terra_rules::entities::PlayerMetadata;
use terra_rules::map::{HexMap, Terrain};
use terra_rules::rules::Phase;
use terra_rules::state::{GameState, Setup};

const COLUMNS: u16 = 6;

const TERRAIN: [[Terrain; 6]; 5] = [
    [
        Terrain::Plains,
        Terrain::Forest,
        Terrain::Mountains,
        Terrain::Desert,
        Terrain::Swamp,
        Terrain::Lakes,
    ],
    [
        Terrain::Forest,
        Terrain::River,
        Terrain::River,
        Terrain::Plains,
        Terrain::Wasteland,
        Terrain::Mountains,
    ],
    [
        Terrain::Desert,
        Terrain::Plains,
        Terrain::River,
        Terrain::Forest,
        Terrain::Swamp,
        Terrain::Desert,
    ],
    [
        Terrain::Swamp,
        Terrain::Mountains,
        Terrain::Lakes,
        Terrain::River,
        Terrain::River,
        Terrain::Plains,
    ],
    [
        Terrain::Wasteland,
        Terrain::Desert,
        Terrain::Forest,
        Terrain::Mountains,
        Terrain::Plains,
        Terrain::Swamp,
    ],
];

/// Faction of player `i`.
pub const FACTIONS: [&str; 5] = ["Halflings", "Witches", "Engineers", "Nomads", "Alchemists"];

/// Initial dwellings of player `i`, in placement order.
pub const PLACEMENTS: [&[u16]; 5] = [&[0, 9], &[1, 15], &[2, 11], &[3, 12, 17], &[4, 18]];

pub fn hex(row: u16, column: u16) -> LocationId {
    LocationId::new(row * COLUMNS + column)
}

pub fn map() -> HexMap {
    let rows = TERRAIN.len() as u16;
    let mut builder = HexMap::builder();
    for r in 0..rows {
        for c in 0..COLUMNS {
            builder = builder.hex(hex(r, c), TERRAIN[r as usize][c as usize]);
        }
    }

    for r in 0..rows {
        for c in 0..COLUMNS {
            if c + 1 < COLUMNS {
                builder = builder.edge(hex(r, c), hex(r, c + 1));
            }
            if r + 1 == rows {
                continue;
            }
            let below = if r % 2 == 0 {
                [c.checked_sub(1), Some(c)]
            } else {
                [Some(c), Some(c + 1)]
            };
            for column in below.into_iter().flatten().filter(|&c| c < COLUMNS) {
                builder = builder.edge(hex(r, c), hex(r + 1, column));
            }
        }
    }

    builder
        .bridge(BridgeId(0), LocationId::new(1), LocationId::new(13))
        .build()
}

pub fn rules() -> Arc<Rules> {
    Arc::new(Rules::new(RulesConfig::standard(), Arc::new(map())))
}

pub fn metadata(players: usize) -> Vec<PlayerMetadata> {
    (0..players)
        .map(|i| PlayerMetadata::new(format!("player {i}")))
        .collect()
}

pub fn setup(players: usize) -> Setup {
    let round_tiles = (1..=6).map(|i| TileId::from(format!("SCORE{i}"))).collect();
    let bonus_tiles = ["BON1", "BON2", "BON3", "BON5", "BON6", "BON7", "BON8", "BON9"]
        .into_iter()
        .take(players + 3)
        .map(TileId::new)
        .collect();
    Setup::new(round_tiles, bonus_tiles)
}

pub fn new_game(players: usize) -> GameState {
    GameState::create(rules(), metadata(players), false, Some(setup(players)), 0).unwrap()
}

/// Submit without leech decisions or conversions.
pub fn play(state: &GameState, execution: &ActionExecution) -> GameState {
    state.submit(execution, &[], &[], &[]).unwrap()
}

/// Every legal execution of every available action.
pub fn all_executions(state: &GameState) -> Vec<ActionExecution> {
    state
        .get_available_actions()
        .iter()
        .flat_map(|a| a.available_executions(state))
        .collect()
}

/// Executions of one action kind.
pub fn executions_of(state: &GameState, action: &Action) -> Vec<ActionExecution> {
    action.available_executions(state)
}

/// Choose factions and initial dwellings from the fixture tables; take the
/// first bonus tile offered.
pub fn in_turn(players: usize) -> GameState {
    let mut state = new_game(players);
    let mut placed = vec![0usize; players];

    while state.phase() != Phase::Turn {
        let player = state.active_player().index();
        let execution = match state.phase() {
            Phase::SelectFaction => ActionExecution::SelectFaction {
                faction: FactionId::new(FACTIONS[player]),
            },
            Phase::PlaceInitialDwelling => {
                let location = PLACEMENTS[player][placed[player]];
                placed[player] += 1;
                ActionExecution::PlaceInitialDwelling {
                    location: LocationId::new(location),
                }
            }
            _ => all_executions(&state).remove(0),
        };
        state = play(&state, &execution);
    }
    state
}

/// The first way to pass.
pub fn pass(state: &GameState) -> ActionExecution {
    executions_of(state, &Action::Pass).remove(0)
}
