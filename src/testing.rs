//! Fixtures shared by unit tests.

use std::sync::Arc;

use crate::actions::{Action, ActionExecution};
use crate::core::{BridgeId, FactionId, LocationId, PlayerId, Rules, RulesConfig, TileId};
use crate::economy::ResourceDelta;
use crate::entities::{PlayerMetadata, Structure, StructureType};
use crate::map::{HexMap, Terrain};
use crate::rules::Phase;
use crate::state::{GameState, Setup};

const COLUMNS: u16 = 6;

#[rustfmt::skip]
const TERRAIN: [[Terrain; 6]; 5] = {
    use Terrain::*;
    [
        [Plains, Forest, Mountains, Desert, Swamp, Lakes],
        [Forest, River, River, Plains, Wasteland, Mountains],
        [Desert, Plains, River, Forest, Swamp, Desert],
        [Swamp, Mountains, Lakes, River, River, Plains],
        [Wasteland, Desert, Forest, Mountains, Plains, Swamp],
    ]
};

const FACTIONS: [&str; 5] = ["Halflings", "Witches", "Engineers", "Nomads", "Alchemists"];

const PLACEMENTS: [&[u16]; 5] = [&[0, 9], &[1, 15], &[2, 11], &[3, 12, 17], &[4, 18]];

fn hex(row: u16, column: u16) -> LocationId {
    LocationId::new(row * COLUMNS + column)
}

/// A 6x5 offset grid. Hex `r * 6 + c` touches its right neighbour and the
/// two hexes below it; a bridge slot spans the river between hexes 1 and 13.
pub(crate) fn map() -> HexMap {
    let rows = TERRAIN.len() as u16;
    let mut builder = HexMap::builder();
    for (r, row) in TERRAIN.iter().enumerate() {
        for (c, &terrain) in row.iter().enumerate() {
            builder = builder.hex(hex(r as u16, c as u16), terrain);
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

pub(crate) fn rules() -> Arc<Rules> {
    Arc::new(Rules::new(RulesConfig::standard(), Arc::new(map())))
}

pub(crate) fn metadata(players: usize) -> Vec<PlayerMetadata> {
    (0..players)
        .map(|i| PlayerMetadata::new(format!("player {i}")))
        .collect()
}

pub(crate) fn setup(players: usize) -> Setup {
    let round_tiles = (1..=6).map(|i| TileId::from(format!("SCORE{i}"))).collect();
    let bonus_tiles = ["BON1", "BON2", "BON3", "BON5", "BON6", "BON7", "BON8", "BON9"]
        .into_iter()
        .take(players + 3)
        .map(TileId::new)
        .collect();
    Setup::new(round_tiles, bonus_tiles)
}

pub(crate) fn new_game(players: usize) -> GameState {
    GameState::create(rules(), metadata(players), false, Some(setup(players)), 0).unwrap()
}

pub(crate) fn submit(state: &GameState, execution: &ActionExecution) -> GameState {
    crate::rules::submit(state, execution, &[], &[], &[]).unwrap()
}

/// Play the setup round: player `i` takes the `i`th faction, places on
/// home hexes in a fixed order and takes the first bonus tile offered.
pub(crate) fn in_turn(players: usize) -> GameState {
    let mut state = new_game(players);
    let mut placed = vec![0usize; players];

    while state.phase() != Phase::Turn {
        let player = state.active_player();
        let execution = match state.phase() {
            Phase::SelectFaction => ActionExecution::SelectFaction {
                faction: FactionId::new(FACTIONS[player.index()]),
            },
            Phase::PlaceInitialDwelling => {
                let location = PLACEMENTS[player.index()][placed[player.index()]];
                placed[player.index()] += 1;
                ActionExecution::PlaceInitialDwelling {
                    location: LocationId::new(location),
                }
            }
            _ => state
                .get_available_actions()
                .iter()
                .flat_map(|a: &Action| a.available_executions(&state))
                .next()
                .unwrap(),
        };
        state = submit(&state, &execution);
    }
    state
}

pub(crate) fn with_resources(state: &GameState, player: PlayerId, delta: ResourceDelta) -> GameState {
    let mut next = state.clone();
    let player_state = next.player(player).state.clone();
    let resources = player_state.resources.apply(&delta).unwrap();
    next.set_player_state(player, player_state.with_resources(resources));
    next
}

/// Upgrade the player's first dwelling to a stronghold.
pub(crate) fn with_stronghold(state: &GameState, player: PlayerId) -> GameState {
    let mut next = state.clone();
    let mut player_state = next.player(player).state.clone();
    let location = player_state.structures.of_type(StructureType::Dwelling)[0];
    player_state.structures = player_state
        .structures
        .with_built(&[Structure::new(StructureType::Stronghold, location)]);
    next.set_player_state(player, player_state);
    next
}

pub(crate) fn as_active(state: &GameState, player: PlayerId) -> GameState {
    let mut next = state.clone();
    next.active_player = player;
    next.turn_player = player;
    next
}
