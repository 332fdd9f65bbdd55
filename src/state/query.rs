//! Read-only queries over a snapshot.
//!
//! Geometry comes from the `MapView`; terrain changes and bridges come from
//! the snapshot. Lists are sorted by id so enumeration is deterministic.

use rustc_hash::FxHashSet;

use super::game::GameState;
use crate::core::{LocationId, PlayerId};
use crate::economy::ConversionTable;
use crate::entities::{Cult, Faction, SpecialAbility, StructureType, Tile, CULT_TRACK_TOP};
use crate::map::Terrain;

impl GameState {
    /// Current terrain of a hex, changes included.
    #[must_use]
    pub fn terrain_at(&self, location: LocationId) -> Option<Terrain> {
        self.terrain
            .get(&location)
            .copied()
            .or_else(|| self.rules.map.terrain(location))
    }

    /// Owner and type of the structure on a hex.
    #[must_use]
    pub fn occupant(&self, location: LocationId) -> Option<(PlayerId, StructureType)> {
        self.players.iter().find_map(|p| {
            p.state
                .structures
                .at(location)
                .map(|t| (p.player_id, t))
        })
    }

    /// Check if a hex is land without a structure.
    #[must_use]
    pub fn is_free(&self, location: LocationId) -> bool {
        self.terrain_at(location).is_some_and(Terrain::is_land) && self.occupant(location).is_none()
    }

    /// Faction of a player, once chosen.
    #[must_use]
    pub fn faction_of(&self, player: PlayerId) -> Option<&Faction> {
        self.player(player)
            .faction
            .as_ref()
            .map(|id| self.config().faction_unchecked(id))
    }

    /// Home terrain of a player, once chosen.
    #[must_use]
    pub fn home_terrain(&self, player: PlayerId) -> Option<Terrain> {
        self.faction_of(player).map(|f| f.home_terrain)
    }

    /// Conversion rates of a player.
    #[must_use]
    pub fn conversion_rates(&self, player: PlayerId) -> &ConversionTable {
        self.config()
            .conversion_rates_for(self.player(player).faction.as_ref())
    }

    /// Tiles a player holds.
    pub fn held_tiles(&self, player: PlayerId) -> impl Iterator<Item = &Tile> {
        let config = self.config();
        self.player(player)
            .state
            .tiles
            .all()
            .map(move |id| config.tile_unchecked(id))
    }

    /// Round tile of the current round.
    #[must_use]
    pub fn round_tile(&self) -> Option<&Tile> {
        let index = (self.round as usize).checked_sub(1)?;
        self.setup
            .round_tiles
            .get(index)
            .map(|id| self.config().tile_unchecked(id))
    }

    /// Check if this is the last round.
    #[must_use]
    pub fn is_final_round(&self) -> bool {
        self.round >= self.config().rounds
    }

    /// Shipping range: shipping level plus tile modifiers.
    #[must_use]
    pub fn shipping_range(&self, player: PlayerId) -> u32 {
        let modifiers: u32 = self
            .held_tiles(player)
            .map(|t| u32::from(t.shipping_modifier))
            .sum();
        u32::from(self.player(player).state.ship_level) + modifiers
    }

    /// Hexes directly connected to `location`: adjacent land and the far
    /// ends of built bridges.
    #[must_use]
    pub fn connected(&self, location: LocationId) -> Vec<LocationId> {
        let mut connected = self.rules.map.adjacent(location);
        for slot in self.rules.map.bridge_slots() {
            if self.bridges.contains_key(&slot.id) {
                connected.extend(slot.other_end(location));
            }
        }
        connected.sort_unstable();
        connected.dedup();
        connected
    }

    /// Free hexes a player can build on: directly connected to one of
    /// their structures or within shipping range.
    #[must_use]
    pub fn reachable(&self, player: PlayerId) -> Vec<LocationId> {
        let range = self.shipping_range(player);
        let mut reachable: FxHashSet<LocationId> = FxHashSet::default();
        for structure in self.player(player).state.structures.iter() {
            reachable.extend(self.connected(structure.location));
            if range > 0 {
                reachable.extend(self.rules.map.within_shipping(structure.location, range));
            }
        }

        let mut reachable: Vec<LocationId> =
            reachable.into_iter().filter(|&l| self.is_free(l)).collect();
        reachable.sort_unstable();
        reachable
    }

    /// Free hexes of a given terrain anywhere on the map.
    #[must_use]
    pub fn free_hexes_of(&self, terrain: Terrain) -> Vec<LocationId> {
        self.rules
            .map
            .hexes()
            .into_iter()
            .filter(|&l| self.terrain_at(l) == Some(terrain) && self.occupant(l).is_none())
            .collect()
    }

    /// Check if another player has a structure directly connected to
    /// `location`.
    #[must_use]
    pub fn has_neighbours(&self, player: PlayerId, location: LocationId) -> bool {
        self.connected(location)
            .into_iter()
            .any(|l| matches!(self.occupant(l), Some((owner, _)) if owner != player))
    }

    /// Special actions a player has unlocked: the stronghold action once the
    /// stronghold stands, and the actions of held tiles.
    #[must_use]
    pub fn special_abilities(&self, player: PlayerId) -> Vec<SpecialAbility> {
        let mut abilities = Vec::new();
        if let Some(faction) = self.faction_of(player) {
            let structures = &self.player(player).state.structures;
            if structures.count(StructureType::Stronghold) > 0 {
                abilities.extend(faction.stronghold_action.clone());
            }
        }
        for tile in self.held_tiles(player) {
            if let Some(action) = &tile.action {
                if !abilities.contains(action) {
                    abilities.push(action.clone());
                }
            }
        }
        abilities
    }

    /// Tracks whose top space is held by a player other than `player`.
    #[must_use]
    pub fn top_taken(&self, player: PlayerId) -> [bool; 4] {
        let mut taken = [false; 4];
        for cult in Cult::ALL {
            taken[cult.index()] = self
                .players
                .iter()
                .any(|p| p.player_id != player && p.state.cult.get(cult) == CULT_TRACK_TOP);
        }
        taken
    }

    /// Players in turn order starting after `player`, wrapping around.
    pub fn players_after(&self, player: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        let start = self.turn_position(player) + 1;
        let count = self.turn_order.len();
        (0..count).map(move |offset| self.turn_order[(start + offset) % count])
    }
}
