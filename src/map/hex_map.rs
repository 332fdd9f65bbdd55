//! Adjacency-list map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::terrain::Terrain;
use super::{BridgeSlot, MapView};
use crate::core::{BridgeId, LocationId};

/// A map described by hexes, edges and bridge slots.
///
/// River hexes take part in adjacency like land hexes; shipping range is
/// measured in river hexes crossed.
///
/// ```
/// use terra_rules::core::LocationId;
/// use terra_rules::map::{HexMap, MapView, Terrain};
///
/// let a = LocationId::new(0);
/// let river = LocationId::new(1);
/// let b = LocationId::new(2);
///
/// let map = HexMap::builder()
///     .hex(a, Terrain::Plains)
///     .hex(river, Terrain::River)
///     .hex(b, Terrain::Swamp)
///     .edge(a, river)
///     .edge(river, b)
///     .build();
///
/// assert_eq!(map.hexes(), vec![a, b]);
/// assert!(map.adjacent(a).is_empty());
/// assert_eq!(map.within_shipping(a, 1), vec![b]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HexMap {
    terrain: FxHashMap<LocationId, Terrain>,
    neighbours: FxHashMap<LocationId, SmallVec<[LocationId; 6]>>,
    bridges: Vec<BridgeSlot>,
}

impl HexMap {
    /// Start building a map.
    #[must_use]
    pub fn builder() -> HexMapBuilder {
        HexMapBuilder::default()
    }

    fn river_neighbours(&self, location: LocationId) -> impl Iterator<Item = LocationId> + '_ {
        self.neighbours_of(location)
            .filter(|n| self.terrain.get(n) == Some(&Terrain::River))
    }

    fn neighbours_of(&self, location: LocationId) -> impl Iterator<Item = LocationId> + '_ {
        self.neighbours
            .get(&location)
            .into_iter()
            .flat_map(|ns| ns.iter().copied())
    }
}

impl MapView for HexMap {
    fn hexes(&self) -> Vec<LocationId> {
        let mut hexes: Vec<LocationId> = self
            .terrain
            .iter()
            .filter(|(_, terrain)| terrain.is_land())
            .map(|(&id, _)| id)
            .collect();
        hexes.sort_unstable();
        hexes
    }

    fn terrain(&self, location: LocationId) -> Option<Terrain> {
        self.terrain.get(&location).copied()
    }

    fn adjacent(&self, location: LocationId) -> Vec<LocationId> {
        let mut adjacent: Vec<LocationId> = self
            .neighbours_of(location)
            .filter(|n| self.terrain.get(n).is_some_and(|t| t.is_land()))
            .collect();
        adjacent.sort_unstable();
        adjacent
    }

    fn within_shipping(&self, location: LocationId, range: u32) -> Vec<LocationId> {
        let mut seen_rivers: Vec<LocationId> = Vec::new();
        let mut frontier: Vec<LocationId> = self.river_neighbours(location).collect();
        let mut reached: Vec<LocationId> = Vec::new();

        for _ in 0..range {
            if frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for river in frontier {
                if seen_rivers.contains(&river) {
                    continue;
                }
                seen_rivers.push(river);
                for n in self.neighbours_of(river) {
                    match self.terrain.get(&n) {
                        Some(Terrain::River) => next.push(n),
                        Some(_) if n != location && !reached.contains(&n) => reached.push(n),
                        _ => {}
                    }
                }
            }
            frontier = next;
        }

        reached.sort_unstable();
        reached
    }

    fn bridge_slots(&self) -> Vec<BridgeSlot> {
        self.bridges.clone()
    }
}

/// Builder for `HexMap`.
#[derive(Debug, Default)]
pub struct HexMapBuilder {
    map: HexMap,
}

impl HexMapBuilder {
    /// Add a hex.
    #[must_use]
    pub fn hex(mut self, id: LocationId, terrain: Terrain) -> Self {
        self.map.terrain.insert(id, terrain);
        self
    }

    /// Connect two hexes (symmetric).
    #[must_use]
    pub fn edge(mut self, a: LocationId, b: LocationId) -> Self {
        for (from, to) in [(a, b), (b, a)] {
            let neighbours = self.map.neighbours.entry(from).or_default();
            if !neighbours.contains(&to) {
                neighbours.push(to);
            }
        }
        self
    }

    /// Add a bridge slot across a river between two land hexes.
    #[must_use]
    pub fn bridge(mut self, id: BridgeId, a: LocationId, b: LocationId) -> Self {
        self.map.bridges.push(BridgeSlot { id, ends: (a, b) });
        self
    }

    /// Finish the map.
    #[must_use]
    pub fn build(self) -> HexMap {
        self.map
    }
}
