//! Map collaborator.
//!
//! The rules core does not own a map model. It consumes geometry through
//! the narrow `MapView` trait: which hexes exist, their printed terrain,
//! adjacency, river shipping range and bridge slots. Terrain changes made
//! during a game live in the `GameState`, layered over `MapView::terrain`.
//!
//! `HexMap` is a small adjacency-list implementation for drivers and tests.

pub mod terrain;
pub mod hex_map;

pub use terrain::Terrain;
pub use hex_map::{HexMap, HexMapBuilder};

use serde::{Deserialize, Serialize};

use crate::core::{BridgeId, LocationId};

/// A place a bridge can be built, joining two land hexes across a river.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BridgeSlot {
    pub id: BridgeId,
    pub ends: (LocationId, LocationId),
}

impl BridgeSlot {
    /// The other end of the bridge, if `location` is one end.
    #[must_use]
    pub fn other_end(&self, location: LocationId) -> Option<LocationId> {
        match self.ends {
            (a, b) if a == location => Some(b),
            (a, b) if b == location => Some(a),
            _ => None,
        }
    }
}

/// Read-only geometry queries.
///
/// All lists are returned in ascending id order so that action enumeration
/// is deterministic.
pub trait MapView: std::fmt::Debug + Send + Sync {
    /// All land hexes.
    fn hexes(&self) -> Vec<LocationId>;

    /// Printed terrain of a hex, `None` if the hex does not exist.
    fn terrain(&self, location: LocationId) -> Option<Terrain>;

    /// Land hexes sharing an edge with `location`.
    fn adjacent(&self, location: LocationId) -> Vec<LocationId>;

    /// Land hexes reachable from `location` by crossing at most `range`
    /// river hexes (and at least one).
    fn within_shipping(&self, location: LocationId, range: u32) -> Vec<LocationId>;

    /// All bridge slots.
    fn bridge_slots(&self) -> Vec<BridgeSlot>;
}

/// Check if two maps answer every query the rules make the same way.
///
/// Shipping is compared for ranges `1..=max_range`.
#[must_use]
pub fn same_geometry(a: &dyn MapView, b: &dyn MapView, max_range: u32) -> bool {
    let hexes = a.hexes();
    hexes == b.hexes()
        && a.bridge_slots() == b.bridge_slots()
        && hexes.iter().all(|&hex| {
            a.terrain(hex) == b.terrain(hex)
                && a.adjacent(hex) == b.adjacent(hex)
                && (1..=max_range).all(|range| {
                    a.within_shipping(hex, range) == b.within_shipping(hex, range)
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_other_end() {
        let slot = BridgeSlot {
            id: BridgeId(3),
            ends: (LocationId::new(1), LocationId::new(2)),
        };

        assert_eq!(slot.other_end(LocationId::new(1)), Some(LocationId::new(2)));
        assert_eq!(slot.other_end(LocationId::new(2)), Some(LocationId::new(1)));
        assert_eq!(slot.other_end(LocationId::new(3)), None);
    }

    fn strip(river_at: u16) -> HexMap {
        let l = LocationId::new;
        let mut builder = HexMap::builder();
        for i in 0..4 {
            let terrain = if i == river_at { Terrain::River } else { Terrain::Plains };
            builder = builder.hex(l(i), terrain);
        }
        for i in 0..3 {
            builder = builder.edge(l(i), l(i + 1));
        }
        builder.build()
    }

    #[test]
    fn test_same_geometry() {
        assert!(same_geometry(&strip(1), &strip(1), 2));
        assert!(!same_geometry(&strip(1), &strip(2), 2));
    }
}
