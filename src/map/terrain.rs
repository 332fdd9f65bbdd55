//! Terrain types and the transformation ring.

use serde::{Deserialize, Serialize};

/// Terrain of a hex.
///
/// The seven land terrains form a ring; transforming a hex costs one spade
/// per step along the ring, in whichever direction is shorter. Rivers are
/// never built on and never transformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Terrain {
    Mountains,
    Desert,
    Plains,
    Swamp,
    Lakes,
    Forest,
    Wasteland,
    River,
}

impl Terrain {
    /// Land terrains in ring order.
    pub const LAND: [Terrain; 7] = [
        Terrain::Mountains,
        Terrain::Desert,
        Terrain::Plains,
        Terrain::Swamp,
        Terrain::Lakes,
        Terrain::Forest,
        Terrain::Wasteland,
    ];

    fn ring_index(self) -> Option<usize> {
        Self::LAND.iter().position(|&t| t == self)
    }

    /// Check if this terrain can hold structures.
    #[must_use]
    pub fn is_land(self) -> bool {
        self != Terrain::River
    }

    /// Spades needed to turn `self` into `target`.
    ///
    /// Returns `None` if either terrain is river.
    ///
    /// ```
    /// use terra_rules::map::Terrain;
    ///
    /// assert_eq!(Terrain::Swamp.spades_to(Terrain::Plains), Some(1));
    /// assert_eq!(Terrain::Mountains.spades_to(Terrain::Wasteland), Some(1));
    /// assert_eq!(Terrain::Desert.spades_to(Terrain::Forest), Some(3));
    /// assert_eq!(Terrain::River.spades_to(Terrain::Forest), None);
    /// ```
    #[must_use]
    pub fn spades_to(self, target: Terrain) -> Option<u32> {
        let from = self.ring_index()?;
        let to = target.ring_index()?;
        let forward = (to + Self::LAND.len() - from) % Self::LAND.len();
        Some(forward.min(Self::LAND.len() - forward) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_terrain_is_free() {
        for terrain in Terrain::LAND {
            assert_eq!(terrain.spades_to(terrain), Some(0));
        }
    }

    #[test]
    fn test_ring_is_symmetric_and_bounded() {
        for a in Terrain::LAND {
            for b in Terrain::LAND {
                let spades = a.spades_to(b).unwrap();
                assert_eq!(Some(spades), b.spades_to(a));
                assert!(spades <= 3);
            }
        }
    }

    #[test]
    fn test_river() {
        assert!(!Terrain::River.is_land());
        assert_eq!(Terrain::Lakes.spades_to(Terrain::River), None);
    }
}
