//! Structures on the map.
//!
//! `PlayerStructureState` owns the list of a player's structures and two
//! derived indices (by location, by type). The indices are rebuilt from the
//! list whenever a new state is constructed and are never edited on their
//! own.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::LocationId;

/// Kind of building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StructureType {
    Dwelling,
    TradingPost,
    Temple,
    Sanctuary,
    Stronghold,
}

impl StructureType {
    /// All structure types.
    pub const ALL: [StructureType; 5] = [
        StructureType::Dwelling,
        StructureType::TradingPost,
        StructureType::Temple,
        StructureType::Sanctuary,
        StructureType::Stronghold,
    ];

    /// Power offered to neighbours, and counted towards towns.
    #[must_use]
    pub const fn power_value(self) -> u32 {
        match self {
            StructureType::Dwelling => 1,
            StructureType::TradingPost | StructureType::Temple => 2,
            StructureType::Sanctuary | StructureType::Stronghold => 3,
        }
    }

    /// How many of this structure a player owns.
    #[must_use]
    pub const fn supply(self) -> usize {
        match self {
            StructureType::Dwelling => 8,
            StructureType::TradingPost => 4,
            StructureType::Temple => 3,
            StructureType::Sanctuary | StructureType::Stronghold => 1,
        }
    }

    /// Structures this one can be upgraded into.
    #[must_use]
    pub fn upgrades(self) -> &'static [StructureType] {
        match self {
            StructureType::Dwelling => &[StructureType::TradingPost],
            StructureType::TradingPost => &[StructureType::Temple, StructureType::Stronghold],
            StructureType::Temple => &[StructureType::Sanctuary],
            StructureType::Sanctuary | StructureType::Stronghold => &[],
        }
    }
}

/// One structure at one location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Structure {
    pub structure_type: StructureType,
    pub location: LocationId,
}

impl Structure {
    /// Create a structure.
    #[must_use]
    pub const fn new(structure_type: StructureType, location: LocationId) -> Self {
        Self {
            structure_type,
            location,
        }
    }
}

/// A player's structures with derived lookup indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Structure>", into = "Vec<Structure>")]
pub struct PlayerStructureState {
    structures: im::Vector<Structure>,
    by_location: FxHashMap<LocationId, StructureType>,
    by_type: FxHashMap<StructureType, SmallVec<[LocationId; 4]>>,
}

impl PlayerStructureState {
    /// Build the state and its indices from a structure list.
    ///
    /// A later structure at the same location replaces an earlier one.
    #[must_use]
    pub fn new(structures: impl IntoIterator<Item = Structure>) -> Self {
        let mut unique: im::Vector<Structure> = im::Vector::new();
        for structure in structures {
            match unique.iter().position(|s| s.location == structure.location) {
                Some(i) => {
                    unique.set(i, structure);
                }
                None => unique.push_back(structure),
            }
        }

        let by_location = unique
            .iter()
            .map(|s| (s.location, s.structure_type))
            .collect();

        let mut by_type: FxHashMap<StructureType, SmallVec<[LocationId; 4]>> = FxHashMap::default();
        for s in &unique {
            by_type.entry(s.structure_type).or_default().push(s.location);
        }

        Self {
            structures: unique,
            by_location,
            by_type,
        }
    }

    /// A new state with `built` added, replacing whatever stood at its
    /// location.
    #[must_use]
    pub fn with_built(&self, built: &[Structure]) -> Self {
        Self::new(self.structures.iter().copied().chain(built.iter().copied()))
    }

    /// All structures in build order.
    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter()
    }

    /// Structure type at a location.
    #[must_use]
    pub fn at(&self, location: LocationId) -> Option<StructureType> {
        self.by_location.get(&location).copied()
    }

    /// Locations holding a given type.
    #[must_use]
    pub fn of_type(&self, structure_type: StructureType) -> &[LocationId] {
        self.by_type
            .get(&structure_type)
            .map_or(&[], |locations| locations.as_slice())
    }

    /// Number of structures of a given type.
    #[must_use]
    pub fn count(&self, structure_type: StructureType) -> usize {
        self.of_type(structure_type).len()
    }

    /// Total number of structures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    /// Check if the player has built nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

impl From<Vec<Structure>> for PlayerStructureState {
    fn from(structures: Vec<Structure>) -> Self {
        Self::new(structures)
    }
}

impl From<PlayerStructureState> for Vec<Structure> {
    fn from(state: PlayerStructureState) -> Self {
        state.structures.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(id: u16) -> LocationId {
        LocationId::new(id)
    }

    #[test]
    fn test_indices_follow_structures() {
        let state = PlayerStructureState::new([
            Structure::new(StructureType::Dwelling, l(1)),
            Structure::new(StructureType::Dwelling, l(2)),
            Structure::new(StructureType::Temple, l(3)),
        ]);

        assert_eq!(state.len(), 3);
        assert_eq!(state.at(l(2)), Some(StructureType::Dwelling));
        assert_eq!(state.at(l(9)), None);
        assert_eq!(state.of_type(StructureType::Dwelling), &[l(1), l(2)]);
        assert_eq!(state.count(StructureType::Temple), 1);
        assert_eq!(state.count(StructureType::Stronghold), 0);
    }

    #[test]
    fn test_upgrade_replaces_in_place() {
        let state = PlayerStructureState::new([
            Structure::new(StructureType::Dwelling, l(1)),
            Structure::new(StructureType::Dwelling, l(2)),
        ]);

        let upgraded = state.with_built(&[Structure::new(StructureType::TradingPost, l(1))]);

        assert_eq!(upgraded.len(), 2);
        assert_eq!(upgraded.at(l(1)), Some(StructureType::TradingPost));
        assert_eq!(upgraded.of_type(StructureType::Dwelling), &[l(2)]);
        assert_eq!(upgraded.of_type(StructureType::TradingPost), &[l(1)]);

        // The original is untouched.
        assert_eq!(state.at(l(1)), Some(StructureType::Dwelling));
    }

    #[test]
    fn test_upgrade_paths() {
        assert_eq!(StructureType::Dwelling.upgrades(), &[StructureType::TradingPost]);
        assert!(StructureType::Stronghold.upgrades().is_empty());
        assert_eq!(StructureType::Sanctuary.power_value(), 3);
    }

    #[test]
    fn test_serialization_rebuilds_indices() {
        let state = PlayerStructureState::new([Structure::new(StructureType::Temple, l(4))]);
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: PlayerStructureState = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, state);
        assert_eq!(deserialized.at(l(4)), Some(StructureType::Temple));
    }
}
