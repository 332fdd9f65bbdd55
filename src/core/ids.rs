//! Identifier types.
//!
//! Every game object that snapshots refer to is named by an identifier,
//! never by ownership. Map locations, tiles, factions and action slots are
//! looked up through tables in `RulesConfig`, `MapView` or `GameState`.
//!
//! ## Layout
//!
//! - `LocationId`, `BridgeId`: numeric, assigned by the map collaborator
//! - `TileId`, `FactionId`, `ActionId`: textual, assigned by the static tables
//! - `SnapshotId`: sequence number of a `GameState` within one game
//!
//! ```
//! use terra_rules::core::{ActionId, TileId};
//!
//! const BON1: TileId = TileId::new("BON1");
//! assert_eq!(BON1, TileId::from("BON1".to_string()));
//! assert_eq!(ActionId::new("ACT1").as_str(), "ACT1");
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A hex on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u16);

impl LocationId {
    /// Create a new location ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A river crossing that can hold a bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BridgeId(pub u16);

impl std::fmt::Display for BridgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "B{}", self.0)
    }
}

/// Sequence number of a snapshot within one game.
///
/// `GameState::create` produces snapshot 0; every accepted submission
/// produces the next number. Used as a non-owning back-reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotId(pub u64);

impl SnapshotId {
    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

macro_rules! text_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Cow<'static, str>);

        impl $name {
            /// Create an ID from a static name.
            #[must_use]
            pub const fn new(name: &'static str) -> Self {
                Self(Cow::Borrowed(name))
            }

            /// Get the name.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(Cow::Owned(name))
            }
        }

        impl From<&'static str> for $name {
            fn from(name: &'static str) -> Self {
                Self::new(name)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_id!(
    /// A round, bonus, favor or town tile.
    TileId
);

text_id!(
    /// A faction definition.
    FactionId
);

text_id!(
    /// An action, and the once-per-round slot it expends if it has one.
    ActionId
);
