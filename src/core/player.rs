//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Stable player identifier derived from the initial turn position.
//! Turn order changes every round; the id never does.
//!
//! ## PlayerMap
//!
//! Per-seat table indexed by `PlayerId`. Holds derived data such as turn
//! positions and end-of-game scoring totals.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Upper bound on seats at one table.
pub const MAX_PLAYERS: usize = 5;

/// Player identifier.
///
/// The value is the player's zero-based initial turn position:
/// the first seat after turn-order randomization is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use terra_rules::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player{}", self.0)
    }
}

/// Small per-player table, indexed by `PlayerId`.
///
/// Stored inline for up to `MAX_PLAYERS` seats.
///
/// ```
/// use terra_rules::core::{PlayerId, PlayerMap};
///
/// let mut points: PlayerMap<i32> = PlayerMap::from_fn(3, |p| p.index() as i32);
/// points[PlayerId::new(1)] += 7;
/// assert_eq!(points[PlayerId::new(1)], 8);
/// assert_eq!(points.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: SmallVec<[T; MAX_PLAYERS]>,
}

impl<T> PlayerMap<T> {
    /// One entry per seat, computed from the seat's id.
    ///
    /// # Panics
    ///
    /// Panics if `player_count` is outside `1..=MAX_PLAYERS`.
    pub fn from_fn(player_count: usize, f: impl FnMut(PlayerId) -> T) -> Self {
        assert!(
            (1..=MAX_PLAYERS).contains(&player_count),
            "Player count {player_count} outside 1..={MAX_PLAYERS}"
        );
        Self {
            seats: PlayerId::all(player_count).map(f).collect(),
        }
    }

    /// The same value for every seat.
    pub fn filled(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(player_count, |_| value.clone())
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Always false; a table has at least one seat.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Iterate over `(PlayerId, &T)` in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.seats
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}
