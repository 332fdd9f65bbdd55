//! Cult tracks.
//!
//! Each player has a position from 0 to 10 on four independent tracks.
//! Crossing a reward threshold pays power. The top space (10) needs an
//! unused town key and holds one player per track; a player without a key,
//! or facing an occupied top, stops at 9.
//!
//! When one advance would bring more tracks to 10 than the player has keys,
//! none of the contested tracks reach 10 immediately. The player picks
//! which track each key goes to in a follow-up decision.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Highest track position.
pub const CULT_TRACK_TOP: u8 = 10;

/// Steps granted by each priest slot on a track, in slot order.
pub const PRIEST_SLOT_STEPS: [u8; 4] = [3, 2, 2, 2];

/// One of the four cult tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cult {
    Fire,
    Water,
    Earth,
    Air,
}

impl Cult {
    /// All tracks, in board order.
    pub const ALL: [Cult; 4] = [Cult::Fire, Cult::Water, Cult::Earth, Cult::Air];

    /// Position of this track in board order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Cult::Fire => 0,
            Cult::Water => 1,
            Cult::Earth => 2,
            Cult::Air => 3,
        }
    }
}

/// A sequence of single steps, one track per step.
///
/// ```
/// use terra_rules::entities::{Cult, CultDelta};
///
/// let delta = CultDelta::new().steps(Cult::Water, 2).steps(Cult::Air, 1);
/// assert_eq!(delta.by_cult(Cult::Water), 2);
/// assert_eq!(delta.by_cult(Cult::Fire), 0);
/// assert_eq!(delta.len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CultDelta {
    steps: SmallVec<[Cult; 4]>,
}

impl CultDelta {
    /// Create an empty delta.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` steps on `cult`.
    #[must_use]
    pub fn steps(mut self, cult: Cult, count: u8) -> Self {
        self.steps.extend(std::iter::repeat(cult).take(count as usize));
        self
    }

    /// Steps on one track.
    #[must_use]
    pub fn by_cult(&self, cult: Cult) -> u8 {
        self.steps.iter().filter(|&&c| c == cult).count() as u8
    }

    /// Total steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if there are no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Concatenate two deltas.
    #[must_use]
    pub fn merge(mut self, other: &CultDelta) -> Self {
        self.steps.extend(other.steps.iter().copied());
        self
    }
}

/// Power paid for reaching a track position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CultReward {
    pub position: u8,
    pub power: u32,
}

/// Result of advancing a player's cult positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CultAdvance {
    pub state: PlayerCultState,
    pub power_gained: u32,
    pub keys_used: u32,
    /// Tracks stopped at 9 that compete for the player's remaining keys.
    pub key_candidates: SmallVec<[Cult; 4]>,
}

/// One player's position on every track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerCultState {
    pub fire: u8,
    pub water: u8,
    pub earth: u8,
    pub air: u8,
}

impl PlayerCultState {
    /// Position on one track.
    #[must_use]
    pub fn get(&self, cult: Cult) -> u8 {
        match cult {
            Cult::Fire => self.fire,
            Cult::Water => self.water,
            Cult::Earth => self.earth,
            Cult::Air => self.air,
        }
    }

    /// Copy with one track set.
    #[must_use]
    pub fn with(&self, cult: Cult, position: u8) -> Self {
        let mut next = *self;
        let slot = match cult {
            Cult::Fire => &mut next.fire,
            Cult::Water => &mut next.water,
            Cult::Earth => &mut next.earth,
            Cult::Air => &mut next.air,
        };
        *slot = position.min(CULT_TRACK_TOP);
        next
    }

    /// Number of tracks on which the player holds the top space.
    #[must_use]
    pub fn tops_held(&self) -> u32 {
        Cult::ALL
            .iter()
            .filter(|&&c| self.get(c) == CULT_TRACK_TOP)
            .count() as u32
    }

    /// Apply `delta`.
    ///
    /// `keys` is the number of unused town keys, `top_taken` marks tracks
    /// whose top space another player holds.
    #[must_use]
    pub fn advance(
        &self,
        delta: &CultDelta,
        keys: u32,
        top_taken: [bool; 4],
        rewards: &[CultReward],
    ) -> CultAdvance {
        let mut next = *self;
        let mut wanting_top: SmallVec<[Cult; 4]> = SmallVec::new();

        for cult in Cult::ALL {
            let current = self.get(cult);
            let steps = delta.by_cult(cult);
            if steps == 0 || current == CULT_TRACK_TOP {
                continue;
            }
            let target = current.saturating_add(steps).min(CULT_TRACK_TOP);
            if target == CULT_TRACK_TOP {
                next = next.with(cult, CULT_TRACK_TOP - 1);
                if !top_taken[cult.index()] {
                    wanting_top.push(cult);
                }
            } else {
                next = next.with(cult, target);
            }
        }

        let mut keys_used = 0;
        let mut key_candidates = SmallVec::new();
        if wanting_top.len() as u32 <= keys {
            for &cult in &wanting_top {
                next = next.with(cult, CULT_TRACK_TOP);
                keys_used += 1;
            }
        } else if keys > 0 {
            key_candidates = wanting_top;
        }

        let power_gained = Cult::ALL
            .iter()
            .map(|&c| reward_between(self.get(c), next.get(c), rewards))
            .sum();

        CultAdvance {
            state: next,
            power_gained,
            keys_used,
            key_candidates,
        }
    }
}

/// Power for moving from `from` to `to` on one track.
#[must_use]
pub fn reward_between(from: u8, to: u8, rewards: &[CultReward]) -> u32 {
    rewards
        .iter()
        .filter(|r| r.position > from && r.position <= to)
        .map(|r| r.power)
        .sum()
}

/// Priest slots shared by all players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CultBoard {
    slots: [[Option<PlayerId>; 4]; 4],
}

impl CultBoard {
    /// Create a board with all slots empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Free slots on a track as `(slot index, steps)`.
    pub fn free_slots(&self, cult: Cult) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.slots[cult.index()]
            .iter()
            .zip(PRIEST_SLOT_STEPS)
            .enumerate()
            .filter(|(_, (occupant, _))| occupant.is_none())
            .map(|(i, (_, steps))| (i as u8, steps))
    }

    /// Occupant of one slot.
    #[must_use]
    pub fn occupant(&self, cult: Cult, slot: u8) -> Option<PlayerId> {
        self.slots[cult.index()].get(slot as usize).copied().flatten()
    }

    /// Copy with one slot taken.
    #[must_use]
    pub fn occupy(&self, cult: Cult, slot: u8, player: PlayerId) -> Self {
        let mut next = self.clone();
        next.slots[cult.index()][slot as usize] = Some(player);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewards() -> Vec<CultReward> {
        vec![
            CultReward { position: 3, power: 1 },
            CultReward { position: 5, power: 2 },
            CultReward { position: 7, power: 2 },
            CultReward { position: 10, power: 3 },
        ]
    }

    #[test]
    fn test_simple_advance_pays_thresholds() {
        let state = PlayerCultState::default().with(Cult::Fire, 2);
        let delta = CultDelta::new().steps(Cult::Fire, 3);

        let advance = state.advance(&delta, 0, [false; 4], &rewards());

        assert_eq!(advance.state.fire, 5);
        assert_eq!(advance.power_gained, 3);
        assert_eq!(advance.keys_used, 0);
    }

    #[test]
    fn test_top_without_key_stops_at_nine() {
        let state = PlayerCultState::default().with(Cult::Air, 8);
        let delta = CultDelta::new().steps(Cult::Air, 3);

        let advance = state.advance(&delta, 0, [false; 4], &rewards());

        assert_eq!(advance.state.air, 9);
        assert_eq!(advance.power_gained, 0);
        assert!(advance.key_candidates.is_empty());
    }

    #[test]
    fn test_top_with_key() {
        let state = PlayerCultState::default().with(Cult::Air, 8);
        let delta = CultDelta::new().steps(Cult::Air, 2);

        let advance = state.advance(&delta, 1, [false; 4], &rewards());

        assert_eq!(advance.state.air, 10);
        assert_eq!(advance.power_gained, 3);
        assert_eq!(advance.keys_used, 1);
    }

    #[test]
    fn test_top_taken_by_other_player() {
        let state = PlayerCultState::default().with(Cult::Earth, 9);
        let delta = CultDelta::new().steps(Cult::Earth, 1);

        let mut taken = [false; 4];
        taken[Cult::Earth.index()] = true;
        let advance = state.advance(&delta, 1, taken, &rewards());

        assert_eq!(advance.state.earth, 9);
        assert_eq!(advance.keys_used, 0);
    }

    #[test]
    fn test_contested_key_defers_choice() {
        let state = PlayerCultState::default()
            .with(Cult::Fire, 9)
            .with(Cult::Water, 9);
        let delta = CultDelta::new().steps(Cult::Fire, 1).steps(Cult::Water, 1);

        let advance = state.advance(&delta, 1, [false; 4], &rewards());

        assert_eq!(advance.state.fire, 9);
        assert_eq!(advance.state.water, 9);
        assert_eq!(advance.keys_used, 0);
        assert_eq!(advance.key_candidates.as_slice(), &[Cult::Fire, Cult::Water]);
    }

    #[test]
    fn test_priest_slots() {
        let board = CultBoard::new();
        assert_eq!(board.free_slots(Cult::Water).collect::<Vec<_>>(), vec![(0, 3), (1, 2), (2, 2), (3, 2)]);

        let board = board.occupy(Cult::Water, 0, PlayerId::new(1));
        assert_eq!(board.occupant(Cult::Water, 0), Some(PlayerId::new(1)));
        assert_eq!(board.free_slots(Cult::Water).next(), Some((1, 2)));
        assert_eq!(board.free_slots(Cult::Fire).count(), 4);
    }
}
