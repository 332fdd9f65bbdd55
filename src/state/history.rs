//! Driver-side snapshot lookup.
//!
//! Snapshots only know the id of their predecessor. `SnapshotHistory` keeps
//! the snapshots a driver has committed so those ids can be resolved for
//! replay and undo. The engine never reads it.

use std::sync::Arc;

use super::game::GameState;
use crate::core::SnapshotId;

/// Committed snapshots of one game, by id.
///
/// Holds a single line of play. Recording a snapshot drops everything
/// recorded after its predecessor, so playing on from an earlier snapshot
/// replaces the abandoned continuation.
#[derive(Clone, Debug, Default)]
pub struct SnapshotHistory {
    snapshots: im::OrdMap<SnapshotId, Arc<GameState>>,
}

impl SnapshotHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a snapshot and return the shared handle.
    pub fn record(&mut self, state: GameState) -> Arc<GameState> {
        if let Some(previous) = state.previous_state() {
            self.truncate_after(previous);
        } else {
            self.snapshots = im::OrdMap::new();
        }
        let state = Arc::new(state);
        self.snapshots.insert(state.snapshot_id(), Arc::clone(&state));
        state
    }

    /// Look up a snapshot.
    #[must_use]
    pub fn get(&self, id: SnapshotId) -> Option<&Arc<GameState>> {
        self.snapshots.get(&id)
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<&Arc<GameState>> {
        self.snapshots.get_max().map(|(_, state)| state)
    }

    /// Resolve the back-reference of `state`.
    #[must_use]
    pub fn previous(&self, state: &GameState) -> Option<&Arc<GameState>> {
        state.previous_state().and_then(|id| self.get(id))
    }

    /// Walk back from `id` to the first snapshot.
    pub fn chain(&self, id: SnapshotId) -> impl Iterator<Item = &Arc<GameState>> + '_ {
        std::iter::successors(self.get(id), move |state| self.previous(state))
    }

    /// Drop the latest snapshot and return the one before it.
    pub fn undo(&mut self) -> Option<Arc<GameState>> {
        let (id, _) = self.snapshots.get_max()?;
        let id = *id;
        self.snapshots.remove(&id);
        self.latest().cloned()
    }

    /// Drop every snapshot recorded after `id`.
    pub fn truncate_after(&mut self, id: SnapshotId) {
        let (kept, current, _) = self.snapshots.split_lookup(&id);
        self.snapshots = kept;
        if let Some(state) = current {
            self.snapshots.insert(id, state);
        }
    }

    /// Number of snapshots held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionExecution;
    use crate::core::FactionId;
    use crate::testing;

    fn select(state: &GameState, faction: &'static str) -> GameState {
        testing::submit(
            state,
            &ActionExecution::SelectFaction {
                faction: FactionId::new(faction),
            },
        )
    }

    #[test]
    fn test_chain_follows_back_references() {
        let mut history = SnapshotHistory::new();
        let first = history.record(testing::new_game(3));
        let second = history.record(select(&first, "Witches"));
        let third = history.record(select(&second, "Nomads"));

        let ids: Vec<_> = history
            .chain(third.snapshot_id())
            .map(|s| s.snapshot_id())
            .collect();
        assert_eq!(ids, vec![SnapshotId(2), SnapshotId(1), SnapshotId(0)]);
        assert_eq!(history.previous(&third).map(|s| s.snapshot_id()), Some(SnapshotId(1)));
    }

    #[test]
    fn test_branching_replaces_continuation() {
        let mut history = SnapshotHistory::new();
        let first = history.record(testing::new_game(2));
        let second = history.record(select(&first, "Witches"));
        history.record(select(&second, "Nomads"));
        assert_eq!(history.len(), 3);

        let other = history.record(select(&first, "Engineers"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().map(|s| s.snapshot_id()), Some(other.snapshot_id()));
        assert_eq!(
            history.get(SnapshotId(1)).and_then(|s| s.player(crate::core::PlayerId::new(0)).faction.clone()),
            Some(FactionId::new("Engineers"))
        );
    }

    #[test]
    fn test_undo() {
        let mut history = SnapshotHistory::new();
        let first = history.record(testing::new_game(2));
        history.record(select(&first, "Witches"));

        let restored = history.undo().unwrap();
        assert_eq!(*restored, *first);
        assert_eq!(history.len(), 1);
        assert!(history.undo().is_none());
        assert!(history.is_empty());
    }
}
