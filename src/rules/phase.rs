//! Game phases.

use serde::{Deserialize, Serialize};

/// What the game is waiting for.
///
/// `Turn` is a regular turn of the active player. `Over` is terminal. Every
/// other phase is a decision served from the pending decision queue, each
/// with exactly one off-turn action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    SelectFaction,
    PlaceInitialDwelling,
    SelectInitialBonusTile,
    Turn,
    SelectTownTile,
    SelectFavorTile,
    LeechDecision,
    BonusSpadeDecision,
    CultistDecision,
    CultTrackDecision,
    Over,
}

impl Phase {
    /// All phases.
    pub const ALL: [Phase; 11] = [
        Phase::SelectFaction,
        Phase::PlaceInitialDwelling,
        Phase::SelectInitialBonusTile,
        Phase::Turn,
        Phase::SelectTownTile,
        Phase::SelectFavorTile,
        Phase::LeechDecision,
        Phase::BonusSpadeDecision,
        Phase::CultistDecision,
        Phase::CultTrackDecision,
        Phase::Over,
    ];

    /// Phases of the setup round.
    #[must_use]
    pub const fn is_setup(self) -> bool {
        matches!(
            self,
            Phase::SelectFaction | Phase::PlaceInitialDwelling | Phase::SelectInitialBonusTile
        )
    }

    /// Phases served from the decision queue.
    #[must_use]
    pub const fn is_decision(self) -> bool {
        !matches!(self, Phase::Turn | Phase::Over)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_kinds() {
        let decisions = Phase::ALL.iter().filter(|p| p.is_decision()).count();
        assert_eq!(decisions, 9);

        assert!(Phase::SelectFaction.is_setup());
        assert!(!Phase::LeechDecision.is_setup());
        assert!(!Phase::Turn.is_decision());
    }
}
