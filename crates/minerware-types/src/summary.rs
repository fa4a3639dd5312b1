//! End-of-round report handed to the host.

use serde::{Deserialize, Serialize};

use crate::{Location, Outcome, PlayerId};

/// One participant's line in the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResult {
    pub player: PlayerId,
    pub outcome: Outcome,
    pub score: u32,
}

/// Structured outcome of a finished round.
///
/// The core never formats text; hosts translate this into whatever
/// messages their players see (including the loser message, which is
/// entirely up to the host).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Every qualifying action observed during the round.
    pub total_qualifying_actions: u32,
    /// Participants in roster order.
    pub participants: Vec<ParticipantResult>,
    /// Locations the host refused to restore at round end.
    pub failed_reverts: Vec<Location>,
}

impl RoundSummary {
    pub fn winners(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.with_outcome(Outcome::Winner)
    }

    pub fn losers(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.with_outcome(Outcome::Loser)
    }

    /// Looks up one participant's line.
    pub fn get(&self, player: PlayerId) -> Option<&ParticipantResult> {
        self.participants.iter().find(|r| r.player == player)
    }

    /// `true` when every recorded edit was restored.
    pub fn fully_reverted(&self) -> bool {
        self.failed_reverts.is_empty()
    }

    fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = PlayerId> + '_ {
        self.participants
            .iter()
            .filter(move |r| r.outcome == outcome)
            .map(|r| r.player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoundSummary {
        RoundSummary {
            total_qualifying_actions: 3,
            participants: vec![
                ParticipantResult {
                    player: PlayerId(1),
                    outcome: Outcome::Winner,
                    score: 3,
                },
                ParticipantResult {
                    player: PlayerId(2),
                    outcome: Outcome::Loser,
                    score: 0,
                },
                ParticipantResult {
                    player: PlayerId(3),
                    outcome: Outcome::Undetermined,
                    score: 0,
                },
            ],
            failed_reverts: Vec::new(),
        }
    }

    #[test]
    fn test_winners_and_losers() {
        let summary = sample();
        assert_eq!(summary.winners().collect::<Vec<_>>(), vec![PlayerId(1)]);
        assert_eq!(summary.losers().collect::<Vec<_>>(), vec![PlayerId(2)]);
        assert!(summary.fully_reverted());
    }

    #[test]
    fn test_get_participant() {
        let summary = sample();
        assert_eq!(summary.get(PlayerId(1)).map(|r| r.score), Some(3));
        assert!(summary.get(PlayerId(9)).is_none());
    }
}
