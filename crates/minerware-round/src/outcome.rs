//! Winner/loser partition of the roster.

use std::collections::HashMap;

use minerware_types::{Outcome, PlayerId};

use crate::RoundError;

/// Tracks each participant's outcome and enforces that it changes at most
/// once: `Undetermined → Winner` or `Undetermined → Loser`.
#[derive(Debug, Clone, Default)]
pub struct OutcomeResolver {
    /// Roster order.
    outcomes: Vec<(PlayerId, Outcome)>,
    index: HashMap<PlayerId, usize>,
}

impl OutcomeResolver {
    pub fn new(roster: &[PlayerId]) -> Self {
        let mut resolver = Self::default();
        for &player in roster {
            if resolver.index.contains_key(&player) {
                continue;
            }
            resolver.index.insert(player, resolver.outcomes.len());
            resolver.outcomes.push((player, Outcome::Undetermined));
        }
        resolver
    }

    /// # Errors
    /// - [`RoundError::AlreadyResolved`] if the player already has an outcome
    /// - [`RoundError::UnknownParticipant`] if the player is not in the roster
    pub fn assign_winner(&mut self, player: PlayerId) -> Result<(), RoundError> {
        self.assign(player, Outcome::Winner)
    }

    /// Same guards as [`assign_winner`](Self::assign_winner).
    pub fn assign_loser(&mut self, player: PlayerId) -> Result<(), RoundError> {
        self.assign(player, Outcome::Loser)
    }

    /// Gives `default` to every participant still `Undetermined` and
    /// returns who changed, in roster order.
    pub fn resolve_remaining(&mut self, default: Outcome) -> Vec<PlayerId> {
        if !default.is_resolved() {
            return Vec::new();
        }
        self.outcomes
            .iter_mut()
            .filter(|(_, outcome)| !outcome.is_resolved())
            .map(|(player, outcome)| {
                *outcome = default;
                *player
            })
            .collect()
    }

    pub fn outcome(&self, player: PlayerId) -> Option<Outcome> {
        self.index.get(&player).map(|&i| self.outcomes[i].1)
    }

    pub fn winners(&self) -> Vec<PlayerId> {
        self.with(Outcome::Winner)
    }

    pub fn losers(&self) -> Vec<PlayerId> {
        self.with(Outcome::Loser)
    }

    /// `true` once nobody is left `Undetermined`.
    pub fn is_settled(&self) -> bool {
        self.outcomes.iter().all(|(_, o)| o.is_resolved())
    }

    fn assign(&mut self, player: PlayerId, outcome: Outcome) -> Result<(), RoundError> {
        let i = *self
            .index
            .get(&player)
            .ok_or(RoundError::UnknownParticipant(player))?;
        let slot = &mut self.outcomes[i].1;
        if slot.is_resolved() {
            return Err(RoundError::AlreadyResolved(player));
        }
        *slot = outcome;
        Ok(())
    }

    fn with(&self, outcome: Outcome) -> Vec<PlayerId> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == outcome)
            .map(|(p, _)| *p)
            .collect()
    }
}
