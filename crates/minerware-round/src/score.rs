//! Per-participant counters and the round-wide total.

use std::collections::HashMap;

use minerware_types::PlayerId;

#[derive(Debug, Clone)]
struct ScoreEntry {
    player: PlayerId,
    score: u32,
    /// Left the round (eliminated or disconnected). Keeps its score but
    /// accepts no more increments.
    retired: bool,
}

/// Score counters for one round.
///
/// Entries keep roster order, which is the tie-break for
/// [`ranked`](Self::ranked). The total is kept separately from the
/// counters and only ever grows.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    entries: Vec<ScoreEntry>,
    index: HashMap<PlayerId, usize>,
    total: u32,
}

impl ScoreTracker {
    /// Creates a tracker for `roster`, all counters at zero. Duplicate ids
    /// keep their first position.
    pub fn new(roster: &[PlayerId]) -> Self {
        let mut tracker = Self::default();
        for &player in roster {
            if tracker.index.contains_key(&player) {
                continue;
            }
            tracker.index.insert(player, tracker.entries.len());
            tracker.entries.push(ScoreEntry {
                player,
                score: 0,
                retired: false,
            });
        }
        tracker
    }

    /// Adds one point for `player` and one to the total.
    ///
    /// Returns `false` (and changes nothing) for players that are not in
    /// the roster or have been retired; late events from departed players
    /// are expected and harmless.
    pub fn increment(&mut self, player: PlayerId) -> bool {
        let Some(entry) = self.entry_mut(player) else {
            return false;
        };
        if entry.retired {
            return false;
        }
        entry.score += 1;
        self.total += 1;
        true
    }

    /// Takes `player` out of play. Returns `true` if they were in play.
    pub fn retire(&mut self, player: PlayerId) -> bool {
        match self.entry_mut(player) {
            Some(entry) if !entry.retired => {
                entry.retired = true;
                true
            }
            _ => false,
        }
    }

    /// `true` if `player` was in the roster snapshot.
    pub fn contains(&self, player: PlayerId) -> bool {
        self.index.contains_key(&player)
    }

    /// `true` if `player` is in the roster and still in play.
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.index
            .get(&player)
            .is_some_and(|&i| !self.entries[i].retired)
    }

    pub fn score(&self, player: PlayerId) -> Option<u32> {
        self.index.get(&player).map(|&i| self.entries[i].score)
    }

    /// Participants ordered by score, highest first. Equal scores keep
    /// roster order.
    pub fn ranked(&self) -> Vec<(PlayerId, u32)> {
        let mut ranked: Vec<(PlayerId, u32)> =
            self.entries.iter().map(|e| (e.player, e.score)).collect();
        // `sort_by` is stable, which is what makes the tie-break hold.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Every qualifying action counted this round.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Participants in roster order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.entries.iter().map(|e| e.player)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, player: PlayerId) -> Option<&mut ScoreEntry> {
        let i = *self.index.get(&player)?;
        self.entries.get_mut(i)
    }
}
