//! How the round picks which candidate cell of a zone to mutate.

use minerware_types::Location;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chooses one candidate per zone at round start.
///
/// Returning `None` skips the zone.
pub trait SelectionPolicy: Send {
    fn select(&mut self, zone: usize, candidates: &[Location]) -> Option<Location>;
}

/// Closures work as policies, which keeps scripted tests short.
impl<F> SelectionPolicy for F
where
    F: FnMut(usize, &[Location]) -> Option<Location> + Send,
{
    fn select(&mut self, zone: usize, candidates: &[Location]) -> Option<Location> {
        self(zone, candidates)
    }
}

/// Uniformly random candidate from a ChaCha8 stream.
///
/// The same seed always selects the same cells.
#[derive(Debug, Clone)]
pub struct RandomPick {
    rng: ChaCha8Rng,
}

impl RandomPick {
    /// Seeds from the thread RNG.
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPick {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPolicy for RandomPick {
    fn select(&mut self, _zone: usize, candidates: &[Location]) -> Option<Location> {
        if candidates.is_empty() {
            return None;
        }
        let i = self.rng.random_range(0..candidates.len());
        Some(candidates[i])
    }
}

/// Always the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl SelectionPolicy for FirstCandidate {
    fn select(&mut self, _zone: usize, candidates: &[Location]) -> Option<Location> {
        candidates.first().copied()
    }
}
