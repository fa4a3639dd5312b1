//! Round configuration and state machine.

use std::time::Duration;

use minerware_types::Location;
use serde::{Deserialize, Serialize};

use crate::RoundError;

// ---------------------------------------------------------------------------
// RoundConfig
// ---------------------------------------------------------------------------

/// A set of candidate cells, one of which is mutated at round start.
///
/// Candidates are relative to [`RoundConfig::origin`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Zone {
    pub candidates: Vec<Location>,
}

impl Zone {
    pub fn new(candidates: impl IntoIterator<Item = Location>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
        }
    }
}

/// Per-arena settings for a round.
///
/// The rule decides *what* happens; the config says *where*. Arenas load
/// this from their map description, usually as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Minimum corner of the arena platform. Zone candidates are offsets
    /// from here.
    pub origin: Location,

    /// One setup edit is applied per zone.
    pub zones: Vec<Zone>,

    /// Overrides the rule's nominal duration. `None` uses the rule's.
    pub duration_secs: Option<f64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            origin: Location::new(0, 0, 0),
            zones: Vec::new(),
            duration_secs: None,
        }
    }
}

impl RoundConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, RoundError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RoundError::InvalidConfig(e.to_string()))?;
        config.validated()
    }

    /// Rejects configs a round cannot run with.
    ///
    /// - `duration_secs`, when set, must be finite and positive.
    /// - Every zone needs at least one candidate.
    /// - Every candidate, offset from `origin`, must stay inside `i32`.
    pub fn validated(self) -> Result<Self, RoundError> {
        if let Some(secs) = self.duration_secs {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(RoundError::InvalidConfig(format!(
                    "duration_secs must be positive, got {secs}"
                )));
            }
        }
        if let Some(i) = self.zones.iter().position(|z| z.candidates.is_empty()) {
            return Err(RoundError::InvalidConfig(format!(
                "zone {i} has no candidates"
            )));
        }
        for (i, zone) in self.zones.iter().enumerate() {
            if let Some(c) = zone.candidates.iter().find(|c| self.resolve(**c).is_none()) {
                return Err(RoundError::InvalidConfig(format!(
                    "zone {i} candidate {c} is out of range from origin {}",
                    self.origin
                )));
            }
        }
        Ok(self)
    }

    /// Absolute location of a zone candidate. `None` on coordinate
    /// overflow.
    pub fn resolve(&self, candidate: Location) -> Option<Location> {
        self.origin.checked_offset(candidate)
    }

    /// The configured duration override, if any.
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(Duration::from_secs_f64)
    }
}

// ---------------------------------------------------------------------------
// RoundState
// ---------------------------------------------------------------------------

/// The lifecycle state of a round.
///
/// Transitions are strictly ordered, never reversed, never skipped:
///
/// ```text
/// NotStarted → Active → Ended
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundState {
    #[default]
    NotStarted,
    Active,
    Ended,
}

impl RoundState {
    /// Returns `true` while the round is accepting events and ticks.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// The only state reachable from `self`, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::NotStarted => Some(Self::Active),
            Self::Active => Some(Self::Ended),
            Self::Ended => None,
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl std::fmt::Display for RoundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "NotStarted"),
            Self::Active => write!(f, "Active"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}
