//! Round lifecycle engine for Minerware.
//!
//! A round activates a rule for a few seconds, watches what players do,
//! scores them, splits the roster into winners and losers, and leaves the
//! arena exactly as it found it.
//!
//! # Key types
//!
//! - [`RoundController`]: the lifecycle (`start`, `tick`, `end`) and the
//!   only type the session manager talks to
//! - [`RoundRule`]: the trait each microgame implements ([`IgniteTnt`])
//! - [`InteractionGate`]: decides what a host event means for the round
//! - [`ScoreTracker`] / [`OutcomeResolver`]: points and the winner/loser
//!   partition
//! - [`EnvironmentMutationLog`]: reversible world edits
//! - [`RoundConfig`] / [`RoundState`]: arena settings and the state
//!   machine

mod config;
mod controller;
mod error;
mod gate;
mod ignite;
mod mutation;
mod outcome;
mod rule;
mod score;
mod selection;

pub use config::{RoundConfig, RoundState, Zone};
pub use controller::{RoundController, TickStatus};
pub use error::RoundError;
pub use gate::InteractionGate;
pub use ignite::IgniteTnt;
pub use mutation::{EnvironmentEdit, EnvironmentMutationLog, RevertReport};
pub use outcome::OutcomeResolver;
pub use rule::{DEFAULT_REWARD_POINTS, RoundRule};
pub use score::ScoreTracker;
pub use selection::{FirstCandidate, RandomPick, SelectionPolicy};
