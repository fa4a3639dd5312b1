//! # Minerware
//!
//! Minigame round engine for Minecraft-style arenas.
//!
//! A microgame implements [`RoundRule`](minerware_round::RoundRule); the
//! engine runs it for a few seconds against host services, scores the
//! players, splits them into winners and losers and restores the arena.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minerware::prelude::*;
//!
//! # fn main() -> Result<(), MinerwareError> {
//! minerware::init_tracing();
//!
//! let host = InMemoryHost::new(WorldId(1)).with_players([PlayerId(1)]);
//! let config = RoundConfig::from_json(r#"{ "zones": [ { "candidates": [ { "x": 0, "y": 1, "z": 0 } ] } ] }"#)?;
//! let mut round = RoundController::new(IgniteTnt, host, config);
//! round.start()?;
//! // ... feed host events into round.on_event(..) and tick it ...
//! let summary = round.end()?;
//! # let _ = summary;
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::MinerwareError;

pub use minerware_host as host;
pub use minerware_round as round;
pub use minerware_runner as runner;
pub use minerware_types as types;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to
/// `info`. Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("tracing initialized");
    }
}

/// Common imports for hosting Minerware rounds.
pub mod prelude {
    pub use crate::MinerwareError;
    pub use minerware_host::{
        Clock, Environment, EventSource, Host, HostError, InMemoryHost, ManualClock,
        MonotonicClock, Notifier, Roster, Subscription,
    };
    pub use minerware_round::{
        FirstCandidate, IgniteTnt, InteractionGate, OutcomeResolver, RandomPick, RoundConfig,
        RoundController, RoundError, RoundRule, RoundState, ScoreTracker, SelectionPolicy,
        TickStatus, Zone,
    };
    pub use minerware_runner::{
        RoundFinished, RoundHandle, RunnerError, TickConfig, TokioClock, spawn_round,
    };
    pub use minerware_types::{
        Block, DamageCause, Difficulty, Entity, EventKind, GameMode, HostEvent, Item, Loadout,
        Location, Outcome, PlayerId, Progress, RoundSummary, Verdict, WorldId,
    };
}
