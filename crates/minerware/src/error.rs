//! Unified error type for Minerware.

use minerware_host::HostError;
use minerware_round::RoundError;
use minerware_runner::RunnerError;

/// Top-level error that wraps every crate-specific error.
///
/// The `#[from]` on each variant lets `?` convert sub-crate errors, so
/// callers of the `minerware` meta-crate only deal with this type.
#[derive(Debug, thiserror::Error)]
pub enum MinerwareError {
    /// A host service failed (occupied cell, unavailable server).
    #[error(transparent)]
    Host(#[from] HostError),

    /// The round rejected a call (lifecycle order, unknown player, bad
    /// config).
    #[error(transparent)]
    Round(#[from] RoundError),

    /// The round actor is gone or relayed a round error.
    #[error(transparent)]
    Runner(#[from] RunnerError),
}
