//! Error types for the runner.

use minerware_round::RoundError;

/// Errors returned through a [`RoundHandle`](crate::RoundHandle).
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The round itself rejected the call.
    #[error(transparent)]
    Round(#[from] RoundError),

    /// The round actor has finished; its queue is closed.
    #[error("round actor stopped")]
    Stopped,
}
