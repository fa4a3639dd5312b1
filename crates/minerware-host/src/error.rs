//! Error types for host services.

use minerware_types::Location;

/// Errors a host can report back to the round.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The location is held by something else (another system, an
    /// entity) and cannot be written right now.
    #[error("location {0} is occupied")]
    Occupied(Location),

    /// The location is outside the loaded world.
    #[error("location {0} is out of bounds")]
    OutOfBounds(Location),

    /// The host service is gone or refused the call.
    #[error("host unavailable: {0}")]
    Unavailable(String),
}
