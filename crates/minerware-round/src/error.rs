//! Error types for the round layer.

use minerware_types::PlayerId;

/// Errors that can occur while driving a round.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    /// `start` was called on a round that is already active or ended.
    #[error("round already started")]
    AlreadyStarted,

    /// The operation needs an active round.
    #[error("round is not active")]
    NotActive,

    /// `end` was called a second time.
    #[error("round already ended")]
    AlreadyEnded,

    /// The player already has a final outcome. Event-driven callers treat
    /// this as a no-op.
    #[error("outcome for player {0} already resolved")]
    AlreadyResolved(PlayerId),

    /// The player is not part of this round's roster.
    #[error("player {0} is not a participant of this round")]
    UnknownParticipant(PlayerId),

    /// The round configuration is malformed.
    #[error("invalid round config: {0}")]
    InvalidConfig(String),
}

impl RoundError {
    /// `true` for start/end ordering mistakes. These point at a bug in the
    /// session manager and are always returned to the caller.
    pub fn is_lifecycle_violation(&self) -> bool {
        matches!(
            self,
            Self::AlreadyStarted | Self::NotActive | Self::AlreadyEnded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_violations() {
        assert!(RoundError::AlreadyStarted.is_lifecycle_violation());
        assert!(RoundError::NotActive.is_lifecycle_violation());
        assert!(RoundError::AlreadyEnded.is_lifecycle_violation());
        assert!(!RoundError::AlreadyResolved(PlayerId(1)).is_lifecycle_violation());
        assert!(!RoundError::UnknownParticipant(PlayerId(1)).is_lifecycle_violation());
    }

    #[test]
    fn test_error_messages_name_the_player() {
        let err = RoundError::UnknownParticipant(PlayerId(9));
        assert!(err.to_string().contains("P-9"));
    }
}
