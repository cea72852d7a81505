use thiserror::Error;

/// Errors raised by player backends
///
/// Every operation that talks to a live player link maps transport-level
/// failures to `Connection` so callers can distinguish "the link is down,
/// reconnect and retry" from a malformed or refused command.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The link to the player daemon is down or was dropped mid-operation
    #[error("Connection error: {0}")]
    Connection(String),

    /// The daemon answered, but refused the command or violated the protocol
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Track info was requested while nothing is playing
    #[error("Nothing is playing")]
    NotPlaying,

    /// The daemon answered with data we could not interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PlayerError {
    /// Whether this failure should trigger a reconnect-and-retry cycle
    pub fn is_connection_error(&self) -> bool {
        matches!(self, PlayerError::Connection(_))
    }
}

/// Type alias for results that can return a PlayerError
pub type Result<T> = std::result::Result<T, PlayerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_connection_error() {
        assert!(PlayerError::Connection("refused".to_string()).is_connection_error());
        assert!(!PlayerError::Protocol("bad command".to_string()).is_connection_error());
        assert!(!PlayerError::NotPlaying.is_connection_error());
    }

    #[test]
    fn test_error_display() {
        let err = PlayerError::Connection("connection reset".to_string());
        assert_eq!(format!("{}", err), "Connection error: connection reset");

        let err = PlayerError::NotPlaying;
        assert_eq!(format!("{}", err), "Nothing is playing");
    }
}
