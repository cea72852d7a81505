use maestro_player::PlayerError;
use thiserror::Error;

/// Errors raised while resolving a track request
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Neither tier of the resolution policy produced a playable result
    #[error("No playable result for the request")]
    NotFound,

    /// The streaming catalog answered with a failure
    #[error("Streaming catalog error: {0}")]
    Streaming(String),

    /// A local-library search failed at the player link
    #[error(transparent)]
    Player(#[from] PlayerError),
}

impl CatalogError {
    /// Whether this failure should trigger a reconnect-and-retry cycle
    pub fn is_connection_error(&self) -> bool {
        matches!(self, CatalogError::Player(err) if err.is_connection_error())
    }
}

/// Type alias for results that can return a CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_bubble_through() {
        let err = CatalogError::Player(PlayerError::Connection("gone".to_string()));
        assert!(err.is_connection_error());

        assert!(!CatalogError::NotFound.is_connection_error());
        assert!(!CatalogError::Player(PlayerError::NotPlaying).is_connection_error());
    }
}
