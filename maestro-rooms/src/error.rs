use maestro_player::PlayerError;
use thiserror::Error;

/// Errors raised by the room registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A site has no connection and no `"default"` room exists to fall back
    /// to. This is a configuration error, fatal at startup.
    #[error("No connection for site '{0}' and no 'default' room is configured")]
    NoDefaultRoom(String),

    /// A connect worker died during concurrent startup
    #[error("Registry startup failed: {0}")]
    Startup(String),

    /// A player operation failed underneath the registry
    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// Type alias for results that can return a RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;
