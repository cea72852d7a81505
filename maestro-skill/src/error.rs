use maestro_catalog::CatalogError;
use maestro_player::PlayerError;
use maestro_rooms::RegistryError;
use thiserror::Error;

/// Errors surfaced by the skill facade
#[derive(Debug, Error)]
pub enum SkillError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl SkillError {
    /// Whether the underlying failure is a dead player link
    ///
    /// The facade reconnects and retries exactly once on these; everything
    /// else surfaces as-is.
    pub fn is_connection_error(&self) -> bool {
        match self {
            SkillError::Registry(RegistryError::Player(err)) => err.is_connection_error(),
            SkillError::Registry(_) => false,
            SkillError::Player(err) => err.is_connection_error(),
            SkillError::Catalog(err) => err.is_connection_error(),
        }
    }
}

/// Type alias for results that can return a SkillError
pub type Result<T> = std::result::Result<T, SkillError>;
