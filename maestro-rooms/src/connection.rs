//! Live connection handle for one room

use std::sync::Arc;

use maestro_player::PlayerBackend;
use parking_lot::RwLock;

use crate::config::Room;

/// One room's live player connection
///
/// The site identity is stable for the life of the registry; the backend
/// handle underneath is replaced in place on reconnect, so holders of the
/// connection never need to re-resolve their site.
pub struct PlayerConnection {
    site_id: String,
    room: Room,
    backend: RwLock<Arc<dyn PlayerBackend>>,
}

impl PlayerConnection {
    pub(crate) fn new(site_id: String, room: Room, backend: Arc<dyn PlayerBackend>) -> Self {
        Self {
            site_id,
            room,
            backend: RwLock::new(backend),
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    /// The current backend handle
    ///
    /// The clone is cheap; callers run a whole command against one handle and
    /// pick up a replacement on their next lookup after a reconnect.
    pub fn backend(&self) -> Arc<dyn PlayerBackend> {
        Arc::clone(&self.backend.read())
    }

    pub(crate) fn replace_backend(&self, backend: Arc<dyn PlayerBackend>) {
        *self.backend.write() = backend;
    }
}

impl std::fmt::Debug for PlayerConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerConnection")
            .field("site_id", &self.site_id)
            .field("room", &self.room)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maestro_player::test_support::MockPlayer;

    #[test]
    fn test_replace_backend_swaps_handle() {
        let first: Arc<dyn PlayerBackend> = Arc::new(MockPlayer::new());
        let second: Arc<dyn PlayerBackend> = Arc::new(MockPlayer::new());

        let connection = PlayerConnection::new(
            "default".to_string(),
            Room::new("127.0.0.1", 6600),
            Arc::clone(&first),
        );
        assert!(Arc::ptr_eq(&connection.backend(), &first));

        connection.replace_backend(Arc::clone(&second));
        assert!(Arc::ptr_eq(&connection.backend(), &second));
        assert_eq!(connection.site_id(), "default");
    }
}
