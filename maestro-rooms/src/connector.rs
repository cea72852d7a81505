//! Backend construction, selected once from configuration

use std::sync::Arc;

use maestro_player::{MopidyPlayer, MpdPlayer, PlayerBackend};

use crate::config::{PlayerProtocol, Room};

/// Opens a backend for a room
///
/// The registry owns the retry policy; a connector only makes one attempt.
/// Splitting the two keeps the registry testable without a live daemon.
pub trait Connect: Send + Sync {
    fn connect(&self, site_id: &str, room: &Room) -> maestro_player::Result<Arc<dyn PlayerBackend>>;
}

/// Connects with the deployment's configured wire protocol
#[derive(Debug, Clone, Copy)]
pub struct PlayerConnector {
    protocol: PlayerProtocol,
}

impl PlayerConnector {
    pub fn new(protocol: PlayerProtocol) -> Self {
        Self { protocol }
    }
}

impl Connect for PlayerConnector {
    fn connect(&self, _site_id: &str, room: &Room) -> maestro_player::Result<Arc<dyn PlayerBackend>> {
        match self.protocol {
            PlayerProtocol::Mpd => {
                MpdPlayer::connect(&room.host, room.port).map(|p| Arc::new(p) as Arc<dyn PlayerBackend>)
            }
            PlayerProtocol::Mopidy => MopidyPlayer::connect(&room.host, room.port)
                .map(|p| Arc::new(p) as Arc<dyn PlayerBackend>),
        }
    }
}
