//! Site-to-connection registry with concurrent startup and reconnect
//!
//! Startup establishes every configured room at once, one connect worker per
//! room, and the registry is not ready until all of them are live; a slow or
//! unreachable room never inflates another room's connect time. Each worker
//! retries indefinitely with a fixed delay, so an unreachable room blocks
//! readiness until it comes back: the registry would rather wait than start
//! half-configured.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use dashmap::DashMap;
use maestro_player::PlayerBackend;
use tracing::{info, warn};

use crate::config::{Room, DEFAULT_SITE_ID};
use crate::connection::PlayerConnection;
use crate::connector::Connect;
use crate::error::{RegistryError, Result};

/// Fixed delay between connect attempts for one room
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Owns one live [`PlayerConnection`] per configured site
pub struct RoomRegistry {
    connections: DashMap<String, Arc<PlayerConnection>>,
    connector: Arc<dyn Connect>,
    retry_delay: Duration,
}

impl RoomRegistry {
    /// Connect every configured room concurrently and wait for all of them
    ///
    /// Requires a `"default"` room: without one, unknown sites would have
    /// nothing to fall back to, which is a configuration error worth failing
    /// at startup rather than on the first command.
    pub fn initialize(
        rooms: HashMap<String, Room>,
        connector: Arc<dyn Connect>,
        retry_delay: Duration,
    ) -> Result<Self> {
        if !rooms.contains_key(DEFAULT_SITE_ID) {
            return Err(RegistryError::NoDefaultRoom(DEFAULT_SITE_ID.to_string()));
        }

        info!("Connecting {} configured rooms", rooms.len());

        let workers: Vec<_> = rooms
            .into_iter()
            .map(|(site_id, room)| {
                let connector = Arc::clone(&connector);
                thread::spawn(move || {
                    let backend =
                        connect_with_retry(connector.as_ref(), &site_id, &room, retry_delay);
                    Arc::new(PlayerConnection::new(site_id, room, backend))
                })
            })
            .collect();

        let connections = DashMap::new();
        for worker in workers {
            let connection = worker
                .join()
                .map_err(|_| RegistryError::Startup("room connect worker panicked".to_string()))?;
            info!("Site '{}' is connected", connection.site_id());
            connections.insert(connection.site_id().to_string(), connection);
        }

        Ok(Self {
            connections,
            connector,
            retry_delay,
        })
    }

    /// The connection for a site, falling back to `"default"`
    pub fn connection(&self, site_id: &str) -> Result<Arc<PlayerConnection>> {
        self.connections
            .get(site_id)
            .or_else(|| self.connections.get(DEFAULT_SITE_ID))
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistryError::NoDefaultRoom(site_id.to_string()))
    }

    /// Replace a site's backend with a freshly established one
    ///
    /// Uses the same retry policy as startup; the connection handle itself
    /// stays in place, so existing holders see the new backend on their next
    /// lookup.
    pub fn reconnect(&self, site_id: &str) -> Result<()> {
        let connection = self.connection(site_id)?;
        info!("Reconnecting site '{}'", connection.site_id());
        let backend = connect_with_retry(
            self.connector.as_ref(),
            connection.site_id(),
            connection.room(),
            self.retry_delay,
        );
        connection.replace_backend(backend);
        Ok(())
    }

    /// Configured site ids, in no particular order
    pub fn sites(&self) -> Vec<String> {
        self.connections
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

/// Retry until the room answers; each failure is logged and waited out
fn connect_with_retry(
    connector: &dyn Connect,
    site_id: &str,
    room: &Room,
    retry_delay: Duration,
) -> Arc<dyn PlayerBackend> {
    let mut attempt: u32 = 1;
    loop {
        match connector.connect(site_id, room) {
            Ok(backend) => {
                if attempt > 1 {
                    info!("Site '{}' connected after {} attempts", site_id, attempt);
                }
                return backend;
            }
            Err(err) => {
                warn!(
                    "Connect attempt {} for site '{}' ({}:{}) failed: {}",
                    attempt, site_id, room.host, room.port, err
                );
                thread::sleep(retry_delay);
                attempt += 1;
            }
        }
    }
}
