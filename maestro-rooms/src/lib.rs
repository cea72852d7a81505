//! Per-room state for maestro
//!
//! Owns the two pieces of mutable shared state in the system:
//!
//! - [`RoomRegistry`]: one live [`PlayerConnection`] per configured site,
//!   established concurrently at startup and replaced in place on reconnect
//! - [`VolumeSessionManager`]: the saved volume to restore after a spoken
//!   interruption, one ephemeral entry per site
//!
//! Both maps lock per site: independent rooms never block each other, while
//! operations against one site stay serialized.
//!
//! ```rust,ignore
//! use maestro_rooms::{PlayerConnector, RoomRegistry, RoomsConfig, DEFAULT_RETRY_DELAY};
//! use std::sync::Arc;
//!
//! let config = RoomsConfig::from_reader(std::fs::File::open("config.json")?)?;
//! let connector = Arc::new(PlayerConnector::new(config.protocol));
//! let registry = RoomRegistry::initialize(config.rooms, connector, DEFAULT_RETRY_DELAY)?;
//! let connection = registry.connection("kitchen")?;
//! ```

pub mod config;
pub mod connection;
pub mod connector;
pub mod error;
pub mod registry;
pub mod volume;

pub use config::{PlayerProtocol, Room, RoomsConfig, DEFAULT_SITE_ID};
pub use connection::PlayerConnection;
pub use connector::{Connect, PlayerConnector};
pub use error::{RegistryError, Result};
pub use registry::{RoomRegistry, DEFAULT_RETRY_DELAY};
pub use volume::{VolumeSessionManager, DEFAULT_LOW_VOLUME};
