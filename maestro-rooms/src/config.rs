//! Room configuration
//!
//! A deployment maps site ids (physical rooms) to player addresses. The site
//! id `"default"` is conventionally present and doubles as the fallback for
//! any site that has no room of its own.

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

/// The well-known fallback site id
pub const DEFAULT_SITE_ID: &str = "default";

/// Wire protocol every player in the deployment speaks
///
/// Selected once per deployment, not per room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerProtocol {
    /// MPD-compatible line protocol over TCP
    #[default]
    Mpd,
    /// Mopidy HTTP/JSON-RPC frontend
    Mopidy,
}

/// Static configuration entry for one room's player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    6600
}

impl Room {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

/// Site-to-room mapping plus the deployment-wide protocol choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomsConfig {
    #[serde(default)]
    pub protocol: PlayerProtocol,
    pub rooms: HashMap<String, Room>,
}

impl RoomsConfig {
    /// Load from a JSON reader
    pub fn from_reader(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    /// Single-player setup: one room registered under `"default"`
    pub fn single_room(host: impl Into<String>, port: u16) -> Self {
        let mut rooms = HashMap::new();
        rooms.insert(DEFAULT_SITE_ID.to_string(), Room::new(host, port));
        Self {
            protocol: PlayerProtocol::default(),
            rooms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "protocol": "mopidy",
            "rooms": {
                "default": {"host": "127.0.0.1", "port": 6680},
                "kitchen": {"host": "192.168.1.40"}
            }
        }"#;

        let config = RoomsConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.protocol, PlayerProtocol::Mopidy);
        assert_eq!(config.rooms.len(), 2);
        assert_eq!(config.rooms["default"].port, 6680);
        // Port falls back to the MPD default when omitted
        assert_eq!(config.rooms["kitchen"].port, 6600);
    }

    #[test]
    fn test_protocol_defaults_to_mpd() {
        let json = r#"{"rooms": {"default": {"host": "127.0.0.1"}}}"#;
        let config = RoomsConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.protocol, PlayerProtocol::Mpd);
    }

    #[test]
    fn test_single_room() {
        let config = RoomsConfig::single_room("127.0.0.1", 6600);
        assert!(config.rooms.contains_key(DEFAULT_SITE_ID));
    }
}
