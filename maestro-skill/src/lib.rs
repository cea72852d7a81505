//! Voice command facade for maestro
//!
//! Bridges spoken-intent events to music-player commands, one operation per
//! voice command. The facade looks up the live connection for the event's
//! site, consults per-site volume sessions, resolves play-by-name requests
//! through the catalog, and recovers transparently from a dropped player
//! link by reconnecting once and retrying the command.
//!
//! # Example
//!
//! ```rust,ignore
//! use maestro_rooms::RoomsConfig;
//! use maestro_skill::{Command, MusicSkill, SkillConfig};
//!
//! let rooms = RoomsConfig::from_reader(std::fs::File::open("config.json")?)?;
//! let skill = MusicSkill::from_config(rooms, None, SkillConfig::default())?;
//!
//! // The bus listener dispatches decoded intents:
//! skill.handle("kitchen", Command::PlayPlaylist {
//!     name: "summer vibes".to_string(),
//!     shuffle: true,
//! })?;
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod skill;

pub use command::Command;
pub use config::SkillConfig;
pub use error::{Result, SkillError};
pub use skill::MusicSkill;
