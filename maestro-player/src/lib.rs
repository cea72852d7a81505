//! Player-backend capability layer for maestro
//!
//! This crate defines the interface every music-player backend exposes to the
//! rest of the system, plus two concrete clients:
//!
//! - [`MpdPlayer`]: a blocking line-protocol client for MPD-compatible
//!   daemons (TCP, `key: value` responses, `ACK` errors)
//! - [`MopidyPlayer`]: a JSON-RPC 2.0 client for Mopidy's HTTP frontend
//!
//! Callers hold a `dyn PlayerBackend` and never learn which protocol is
//! underneath; both clients report a dead link as
//! [`PlayerError::Connection`] so connection management can live entirely in
//! the layer above.
//!
//! ```rust,ignore
//! use maestro_player::{MpdPlayer, PlayerBackend};
//!
//! let player = MpdPlayer::connect("192.168.1.40", 6600)?;
//! if player.status()?.is_playing() {
//!     println!("volume: {:?}", player.volume()?);
//! }
//! ```

pub mod backend;
pub mod error;
pub mod mopidy;
pub mod mpd;
pub mod state;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use backend::{PlayerBackend, SearchTag};
pub use error::{PlayerError, Result};
pub use mopidy::MopidyPlayer;
pub use mpd::MpdPlayer;
pub use state::{PlaybackState, Track, TrackInfo};
