//! The player-backend capability interface
//!
//! Any concrete backend (line-protocol daemon, HTTP/JSON-RPC daemon) exposes
//! this same interface so the rest of the system stays backend-agnostic.

use crate::error::Result;
use crate::state::{PlaybackState, Track, TrackInfo};

/// Library tag a search operation runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTag {
    Title,
    Album,
    Artist,
    Genre,
}

impl SearchTag {
    /// Tag name in the MPD filter syntax
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchTag::Title => "title",
            SearchTag::Album => "album",
            SearchTag::Artist => "artist",
            SearchTag::Genre => "genre",
        }
    }
}

/// Capability interface over one physical player backend
///
/// Implementations talk blocking I/O to a live daemon. Every method that
/// touches the link must detect a dead connection and return
/// [`PlayerError::Connection`](crate::PlayerError::Connection) rather than
/// crash the caller or hand back stale data.
pub trait PlayerBackend: Send + Sync {
    /// Cheap health check against the live link
    fn ping(&self) -> Result<()>;

    /// Current playback state
    fn status(&self) -> Result<PlaybackState>;

    /// Current mixer volume in [0, 100]
    ///
    /// Returns `None` when the backend has no mixer volume to report
    /// (Mopidy returns `null`, MPD reports `-1`).
    fn volume(&self) -> Result<Option<u8>>;

    /// Set the mixer volume; `volume` must already be in [0, 100]
    fn set_volume(&self, volume: u8) -> Result<()>;

    /// Append tracks to the end of the queue
    fn enqueue(&self, uris: &[String]) -> Result<()>;

    /// Remove every track from the queue
    fn clear_queue(&self) -> Result<()>;

    /// Start or resume playback at the current queue position
    fn play(&self) -> Result<()>;

    /// Start playback at the head of the queue
    fn play_first(&self) -> Result<()>;

    fn pause(&self) -> Result<()>;

    fn stop(&self) -> Result<()>;

    /// Step to the next queued track
    ///
    /// Returns `false` when there is no next track; running off the end of
    /// the queue is an expected outcome, not an error.
    fn next(&self) -> Result<bool>;

    /// Step to the previous queued track
    ///
    /// Returns `false` when already at the head of the queue.
    fn previous(&self) -> Result<bool>;

    /// Shuffle the current queue in place
    fn shuffle(&self) -> Result<()>;

    /// Metadata for the currently playing track
    ///
    /// Fails with [`PlayerError::NotPlaying`](crate::PlayerError::NotPlaying)
    /// when nothing is loaded.
    fn current_track_info(&self) -> Result<TrackInfo>;

    /// Exact tag lookup in the local library (case-sensitive)
    fn find_exact(&self, tag: SearchTag, value: &str) -> Result<Vec<Track>>;

    /// Substring tag search in the local library (case-insensitive)
    fn search_fuzzy(&self, tag: SearchTag, value: &str) -> Result<Vec<Track>>;

    /// Names of the locally stored playlists
    fn list_playlists(&self) -> Result<Vec<String>>;

    /// Tracks of a locally stored playlist, by exact name
    fn playlist_tracks(&self, name: &str) -> Result<Vec<Track>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_tag_names() {
        assert_eq!(SearchTag::Title.as_str(), "title");
        assert_eq!(SearchTag::Album.as_str(), "album");
        assert_eq!(SearchTag::Artist.as_str(), "artist");
        assert_eq!(SearchTag::Genre.as_str(), "genre");
    }
}
