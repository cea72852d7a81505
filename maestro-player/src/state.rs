//! Model types shared by all player backends

use serde::{Deserialize, Serialize};

/// Playback state reported by a player backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
    /// The backend reported a state we do not recognize
    Unknown,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }
}

/// Metadata for the currently playing track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// A playable track from a local library search
///
/// Tag fields default to empty strings when the library has no metadata for
/// them; `uri` is always present and is what gets enqueued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub genre: String,
}

impl Track {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// The value this track carries for a given search tag
    pub fn tag_value(&self, tag: crate::SearchTag) -> &str {
        match tag {
            crate::SearchTag::Title => &self.title,
            crate::SearchTag::Album => &self.album,
            crate::SearchTag::Artist => &self.artist,
            crate::SearchTag::Genre => &self.genre,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchTag;

    #[test]
    fn test_is_playing() {
        assert!(PlaybackState::Playing.is_playing());
        assert!(!PlaybackState::Paused.is_playing());
        assert!(!PlaybackState::Stopped.is_playing());
        assert!(!PlaybackState::Unknown.is_playing());
    }

    #[test]
    fn test_track_tag_value() {
        let track = Track {
            uri: "local:track:1".to_string(),
            title: "Cut My Hair".to_string(),
            artist: "Mounika".to_string(),
            album: "How Are You".to_string(),
            genre: "Hip-Hop".to_string(),
        };

        assert_eq!(track.tag_value(SearchTag::Title), "Cut My Hair");
        assert_eq!(track.tag_value(SearchTag::Artist), "Mounika");
        assert_eq!(track.tag_value(SearchTag::Album), "How Are You");
        assert_eq!(track.tag_value(SearchTag::Genre), "Hip-Hop");
    }
}
