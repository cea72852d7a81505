//! Track request model

use maestro_player::SearchTag;

/// What kind of thing a play-by-name command asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Song,
    Album,
    Artist,
    Playlist,
    Genre,
}

impl RequestKind {
    /// Library tag this kind searches against; playlists resolve by name
    /// against the stored playlist list instead of a tag search.
    pub fn search_tag(&self) -> Option<SearchTag> {
        match self {
            RequestKind::Song => Some(SearchTag::Title),
            RequestKind::Album => Some(SearchTag::Album),
            RequestKind::Artist => Some(SearchTag::Artist),
            RequestKind::Genre => Some(SearchTag::Genre),
            RequestKind::Playlist => None,
        }
    }
}

/// One play-by-name command, constructed per event and never persisted
#[derive(Debug, Clone)]
pub struct TrackRequest {
    pub kind: RequestKind,
    pub name: String,
    pub shuffle: bool,
}

impl TrackRequest {
    pub fn new(kind: RequestKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            shuffle: false,
        }
    }

    pub fn shuffled(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}
