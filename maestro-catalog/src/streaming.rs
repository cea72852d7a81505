//! Boundary with the streaming-catalog collaborator
//!
//! The streaming service itself lives outside this system; the resolver only
//! needs name-to-URIs search and a "save this track" operation. When no
//! implementation is configured, resolution degrades to local-library-only.

use crate::error::Result;
use crate::request::RequestKind;

/// Capability interface over an external streaming-music catalog
pub trait StreamingCatalog: Send + Sync {
    /// Resolve a name to playable URIs; an empty result means "not found"
    fn search_by_kind(&self, kind: RequestKind, name: &str) -> Result<Vec<String>>;

    /// Save a track to the user's streaming collection
    fn save_track(&self, artist: &str, title: &str) -> Result<bool>;
}
