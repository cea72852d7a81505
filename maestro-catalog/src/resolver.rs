//! Resolution of spoken names to playable tracks
//!
//! The strategy is fixed per deployment at construction time: with a
//! streaming catalog configured, resolution is delegated to it entirely;
//! without one, the local library is searched in two tiers (exact tag
//! lookup, then fuzzy match above a similarity threshold). Playlists are the
//! one place the streaming path falls back to local storage.

use std::sync::Arc;

use maestro_player::PlayerBackend;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::request::{RequestKind, TrackRequest};
use crate::similarity::{best_match, ratio, title_case};
use crate::streaming::StreamingCatalog;

/// Minimum similarity score a fuzzy candidate must exceed
///
/// Guards against false positives on short or common words ("jazz" must not
/// match an unrelated playlist).
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 80;

/// Resolves a [`TrackRequest`] to an ordered set of playable URIs
pub struct CatalogResolver {
    streaming: Option<Arc<dyn StreamingCatalog>>,
    threshold: u8,
}

impl CatalogResolver {
    /// Resolver for a deployment with a streaming catalog configured
    pub fn with_streaming(streaming: Arc<dyn StreamingCatalog>, threshold: u8) -> Self {
        Self {
            streaming: Some(streaming),
            threshold,
        }
    }

    /// Resolver for a local-library-only deployment
    pub fn local_only(threshold: u8) -> Self {
        Self {
            streaming: None,
            threshold,
        }
    }

    pub fn new(streaming: Option<Arc<dyn StreamingCatalog>>, threshold: u8) -> Self {
        Self {
            streaming,
            threshold,
        }
    }

    /// Resolve a request against the given player's library
    ///
    /// Fails with [`CatalogError::NotFound`] when no tier produces a result;
    /// the caller decides whether that is worth surfacing.
    pub fn resolve(&self, player: &dyn PlayerBackend, request: &TrackRequest) -> Result<Vec<String>> {
        if request.kind == RequestKind::Playlist {
            return self.resolve_playlist(player, &request.name);
        }

        match &self.streaming {
            Some(streaming) => {
                let uris = streaming.search_by_kind(request.kind, &request.name)?;
                if uris.is_empty() {
                    debug!("Streaming search for {:?} '{}' found nothing", request.kind, request.name);
                    Err(CatalogError::NotFound)
                } else {
                    Ok(uris)
                }
            }
            None => self.resolve_local(player, request),
        }
    }

    /// Two-tier local search: exact title-cased tag lookup, then fuzzy
    fn resolve_local(
        &self,
        player: &dyn PlayerBackend,
        request: &TrackRequest,
    ) -> Result<Vec<String>> {
        let tag = match request.kind.search_tag() {
            Some(tag) => tag,
            None => return self.resolve_playlist(player, &request.name),
        };

        let exact = player.find_exact(tag, &title_case(&request.name))?;
        if !exact.is_empty() {
            debug!("Exact {} match for '{}': {} tracks", tag.as_str(), request.name, exact.len());
            return Ok(exact.into_iter().map(|track| track.uri).collect());
        }

        let candidates = player.search_fuzzy(tag, &request.name)?;
        let best = candidates
            .iter()
            .map(|track| {
                let value = track.tag_value(tag);
                (value.to_string(), ratio(&request.name, value))
            })
            .max_by_key(|(_, score)| *score);

        match best {
            Some((value, score)) if score > self.threshold => {
                debug!(
                    "Fuzzy {} match for '{}': '{}' (score {})",
                    tag.as_str(),
                    request.name,
                    value,
                    score
                );
                Ok(candidates
                    .into_iter()
                    .filter(|track| track.tag_value(tag) == value)
                    .map(|track| track.uri)
                    .collect())
            }
            Some((value, score)) => {
                debug!(
                    "Best fuzzy {} candidate '{}' scored {} for '{}', below threshold {}",
                    tag.as_str(),
                    value,
                    score,
                    request.name,
                    self.threshold
                );
                Err(CatalogError::NotFound)
            }
            None => Err(CatalogError::NotFound),
        }
    }

    /// Playlist names are fuzzy-matched against the stored playlist list;
    /// the streaming catalog is preferred but an empty (or failed) streaming
    /// lookup falls back to local playlists.
    fn resolve_playlist(&self, player: &dyn PlayerBackend, name: &str) -> Result<Vec<String>> {
        if let Some(streaming) = &self.streaming {
            match streaming.search_by_kind(RequestKind::Playlist, name) {
                Ok(uris) if !uris.is_empty() => return Ok(uris),
                Ok(_) => debug!("Streaming playlist '{}' not found, trying local playlists", name),
                Err(err) => warn!("Streaming playlist lookup for '{}' failed: {}", name, err),
            }
        }

        let names = player.list_playlists()?;
        match best_match(name, names.iter().map(String::as_str)) {
            Some((matched, score)) if score > self.threshold => {
                debug!("Playlist '{}' matched '{}' (score {})", name, matched, score);
                let tracks = player.playlist_tracks(matched)?;
                if tracks.is_empty() {
                    return Err(CatalogError::NotFound);
                }
                Ok(tracks.into_iter().map(|track| track.uri).collect())
            }
            _ => Err(CatalogError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maestro_player::test_support::MockPlayer;
    use maestro_player::Track;

    struct MockStreaming {
        results: Vec<String>,
    }

    impl MockStreaming {
        fn with_results(results: Vec<&str>) -> Self {
            Self {
                results: results.into_iter().map(str::to_string).collect(),
            }
        }
    }

    impl StreamingCatalog for MockStreaming {
        fn search_by_kind(&self, _kind: RequestKind, _name: &str) -> Result<Vec<String>> {
            Ok(self.results.clone())
        }

        fn save_track(&self, _artist: &str, _title: &str) -> Result<bool> {
            Ok(true)
        }
    }

    fn track(uri: &str, title: &str, artist: &str, album: &str) -> Track {
        Track {
            uri: uri.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            genre: String::new(),
        }
    }

    #[test]
    fn test_exact_tier_wins() {
        let player = MockPlayer::new().with_library(vec![
            track("local:1", "Black And White", "Someone", "X"),
            track("local:2", "Black And White Blues", "Someone", "X"),
        ]);
        let resolver = CatalogResolver::local_only(DEFAULT_SIMILARITY_THRESHOLD);

        let uris = resolver
            .resolve(&player, &TrackRequest::new(RequestKind::Song, "black and white"))
            .unwrap();
        assert_eq!(uris, vec!["local:1"]);
    }

    #[test]
    fn test_fuzzy_tier_fallback() {
        let player = MockPlayer::new().with_library(vec![track(
            "local:1",
            "Black & Whites",
            "Someone",
            "X",
        )]);
        let resolver = CatalogResolver::local_only(DEFAULT_SIMILARITY_THRESHOLD);

        // No exact title "Black & White", but the fuzzy tier scores 96
        let uris = resolver
            .resolve(&player, &TrackRequest::new(RequestKind::Song, "black & white"))
            .unwrap();
        assert_eq!(uris, vec!["local:1"]);
    }

    #[test]
    fn test_fuzzy_below_threshold_is_not_found() {
        let player = MockPlayer::new().with_library(vec![track(
            "local:1",
            "A Completely Different Song With Black In It",
            "Someone",
            "X",
        )]);
        let resolver = CatalogResolver::local_only(DEFAULT_SIMILARITY_THRESHOLD);

        let result = resolver.resolve(&player, &TrackRequest::new(RequestKind::Song, "black"));
        assert!(matches!(result, Err(CatalogError::NotFound)));
    }

    #[test]
    fn test_fuzzy_keeps_all_tracks_of_best_album() {
        let player = MockPlayer::new().with_library(vec![
            track("local:1", "Intro", "Mounika", "How Are You 2"),
            track("local:2", "Cut My Hair", "Mounika", "How Are You 2"),
            track("local:3", "Other", "Mounika", "How Are You Doing Today My Friend"),
        ]);
        let resolver = CatalogResolver::local_only(DEFAULT_SIMILARITY_THRESHOLD);

        // "how are you" scores 91 against "How Are You 2" and 50 against the
        // longer album; both tracks of the winner are kept, in library order
        let uris = resolver
            .resolve(&player, &TrackRequest::new(RequestKind::Album, "how are you"))
            .unwrap();
        assert_eq!(uris, vec!["local:1", "local:2"]);
    }

    #[test]
    fn test_streaming_delegation_skips_local() {
        let player = MockPlayer::new().with_library(vec![track(
            "local:1",
            "Black And White",
            "Someone",
            "X",
        )]);
        let streaming = Arc::new(MockStreaming::with_results(vec!["spotify:track:9"]));
        let resolver =
            CatalogResolver::with_streaming(streaming, DEFAULT_SIMILARITY_THRESHOLD);

        let uris = resolver
            .resolve(&player, &TrackRequest::new(RequestKind::Song, "black and white"))
            .unwrap();
        assert_eq!(uris, vec!["spotify:track:9"]);
        // The local library was never consulted
        assert_eq!(player.call_count("find_exact"), 0);
        assert_eq!(player.call_count("search_fuzzy"), 0);
    }

    #[test]
    fn test_streaming_empty_is_final_for_songs() {
        let player = MockPlayer::new().with_library(vec![track(
            "local:1",
            "Black And White",
            "Someone",
            "X",
        )]);
        let streaming = Arc::new(MockStreaming::with_results(vec![]));
        let resolver =
            CatalogResolver::with_streaming(streaming, DEFAULT_SIMILARITY_THRESHOLD);

        let result =
            resolver.resolve(&player, &TrackRequest::new(RequestKind::Song, "black and white"));
        assert!(matches!(result, Err(CatalogError::NotFound)));
        assert_eq!(player.call_count("find_exact"), 0);
    }

    #[test]
    fn test_playlist_fuzzy_match() {
        let player = MockPlayer::new().with_playlists(vec![(
            "Summer Vibes 2020",
            vec![track("local:p1", "Tune", "A", "B")],
        )]);
        let resolver = CatalogResolver::local_only(DEFAULT_SIMILARITY_THRESHOLD);

        let uris = resolver
            .resolve(&player, &TrackRequest::new(RequestKind::Playlist, "summer vibes"))
            .unwrap();
        assert_eq!(uris, vec!["local:p1"]);
    }

    #[test]
    fn test_playlist_no_similar_name_is_not_found() {
        let player = MockPlayer::new().with_playlists(vec![(
            "Summer Vibes 2020",
            vec![track("local:p1", "Tune", "A", "B")],
        )]);
        let resolver = CatalogResolver::local_only(DEFAULT_SIMILARITY_THRESHOLD);

        let result = resolver.resolve(&player, &TrackRequest::new(RequestKind::Playlist, "jazz"));
        assert!(matches!(result, Err(CatalogError::NotFound)));
    }

    #[test]
    fn test_playlist_streaming_empty_falls_back_to_local() {
        let player = MockPlayer::new().with_playlists(vec![(
            "Summer Vibes 2020",
            vec![track("local:p1", "Tune", "A", "B")],
        )]);
        let streaming = Arc::new(MockStreaming::with_results(vec![]));
        let resolver =
            CatalogResolver::with_streaming(streaming, DEFAULT_SIMILARITY_THRESHOLD);

        let uris = resolver
            .resolve(&player, &TrackRequest::new(RequestKind::Playlist, "summer vibes"))
            .unwrap();
        assert_eq!(uris, vec!["local:p1"]);
    }
}
