//! HTTP/JSON-RPC client for a Mopidy player daemon
//!
//! Talks JSON-RPC 2.0 to Mopidy's `/mopidy/rpc` endpoint. Transport failures
//! map to connection errors; JSON-RPC error replies map to protocol errors.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::error::{PlayerError, Result};
use crate::state::{PlaybackState, Track, TrackInfo};
use crate::{PlayerBackend, SearchTag};

/// JSON-RPC 2.0 client for Mopidy's HTTP frontend
#[derive(Debug)]
pub struct MopidyPlayer {
    agent: ureq::Agent,
    endpoint: String,
    request_id: AtomicU64,
}

impl MopidyPlayer {
    /// Create a client and verify the daemon answers
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let player = Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
            endpoint: format!("http://{}:{}/mopidy/rpc", host, port),
            request_id: AtomicU64::new(1),
        };

        // JSON-RPC has no handshake, so probe with a harmless call
        let version = player.rpc("core.get_version", Value::Null)?;
        debug!("Connected to Mopidy {} at {}", version, player.endpoint);
        Ok(player)
    }

    fn rpc(&self, method: &str, params: Value) -> Result<Value> {
        let mut request = json!({
            "jsonrpc": "2.0",
            "id": self.request_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
        });
        if !params.is_null() {
            request["params"] = params;
        }

        let response = self
            .agent
            .post(&self.endpoint)
            .send_json(request)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    PlayerError::Protocol(format!("{}: HTTP {}", method, code))
                }
                ureq::Error::Transport(transport) => {
                    PlayerError::Connection(format!("{}: {}", self.endpoint, transport))
                }
            })?;

        let reply: Value = response
            .into_json()
            .map_err(|e| PlayerError::Connection(format!("{}: {}", self.endpoint, e)))?;

        if let Some(error) = reply.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown JSON-RPC error");
            return Err(PlayerError::Protocol(format!("{}: {}", method, message)));
        }

        Ok(reply.get("result").cloned().unwrap_or(Value::Null))
    }

    fn queue_position(&self) -> Result<(Option<u64>, u64)> {
        let index = self.rpc("core.tracklist.index", Value::Null)?.as_u64();
        let length = self
            .rpc("core.tracklist.get_length", Value::Null)?
            .as_u64()
            .unwrap_or(0);
        Ok((index, length))
    }
}

/// Mopidy library field name for a search tag
fn query_field(tag: SearchTag) -> &'static str {
    match tag {
        SearchTag::Title => "track_name",
        SearchTag::Album => "album",
        SearchTag::Artist => "artist",
        SearchTag::Genre => "genre",
    }
}

fn track_from_value(value: &Value) -> Option<Track> {
    let uri = value.get("uri")?.as_str()?.to_string();
    let title = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let artist = value
        .get("artists")
        .and_then(|artists| artists.get(0))
        .and_then(|artist| artist.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let album = value
        .get("album")
        .and_then(|album| album.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let genre = value
        .get("genre")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(Track {
        uri,
        title,
        artist,
        album,
        genre,
    })
}

/// Flatten `core.library.search` results into tracks
fn tracks_from_search(result: &Value) -> Vec<Track> {
    result
        .as_array()
        .map(|results| {
            results
                .iter()
                .filter_map(|entry| entry.get("tracks").and_then(Value::as_array))
                .flatten()
                .filter_map(track_from_value)
                .collect()
        })
        .unwrap_or_default()
}

impl PlayerBackend for MopidyPlayer {
    fn ping(&self) -> Result<()> {
        self.rpc("core.get_version", Value::Null).map(|_| ())
    }

    fn status(&self) -> Result<PlaybackState> {
        let state = self.rpc("core.playback.get_state", Value::Null)?;
        Ok(match state.as_str() {
            Some("playing") => PlaybackState::Playing,
            Some("paused") => PlaybackState::Paused,
            Some("stopped") => PlaybackState::Stopped,
            _ => PlaybackState::Unknown,
        })
    }

    fn volume(&self) -> Result<Option<u8>> {
        let volume = self.rpc("core.mixer.get_volume", Value::Null)?;
        Ok(volume.as_u64().map(|v| v.min(100) as u8))
    }

    fn set_volume(&self, volume: u8) -> Result<()> {
        self.rpc("core.mixer.set_volume", json!({"volume": volume}))
            .map(|_| ())
    }

    fn enqueue(&self, uris: &[String]) -> Result<()> {
        self.rpc("core.tracklist.add", json!({"uris": uris}))
            .map(|_| ())
    }

    fn clear_queue(&self) -> Result<()> {
        self.rpc("core.tracklist.clear", Value::Null).map(|_| ())
    }

    fn play(&self) -> Result<()> {
        self.rpc("core.playback.play", Value::Null).map(|_| ())
    }

    fn play_first(&self) -> Result<()> {
        let tracks = self.rpc("core.tracklist.get_tl_tracks", Value::Null)?;
        let first_tlid = tracks
            .as_array()
            .and_then(|tracks| tracks.first())
            .and_then(|track| track.get("tlid"))
            .and_then(Value::as_u64);

        match first_tlid {
            Some(tlid) => self
                .rpc("core.playback.play", json!({"tlid": tlid}))
                .map(|_| ()),
            None => self.rpc("core.playback.play", Value::Null).map(|_| ()),
        }
    }

    fn pause(&self) -> Result<()> {
        self.rpc("core.playback.pause", Value::Null).map(|_| ())
    }

    fn stop(&self) -> Result<()> {
        self.rpc("core.playback.stop", Value::Null).map(|_| ())
    }

    fn next(&self) -> Result<bool> {
        match self.queue_position()? {
            (Some(index), length) if index + 1 < length => {
                self.rpc("core.playback.next", Value::Null)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn previous(&self) -> Result<bool> {
        match self.queue_position()? {
            (Some(index), _) if index > 0 => {
                self.rpc("core.playback.previous", Value::Null)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn shuffle(&self) -> Result<()> {
        self.rpc("core.tracklist.shuffle", Value::Null).map(|_| ())
    }

    fn current_track_info(&self) -> Result<TrackInfo> {
        let track = self.rpc("core.playback.get_current_track", Value::Null)?;
        if track.is_null() {
            return Err(PlayerError::NotPlaying);
        }
        let track = track_from_value(&track)
            .ok_or_else(|| PlayerError::InvalidResponse(track.to_string()))?;
        Ok(TrackInfo {
            title: track.title,
            artist: track.artist,
            album: track.album,
        })
    }

    fn find_exact(&self, tag: SearchTag, value: &str) -> Result<Vec<Track>> {
        let result = self.rpc(
            "core.library.search",
            json!({"query": {query_field(tag): [value]}, "exact": true}),
        )?;
        Ok(tracks_from_search(&result))
    }

    fn search_fuzzy(&self, tag: SearchTag, value: &str) -> Result<Vec<Track>> {
        let result = self.rpc(
            "core.library.search",
            json!({"query": {query_field(tag): [value]}}),
        )?;
        Ok(tracks_from_search(&result))
    }

    fn list_playlists(&self) -> Result<Vec<String>> {
        let playlists = self.rpc("core.playlists.as_list", Value::Null)?;
        Ok(playlists
            .as_array()
            .map(|playlists| {
                playlists
                    .iter()
                    .filter_map(|playlist| playlist.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn playlist_tracks(&self, name: &str) -> Result<Vec<Track>> {
        let playlists = self.rpc("core.playlists.as_list", Value::Null)?;
        let uri = playlists
            .as_array()
            .and_then(|playlists| {
                playlists.iter().find(|playlist| {
                    playlist.get("name").and_then(Value::as_str) == Some(name)
                })
            })
            .and_then(|playlist| playlist.get("uri"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let uri = match uri {
            Some(uri) => uri,
            None => return Ok(Vec::new()),
        };

        let playlist = self.rpc("core.playlists.lookup", json!({"uri": uri}))?;
        Ok(playlist
            .get("tracks")
            .and_then(Value::as_array)
            .map(|tracks| tracks.iter().filter_map(track_from_value).collect())
            .unwrap_or_default())
    }
}
