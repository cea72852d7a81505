//! Line-protocol client for an MPD-compatible player daemon
//!
//! A minimal blocking wire client: connect, read the `OK MPD` greeting, then
//! exchange one command per round trip. Responses are `key: value` lines
//! terminated by `OK`, or an `ACK [...]` line on command failure. Any I/O
//! failure on the socket is reported as a connection error so the caller can
//! reconnect.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{PlayerError, Result};
use crate::state::{PlaybackState, Track, TrackInfo};
use crate::{PlayerBackend, SearchTag};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const IO_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking MPD line-protocol client
///
/// The socket is guarded by a mutex so the handle can be shared; MPD
/// processes one command per round trip anyway.
pub struct MpdPlayer {
    conn: Mutex<BufReader<TcpStream>>,
    addr: String,
}

impl MpdPlayer {
    /// Open a connection and consume the protocol greeting
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{}:{}", host, port);
        let socket_addr = (host, port)
            .to_socket_addrs()
            .map_err(|e| PlayerError::Connection(format!("{}: {}", addr, e)))?
            .next()
            .ok_or_else(|| PlayerError::Connection(format!("{}: no address", addr)))?;

        let stream = TcpStream::connect_timeout(&socket_addr, CONNECT_TIMEOUT)
            .map_err(|e| PlayerError::Connection(format!("{}: {}", addr, e)))?;
        stream
            .set_read_timeout(Some(IO_TIMEOUT))
            .map_err(|e| PlayerError::Connection(e.to_string()))?;
        stream
            .set_write_timeout(Some(IO_TIMEOUT))
            .map_err(|e| PlayerError::Connection(e.to_string()))?;

        let mut conn = BufReader::new(stream);
        let mut greeting = String::new();
        conn.read_line(&mut greeting)
            .map_err(|e| PlayerError::Connection(e.to_string()))?;
        if !greeting.starts_with("OK MPD") {
            return Err(PlayerError::Protocol(format!(
                "unexpected greeting: {}",
                greeting.trim_end()
            )));
        }
        debug!("Connected to {} ({})", addr, greeting.trim_end());

        Ok(Self {
            conn: Mutex::new(conn),
            addr,
        })
    }

    /// Send one command and collect the `key: value` pairs of its response
    fn command(&self, cmd: &str) -> Result<Vec<(String, String)>> {
        let mut conn = self.conn.lock();

        conn.get_mut()
            .write_all(cmd.as_bytes())
            .and_then(|_| conn.get_mut().write_all(b"\n"))
            .map_err(|e| PlayerError::Connection(format!("{}: {}", self.addr, e)))?;

        let mut pairs = Vec::new();
        loop {
            let mut line = String::new();
            let read = conn
                .read_line(&mut line)
                .map_err(|e| PlayerError::Connection(format!("{}: {}", self.addr, e)))?;
            if read == 0 {
                return Err(PlayerError::Connection(format!(
                    "{}: connection closed by server",
                    self.addr
                )));
            }

            let line = line.trim_end();
            if line == "OK" {
                return Ok(pairs);
            }
            if let Some(ack) = line.strip_prefix("ACK ") {
                return Err(PlayerError::Protocol(ack.to_string()));
            }
            if let Some((key, value)) = line.split_once(": ") {
                pairs.push((key.to_ascii_lowercase(), value.to_string()));
            }
        }
    }

    fn status_pairs(&self) -> Result<Vec<(String, String)>> {
        self.command("status")
    }

    /// Queue position and length from a `status` response
    fn queue_position(&self) -> Result<(Option<u32>, u32)> {
        let pairs = self.status_pairs()?;
        let song = lookup(&pairs, "song").and_then(|v| v.parse().ok());
        let length = lookup(&pairs, "playlistlength")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        Ok((song, length))
    }
}

/// Quote a value for the MPD command syntax
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Group a flat response into tracks; each track starts at a `file` key
fn tracks_from_pairs(pairs: Vec<(String, String)>) -> Vec<Track> {
    let mut tracks = Vec::new();
    let mut current: Option<Track> = None;
    for (key, value) in pairs {
        match key.as_str() {
            "file" => {
                if let Some(track) = current.take() {
                    tracks.push(track);
                }
                current = Some(Track::new(value));
            }
            "title" => {
                if let Some(track) = current.as_mut() {
                    track.title = value;
                }
            }
            "artist" => {
                if let Some(track) = current.as_mut() {
                    track.artist = value;
                }
            }
            "album" => {
                if let Some(track) = current.as_mut() {
                    track.album = value;
                }
            }
            "genre" => {
                if let Some(track) = current.as_mut() {
                    track.genre = value;
                }
            }
            _ => {}
        }
    }
    if let Some(track) = current {
        tracks.push(track);
    }
    tracks
}

impl PlayerBackend for MpdPlayer {
    fn ping(&self) -> Result<()> {
        self.command("ping").map(|_| ())
    }

    fn status(&self) -> Result<PlaybackState> {
        let pairs = self.status_pairs()?;
        let state = match lookup(&pairs, "state") {
            Some("play") => PlaybackState::Playing,
            Some("pause") => PlaybackState::Paused,
            Some("stop") => PlaybackState::Stopped,
            _ => PlaybackState::Unknown,
        };
        Ok(state)
    }

    fn volume(&self) -> Result<Option<u8>> {
        let pairs = self.status_pairs()?;
        // MPD reports -1 when no mixer is available
        let volume = lookup(&pairs, "volume")
            .and_then(|v| v.parse::<i16>().ok())
            .filter(|v| *v >= 0)
            .map(|v| v.min(100) as u8);
        Ok(volume)
    }

    fn set_volume(&self, volume: u8) -> Result<()> {
        self.command(&format!("setvol {}", volume)).map(|_| ())
    }

    fn enqueue(&self, uris: &[String]) -> Result<()> {
        for uri in uris {
            self.command(&format!("add {}", quote(uri)))?;
        }
        Ok(())
    }

    fn clear_queue(&self) -> Result<()> {
        self.command("clear").map(|_| ())
    }

    fn play(&self) -> Result<()> {
        self.command("play").map(|_| ())
    }

    fn play_first(&self) -> Result<()> {
        self.command("play 0").map(|_| ())
    }

    fn pause(&self) -> Result<()> {
        self.command("pause 1").map(|_| ())
    }

    fn stop(&self) -> Result<()> {
        self.command("stop").map(|_| ())
    }

    fn next(&self) -> Result<bool> {
        match self.queue_position()? {
            (Some(song), length) if song + 1 < length => {
                self.command("next")?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn previous(&self) -> Result<bool> {
        match self.queue_position()? {
            (Some(song), _) if song > 0 => {
                self.command("previous")?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn shuffle(&self) -> Result<()> {
        self.command("shuffle").map(|_| ())
    }

    fn current_track_info(&self) -> Result<TrackInfo> {
        let pairs = self.command("currentsong")?;
        if pairs.is_empty() {
            return Err(PlayerError::NotPlaying);
        }
        Ok(TrackInfo {
            title: lookup(&pairs, "title").unwrap_or_default().to_string(),
            artist: lookup(&pairs, "artist").unwrap_or_default().to_string(),
            album: lookup(&pairs, "album").unwrap_or_default().to_string(),
        })
    }

    fn find_exact(&self, tag: SearchTag, value: &str) -> Result<Vec<Track>> {
        let pairs = self.command(&format!("find {} {}", tag.as_str(), quote(value)))?;
        Ok(tracks_from_pairs(pairs))
    }

    fn search_fuzzy(&self, tag: SearchTag, value: &str) -> Result<Vec<Track>> {
        let pairs = self.command(&format!("search {} {}", tag.as_str(), quote(value)))?;
        Ok(tracks_from_pairs(pairs))
    }

    fn list_playlists(&self) -> Result<Vec<String>> {
        let pairs = self.command("listplaylists")?;
        Ok(pairs
            .into_iter()
            .filter(|(key, _)| key == "playlist")
            .map(|(_, name)| name)
            .collect())
    }

    fn playlist_tracks(&self, name: &str) -> Result<Vec<Track>> {
        let pairs = self.command(&format!("listplaylistinfo {}", quote(name)))?;
        Ok(tracks_from_pairs(pairs))
    }
}
