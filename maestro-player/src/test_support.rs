//! Mock player backend for tests
//!
//! An in-memory [`PlayerBackend`] with configurable state and injectable
//! connection failures, so registry, resolver, and facade behavior can be
//! exercised without a live daemon. Enabled with the `test-support` feature.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::{PlayerError, Result};
use crate::state::{PlaybackState, Track, TrackInfo};
use crate::{PlayerBackend, SearchTag};

/// Mutable interior of a [`MockPlayer`]
#[derive(Debug, Clone)]
pub struct MockPlayerState {
    pub status: PlaybackState,
    pub volume: Option<u8>,
    pub queue: Vec<String>,
    pub position: usize,
    pub current: Option<TrackInfo>,
    pub library: Vec<Track>,
    pub playlists: Vec<(String, Vec<Track>)>,
}

impl Default for MockPlayerState {
    fn default() -> Self {
        Self {
            status: PlaybackState::Stopped,
            volume: Some(50),
            queue: Vec::new(),
            position: 0,
            current: None,
            library: Vec::new(),
            playlists: Vec::new(),
        }
    }
}

/// In-memory player backend with failure injection
///
/// Every operation is appended to a call log; `fail_next(n)` makes the next
/// `n` operations return a connection error before touching state.
#[derive(Debug, Default)]
pub struct MockPlayer {
    state: Mutex<MockPlayerState>,
    failures: AtomicUsize,
    op_failures: Mutex<std::collections::HashMap<String, usize>>,
    calls: Mutex<Vec<String>>,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(self, status: PlaybackState) -> Self {
        self.state.lock().status = status;
        self
    }

    pub fn with_volume(self, volume: Option<u8>) -> Self {
        self.state.lock().volume = volume;
        self
    }

    pub fn with_queue(self, queue: Vec<&str>, position: usize) -> Self {
        {
            let mut state = self.state.lock();
            state.queue = queue.into_iter().map(str::to_string).collect();
            state.position = position;
        }
        self
    }

    pub fn with_current_track(self, title: &str, artist: &str, album: &str) -> Self {
        self.state.lock().current = Some(TrackInfo {
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
        });
        self
    }

    pub fn with_library(self, library: Vec<Track>) -> Self {
        self.state.lock().library = library;
        self
    }

    pub fn with_playlists(self, playlists: Vec<(&str, Vec<Track>)>) -> Self {
        self.state.lock().playlists = playlists
            .into_iter()
            .map(|(name, tracks)| (name.to_string(), tracks))
            .collect();
        self
    }

    /// Make the next `count` operations fail with a connection error
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` attempts of one specific operation fail
    ///
    /// Other operations (including health-check pings) keep succeeding, so
    /// a link that dies mid-command can be simulated precisely.
    pub fn fail_op(&self, operation: &str, count: usize) {
        self.op_failures
            .lock()
            .insert(operation.to_string(), count);
    }

    /// Operations performed so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// How many times a given operation was attempted
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == operation).count()
    }

    /// Snapshot of the interior state, for asserts
    pub fn snapshot(&self) -> MockPlayerState {
        self.state.lock().clone()
    }

    /// Mutate interior state mid-test (e.g. flip status between commands)
    pub fn update<F: FnOnce(&mut MockPlayerState)>(&self, f: F) {
        f(&mut self.state.lock());
    }

    fn record(&self, operation: &str) -> Result<()> {
        self.calls.lock().push(operation.to_string());

        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(PlayerError::Connection("injected failure".to_string()));
        }

        if let Some(remaining) = self.op_failures.lock().get_mut(operation) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(PlayerError::Connection("injected failure".to_string()));
            }
        }

        Ok(())
    }
}

impl PlayerBackend for MockPlayer {
    fn ping(&self) -> Result<()> {
        self.record("ping")
    }

    fn status(&self) -> Result<PlaybackState> {
        self.record("status")?;
        Ok(self.state.lock().status)
    }

    fn volume(&self) -> Result<Option<u8>> {
        self.record("volume")?;
        Ok(self.state.lock().volume)
    }

    fn set_volume(&self, volume: u8) -> Result<()> {
        self.record("set_volume")?;
        self.state.lock().volume = Some(volume);
        Ok(())
    }

    fn enqueue(&self, uris: &[String]) -> Result<()> {
        self.record("enqueue")?;
        self.state.lock().queue.extend(uris.iter().cloned());
        Ok(())
    }

    fn clear_queue(&self) -> Result<()> {
        self.record("clear_queue")?;
        let mut state = self.state.lock();
        state.queue.clear();
        state.position = 0;
        Ok(())
    }

    fn play(&self) -> Result<()> {
        self.record("play")?;
        self.state.lock().status = PlaybackState::Playing;
        Ok(())
    }

    fn play_first(&self) -> Result<()> {
        self.record("play_first")?;
        let mut state = self.state.lock();
        state.position = 0;
        state.status = PlaybackState::Playing;
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.record("pause")?;
        self.state.lock().status = PlaybackState::Paused;
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.record("stop")?;
        self.state.lock().status = PlaybackState::Stopped;
        Ok(())
    }

    fn next(&self) -> Result<bool> {
        self.record("next")?;
        let mut state = self.state.lock();
        if state.position + 1 < state.queue.len() {
            state.position += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn previous(&self) -> Result<bool> {
        self.record("previous")?;
        let mut state = self.state.lock();
        if state.position > 0 {
            state.position -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn shuffle(&self) -> Result<()> {
        self.record("shuffle")
    }

    fn current_track_info(&self) -> Result<TrackInfo> {
        self.record("current_track_info")?;
        self.state.lock().current.clone().ok_or(PlayerError::NotPlaying)
    }

    fn find_exact(&self, tag: SearchTag, value: &str) -> Result<Vec<Track>> {
        self.record("find_exact")?;
        Ok(self
            .state
            .lock()
            .library
            .iter()
            .filter(|track| track.tag_value(tag) == value)
            .cloned()
            .collect())
    }

    fn search_fuzzy(&self, tag: SearchTag, value: &str) -> Result<Vec<Track>> {
        self.record("search_fuzzy")?;
        let needle = value.to_lowercase();
        Ok(self
            .state
            .lock()
            .library
            .iter()
            .filter(|track| track.tag_value(tag).to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn list_playlists(&self) -> Result<Vec<String>> {
        self.record("list_playlists")?;
        Ok(self
            .state
            .lock()
            .playlists
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn playlist_tracks(&self, name: &str) -> Result<Vec<Track>> {
        self.record("playlist_tracks")?;
        Ok(self
            .state
            .lock()
            .playlists
            .iter()
            .find(|(playlist, _)| playlist == name)
            .map(|(_, tracks)| tracks.clone())
            .unwrap_or_default())
    }
}
