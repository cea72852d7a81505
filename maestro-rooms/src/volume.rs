//! Per-site volume ducking sessions
//!
//! While an utterance is being spoken, the playing room's volume is dipped so
//! speech stays audible, then restored when the session ends. The saved
//! volume is the only state: an entry exists exactly between a `lower` and
//! its matching `restore`, and a second `lower` before the pending `restore`
//! must not overwrite the original volume.

use std::sync::Arc;

use dashmap::DashMap;
use maestro_player::{PlayerBackend, Result};
use parking_lot::Mutex;
use tracing::debug;

/// Volume ceiling applied while an utterance is in flight
pub const DEFAULT_LOW_VOLUME: u8 = 10;

/// Per-site saved-volume sessions
///
/// Each site gets its own slot mutex, held across the whole
/// read-volume/set-volume sequence: lower and restore for one site never
/// interleave, and sites never block each other.
pub struct VolumeSessionManager {
    low_volume: u8,
    sessions: DashMap<String, Arc<Mutex<Option<u8>>>>,
}

impl VolumeSessionManager {
    pub fn new(low_volume: u8) -> Self {
        Self {
            low_volume,
            sessions: DashMap::new(),
        }
    }

    fn slot(&self, site_id: &str) -> Arc<Mutex<Option<u8>>> {
        Arc::clone(
            self.sessions
                .entry(site_id.to_string())
                .or_default()
                .value(),
        )
    }

    /// Dip the volume for the duration of an utterance
    ///
    /// Only applies while the site is playing; lowering a stopped or paused
    /// room is a no-op and records nothing. A site that is already lowered
    /// keeps its original saved volume.
    pub fn lower(&self, site_id: &str, player: &dyn PlayerBackend) -> Result<()> {
        let slot = self.slot(site_id);
        let mut saved = slot.lock();

        if saved.is_some() {
            debug!("Site '{}' is already lowered", site_id);
            return Ok(());
        }
        if !player.status()?.is_playing() {
            return Ok(());
        }
        let current = match player.volume()? {
            Some(volume) => volume,
            None => return Ok(()),
        };

        player.set_volume(current.min(self.low_volume))?;
        *saved = Some(current);
        debug!("Site '{}' lowered from {} to {}", site_id, current, current.min(self.low_volume));
        Ok(())
    }

    /// Restore the pre-utterance volume
    ///
    /// Idempotent: with no pending entry this is a no-op. Returns whether a
    /// restore actually happened. The entry is deleted only after the volume
    /// write succeeds, so a dead link mid-restore leaves the session intact
    /// for the retried operation.
    pub fn restore(&self, site_id: &str, player: &dyn PlayerBackend) -> Result<bool> {
        let slot = self.slot(site_id);
        let mut saved = slot.lock();

        let volume = match *saved {
            Some(volume) => volume,
            None => return Ok(false),
        };

        player.set_volume(volume)?;
        *saved = None;
        debug!("Site '{}' restored to {}", site_id, volume);
        Ok(true)
    }

    /// Whether a lowered session is pending for the site
    pub fn is_lowered(&self, site_id: &str) -> bool {
        self.sessions
            .get(site_id)
            .map(|slot| slot.lock().is_some())
            .unwrap_or(false)
    }
}

impl Default for VolumeSessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_VOLUME)
    }
}
