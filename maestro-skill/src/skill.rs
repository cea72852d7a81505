//! The per-site command facade
//!
//! One method per voice command, each a composition of registry, volume
//! sessions, and catalog resolution. Every operation runs through
//! [`MusicSkill::with_connection`]: on a dead player link it triggers one
//! reconnect and retries the operation exactly once before surfacing the
//! failure. A failed play-by-name resolution is a silent no-op; the
//! surrounding dialogue layer owns the spoken error.

use std::sync::Arc;

use maestro_catalog::{CatalogError, CatalogResolver, RequestKind, StreamingCatalog, TrackRequest};
use maestro_player::{PlayerBackend, TrackInfo};
use maestro_rooms::{
    PlayerConnector, RoomRegistry, RoomsConfig, VolumeSessionManager,
};
use tracing::{debug, warn};

use crate::config::SkillConfig;
use crate::error::Result;

/// Volume applied when the mixer reports none at all
const FALLBACK_VOLUME: u8 = 50;

/// Per-site music command surface
pub struct MusicSkill {
    registry: RoomRegistry,
    sessions: VolumeSessionManager,
    resolver: CatalogResolver,
    streaming: Option<Arc<dyn StreamingCatalog>>,
    config: SkillConfig,
}

impl MusicSkill {
    /// Assemble the facade around an already-initialized registry
    pub fn new(
        registry: RoomRegistry,
        streaming: Option<Arc<dyn StreamingCatalog>>,
        config: SkillConfig,
    ) -> Self {
        let resolver = CatalogResolver::new(streaming.clone(), config.similarity_threshold);
        let sessions = VolumeSessionManager::new(config.low_volume);
        Self {
            registry,
            sessions,
            resolver,
            streaming,
            config,
        }
    }

    /// Connect every configured room and assemble the facade
    ///
    /// Blocks until all rooms are reachable, like the registry itself.
    pub fn from_config(
        rooms: RoomsConfig,
        streaming: Option<Arc<dyn StreamingCatalog>>,
        config: SkillConfig,
    ) -> Result<Self> {
        let connector = Arc::new(PlayerConnector::new(rooms.protocol));
        let registry = RoomRegistry::initialize(rooms.rooms, connector, config.retry_delay())?;
        Ok(Self::new(registry, streaming, config))
    }

    /// Run an operation against a site's live backend
    ///
    /// The wrapper does the cross-cutting work every command needs: resolve
    /// the connection (with the `"default"` fallback), health-check the link
    /// and replace a dead handle up front, then delegate. A connection error
    /// from the operation itself still triggers one reconnect of that same
    /// site and exactly one retry before the failure surfaces.
    fn with_connection<T>(
        &self,
        site_id: &str,
        op: impl Fn(&dyn PlayerBackend) -> Result<T>,
    ) -> Result<T> {
        let connection = self.registry.connection(site_id)?;
        let mut backend = connection.backend();

        if let Err(err) = backend.ping() {
            if !err.is_connection_error() {
                return Err(err.into());
            }
            warn!(
                "Site '{}' failed its health check ({}), reconnecting",
                connection.site_id(),
                err
            );
            self.registry.reconnect(connection.site_id())?;
            backend = connection.backend();
        }

        match op(backend.as_ref()) {
            Err(err) if err.is_connection_error() => {
                warn!(
                    "Command for site '{}' hit a dead link ({}), reconnecting",
                    connection.site_id(),
                    err
                );
                self.registry.reconnect(connection.site_id())?;
                let backend = connection.backend();
                op(backend.as_ref())
            }
            result => result,
        }
    }

    pub fn play(&self, site_id: &str) -> Result<()> {
        self.with_connection(site_id, |player| Ok(player.play()?))
    }

    pub fn pause(&self, site_id: &str) -> Result<()> {
        self.with_connection(site_id, |player| Ok(player.pause()?))
    }

    pub fn stop(&self, site_id: &str) -> Result<()> {
        self.with_connection(site_id, |player| Ok(player.stop()?))
    }

    /// Raise the volume by `gain × (level×10 | 10)`, clamped to 100
    ///
    /// Starts playback afterwards if the player was not already playing.
    pub fn volume_up(&self, site_id: &str, level: Option<u8>) -> Result<()> {
        self.adjust_volume(site_id, level, true)
    }

    /// Lower the volume by the same step, clamped to 0
    pub fn volume_down(&self, site_id: &str, level: Option<u8>) -> Result<()> {
        self.adjust_volume(site_id, level, false)
    }

    fn adjust_volume(&self, site_id: &str, level: Option<u8>, up: bool) -> Result<()> {
        let step = i32::from(level.unwrap_or(1)) * 10;
        let delta = i32::from(self.config.gain) * step;

        self.with_connection(site_id, |player| {
            match player.volume()? {
                Some(current) => {
                    let current = i32::from(current);
                    let target = if up { current + delta } else { current - delta };
                    player.set_volume(target.clamp(0, 100) as u8)?;
                }
                // No mixer volume to adjust from; pick a sane audible level
                None => player.set_volume(FALLBACK_VOLUME)?,
            }

            if !player.status()?.is_playing() {
                player.play()?;
            }
            Ok(())
        })
    }

    /// Step to the next queued track; `false` means there is none
    pub fn next_song(&self, site_id: &str) -> Result<bool> {
        self.with_connection(site_id, |player| Ok(player.next()?))
    }

    /// Step back to the previous queued track; `false` at the queue head
    pub fn previous_song(&self, site_id: &str) -> Result<bool> {
        self.with_connection(site_id, |player| Ok(player.previous()?))
    }

    pub fn play_song(&self, site_id: &str, name: &str, shuffle: bool) -> Result<()> {
        self.play_request(site_id, TrackRequest::new(RequestKind::Song, name).shuffled(shuffle))
    }

    pub fn play_album(&self, site_id: &str, name: &str, shuffle: bool) -> Result<()> {
        self.play_request(site_id, TrackRequest::new(RequestKind::Album, name).shuffled(shuffle))
    }

    pub fn play_artist(&self, site_id: &str, name: &str, shuffle: bool) -> Result<()> {
        self.play_request(site_id, TrackRequest::new(RequestKind::Artist, name).shuffled(shuffle))
    }

    pub fn play_playlist(&self, site_id: &str, name: &str, shuffle: bool) -> Result<()> {
        self.play_request(
            site_id,
            TrackRequest::new(RequestKind::Playlist, name).shuffled(shuffle),
        )
    }

    pub fn play_genre(&self, site_id: &str, name: &str, shuffle: bool) -> Result<()> {
        self.play_request(site_id, TrackRequest::new(RequestKind::Genre, name).shuffled(shuffle))
    }

    /// Resolve and play a request; an unresolvable name changes nothing
    fn play_request(&self, site_id: &str, request: TrackRequest) -> Result<()> {
        self.with_connection(site_id, |player| {
            let uris = match self.resolver.resolve(player, &request) {
                Ok(uris) => uris,
                Err(CatalogError::NotFound) => {
                    debug!(
                        "Nothing found for {:?} '{}' on site '{}'",
                        request.kind, request.name, site_id
                    );
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };

            player.stop()?;
            player.clear_queue()?;
            player.enqueue(&uris)?;
            if request.shuffle {
                player.shuffle()?;
            }
            player.play_first()?;
            Ok(())
        })
    }

    /// Save the currently playing track to the streaming collection
    ///
    /// Without a streaming catalog configured this is a no-op reporting
    /// `false`.
    pub fn add_current_song(&self, site_id: &str) -> Result<bool> {
        let streaming = match &self.streaming {
            Some(streaming) => Arc::clone(streaming),
            None => {
                debug!("No streaming catalog configured, not saving current song");
                return Ok(false);
            }
        };

        self.with_connection(site_id, |player| {
            let info = player.current_track_info()?;
            Ok(streaming.save_track(&info.artist, &info.title)?)
        })
    }

    /// Metadata of the currently playing track
    pub fn get_now_playing(&self, site_id: &str) -> Result<TrackInfo> {
        self.with_connection(site_id, |player| Ok(player.current_track_info()?))
    }

    /// Duck the site's volume for the duration of an utterance
    pub fn lower_volume(&self, site_id: &str) -> Result<()> {
        self.with_connection(site_id, |player| Ok(self.sessions.lower(site_id, player)?))
    }

    /// Restore the site's pre-utterance volume
    ///
    /// Only rewrites volume and clears the session; resuming playback is
    /// opt-in via [`SkillConfig::restore_resumes_playback`].
    pub fn restore_volume(&self, site_id: &str) -> Result<()> {
        self.with_connection(site_id, |player| {
            let restored = self.sessions.restore(site_id, player)?;
            if restored && self.config.restore_resumes_playback && !player.status()?.is_playing() {
                player.play()?;
            }
            Ok(())
        })
    }
}
