//! End-to-end facade tests over mock backends
//!
//! Exercises multi-room isolation, reconnect recovery, and catalog
//! resolution through the public API only, the way the bus listener uses it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use maestro_catalog::{RequestKind, StreamingCatalog};
use maestro_player::test_support::MockPlayer;
use maestro_player::{PlaybackState, PlayerBackend, PlayerError, Track};
use maestro_rooms::{Connect, Room, RoomRegistry};
use maestro_skill::{Command, MusicSkill, SkillConfig};
use parking_lot::Mutex;

/// Connector that hands each site its own fixed mock player
struct SiteConnector {
    players: HashMap<String, Arc<MockPlayer>>,
}

impl SiteConnector {
    fn new(players: Vec<(&str, Arc<MockPlayer>)>) -> Self {
        Self {
            players: players
                .into_iter()
                .map(|(site, player)| (site.to_string(), player))
                .collect(),
        }
    }
}

impl Connect for SiteConnector {
    fn connect(
        &self,
        site_id: &str,
        _room: &Room,
    ) -> maestro_player::Result<Arc<dyn PlayerBackend>> {
        self.players
            .get(site_id)
            .map(|player| Arc::clone(player) as Arc<dyn PlayerBackend>)
            .ok_or_else(|| PlayerError::Connection(format!("no player for {}", site_id)))
    }
}

struct RecordingStreaming {
    uris: Vec<String>,
    saved: Mutex<Vec<(String, String)>>,
}

impl RecordingStreaming {
    fn new(uris: Vec<&str>) -> Self {
        Self {
            uris: uris.into_iter().map(str::to_string).collect(),
            saved: Mutex::new(Vec::new()),
        }
    }
}

impl StreamingCatalog for RecordingStreaming {
    fn search_by_kind(
        &self,
        _kind: RequestKind,
        _name: &str,
    ) -> maestro_catalog::Result<Vec<String>> {
        Ok(self.uris.clone())
    }

    fn save_track(&self, artist: &str, title: &str) -> maestro_catalog::Result<bool> {
        self.saved
            .lock()
            .push((artist.to_string(), title.to_string()));
        Ok(true)
    }
}

fn rooms(sites: &[&str]) -> HashMap<String, Room> {
    sites
        .iter()
        .map(|site| (site.to_string(), Room::new("127.0.0.1", 6600)))
        .collect()
}

fn registry_for(players: Vec<(&str, Arc<MockPlayer>)>) -> RoomRegistry {
    let sites: Vec<&str> = players.iter().map(|(site, _)| *site).collect();
    let connector = Arc::new(SiteConnector::new(players));
    RoomRegistry::initialize(
        rooms(&sites),
        connector as Arc<dyn Connect>,
        Duration::from_millis(10),
    )
    .expect("registry init")
}

#[test]
fn commands_for_different_sites_stay_isolated() {
    let kitchen = Arc::new(
        MockPlayer::new()
            .with_status(PlaybackState::Playing)
            .with_volume(Some(60)),
    );
    let bedroom = Arc::new(
        MockPlayer::new()
            .with_status(PlaybackState::Playing)
            .with_volume(Some(35)),
    );
    let default = Arc::new(MockPlayer::new());

    let registry = registry_for(vec![
        ("default", default),
        ("kitchen", Arc::clone(&kitchen)),
        ("bedroom", Arc::clone(&bedroom)),
    ]);
    let skill = MusicSkill::new(registry, None, SkillConfig::default());

    skill.handle("kitchen", Command::LowerVolume).unwrap();
    skill.handle("bedroom", Command::LowerVolume).unwrap();
    assert_eq!(kitchen.snapshot().volume, Some(10));
    assert_eq!(bedroom.snapshot().volume, Some(10));

    skill.handle("kitchen", Command::RestoreVolume).unwrap();
    assert_eq!(kitchen.snapshot().volume, Some(60));
    // Bedroom's session is untouched by the kitchen's restore
    assert_eq!(bedroom.snapshot().volume, Some(10));

    skill.handle("bedroom", Command::RestoreVolume).unwrap();
    assert_eq!(bedroom.snapshot().volume, Some(35));
}

#[test]
fn playlist_command_resolves_fuzzily_and_rebuilds_queue() {
    let tracks = vec![
        Track {
            uri: "local:p:1".to_string(),
            title: "Opener".to_string(),
            ..Track::default()
        },
        Track {
            uri: "local:p:2".to_string(),
            title: "Closer".to_string(),
            ..Track::default()
        },
    ];
    let player = Arc::new(
        MockPlayer::new()
            .with_queue(vec!["stale:track"], 0)
            .with_playlists(vec![("Summer Vibes 2020", tracks)]),
    );

    let registry = registry_for(vec![("default", Arc::clone(&player))]);
    let skill = MusicSkill::new(registry, None, SkillConfig::default());

    skill
        .handle(
            "default",
            Command::PlayPlaylist {
                name: "summer vibes".to_string(),
                shuffle: false,
            },
        )
        .unwrap();

    let state = player.snapshot();
    assert_eq!(state.queue, vec!["local:p:1", "local:p:2"]);
    assert_eq!(state.status, PlaybackState::Playing);
    assert_eq!(state.position, 0);
}

#[test]
fn unresolvable_genre_command_is_silent() {
    let player = Arc::new(MockPlayer::new().with_playlists(vec![(
        "Summer Vibes 2020",
        vec![Track::new("local:p:1")],
    )]));

    let registry = registry_for(vec![("default", Arc::clone(&player))]);
    let skill = MusicSkill::new(registry, None, SkillConfig::default());

    let result = skill.handle(
        "default",
        Command::PlayGenre {
            name: "jazz".to_string(),
            shuffle: false,
        },
    );
    assert!(result.is_ok());
    assert!(player.snapshot().queue.is_empty());
}

#[test]
fn streaming_deployment_saves_current_track() {
    let player = Arc::new(MockPlayer::new().with_current_track(
        "Cut My Hair",
        "Mounika",
        "How Are You",
    ));
    let streaming = Arc::new(RecordingStreaming::new(vec!["stream:track:1"]));

    let registry = registry_for(vec![("default", Arc::clone(&player))]);
    let skill = MusicSkill::new(
        registry,
        Some(Arc::clone(&streaming) as Arc<dyn StreamingCatalog>),
        SkillConfig::default(),
    );

    assert_eq!(skill.handle("default", Command::AddCurrentSong).unwrap(), None);
    assert_eq!(
        streaming.saved.lock().clone(),
        vec![("Mounika".to_string(), "Cut My Hair".to_string())]
    );
}

#[test]
fn streaming_deployment_plays_streaming_uris() {
    let player = Arc::new(MockPlayer::new());
    let streaming = Arc::new(RecordingStreaming::new(vec![
        "stream:track:1",
        "stream:track:2",
    ]));

    let registry = registry_for(vec![("default", Arc::clone(&player))]);
    let skill = MusicSkill::new(
        registry,
        Some(streaming as Arc<dyn StreamingCatalog>),
        SkillConfig::default(),
    );

    skill
        .handle(
            "default",
            Command::PlayArtist {
                name: "mounika".to_string(),
                shuffle: true,
            },
        )
        .unwrap();

    let state = player.snapshot();
    assert_eq!(state.queue, vec!["stream:track:1", "stream:track:2"]);
    assert_eq!(player.call_count("shuffle"), 1);
    // The local library was never searched
    assert_eq!(player.call_count("find_exact"), 0);
}

#[test]
fn dropped_link_mid_command_recovers_transparently() {
    let player = Arc::new(
        MockPlayer::new()
            .with_status(PlaybackState::Playing)
            .with_volume(Some(75)),
    );

    let registry = registry_for(vec![("default", Arc::clone(&player))]);
    let skill = MusicSkill::new(registry, None, SkillConfig::default());

    // The link dies mid-command and stays dead for one attempt
    player.fail_op("pause", 1);
    skill.handle("default", Command::Pause).unwrap();

    assert_eq!(player.snapshot().status, PlaybackState::Paused);
    // First attempt failed, retry after reconnect succeeded
    assert_eq!(player.call_count("pause"), 2);
}
