//! The command boundary with the message-bus listener
//!
//! The listener layer (excluded from this core) decodes bus events, extracts
//! slot values, and calls [`MusicSkill::handle`] with the event's site id and
//! a typed [`Command`]. Commands that report a user-facing outcome return a
//! short result phrase for the dialogue layer to speak; everything else is
//! fire-and-forget.

use tracing::debug;

use crate::error::Result;
use crate::skill::MusicSkill;

/// One decoded voice command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    VolumeUp { level: Option<u8> },
    VolumeDown { level: Option<u8> },
    PlaySong { name: String, shuffle: bool },
    PlayAlbum { name: String, shuffle: bool },
    PlayArtist { name: String, shuffle: bool },
    PlayPlaylist { name: String, shuffle: bool },
    PlayGenre { name: String, shuffle: bool },
    NextSong,
    PreviousSong,
    AddCurrentSong,
    GetNowPlaying,
    /// Hotword detected: duck the site's volume for the utterance
    LowerVolume,
    /// Dialogue session ended: restore the pre-utterance volume
    RestoreVolume,
}

impl MusicSkill {
    /// Apply one command for a site
    ///
    /// Volume adjustments and now-playing queries first restore any pending
    /// lowered volume, since their dialogue session is over by the time they
    /// run; the listener layer does not need to remember to do this.
    pub fn handle(&self, site_id: &str, command: Command) -> Result<Option<String>> {
        debug!("Handling {:?} for site '{}'", command, site_id);

        match command {
            Command::Play => self.play(site_id).map(|_| None),
            Command::Pause => self.pause(site_id).map(|_| None),
            Command::Stop => self.stop(site_id).map(|_| None),
            Command::VolumeUp { level } => {
                self.restore_volume(site_id)?;
                self.volume_up(site_id, level).map(|_| None)
            }
            Command::VolumeDown { level } => {
                self.restore_volume(site_id)?;
                self.volume_down(site_id, level).map(|_| None)
            }
            Command::PlaySong { name, shuffle } => {
                self.play_song(site_id, &name, shuffle).map(|_| None)
            }
            Command::PlayAlbum { name, shuffle } => {
                self.play_album(site_id, &name, shuffle).map(|_| None)
            }
            Command::PlayArtist { name, shuffle } => {
                self.play_artist(site_id, &name, shuffle).map(|_| None)
            }
            Command::PlayPlaylist { name, shuffle } => {
                self.play_playlist(site_id, &name, shuffle).map(|_| None)
            }
            Command::PlayGenre { name, shuffle } => {
                self.play_genre(site_id, &name, shuffle).map(|_| None)
            }
            Command::NextSong => self.next_song(site_id).map(|advanced| {
                if advanced {
                    None
                } else {
                    Some("There is no next song.".to_string())
                }
            }),
            Command::PreviousSong => self.previous_song(site_id).map(|stepped| {
                if stepped {
                    None
                } else {
                    Some("There is no previous song.".to_string())
                }
            }),
            Command::AddCurrentSong => self.add_current_song(site_id).map(|_| None),
            Command::GetNowPlaying => {
                self.restore_volume(site_id)?;
                let info = self.get_now_playing(site_id)?;
                Ok(Some(format!(
                    "This is {} by {} on the album {}",
                    info.title, info.artist, info.album
                )))
            }
            Command::LowerVolume => self.lower_volume(site_id).map(|_| None),
            Command::RestoreVolume => self.restore_volume(site_id).map(|_| None),
        }
    }
}
