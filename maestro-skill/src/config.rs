//! Skill tuning knobs

use std::time::Duration;

use maestro_catalog::DEFAULT_SIMILARITY_THRESHOLD;
use maestro_rooms::DEFAULT_LOW_VOLUME;
use serde::{Deserialize, Serialize};

/// Behavior settings for the skill facade
///
/// Every field has a sensible default so a deployment only overrides what it
/// cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Multiplier applied to spoken volume steps
    #[serde(default = "default_gain")]
    pub gain: u8,

    /// Volume ceiling while an utterance is in flight
    #[serde(default = "default_low_volume")]
    pub low_volume: u8,

    /// Force playback to resume when a restore finds the player not playing
    #[serde(default)]
    pub restore_resumes_playback: bool,

    /// Minimum similarity score a fuzzy catalog match must exceed
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: u8,

    /// Delay between connect attempts for an unreachable room, in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

fn default_gain() -> u8 {
    4
}

fn default_low_volume() -> u8 {
    DEFAULT_LOW_VOLUME
}

fn default_similarity_threshold() -> u8 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_retry_delay_secs() -> u64 {
    5
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            gain: default_gain(),
            low_volume: default_low_volume(),
            restore_resumes_playback: false,
            similarity_threshold: default_similarity_threshold(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

impl SkillConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}
