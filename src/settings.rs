//! Page settings
//!
//! Read once at start-up from an optional JSON block embedded in the page.
//! Nothing is written back.

use serde::{Deserialize, Serialize};

use crate::audio::Clip;
use crate::tuning::TuningOverrides;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Clips ===
    /// Played on "yes" and by the replay button
    pub acceptance_clip: String,
    /// One is picked at random per paw press
    pub paw_clips: Vec<String>,

    // === Page ===
    /// Favicon animation frames, cycled once per second
    pub favicon_frames: Vec<String>,
    /// How many times the acceptance clip may be replayed
    pub replay_allowance: u32,

    /// Per-game balance overrides
    pub tuning: TuningOverrides,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            acceptance_clip: "assets/audio/rizz-sound-effect.mp3".to_string(),
            paw_clips: vec![
                "assets/audio/meow-1.mp3".to_string(),
                "assets/audio/meow-2.mp3".to_string(),
                "assets/audio/meow-3.mp3".to_string(),
            ],

            favicon_frames: vec![
                "assets/favicon/frame_0.png".to_string(),
                "assets/favicon/frame_1.png".to_string(),
            ],
            replay_allowance: 1,

            tuning: TuningOverrides::default(),
        }
    }
}

impl Settings {
    /// Element id of the embedded settings block
    pub const ELEMENT_ID: &'static str = "valentine-settings";

    /// Parse settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// URL for a clip, if one is configured
    pub fn clip_url(&self, clip: Clip) -> Option<&str> {
        match clip {
            Clip::Acceptance => Some(self.acceptance_clip.as_str()).filter(|url| !url.is_empty()),
            Clip::Paw(idx) => self.paw_clips.get(idx).map(String::as_str),
        }
    }

    /// Gain applied to every cue and clip
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
