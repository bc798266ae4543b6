//! Audio system
//!
//! Two kinds of sound:
//! - `Cue`: short procedurally generated blips (no files needed)
//! - `Clip`: recorded audio files played through the fallback chain
//!
//! The Web Audio backend (`AudioManager`) exists only on wasm32; everything
//! else here is plain data usable by the simulation and tests.

pub mod chain;
#[cfg(target_arch = "wasm32")]
mod web;

pub use chain::{ClipPlayer, LocalBoxFuture, PlaybackError, PlaybackStep, play_with_fallback};
#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Synthesised sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Floating heart tapped
    AmbientBeep,
    /// Falling heart caught
    HeartCatch,
    /// Balloon popped
    BalloonPop,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// Parameters for a single oscillator blip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub freq_hz: f32,
    /// Exponential sweep target, if the pitch slides
    pub end_freq_hz: Option<f32>,
    pub gain: f32,
    pub duration_s: f64,
    /// Fade the gain out over the duration instead of cutting it
    pub fade_out: bool,
}

impl Cue {
    pub fn voice(self) -> Voice {
        match self {
            Cue::AmbientBeep => Voice {
                waveform: Waveform::Sine,
                freq_hz: 780.0,
                end_freq_hz: None,
                gain: 0.03,
                duration_s: 0.06,
                fade_out: false,
            },
            Cue::HeartCatch => Voice {
                waveform: Waveform::Sine,
                freq_hz: 640.0,
                end_freq_hz: None,
                gain: 0.05,
                duration_s: 0.06,
                fade_out: false,
            },
            Cue::BalloonPop => Voice {
                waveform: Waveform::Triangle,
                freq_hz: 520.0,
                end_freq_hz: Some(180.0),
                gain: 0.08,
                duration_s: 0.14,
                fade_out: true,
            },
        }
    }
}

/// Recorded clips, resolved to URLs through `Settings`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    /// Played when the proposal is accepted (and on replay)
    Acceptance,
    /// One of the paw button sounds
    Paw(usize),
}

/// In-page `<audio>` elements the host document may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSound {
    /// `#no-sound`, played on every "no"
    No,
    /// `#meow`, played on the paw button at low volume
    Meow,
}

impl PageSound {
    pub fn element_id(self) -> &'static str {
        match self {
            PageSound::No => "no-sound",
            PageSound::Meow => "meow",
        }
    }

    /// Playback volume override, if any
    pub fn volume(self) -> Option<f64> {
        match self {
            PageSound::No => None,
            PageSound::Meow => Some(0.2),
        }
    }
}

/// Add a `_=<stamp>` query so the fetch bypasses any cached response
pub fn cache_busted_url(url: &str, stamp: u64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}_={stamp}")
}
