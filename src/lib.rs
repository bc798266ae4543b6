//! Rizz Valentine - an interactive valentine page
//!
//! Core modules:
//! - `sim`: Deterministic page simulation (timers, entity games, scenes, rizz)
//! - `audio`: Sound cues and the clip playback fallback chain
//! - `platform`: Browser DOM wiring (wasm only)
//! - `settings`: Runtime configuration
//! - `tuning`: Data-driven game balance

pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;

/// Page configuration constants
pub mod consts {
    /// Longest frame step fed into the simulation (ms). Longer gaps are clamped
    /// so a backgrounded tab does not fire a burst of timers on return.
    pub const MAX_FRAME_MS: u64 = 250;

    /// Extra time a notification stays on screen past its requested duration
    pub const TOAST_BUFFER_MS: u64 = 200;

    /// Favicon frame period
    pub const FAVICON_PERIOD_MS: u32 = 1000;

    /// Delay before the ambient hearts resume after leaving the catch game
    pub const AMBIENT_RESUME_DELAY_MS: u64 = 600;

    /// Delay before the balloon overlay closes after a win
    pub const OVERLAY_CLOSE_DELAY_MS: u64 = 400;

    /// Rizz rewards
    pub const ACCEPT_REWARD: i64 = 100;
    pub const HEART_REWARD: i64 = 10;
    pub const SECRET_REWARD: i64 = 500;

    /// Toast durations
    pub const REWARD_TOAST_MS: u64 = 1100;
    pub const SUMMARY_TOAST_MS: u64 = 1400;

    /// Proposal button dodge tuning
    pub const YES_SCALE_STEP: f32 = 0.22;
    pub const YES_SCALE_MAX: f32 = 4.0;
    pub const NO_OFFSET_STEP: f32 = 12.0;

    /// Paw particle burst
    pub const PAW_PARTICLES: usize = 6;
    pub const PAW_PARTICLE_LIFE_MS: u64 = 1000;
    pub const PAW_SPREAD: f32 = 200.0;

    /// Horizontal sway of floating hearts (px)
    pub const FLOAT_SWAY_PX: f32 = 12.0;
}

use glam::Vec2;

use consts::FLOAT_SWAY_PX;
use sim::MotionKind;

/// Darken (negative `amount`) or lighten a `#rrggbb` colour, clamping each
/// channel to `0..=255`. Malformed input yields black.
pub fn shade_color(hex: &str, amount: i32) -> String {
    let num = u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0);
    let channel = |shift: u32| ((((num >> shift) & 0xFF) as i32) + amount).clamp(0, 255) as u32;
    let (r, g, b) = (channel(16), channel(8), channel(0));
    format!("#{:06x}", (r << 16) | (g << 8) | b)
}

/// Translation of an entity from its spawn point at `progress` through its
/// lifetime. `travel_px` is the distance covered by the end.
pub fn entity_offset(motion: MotionKind, progress: f32, travel_px: f32) -> Vec2 {
    let p = progress.clamp(0.0, 1.0);
    match motion {
        MotionKind::Fall => Vec2::new(0.0, p * travel_px),
        MotionKind::Rise => Vec2::new(0.0, -p * travel_px),
        // Gentle sideways sway, one and a half periods per lifetime
        MotionKind::Float => Vec2::new(
            (p * std::f32::consts::TAU * 1.5).sin() * FLOAT_SWAY_PX,
            -p * travel_px,
        ),
    }
}

/// Label for the acceptance replay button
pub fn replay_label(remaining: u32) -> String {
    format!("🔊 Play again ({})", remaining)
}

/// Coerce a loosely-typed rizz delta to an integer; anything that is not a
/// finite number becomes 0.
pub fn parse_delta(raw: &str) -> i64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_color_darkens() {
        assert_eq!(shade_color("#ff6b9a", -18), "#ed5988");
        assert_eq!(shade_color("66ccff", -18), "#54baed");
    }

    #[test]
    fn test_shade_color_clamps() {
        assert_eq!(shade_color("#050505", -18), "#000000");
        assert_eq!(shade_color("#f0f0f0", 40), "#ffffff");
        assert_eq!(shade_color("not a colour", 0), "#000000");
    }

    #[test]
    fn test_entity_offset() {
        assert_eq!(entity_offset(MotionKind::Fall, 0.5, 400.0), Vec2::new(0.0, 200.0));
        assert_eq!(entity_offset(MotionKind::Rise, 1.0, 400.0), Vec2::new(0.0, -400.0));
        assert_eq!(entity_offset(MotionKind::Rise, 2.0, 400.0).y, -400.0);
        let drift = entity_offset(MotionKind::Float, 0.1, 100.0);
        assert!(drift.x > 0.0 && drift.x <= FLOAT_SWAY_PX);
        assert!((drift.y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_replay_label() {
        assert_eq!(replay_label(1), "🔊 Play again (1)");
    }

    #[test]
    fn test_parse_delta() {
        assert_eq!(parse_delta("42"), 42);
        assert_eq!(parse_delta(" -7 "), -7);
        assert_eq!(parse_delta("12.9"), 12);
        assert_eq!(parse_delta("abc"), 0);
        assert_eq!(parse_delta(""), 0);
        assert_eq!(parse_delta("NaN"), 0);
        assert_eq!(parse_delta("inf"), 0);
    }
}
