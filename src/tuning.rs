//! Data-driven game balance
//!
//! Default configurations for the page's three games, plus the sparse
//! overrides `Settings` may apply on top of them.

use serde::{Deserialize, Serialize};

use crate::audio::Cue;
use crate::sim::{Entity, GameConfig, MotionKind};

/// Balloons needed to unlock the secret
pub const BALLOON_QUOTA: u32 = 10;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn one_point(_: &Entity) -> i64 {
    1
}

fn no_points(_: &Entity) -> i64 {
    0
}

/// Floating hearts on the reward screen. Tapping one opens the catch game.
pub fn ambient_hearts() -> GameConfig {
    GameConfig {
        spawn_interval_ms: 520,
        lifetime_range_ms: (3000, 5500),
        expiry_grace_ms: 1500,
        session_duration_ms: None,
        spawn_cutoff_ms: Some(20_000),
        spawn_on_start: false,
        quota: None,
        on_catch: no_points,
        catch_cue: Cue::AmbientBeep,
        symbols: strings(&["❤️", "💖", "💕", "💘", "💞", "💓"]),
        tints: Vec::new(),
        lane_percent: (6.0, 88.0),
        size_range_px: (24.0, 36.0),
        motion: MotionKind::Float,
    }
}

/// One minute of falling hearts
pub fn falling_hearts() -> GameConfig {
    GameConfig {
        spawn_interval_ms: 650,
        lifetime_range_ms: (4200, 6600),
        expiry_grace_ms: 120,
        session_duration_ms: Some(60_000),
        spawn_cutoff_ms: None,
        spawn_on_start: false,
        quota: None,
        on_catch: one_point,
        catch_cue: Cue::HeartCatch,
        symbols: strings(&["❤️", "💖", "💕", "💘"]),
        tints: Vec::new(),
        lane_percent: (6.0, 92.0),
        size_range_px: (18.0, 44.0),
        motion: MotionKind::Fall,
    }
}

/// Secret balloon pop: ten pops in thirty seconds
pub fn balloons() -> GameConfig {
    GameConfig {
        spawn_interval_ms: 700,
        lifetime_range_ms: (5000, 9000),
        expiry_grace_ms: 400,
        session_duration_ms: Some(30_000),
        spawn_cutoff_ms: None,
        spawn_on_start: true,
        quota: Some(BALLOON_QUOTA),
        on_catch: one_point,
        catch_cue: Cue::BalloonPop,
        // 💘 two times in five
        symbols: strings(&["💘", "💘", "🎈", "🎈", "🎈"]),
        tints: strings(&["#ff6b9a", "#66ccff", "#ffb266", "#b78bff", "#7ce499"]),
        lane_percent: (6.0, 88.0),
        size_range_px: (30.0, 30.0),
        motion: MotionKind::Rise,
    }
}

/// Optional per-game overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverride {
    pub spawn_interval_ms: Option<u64>,
    pub lifetime_range_ms: Option<(u64, u64)>,
    pub session_duration_ms: Option<u64>,
    pub quota: Option<u32>,
}

impl ConfigOverride {
    pub fn apply(&self, cfg: &mut GameConfig) {
        if let Some(v) = self.spawn_interval_ms {
            cfg.spawn_interval_ms = v.max(1);
        }
        if let Some(v) = self.lifetime_range_ms {
            cfg.lifetime_range_ms = v;
        }
        if let Some(v) = self.session_duration_ms {
            cfg.session_duration_ms = Some(v);
        }
        if let Some(v) = self.quota {
            cfg.quota = Some(v);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningOverrides {
    pub ambient: ConfigOverride,
    pub hearts: ConfigOverride,
    pub balloons: ConfigOverride,
}

/// The three resolved game configurations
#[derive(Debug, Clone)]
pub struct Tuning {
    pub ambient: GameConfig,
    pub hearts: GameConfig,
    pub balloons: GameConfig,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ambient: ambient_hearts(),
            hearts: falling_hearts(),
            balloons: balloons(),
        }
    }
}

impl Tuning {
    pub fn with_overrides(overrides: &TuningOverrides) -> Self {
        let mut tuning = Self::default();
        overrides.ambient.apply(&mut tuning.ambient);
        overrides.hearts.apply(&mut tuning.hearts);
        overrides.balloons.apply(&mut tuning.balloons);
        tuning
    }
}
