//! Timed entity game
//!
//! The spawn / catch / expire loop shared by every mini game on the page.
//! A game owns its session, its live entities and every timer it schedules,
//! so stopping it leaves nothing behind.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId, EntityPhase, MotionKind, Removal};
use super::session::{Session, SessionEnd, SessionReport};
use super::timer::{Fired, Timers};
use crate::audio::Cue;

/// Which of the page's games this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    /// Floating hearts on the reward screen
    Ambient,
    /// Catch-the-falling-hearts game
    Hearts,
    /// Secret balloon pop
    Balloons,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Ambient, GameKind::Hearts, GameKind::Balloons];

    pub fn name(self) -> &'static str {
        match self {
            GameKind::Ambient => "ambient",
            GameKind::Hearts => "hearts",
            GameKind::Balloons => "balloons",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Per-game RNG stream offset so the games don't mirror each other
    fn seed_salt(self) -> u64 {
        match self {
            GameKind::Ambient => 0x9E37_79B9,
            GameKind::Hearts => 0x85EB_CA6B,
            GameKind::Balloons => 0xC2B2_AE35,
        }
    }
}

/// Score delta awarded for catching an entity
pub type CatchRule = fn(&Entity) -> i64;

/// Static description of a game's behaviour
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Cadence of the spawn tick
    pub spawn_interval_ms: u64,
    /// Uniform range the animation lifetime is drawn from (inclusive)
    pub lifetime_range_ms: (u64, u64),
    /// Extra time past the lifetime before the entity is force-removed
    pub expiry_grace_ms: u64,
    /// Auto-stop after this long. `None` runs until stopped.
    pub session_duration_ms: Option<u64>,
    /// Stop spawning (but keep running) after this long
    pub spawn_cutoff_ms: Option<u64>,
    /// Spawn one entity immediately on start
    pub spawn_on_start: bool,
    /// End the session as won once the score reaches this
    pub quota: Option<u32>,
    pub on_catch: CatchRule,
    pub catch_cue: Cue,
    pub symbols: Vec<String>,
    /// Optional background colours (`#rrggbb`)
    pub tints: Vec<String>,
    /// Horizontal spawn band, percent of container width
    pub lane_percent: (f32, f32),
    pub size_range_px: (f32, f32),
    pub motion: MotionKind,
}

/// Something observable happened inside a game
#[derive(Debug, Clone)]
pub enum GameEvent {
    Started,
    Spawned(Entity),
    Removed { id: EntityId, reason: Removal },
    Caught { entity: Entity, points: i64, cue: Cue },
    ScoreChanged(u32),
    ElapsedChanged(u32),
    Finished(SessionReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameTimer {
    Spawn,
    Second,
    SessionEnd,
    SpawnCutoff,
    Expire(EntityId),
}

/// One game instance. At most one session runs at a time.
#[derive(Debug, Clone)]
pub struct TimedEntityGame {
    kind: GameKind,
    config: GameConfig,
    rng: Pcg32,
    session: Option<Session>,
    /// Live entities in spawn order
    entities: Vec<Entity>,
    timers: Timers<GameTimer>,
    next_id: u32,
    last_report: Option<SessionReport>,
}

impl TimedEntityGame {
    pub fn new(kind: GameKind, config: GameConfig, seed: u64) -> Self {
        Self {
            kind,
            config,
            rng: Pcg32::seed_from_u64(seed ^ kind.seed_salt()),
            session: None,
            entities: Vec::new(),
            timers: Timers::new(),
            next_id: 1,
            last_report: None,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Current score, or the final score of the last session
    pub fn score(&self) -> u32 {
        match (&self.session, &self.last_report) {
            (Some(s), _) => s.score(),
            (None, Some(r)) => r.score,
            (None, None) => 0,
        }
    }

    /// When the running session began
    pub fn started_at(&self) -> Option<u64> {
        self.session.as_ref().map(Session::started_at)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.session.as_ref().map_or(0, Session::elapsed_secs)
    }

    pub fn last_report(&self) -> Option<&SessionReport> {
        self.last_report.as_ref()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Timers this game still has outstanding
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Begin a session. No-op (returns false) if one is already running.
    pub fn start(&mut self, now: u64, events: &mut Vec<GameEvent>) -> bool {
        if self.session.is_some() {
            return false;
        }

        self.session = Some(Session::new(now, self.config.quota));
        self.timers.every(now, self.config.spawn_interval_ms, GameTimer::Spawn);
        self.timers.every(now, 1000, GameTimer::Second);
        if let Some(duration) = self.config.session_duration_ms {
            self.timers.after(now, duration, GameTimer::SessionEnd);
        }
        if let Some(cutoff) = self.config.spawn_cutoff_ms {
            self.timers.after(now, cutoff, GameTimer::SpawnCutoff);
        }

        log::info!("{} game started at {}ms", self.kind.name(), now);
        events.push(GameEvent::Started);
        events.push(GameEvent::ScoreChanged(0));
        events.push(GameEvent::ElapsedChanged(0));

        if self.config.spawn_on_start {
            self.spawn(now, events);
        }
        true
    }

    /// Cancel the running session. No-op (returns `None`) when stopped.
    pub fn stop(&mut self, now: u64, events: &mut Vec<GameEvent>) -> Option<SessionReport> {
        self.finish(now, SessionEnd::Cancelled, events)
    }

    /// Catch a live entity. Returns false if it is unknown, already caught,
    /// already expired, or the game is stopped.
    pub fn catch(&mut self, id: EntityId, now: u64, events: &mut Vec<GameEvent>) -> bool {
        if self.session.is_none() {
            return false;
        }
        let Some(idx) = self.entities.iter().position(|e| e.id == id) else {
            return false;
        };
        if !self.entities[idx].catch(now) {
            return false;
        }

        let entity = self.entities.remove(idx);
        self.timers.cancel_where(|t| *t == GameTimer::Expire(id));
        let points = (self.config.on_catch)(&entity);
        events.push(GameEvent::Removed {
            id,
            reason: Removal::Caught,
        });
        events.push(GameEvent::Caught {
            entity,
            points,
            cue: self.config.catch_cue,
        });

        let Some(session) = self.session.as_mut() else {
            return true;
        };
        let score = session.record_catch(points);
        let won = session.quota_reached();
        events.push(GameEvent::ScoreChanged(score));

        if won {
            self.finish(now, SessionEnd::Quota, events);
        }
        true
    }

    /// Fire every timer due at or before `now`, in deadline order
    pub fn advance(&mut self, now: u64, events: &mut Vec<GameEvent>) {
        while let Some(Fired { at, key, .. }) = self.timers.pop_due(now) {
            match key {
                GameTimer::Spawn => self.spawn(at, events),
                GameTimer::Second => {
                    if let Some(session) = self.session.as_mut() {
                        events.push(GameEvent::ElapsedChanged(session.tick_second()));
                    }
                }
                GameTimer::SessionEnd => {
                    self.finish(at, SessionEnd::Timeout, events);
                }
                GameTimer::SpawnCutoff => {
                    self.timers.cancel_where(|t| *t == GameTimer::Spawn);
                    log::debug!("{} spawning cut off at {}ms", self.kind.name(), at);
                }
                GameTimer::Expire(id) => self.expire(id, at, events),
            }
        }
    }

    fn finish(&mut self, now: u64, end: SessionEnd, events: &mut Vec<GameEvent>) -> Option<SessionReport> {
        let session = self.session.take()?;
        let cancelled = self.timers.clear();

        for entity in self.entities.drain(..) {
            events.push(GameEvent::Removed {
                id: entity.id,
                reason: Removal::Cleared,
            });
        }

        let report = SessionReport {
            score: session.score(),
            elapsed_secs: session.elapsed_secs(),
            won: end == SessionEnd::Quota,
            end,
        };
        log::info!(
            "{} game finished at {}ms ({:?}): score {}, {}s, {} timers cancelled",
            self.kind.name(),
            now,
            end,
            report.score,
            report.elapsed_secs,
            cancelled
        );
        self.last_report = Some(report.clone());
        events.push(GameEvent::Finished(report.clone()));
        Some(report)
    }

    fn spawn(&mut self, at: u64, events: &mut Vec<GameEvent>) {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let cfg = &self.config;
        let (lo, hi) = ordered(cfg.lifetime_range_ms);
        let lifetime_ms = self.rng.random_range(lo..=hi);
        let (lo, hi) = ordered(cfg.lane_percent);
        let x_percent = self.rng.random_range(lo..=hi);
        let (lo, hi) = ordered(cfg.size_range_px);
        let size_px = self.rng.random_range(lo..=hi);
        let symbol = pick(&mut self.rng, &cfg.symbols).unwrap_or("❤️").to_string();
        let tint = pick(&mut self.rng, &cfg.tints).map(str::to_string);

        let entity = Entity {
            id,
            symbol,
            tint,
            x_percent,
            size_px,
            motion: cfg.motion,
            spawned_at: at,
            lifetime_ms,
            phase: EntityPhase::Spawned,
        };
        self.timers.after(
            at,
            lifetime_ms.saturating_add(cfg.expiry_grace_ms),
            GameTimer::Expire(id),
        );
        log::debug!("{} spawned {:?} for {}ms", self.kind.name(), id, lifetime_ms);
        events.push(GameEvent::Spawned(entity.clone()));
        self.entities.push(entity);
    }

    fn expire(&mut self, id: EntityId, at: u64, events: &mut Vec<GameEvent>) {
        let Some(idx) = self.entities.iter().position(|e| e.id == id) else {
            return;
        };
        if self.entities[idx].expire(at) {
            self.entities.remove(idx);
            events.push(GameEvent::Removed {
                id,
                reason: Removal::Expired,
            });
        }
    }
}

fn ordered<T: PartialOrd>((a, b): (T, T)) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

fn pick<'a>(rng: &mut Pcg32, items: &'a [String]) -> Option<&'a str> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.random_range(0..items.len())].as_str())
}
