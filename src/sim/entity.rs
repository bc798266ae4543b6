//! Ephemeral interactive entities (hearts, balloons)

/// Entity identifier, unique within its owning game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// How an entity travels across its container over its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionKind {
    /// Top to bottom (falling hearts)
    #[default]
    Fall,
    /// Bottom to top, drifting (floating hearts)
    Float,
    /// Bottom to top, straight (balloons)
    Rise,
}

/// Lifecycle phase. `Spawned` is the only live phase; the other two are
/// terminal and reachable only from `Spawned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityPhase {
    Spawned,
    Caught { at: u64 },
    Expired { at: u64 },
}

/// Why an entity left the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Caught by the player
    Caught,
    /// Lifetime elapsed
    Expired,
    /// Owning session stopped
    Cleared,
}

/// A single spawned token
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub symbol: String,
    /// Background tint (`#rrggbb`), balloons only
    pub tint: Option<String>,
    /// Horizontal position, percent of container width
    pub x_percent: f32,
    /// Font size in px
    pub size_px: f32,
    pub motion: MotionKind,
    pub spawned_at: u64,
    /// Animation length (ms)
    pub lifetime_ms: u64,
    pub phase: EntityPhase,
}

impl Entity {
    pub fn is_live(&self) -> bool {
        self.phase == EntityPhase::Spawned
    }

    /// Animation progress in `[0, 1]`. Frozen once the entity leaves the
    /// `Spawned` phase.
    pub fn progress(&self, now: u64) -> f32 {
        let t = match self.phase {
            EntityPhase::Spawned => now,
            EntityPhase::Caught { at } | EntityPhase::Expired { at } => at,
        };
        if self.lifetime_ms == 0 {
            return 1.0;
        }
        (t.saturating_sub(self.spawned_at) as f32 / self.lifetime_ms as f32).clamp(0.0, 1.0)
    }

    /// Spawned → Caught. Returns false if the entity was already gone.
    pub fn catch(&mut self, now: u64) -> bool {
        if !self.is_live() {
            return false;
        }
        self.phase = EntityPhase::Caught { at: now };
        true
    }

    /// Spawned → Expired. Returns false if the entity was already gone.
    pub fn expire(&mut self, now: u64) -> bool {
        if !self.is_live() {
            return false;
        }
        self.phase = EntityPhase::Expired { at: now };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart() -> Entity {
        Entity {
            id: EntityId(1),
            symbol: "❤️".into(),
            tint: None,
            x_percent: 50.0,
            size_px: 24.0,
            motion: MotionKind::Fall,
            spawned_at: 1000,
            lifetime_ms: 4000,
            phase: EntityPhase::Spawned,
        }
    }

    #[test]
    fn test_first_transition_wins() {
        let mut e = heart();
        assert!(e.catch(2000));
        assert!(!e.expire(5120));
        assert!(!e.catch(2001));
        assert_eq!(e.phase, EntityPhase::Caught { at: 2000 });

        let mut e = heart();
        assert!(e.expire(5120));
        assert!(!e.catch(5121));
    }

    #[test]
    fn test_progress_freezes_when_caught() {
        let mut e = heart();
        assert_eq!(e.progress(1000), 0.0);
        assert!((e.progress(3000) - 0.5).abs() < 1e-6);
        e.catch(3000);
        assert!((e.progress(4500) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_progress_clamps() {
        let e = heart();
        assert_eq!(e.progress(0), 0.0);
        assert_eq!(e.progress(99_999), 1.0);
    }
}
