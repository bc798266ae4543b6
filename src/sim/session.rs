//! Session score and elapsed-time tracking

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Session duration elapsed
    Timeout,
    /// Score reached the quota
    Quota,
    /// Stopped from outside (navigation, close button, teardown)
    Cancelled,
}

/// One run of a timed game
#[derive(Debug, Clone)]
pub struct Session {
    score: u32,
    elapsed_secs: u32,
    started_at: u64,
    quota: Option<u32>,
}

impl Session {
    pub fn new(started_at: u64, quota: Option<u32>) -> Self {
        Self {
            score: 0,
            elapsed_secs: 0,
            started_at,
            quota,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Add `points` (may be negative), never dropping below zero
    pub fn record_catch(&mut self, points: i64) -> u32 {
        let next = (self.score as i64).saturating_add(points).clamp(0, u32::MAX as i64);
        self.score = next as u32;
        self.score
    }

    pub fn tick_second(&mut self) -> u32 {
        self.elapsed_secs += 1;
        self.elapsed_secs
    }

    pub fn quota_reached(&self) -> bool {
        self.quota.is_some_and(|q| self.score >= q)
    }
}

/// Final result of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub score: u32,
    pub elapsed_secs: u32,
    pub won: bool,
    pub end: SessionEnd,
}
