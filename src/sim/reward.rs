//! Rizz reward counter

/// Cross-game score. Never negative, never decays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewardCounter {
    value: u64,
}

impl RewardCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Apply a signed delta, clamping at zero. Returns the new value.
    pub fn adjust(&mut self, delta: i64) -> u64 {
        self.value = if delta >= 0 {
            self.value.saturating_add(delta as u64)
        } else {
            self.value.saturating_sub(delta.unsigned_abs())
        };
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_floor_clamp() {
        let mut rizz = RewardCounter::new();
        rizz.adjust(20);
        assert_eq!(rizz.adjust(-50), 0);
        assert_eq!(rizz.adjust(5), 5);
    }

    #[test]
    fn test_extreme_deltas() {
        let mut rizz = RewardCounter::new();
        assert_eq!(rizz.adjust(i64::MIN), 0);
        rizz.adjust(i64::MAX);
        assert_eq!(rizz.value(), i64::MAX as u64);
    }

    proptest! {
        #[test]
        fn prop_matches_clamped_sum(deltas in proptest::collection::vec(-1_000i64..1_000, 0..64)) {
            let mut rizz = RewardCounter::new();
            let mut expected: i64 = 0;
            for d in deltas {
                expected = (expected + d).max(0);
                prop_assert_eq!(rizz.adjust(d), expected as u64);
            }
        }
    }
}
