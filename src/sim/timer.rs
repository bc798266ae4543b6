//! Virtual-time timers
//!
//! Every timer belongs to exactly one owner (a game or the page) and fires
//! only when its owner polls it, so cancelling an owner's timers is just
//! dropping them. Time is milliseconds since page start.

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<K> {
    id: TimerId,
    deadline: u64,
    period: Option<u64>,
    key: K,
}

/// A timer that came due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    /// The deadline it was scheduled for (not the poll time)
    pub at: u64,
    pub key: K,
}

/// A set of pending timers carrying a payload `K` describing what to do
#[derive(Debug, Clone)]
pub struct Timers<K> {
    entries: Vec<Entry<K>>,
    next_id: u64,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<K: Clone> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, deadline: u64, period: Option<u64>, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline,
            period,
            key,
        });
        id
    }

    /// Fire once, `delay` ms after `now`. Deadlines saturate at `u64::MAX`.
    pub fn after(&mut self, now: u64, delay: u64, key: K) -> TimerId {
        self.push(now.saturating_add(delay), None, key)
    }

    /// Fire every `period` ms, first at `now + period`
    pub fn every(&mut self, now: u64, period: u64, key: K) -> TimerId {
        let period = period.max(1);
        self.push(now.saturating_add(period), Some(period), key)
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every timer whose payload matches
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&K) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(&e.key));
        before - self.entries.len()
    }

    /// Cancel everything
    pub fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Ties fire in scheduling order. Repeating timers are re-armed one
    /// period later, so a long gap fires them once per missed period.
    pub fn pop_due(&mut self, now: u64) -> Option<Fired<K>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.id))
            .map(|(i, _)| i)?;

        match self.entries[idx].period {
            Some(period) => {
                let entry = &mut self.entries[idx];
                let at = entry.deadline;
                entry.deadline = entry.deadline.saturating_add(period);
                Some(Fired {
                    id: entry.id,
                    at,
                    key: entry.key.clone(),
                })
            }
            None => {
                let entry = self.entries.swap_remove(idx);
                Some(Fired {
                    id: entry.id,
                    at: entry.deadline,
                    key: entry.key,
                })
            }
        }
    }

    /// Deadline of the next timer, if any
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = Timers::new();
        timers.after(0, 100, "a");
        assert_eq!(timers.pop_due(99), None);
        let fired = timers.pop_due(250).unwrap();
        assert_eq!((fired.at, fired.key), (100, "a"));
        assert_eq!(timers.pop_due(1000), None);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_repeating_rearms() {
        let mut timers = Timers::new();
        timers.every(0, 650, "spawn");
        let fired: Vec<u64> = std::iter::from_fn(|| timers.pop_due(2000).map(|f| f.at)).collect();
        assert_eq!(fired, vec![650, 1300, 1950]);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_deadline(), Some(2600));
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        let a = timers.after(0, 10, 1);
        let _b = timers.after(0, 20, 2);
        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        assert_eq!(timers.cancel_where(|k| *k == 2), 1);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut timers = Timers::new();
        timers.after(0, 50, 'x');
        timers.after(0, 50, 'y');
        timers.after(0, 10, 'z');
        let order: Vec<char> = std::iter::from_fn(|| timers.pop_due(50).map(|f| f.key)).collect();
        assert_eq!(order, vec!['z', 'x', 'y']);
    }

    #[test]
    fn test_huge_delays_saturate() {
        let mut timers = Timers::new();
        timers.after(1_000, u64::MAX, "never");
        timers.every(1_000, u64::MAX - 10, "rarely");
        assert_eq!(timers.next_deadline(), Some(u64::MAX));
        assert_eq!(timers.pop_due(u64::MAX - 1), None);
        assert_eq!(timers.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_fires_in_deadline_order(delays in proptest::collection::vec(0u64..5_000, 1..40)) {
            let mut timers = Timers::new();
            for (i, d) in delays.iter().enumerate() {
                timers.after(0, *d, i);
            }
            let mut last = 0;
            let mut count = 0;
            while let Some(Fired { key: i, .. }) = timers.pop_due(u64::MAX / 2) {
                prop_assert!(delays[i] >= last);
                last = delays[i];
                count += 1;
            }
            prop_assert_eq!(count, delays.len());
        }
    }
}
