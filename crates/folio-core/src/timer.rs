#![forbid(unsafe_code)]

//! Cancellable one-shot timers over the deterministic clock.
//!
//! Every delayed action on the page (scroll guard release, simulated
//! submission, toast lifetime, staggered reveals, trailing throttle runs)
//! is a [`TimerQueue`] entry. Scheduling returns a [`TimerId`]; a cancelled
//! id never fires, so restarting an action is always "cancel, then schedule".

use core::time::Duration;

/// Handle for one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric id (monotonic in scheduling order).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct PendingTimer<K> {
    id: TimerId,
    deadline: Duration,
    kind: K,
}

/// Pending timers ordered by deadline, ties broken by scheduling order.
///
/// The page keeps only a handful of timers alive at once, so a flat vector
/// with linear scans is enough.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    next_id: u64,
    pending: Vec<PendingTimer<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Schedule `kind` to fire once the clock reaches `deadline`.
    pub fn schedule(&mut self, deadline: Duration, kind: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.pending.push(PendingTimer { id, deadline, kind });
        id
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.id != id);
        self.pending.len() != before
    }

    /// Whether `id` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|timer| timer.id == id)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|timer| timer.deadline).min()
    }

    /// Remove and return the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerId, K)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.id))
            .map(|(idx, _)| idx)?;
        let timer = self.pending.swap_remove(idx);
        Some((timer.id, timer.kind))
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(300), "late");
        queue.schedule(ms(100), "early");
        queue.schedule(ms(200), "middle");

        let fired: Vec<_> = std::iter::from_fn(|| queue.pop_due(ms(1_000)))
            .map(|(_, kind)| kind)
            .collect();
        assert_eq!(fired, vec!["early", "middle", "late"]);
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(50), 'a');
        queue.schedule(ms(50), 'b');
        queue.schedule(ms(50), 'c');

        let fired: String = std::iter::from_fn(|| queue.pop_due(ms(50)))
            .map(|(_, kind)| kind)
            .collect();
        assert_eq!(fired, "abc");
    }

    #[test]
    fn nothing_due_before_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(100), ());
        assert!(queue.pop_due(ms(99)).is_none());
        assert!(queue.pop_due(ms(100)).is_some());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(ms(10), 1);
        let second = queue.schedule(ms(20), 2);
        assert!(queue.cancel(first));
        assert!(!queue.cancel(first));
        assert!(!queue.is_pending(first));
        assert!(queue.is_pending(second));
        assert_eq!(queue.pop_due(ms(100)).map(|(_, kind)| kind), Some(2));
        assert!(queue.is_empty());
    }

    #[test]
    fn next_deadline_tracks_minimum() {
        let mut queue = TimerQueue::new();
        assert_eq!(queue.next_deadline(), None);
        let soon = queue.schedule(ms(5), ());
        queue.schedule(ms(50), ());
        assert_eq!(queue.next_deadline(), Some(ms(5)));
        queue.cancel(soon);
        assert_eq!(queue.next_deadline(), Some(ms(50)));
        assert_eq!(queue.len(), 1);
    }
}
