#![forbid(unsafe_code)]

//! Leading-edge throttle with a trailing catch-up run.
//!
//! Scroll events arrive far faster than the page needs to re-read section
//! layout. [`Throttle`] lets the first event of a burst through immediately
//! and collapses the rest of the burst into a single trailing run, so the
//! final scroll position is always evaluated.
//!
//! The throttle only decides; the caller owns the trailing timer and must
//! call [`Throttle::mark_run`] when that timer fires.

use core::time::Duration;

/// What to do with one throttled call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Run now; the throttle has already recorded the run.
    Run,
    /// Run later, at `at`, replacing any trailing run scheduled before.
    Defer { at: Duration },
}

/// Rate limiter allowing at most one run per `interval`.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_run: Option<Duration>,
}

impl Throttle {
    /// Create a throttle that has never run.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    /// Minimum spacing between runs.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time of the last recorded run.
    #[must_use]
    pub const fn last_run(&self) -> Option<Duration> {
        self.last_run
    }

    /// Decide what to do with a call arriving at `now`.
    ///
    /// A call runs immediately when strictly more than `interval` has passed
    /// since the last run. Otherwise it is deferred to `last_run + interval`.
    pub fn hit(&mut self, now: Duration) -> ThrottleDecision {
        match self.last_run {
            Some(last) if now.saturating_sub(last) <= self.interval => ThrottleDecision::Defer {
                at: last.saturating_add(self.interval),
            },
            _ => {
                self.last_run = Some(now);
                ThrottleDecision::Run
            }
        }
    }

    /// Record a deferred run that executed at `now`.
    pub fn mark_run(&mut self, now: Duration) {
        self.last_run = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn first_call_runs() {
        let mut throttle = Throttle::new(ms(100));
        assert_eq!(throttle.hit(ms(0)), ThrottleDecision::Run);
        assert_eq!(throttle.last_run(), Some(ms(0)));
    }

    #[test]
    fn burst_defers_to_interval_end() {
        let mut throttle = Throttle::new(ms(100));
        assert_eq!(throttle.hit(ms(1_000)), ThrottleDecision::Run);
        assert_eq!(
            throttle.hit(ms(1_030)),
            ThrottleDecision::Defer { at: ms(1_100) }
        );
        assert_eq!(
            throttle.hit(ms(1_090)),
            ThrottleDecision::Defer { at: ms(1_100) }
        );
    }

    #[test]
    fn exactly_interval_is_still_deferred() {
        let mut throttle = Throttle::new(ms(100));
        throttle.hit(ms(0));
        assert_eq!(throttle.hit(ms(100)), ThrottleDecision::Defer { at: ms(100) });
        assert_eq!(throttle.hit(ms(101)), ThrottleDecision::Run);
    }

    #[test]
    fn mark_run_restarts_window() {
        let mut throttle = Throttle::new(ms(100));
        throttle.hit(ms(0));
        throttle.mark_run(ms(100));
        assert_eq!(throttle.hit(ms(150)), ThrottleDecision::Defer { at: ms(200) });
    }

    proptest! {
        #[test]
        fn immediate_runs_are_spaced_by_more_than_interval(
            gaps in proptest::collection::vec(0u64..250, 1..64)
        ) {
            let mut throttle = Throttle::new(ms(100));
            let mut now = ms(0);
            let mut last_immediate: Option<Duration> = None;
            for gap in gaps {
                now += ms(gap);
                if throttle.hit(now) == ThrottleDecision::Run {
                    if let Some(prev) = last_immediate {
                        prop_assert!(now - prev > ms(100));
                    }
                    last_immediate = Some(now);
                }
            }
        }
    }
}
