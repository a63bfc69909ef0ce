//! Time-keyed numeric count-up.
//!
//! An animation is a pure function of elapsed time: callers sample it on
//! whatever frame cadence they have. Restarting means building a new
//! [`CountUp`]; the old one is simply dropped.

use std::time::{Duration, Instant};

/// Duration of the calculator total reveal.
pub const PRICE_REVEAL: Duration = Duration::from_millis(1000);

/// Duration of the statistics counters.
pub const STAT_COUNTER: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    from: f64,
    to: f64,
    duration: Duration,
    started: Instant,
}

impl CountUp {
    pub fn start(from: f64, to: f64, duration: Duration, now: Instant) -> Self {
        Self {
            from,
            to,
            duration,
            started: now,
        }
    }

    /// Linear interpolation from `from` to `to`, exactly `to` once finished.
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * progress
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}
