//! Tick scheduling with a fixed minimum delay between frames

use std::time::{Duration, Instant};

/// Default delay between the end of one tick and the start of the next
pub const DEFAULT_INTERVAL_MS: u64 = 30;

/// Decides when the next tick may run.
///
/// The loop calls `rearm` after every completed tick; it returns once the
/// next tick is allowed to start. A slow tick only pushes the next one back.
pub trait Scheduler {
    fn rearm(&mut self);
}

/// Sleeps the full interval after each tick, like a self-rescheduling timeout
pub struct FixedDelayScheduler {
    /// Minimum gap between the end of a tick and the start of the next
    pub interval: Duration,
    /// Total elapsed time in seconds since the first rearm
    pub total_time: f64,
    /// Time between the last two rearms in seconds (tick work + sleep)
    pub delta_time: f64,
    /// Number of rearms so far
    pub rearms: u64,
    last_instant: Instant,
    first_rearm: bool,
}

impl Default for FixedDelayScheduler {
    fn default() -> Self {
        Self::with_interval_ms(DEFAULT_INTERVAL_MS)
    }
}

impl FixedDelayScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            total_time: 0.0,
            delta_time: 0.0,
            rearms: 0,
            last_instant: Instant::now(),
            first_rearm: true,
        }
    }

    pub fn with_interval_ms(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Scheduler for FixedDelayScheduler {
    fn rearm(&mut self) {
        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }
        let now = Instant::now();
        self.rearms += 1;

        if self.first_rearm {
            self.first_rearm = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.total_time += self.delta_time;
    }
}

/// Scheduler that never sleeps; counts rearms for tests and offline rendering
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub rearms: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ManualScheduler {
    fn rearm(&mut self) {
        self.rearms += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        let clock = FixedDelayScheduler::default();
        assert_eq!(clock.interval, Duration::from_millis(30));
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.rearms, 0);
    }

    #[test]
    fn test_first_rearm_zero_delta() {
        let mut clock = FixedDelayScheduler::with_interval_ms(0);
        clock.rearm();
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.rearms, 1);
    }

    #[test]
    fn test_delay_is_a_minimum() {
        let mut clock = FixedDelayScheduler::with_interval_ms(5);
        clock.rearm();
        // Simulate a slow tick: the next rearm still waits the full interval
        std::thread::sleep(Duration::from_millis(10));
        clock.rearm();
        assert!(clock.delta_time >= 0.015);
        assert!((clock.total_time - clock.delta_time).abs() < 1e-12);
    }

    #[test]
    fn test_manual_scheduler_counts() {
        let mut clock = ManualScheduler::new();
        clock.rearm();
        clock.rearm();
        assert_eq!(clock.rearms, 2);
    }
}
