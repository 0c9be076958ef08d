//! Time management utilities
//!
//! The frame loop never reads the wall clock directly. It asks a [`Clock`] for the
//! monotonic time since start-up and lets a [`FrameTimer`] turn successive readings
//! into per-frame deltas. Swapping [`SystemClock`] for a [`ManualClock`] makes a whole
//! run deterministic.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of monotonically increasing elapsed time
pub trait Clock {
    /// Time elapsed since the clock was created
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Create a clock that starts counting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Deterministic clock for tests and headless runs.
///
/// Each call to [`Clock::elapsed`] advances the clock by `step` after reporting,
/// so a frame loop that samples once per frame sees a fixed frame time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    /// Clock that advances by `step` every time it is sampled
    pub fn with_step(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }

    /// Clock that only moves when [`ManualClock::advance`] is called
    pub fn frozen() -> Self {
        Self::with_step(Duration::ZERO)
    }

    /// Move the clock forward by `delta`
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// Frame timer deriving per-frame delta time from a [`Clock`]
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last_sample: Option<Duration>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: f32,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer with no delta clamping
    pub fn new() -> Self {
        Self {
            last_sample: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta: f32::INFINITY,
        }
    }

    /// Clamp reported deltas to at most `max_delta` seconds.
    ///
    /// Keeps a stalled frame (debugger break, window drag) from feeding a huge step
    /// into every animation at once.
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Sample the clock and return the seconds since the previous sample.
    ///
    /// The first sample returns zero.
    pub fn update(&mut self, clock: &dyn Clock) -> f32 {
        let now = clock.elapsed();
        let delta = self
            .last_sample
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_sample = Some(now);

        self.delta_time = delta.as_secs_f32().min(self.max_delta);
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Sum of all reported deltas in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_update_is_zero() {
        let clock = ManualClock::with_step(Duration::from_millis(16));
        let mut timer = FrameTimer::new();
        assert_eq!(timer.update(&clock), 0.0);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_fixed_step_deltas() {
        let clock = ManualClock::with_step(Duration::from_millis(250));
        let mut timer = FrameTimer::new();
        timer.update(&clock);
        for _ in 0..4 {
            assert_relative_eq!(timer.update(&clock), 0.25, epsilon = 1e-6);
        }
        assert_relative_eq!(timer.total_time(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(timer.current_fps(), 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_max_delta_clamps_stalls() {
        let clock = ManualClock::frozen();
        let mut timer = FrameTimer::new().with_max_delta(0.1);
        timer.update(&clock);
        clock.advance(Duration::from_secs(3));
        assert_relative_eq!(timer.update(&clock), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.elapsed();
        let second = clock.elapsed();
        assert!(second >= first);
    }
}
