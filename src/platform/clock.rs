//! Frame timing

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

/// Measures real time between frames
///
/// Deltas are clamped so a stalled frame (window drag, breakpoint) cannot
/// push bodies through each other.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_dt: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            last: start,
            max_dt: MAX_FRAME_DT,
        }
    }

    /// Seconds since the previous call (or since construction)
    pub fn elapsed(&mut self) -> f64 {
        self.elapsed_at(Instant::now())
    }

    /// Seconds between the previous call and `now`
    pub fn elapsed_at(&mut self, now: Instant) -> f64 {
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        dt.as_secs_f64().min(self.max_dt)
    }

    /// Largest delta `elapsed` will report
    pub fn max_dt(&self) -> Duration {
        Duration::from_secs_f64(self.max_dt)
    }
}
