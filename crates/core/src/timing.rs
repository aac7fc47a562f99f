//! Frame pacing and timing helpers
//!
//! The loop targets a fixed logical frame rate: whatever time a frame's work
//! did not use is slept away before the next frame starts. The helpers here
//! take explicit [`Instant`]s so their arithmetic is testable without sleeping.

use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How the frame loop is paced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pacing {
    /// Hold each frame to `1 / fps` seconds
    Fixed { fps: u32 },
    /// Start the next frame immediately
    Unpaced,
}

impl Pacing {
    /// Time budget of a single frame, `None` when unpaced
    pub fn frame_budget(&self) -> Option<Duration> {
        match *self {
            Self::Fixed { fps } if fps > 0 => Some(Duration::from_secs(1) / fps),
            _ => None,
        }
    }
}

/// Sleeps away the unused part of each frame budget
#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Option<Duration>,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            budget: pacing.frame_budget(),
            frame_start: Instant::now(),
        }
    }

    /// Mark the start of a frame
    pub fn begin(&mut self, now: Instant) {
        self.frame_start = now;
    }

    /// Budget left in the current frame at `now`
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.budget {
            Some(budget) => budget.saturating_sub(now.saturating_duration_since(self.frame_start)),
            None => Duration::ZERO,
        }
    }

    /// Sleep until the frame budget is used up
    pub fn wait(&self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}

/// Tracks how long the last frame's work took
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_frame_time: Duration,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.last_frame_time = elapsed;
    }

    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }

    pub fn last_frame_time_ms(&self) -> f64 {
        self.last_frame_time.as_secs_f64() * 1000.0
    }
}

/// Rate limiter for diagnostic output
///
/// Reporting is best effort: asking whether a report is due never blocks and
/// never affects the frame that asked.
#[derive(Debug, Clone)]
pub struct ReportThrottle {
    every: Option<Duration>,
    last: Option<Instant>,
}

impl ReportThrottle {
    /// `None` disables reporting entirely
    pub fn new(every: Option<Duration>) -> Self {
        Self { every, last: None }
    }

    /// Whether a report should be emitted at `now`; records it if so
    pub fn due(&mut self, now: Instant) -> bool {
        let Some(every) = self.every else {
            return false;
        };
        match self.last {
            Some(last) if now.saturating_duration_since(last) < every => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
