//! Fixed-step pacing
//!
//! Converts elapsed wall time into a number of whole ticks. Snake runs on a
//! difficulty-dependent interval, Breakout and Pacman on the display frame.
//! Ticks are always run back to back by the caller, never concurrently.

use std::time::Duration;

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

/// Elapsed-time accumulator for one running game
#[derive(Debug, Clone)]
pub struct FixedStep {
    period: f32,
    accumulator: f32,
    running: bool,
}

impl FixedStep {
    /// Interval-timer pacing (one tick per `period`)
    pub fn interval(period: Duration) -> Self {
        Self {
            period: period.as_secs_f32(),
            accumulator: 0.0,
            running: true,
        }
    }

    /// Per-frame pacing
    pub fn per_frame() -> Self {
        Self {
            period: FRAME_DT,
            accumulator: 0.0,
            running: true,
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs_f32(self.period)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop scheduling; no further ticks are yielded
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Number of ticks due after `elapsed` more seconds
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        // Clamp long stalls (tab in background etc.)
        self.accumulator += elapsed.as_secs_f32().min(0.5);

        let mut due = 0;
        while self.accumulator >= self.period && due < MAX_SUBSTEPS {
            self.accumulator -= self.period;
            due += 1;
        }
        if due == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.period);
        }
        due
    }
}
