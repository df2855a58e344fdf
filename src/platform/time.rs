//! Fixed-step scheduler
//!
//! Converts variable render-frame deltas into a whole number of simulation
//! ticks. Leftover time below one step carries over so the tick rate tracks
//! wall-clock time instead of the display's refresh rate.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest single frame delta accepted (seconds)
const MAX_FRAME_DT: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f64,
    max_substeps: u32,
    accumulator: f64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f64, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Feed a frame delta (seconds); returns how many ticks to run now
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let due = (self.accumulator / self.step).floor() as u64;
        let ticks = due.min(self.max_substeps as u64) as u32;
        self.accumulator -= ticks as f64 * self.step;

        if due > ticks as u64 {
            // Too far behind: drop the backlog rather than spiral
            log::warn!("Scheduler dropped {} ticks of backlog", due - ticks as u64);
            self.accumulator %= self.step;
        }

        ticks
    }

    /// Forget pending time (restart, resume from pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
