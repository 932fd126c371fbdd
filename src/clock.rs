//! Fixed timestep driver
//!
//! Fed with display-refresh timestamps; reports when one simulation step is
//! due. At most one step per callback: under load the game slows down
//! instead of bursting several steps.

use crate::consts::STEP_INTERVAL_MS;

#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: f64,
    /// Timestamp the last step is accounted to (None until primed)
    last_ms: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(STEP_INTERVAL_MS)
    }
}

impl FrameClock {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Feed a refresh timestamp; returns true when a step should run
    pub fn advance(&mut self, timestamp_ms: f64) -> bool {
        let last = *self.last_ms.get_or_insert(timestamp_ms);
        let elapsed = timestamp_ms - last;

        if elapsed > self.interval_ms {
            // Keep the remainder so steps do not drift, drop whole extra intervals
            self.last_ms = Some(timestamp_ms - elapsed % self.interval_ms);
            true
        } else {
            false
        }
    }

    /// Forget the last timestamp (e.g. after teardown)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
