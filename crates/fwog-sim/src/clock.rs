//! Fixed-timestep accumulator.
//!
//! Wall-clock frame time is banked and drained in whole steps, so simulated
//! time only ever advances in multiples of the step no matter how frames are
//! fragmented.

use fwog_core::constants::DT;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    /// Upper bound on a single frame's contribution. `None` lets a long stall
    /// turn into an equally long burst of catch-up steps.
    max_frame_time: Option<f32>,
    steps_taken: u64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DT)
    }
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_frame_time: None,
            steps_taken: 0,
        }
    }

    pub fn with_max_frame_time(mut self, max_frame_time: Option<f32>) -> Self {
        self.max_frame_time = max_frame_time;
        self
    }

    /// Bank one frame's elapsed wall time.
    pub fn accumulate(&mut self, frame_time: f32) {
        let frame_time = match self.max_frame_time {
            Some(max) if frame_time > max => {
                log::debug!("clamping frame time {frame_time:.3}s to {max:.3}s");
                max
            }
            _ => frame_time,
        };
        self.accumulator += frame_time.max(0.0);
    }

    /// Consume one step from the accumulator if a whole step is banked.
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            self.steps_taken += 1;
            true
        } else {
            false
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Total simulated time drained so far.
    pub fn simulated_secs(&self) -> f64 {
        self.steps_taken as f64 * f64::from(self.step)
    }
}
