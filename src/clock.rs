//! Fixed-timestep frame clock
//!
//! Converts variable display-frame deltas into a whole number of
//! simulation ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Largest frame delta accepted (tab switches, debugger pauses)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a timestamp in milliseconds (requestAnimationFrame style) and
    /// get the number of ticks to run this frame
    pub fn advance_to(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);
        self.advance(dt)
    }

    /// Feed a delta in seconds and get the number of ticks to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        // Drop backlog we refused to simulate
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Forget pending time (after a pause or a hidden tab)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_frame_at_60hz() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance_to(0.0), 1);
        let mut total = 0;
        for i in 1..=60 {
            total += clock.advance_to(i as f64 * 1000.0 / 60.0);
        }
        assert!((59..=61).contains(&total), "total {}", total);
    }

    #[test]
    fn test_slow_frames_are_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1.0), MAX_SUBSTEPS);
        // Backlog was dropped, not carried
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(SIM_DT / 2.0), 0);
        assert_eq!(clock.advance(SIM_DT / 2.0 + 0.0001), 1);
        assert_eq!(clock.advance(-5.0), 0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.advance_to(1000.0);
        clock.reset();
        // First frame after reset is treated as one nominal step
        assert_eq!(clock.advance_to(50_000.0), 1);
    }
}
