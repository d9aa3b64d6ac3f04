//! Fixed-step runtime
//!
//! The simulation advances in whole ticks at a fixed rate regardless of the
//! display's refresh rate. `FrameClock` turns variable frame times into a
//! number of ticks to run this frame.

/// Accumulates frame time and hands out fixed ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_seconds: f64,
    accumulator: f64,
    /// After a long stall, run at most this many ticks in one frame and drop
    /// the rest instead of spiralling.
    max_ticks_per_frame: u32,
}

impl FrameClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            tick_seconds: 1.0 / ticks_per_second.max(1) as f64,
            accumulator: 0.0,
            max_ticks_per_frame: 5,
        }
    }

    pub fn with_max_ticks(mut self, max: u32) -> Self {
        self.max_ticks_per_frame = max.max(1);
        self
    }

    /// Feed one frame's elapsed wall time; returns how many ticks to run.
    pub fn advance(&mut self, frame_seconds: f64) -> u32 {
        if frame_seconds.is_finite() && frame_seconds > 0.0 {
            self.accumulator += frame_seconds;
        }

        let mut ticks = 0;
        while self.accumulator >= self.tick_seconds && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.tick_seconds;
            ticks += 1;
        }

        if ticks == self.max_ticks_per_frame && self.accumulator >= self.tick_seconds {
            tracing::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        ticks
    }

    /// Forget any partial tick (after pausing or switching screens)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn tick_seconds(&self) -> f64 {
        self.tick_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FrameClock::new(60);

        // Two half-tick frames make one tick
        let half = clock.tick_seconds() / 2.0 + 1e-9;
        assert_eq!(clock.advance(half), 0);
        assert_eq!(clock.advance(half), 1);
    }

    #[test]
    fn test_one_tick_per_60hz_frame() {
        let mut clock = FrameClock::new(60);
        let total: u32 = (0..60).map(|_| clock.advance(1.0 / 60.0 + 1e-9)).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut clock = FrameClock::new(60).with_max_ticks(4);
        assert_eq!(clock.advance(2.0), 4);
        // Backlog was dropped
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_bad_frame_times_ignored() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f64::NAN), 0);

        clock.advance(clock.tick_seconds() * 0.9);
        clock.reset();
        assert_eq!(clock.advance(clock.tick_seconds() * 0.2), 0);
    }
}
