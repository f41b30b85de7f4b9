/// Fixed-step frame clock.
/// Turns variable host frame times into a whole number of simulation ticks.
pub struct FrameClock {
    /// Seconds per tick.
    dt: f32,
    accumulator: f32,
    /// Upper bound on ticks run for one host frame (avoids the spiral of death
    /// after a long stall, e.g. a backgrounded tab).
    max_steps: u32,
    /// Ticks run since creation or the last reset.
    ticks: u64,
}

impl FrameClock {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
            ticks: 0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of ticks to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        // Small slack so an exact multiple of dt is not lost to rounding.
        let steps = ((self.accumulator / self.dt) + 1e-4) as u32;
        let steps = steps.min(self.max_steps);
        self.accumulator = (self.accumulator - steps as f32 * self.dt).max(0.0);
        self.ticks += steps as u64;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.dt).clamp(0.0, 1.0)
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.accumulate(1.0 / 60.0), 1);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.accumulate(0.008), 0);
        assert_eq!(clock.accumulate(0.010), 1);
    }

    #[test]
    fn caps_catch_up() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.accumulate(1.0), 10);
        let mut small = FrameClock::new(1.0 / 60.0, 3);
        assert_eq!(small.accumulate(1.0), 3);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.accumulate(-5.0), 0);
        assert_eq!(clock.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        clock.accumulate(0.008);
        let a = clock.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {}", a);
    }
}
