/// Simulated clock with a stepped time-warp ladder.
///
/// The host feeds real frame deltas in; the clock scales them by the current
/// warp factor and accumulates absolute simulated time in milliseconds since
/// the Unix epoch. Propagation is closed-form, so any warp is safe.
pub struct SimClock {
    /// Simulated time, ms since Unix epoch.
    time_ms: f64,
    warp_idx: usize,
    running: bool,
}

impl SimClock {
    /// Available warp factors (simulated ms per real ms).
    pub const WARP_FACTORS: [f64; 11] = [
        1.0, 5.0, 10.0, 50.0, 100.0, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8,
    ];
    /// Starts at 1e4: Earth completes an orbit in under an hour of real time.
    pub const DEFAULT_WARP_IDX: usize = 6;

    /// Create a paused clock at `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            time_ms: start_ms,
            warp_idx: Self::DEFAULT_WARP_IDX,
            running: false,
        }
    }

    /// Add one real frame delta. Returns the new simulated time.
    /// Paused clocks do not move.
    pub fn advance(&mut self, frame_dt_ms: f64) -> f64 {
        if self.running && frame_dt_ms > 0.0 {
            self.time_ms += frame_dt_ms * self.warp();
        }
        self.time_ms
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Jump to an absolute simulated time.
    pub fn set_time_ms(&mut self, time_ms: f64) {
        self.time_ms = time_ms;
    }

    /// Current warp factor.
    pub fn warp(&self) -> f64 {
        Self::WARP_FACTORS[self.warp_idx]
    }

    /// Position of the current warp in [`Self::WARP_FACTORS`].
    pub fn warp_index(&self) -> usize {
        self.warp_idx
    }

    /// Step one notch faster. Ignored while paused.
    pub fn speed_up(&mut self) {
        if !self.running {
            return;
        }
        self.warp_idx = (self.warp_idx + 1).min(Self::WARP_FACTORS.len() - 1);
        log::debug!("time warp: x{}", self.warp());
    }

    /// Step one notch slower. Ignored while paused.
    pub fn slow_down(&mut self) {
        if !self.running {
            return;
        }
        self.warp_idx = self.warp_idx.saturating_sub(1);
        log::debug!("time warp: x{}", self.warp());
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn run(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_clock_does_not_advance() {
        let mut clock = SimClock::new(1000.0);
        assert_eq!(clock.advance(16.0), 1000.0);
    }

    #[test]
    fn running_clock_applies_warp() {
        let mut clock = SimClock::new(0.0);
        clock.run();
        let t = clock.advance(10.0);
        assert_eq!(t, 10.0 * 1e4);
    }

    #[test]
    fn warp_is_clamped_at_both_ends() {
        let mut clock = SimClock::new(0.0);
        clock.run();
        for _ in 0..20 {
            clock.speed_up();
        }
        assert_eq!(clock.warp(), 1e8);
        assert_eq!(clock.warp_index(), SimClock::WARP_FACTORS.len() - 1);
        for _ in 0..20 {
            clock.slow_down();
        }
        assert_eq!(clock.warp(), 1.0);
        assert_eq!(clock.warp_index(), 0);
    }

    #[test]
    fn warp_controls_ignored_while_paused() {
        let mut clock = SimClock::new(0.0);
        clock.speed_up();
        assert_eq!(clock.warp(), SimClock::WARP_FACTORS[SimClock::DEFAULT_WARP_IDX]);
    }
}
