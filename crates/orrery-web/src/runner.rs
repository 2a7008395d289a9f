use orrery::core::time;
use orrery::{BodyBuffer, ElementTable, OrreryConfig, SimClock, SolarSystem};

/// Owns the system, its clock and the wire buffer for one page.
///
/// The page holds a single runner in a `thread_local!` (see `lib.rs`) and
/// drives it through free `#[wasm_bindgen]` functions.
pub struct OrreryRunner {
    system: SolarSystem,
    clock: SimClock,
    buffer: BodyBuffer,
}

impl OrreryRunner {
    /// Start paused at `start_ms`, with a first snapshot already computed.
    pub fn new(system: SolarSystem, start_ms: f64) -> Self {
        let buffer = BodyBuffer::with_capacity(system.len());
        let mut runner = Self {
            system,
            clock: SimClock::new(start_ms),
            buffer,
        };
        runner.update(start_ms);
        runner
    }

    /// Runner over a JSON element table.
    pub fn from_json(json: &str, start_ms: f64) -> orrery::Result<Self> {
        let table = ElementTable::from_json(json)?;
        let system = SolarSystem::from_table(&table, OrreryConfig::default())?;
        Ok(Self::new(system, start_ms))
    }

    /// Advance the clock by one real frame delta and refresh the snapshot.
    /// Does nothing while paused.
    pub fn tick(&mut self, frame_dt_ms: f64) {
        if !self.clock.is_running() {
            return;
        }
        let time_ms = self.clock.advance(frame_dt_ms);
        self.refresh(time_ms);
    }

    /// Jump to an absolute simulated time.
    pub fn update(&mut self, time_ms: f64) {
        let jumped = self
            .system
            .last_time_ms()
            .is_some_and(|last| time_ms < last);
        if jumped {
            self.system.reset_history();
        }
        self.clock.set_time_ms(time_ms);
        self.refresh(time_ms);
    }

    fn refresh(&mut self, time_ms: f64) {
        self.system.update(time_ms);
        self.buffer.rebuild(&self.system);
    }

    pub fn run(&mut self) {
        self.clock.run();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn speed_up(&mut self) {
        self.clock.speed_up();
    }

    pub fn slow_down(&mut self) {
        self.clock.slow_down();
    }

    pub fn time_warp(&self) -> f64 {
        self.clock.warp()
    }

    /// Position of the current warp on `SimClock::WARP_FACTORS`.
    pub fn time_warp_index(&self) -> usize {
        self.clock.warp_index()
    }

    pub fn time_ms(&self) -> f64 {
        self.clock.time_ms()
    }

    /// Simulated UTC calendar date as (year, month, day).
    pub fn date(&self) -> (i64, u32, u32) {
        time::calendar_date(self.clock.time_ms())
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn bodies_ptr(&self) -> *const f32 {
        self.buffer.ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.buffer.count()
    }

    pub fn body_name(&self, index: usize) -> Option<&str> {
        self.system.bodies().get(index).map(|b| b.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery::core::time::{J2000_UNIX_MS, MS_PER_DAY};

    fn runner() -> OrreryRunner {
        OrreryRunner::new(SolarSystem::builtin().unwrap(), J2000_UNIX_MS)
    }

    #[test]
    fn starts_paused_with_a_snapshot() {
        let r = runner();
        assert!(!r.is_running());
        assert_eq!(r.body_count(), 9);
        assert_eq!(r.body_name(2), Some("earth"));
        assert_eq!(r.body_name(42), None);
    }

    #[test]
    fn tick_is_ignored_while_paused() {
        let mut r = runner();
        r.tick(16.0);
        assert_eq!(r.time_ms(), J2000_UNIX_MS);
    }

    #[test]
    fn tick_advances_by_warped_delta() {
        let mut r = runner();
        r.run();
        let warp = r.time_warp();
        r.tick(16.0);
        assert_eq!(r.time_ms(), J2000_UNIX_MS + 16.0 * warp);
        assert_eq!(r.system().last_time_ms(), Some(r.time_ms()));
    }

    #[test]
    fn jumping_back_keeps_mean_motion_positive() {
        let mut r = runner();
        r.update(J2000_UNIX_MS + 100.0 * MS_PER_DAY);
        r.update(J2000_UNIX_MS + 10.0 * MS_PER_DAY);
        for body in r.system().bodies() {
            assert!(body.derived().mean_motion > 0.0, "{}", body.name());
        }
    }

    #[test]
    fn bad_table_is_reported() {
        let json = r#"{ "bodies": [ { "name": "x", "a": [-1, 0], "e": [0.1, 0],
            "I": [0, 0], "L": [0, 0], "w": [0, 0], "omega": [0, 0] } ] }"#;
        assert!(OrreryRunner::from_json(json, J2000_UNIX_MS).is_err());
    }

    #[test]
    fn date_follows_the_clock() {
        let mut r = runner();
        assert_eq!(r.date(), (2000, 1, 1));
        r.update(J2000_UNIX_MS + 8845.0 * MS_PER_DAY);
        assert_eq!(r.date(), (2024, 3, 20));
    }

    #[test]
    fn warp_index_tracks_the_ladder() {
        let mut r = runner();
        assert_eq!(r.time_warp_index(), SimClock::DEFAULT_WARP_IDX);
        r.run();
        r.speed_up();
        assert_eq!(r.time_warp_index(), SimClock::DEFAULT_WARP_IDX + 1);
        assert_eq!(r.time_warp(), SimClock::WARP_FACTORS[r.time_warp_index()]);
    }
}
