use crate::api::config::OrreryConfig;
use crate::assets::table::ElementTable;
use crate::error::Result;
use crate::orbit::body::Body;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// All bodies of one system, updated together once per tick.
///
/// Bodies never read each other's state, so update order carries no
/// meaning and the `parallel` feature may update them concurrently.
pub struct SolarSystem {
    bodies: Vec<Body>,
    config: OrreryConfig,
    /// Time of the last update, ms since Unix epoch.
    last_time_ms: Option<f64>,
}

impl SolarSystem {
    /// Build from a table, validating every body up front.
    pub fn from_table(table: &ElementTable, config: OrreryConfig) -> Result<Self> {
        let bodies = table.to_bodies(&config)?;
        log::info!("solar system: {} bodies loaded", bodies.len());
        Ok(Self { bodies, config, last_time_ms: None })
    }

    /// The embedded Mercury–Pluto table with default configuration.
    pub fn builtin() -> Result<Self> {
        Self::from_table(&ElementTable::builtin()?, OrreryConfig::default())
    }

    /// Recompute every body's snapshot for `time_ms` (ms since Unix epoch).
    pub fn update(&mut self, time_ms: f64) {
        #[cfg(feature = "parallel")]
        self.bodies.par_iter_mut().for_each(|body| body.update(time_ms));

        #[cfg(not(feature = "parallel"))]
        self.bodies.iter_mut().for_each(|body| body.update(time_ms));

        self.last_time_ms = Some(time_ms);
    }

    /// Forget mean-motion history on every body, e.g. after a time jump.
    pub fn reset_history(&mut self) {
        self.bodies.iter_mut().for_each(Body::reset_history);
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Look a body up by name.
    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name() == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn last_time_ms(&self) -> Option<f64> {
        self.last_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SolverConfig;
    use crate::core::time::{J2000_UNIX_MS, MS_PER_DAY};

    #[test]
    fn builtin_positions_are_near_their_orbits() {
        let mut system = SolarSystem::builtin().unwrap();
        system.update(J2000_UNIX_MS + 8766.0 * MS_PER_DAY);
        for body in system.bodies() {
            let d = body.derived();
            let r = d.position.length();
            assert!(
                r >= d.a * (1.0 - d.e) - 1e-9 && r <= d.a * (1.0 + d.e) + 1e-9,
                "{}: r = {r}, a = {}, e = {}",
                body.name(),
                d.a,
                d.e
            );
            assert!(d.converged, "{} did not converge", body.name());
        }
    }

    #[test]
    fn earth_at_j2000() {
        let mut system = SolarSystem::builtin().unwrap();
        system.update(J2000_UNIX_MS);
        let earth = system.body("earth").unwrap();
        let r = earth.derived().position.length();
        assert!((0.983..=1.017).contains(&r), "Earth distance = {r} AU");
        // Early January: Earth sits near perihelion, at ecliptic longitude ~100°.
        let p = earth.derived().position;
        let lon = p.y.atan2(p.x).to_degrees();
        assert!((lon - 100.0).abs() < 2.0, "longitude = {lon}");
    }

    #[test]
    fn builtin_apsides_match_axis_bounds() {
        let mut system = SolarSystem::builtin().unwrap();
        system.update(J2000_UNIX_MS + 5000.0 * MS_PER_DAY);
        for body in system.bodies() {
            let d = body.derived();
            let peri = d.periapsis.position.length();
            let apo = d.apoapsis.position.length();
            // Elements drift slightly between now and the projected passage.
            assert!((peri - d.a * (1.0 - d.e)).abs() < 1e-3 * d.a, "{}: periapsis {peri}", body.name());
            assert!((apo - d.a * (1.0 + d.e)).abs() < 1e-3 * d.a, "{}: apoapsis {apo}", body.name());
        }
    }

    #[test]
    fn huge_time_warp_steps_stay_finite() {
        let mut system = SolarSystem::builtin().unwrap();
        let mut t = J2000_UNIX_MS;
        for _ in 0..50 {
            // ~1e8 warp on a 16 ms frame
            t += 1.6e9;
            system.update(t);
        }
        for body in system.bodies() {
            let d = body.derived();
            assert!(d.position.is_finite(), "{}", body.name());
            assert!(d.mean_motion.is_finite() && d.mean_motion > 0.0, "{}", body.name());
        }
        assert_eq!(system.last_time_ms(), Some(t));
    }

    #[test]
    fn lookup_by_name() {
        let system = SolarSystem::builtin().unwrap();
        assert_eq!(system.len(), 9);
        assert!(system.body("mars").is_some());
        assert!(system.body("vulcan").is_none());
    }

    #[test]
    fn capped_solver_still_updates_every_body() {
        let config = OrreryConfig {
            solver: SolverConfig { tolerance: 0.0, max_iterations: 3 },
            ..OrreryConfig::default()
        };
        let mut system = SolarSystem::from_table(&ElementTable::builtin().unwrap(), config).unwrap();
        let time_ms = J2000_UNIX_MS + 1200.0 * MS_PER_DAY;
        system.update(time_ms);

        assert_eq!(system.last_time_ms(), Some(time_ms));
        for body in system.bodies() {
            let d = body.derived();
            assert!(!d.converged, "{} reported convergence", body.name());
            assert!(d.t > 0.0, "{} was not updated", body.name());
            assert!(d.position.is_finite(), "{}: {:?}", body.name(), d.position);
            assert!(d.periapsis.position.is_finite() && d.apoapsis.position.is_finite());
        }
    }
}
