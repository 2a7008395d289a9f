/// A body on a Keplerian orbit and the geometry derived from it each update.

use std::f64::consts::{PI, TAU};

use crate::api::config::{OrreryConfig, SolverConfig};
use crate::core::time;
use crate::error::{ElementError, Result};
use crate::orbit::elements::{OrbitalElements, ResolvedElements};
use crate::orbit::kepler::{self, KeplerSolution};
use crate::orbit::mean_motion::MeanMotionEstimator;
use crate::orbit::transform::to_ecliptic;
use crate::orbit::Vector3;

/// Periapsis or apoapsis: where it is and when the body gets there.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Apsis {
    /// Ecliptic position (AU).
    pub position: Vector3,
    /// Projected time of the next passage, ms since Unix epoch.
    pub time_ms: f64,
    /// Whether the Kepler solve at `time_ms` converged.
    pub converged: bool,
}

/// Snapshot of one body at one date. Rebuilt wholesale on every update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Derived {
    /// Julian centuries since J2000.0.
    pub t: f64,
    /// Semi-major axis (AU).
    pub a: f64,
    pub e: f64,
    /// Inclination (radians).
    pub inclination: f64,
    /// Longitude of the ascending node (radians).
    pub node: f64,
    /// Longitude of perihelion (radians).
    pub longitude_of_perihelion: f64,
    /// Argument of perihelion (radians).
    pub arg_perihelion: f64,
    /// Mean anomaly (radians, in (−π, π]).
    pub mean_anomaly: f64,
    /// Eccentric anomaly (radians).
    pub eccentric_anomaly: f64,
    /// True anomaly (radians).
    pub true_anomaly: f64,
    /// Heliocentric ecliptic position (AU).
    pub position: Vector3,
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    /// Center of the orbital ellipse in the ecliptic frame (AU).
    pub center: Vector3,
    pub periapsis: Apsis,
    pub apoapsis: Apsis,
    /// Smoothed mean motion (rad/s), always positive.
    pub mean_motion: f64,
    /// False when the Kepler solve hit its iteration cap this update.
    pub converged: bool,
}

/// Position of a body at a given date, without any history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub elements: ResolvedElements,
    pub solution: KeplerSolution,
    /// True anomaly (radians).
    pub true_anomaly: f64,
    /// Heliocentric position in the orbital plane (AU).
    pub orbital_position: Vector3,
    /// Heliocentric ecliptic position (AU).
    pub position: Vector3,
}

/// A named body with its elements and per-body update state.
#[derive(Debug, Clone)]
pub struct Body {
    name: String,
    elements: OrbitalElements,
    /// Gravitational parameter GM (AU³/s²).
    u: f64,
    solver: SolverConfig,
    mean_motion: MeanMotionEstimator,
    derived: Derived,
}

impl Body {
    pub fn new(name: impl Into<String>, elements: OrbitalElements, u: f64, config: &OrreryConfig) -> Result<Self> {
        let name = name.into();
        if !(u.is_finite() && u > 0.0) {
            return Err(ElementError::GravitationalParameter { name, value: u });
        }
        Ok(Self {
            name,
            elements,
            u,
            solver: config.solver,
            mean_motion: MeanMotionEstimator::new(config.average_window),
            derived: Derived::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    /// Gravitational parameter GM (AU³/s²).
    pub fn u(&self) -> f64 {
        self.u
    }

    /// Latest snapshot. All zeros until the first update.
    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    /// Mean motion √(u/a³) for a semi-major axis in AU (rad/s).
    pub fn analytic_mean_motion(&self, a: f64) -> f64 {
        (self.u / (a * a * a)).sqrt()
    }

    /// Propagate, solve and rotate for `t_centuries`. Pure.
    pub fn locate(&self, t_centuries: f64) -> Location {
        let elements = self.elements.propagate(t_centuries);
        let (a, e) = (elements.a, elements.e);

        let solution = kepler::solve_eccentric_anomaly(e, elements.mean_anomaly, &self.solver);
        let ea = solution.eccentric_anomaly;
        let true_anomaly = kepler::true_anomaly(e, ea);

        let (sin_e, cos_e) = ea.to_radians().sin_cos();
        let orbital_position = Vector3::new(a * (cos_e - e), a * (1.0 - e * e).sqrt() * sin_e, 0.0);
        let position = to_ecliptic(
            orbital_position,
            elements.argument_of_perihelion().to_radians(),
            elements.omega.to_radians(),
            elements.i.to_radians(),
        );

        Location { elements, solution, true_anomaly, orbital_position, position }
    }

    /// Recompute the snapshot for `time_ms` (ms since Unix epoch).
    pub fn update(&mut self, time_ms: f64) {
        let t = time::julian_centuries(time_ms);
        let here = self.locate(t);
        let el = here.elements;

        self.warn_unconverged("position", &here);

        let m = el.mean_anomaly.to_radians();
        let analytic = self.analytic_mean_motion(el.a);
        let smoothed = self.mean_motion.sample(m, time_ms, analytic);
        let n = if smoothed.is_finite() && smoothed > 0.0 { smoothed } else { analytic };

        let (to_periapsis, to_apoapsis) = apsis_delays(m, n);
        let periapsis_ms = time_ms + to_periapsis * 1000.0;
        let apoapsis_ms = time_ms + to_apoapsis * 1000.0;

        let arg_perihelion = el.argument_of_perihelion().to_radians();
        let node = el.omega.to_radians();
        let inclination = el.i.to_radians();

        let center = to_ecliptic(
            Vector3::new(el.a * (1.0 - el.e) - el.a, 0.0, 0.0),
            arg_perihelion,
            node,
            inclination,
        );

        self.derived = Derived {
            t,
            a: el.a,
            e: el.e,
            inclination,
            node,
            longitude_of_perihelion: el.w.to_radians(),
            arg_perihelion,
            mean_anomaly: m,
            eccentric_anomaly: here.solution.eccentric_anomaly.to_radians(),
            true_anomaly: here.true_anomaly,
            position: here.position,
            semi_major_axis: el.a,
            semi_minor_axis: el.semi_minor_axis(),
            center,
            periapsis: self.apsis("periapsis", periapsis_ms),
            apoapsis: self.apsis("apoapsis", apoapsis_ms),
            mean_motion: n,
            converged: here.solution.converged,
        };
    }

    fn apsis(&self, label: &str, time_ms: f64) -> Apsis {
        let loc = self.locate(time::julian_centuries(time_ms));
        self.warn_unconverged(label, &loc);
        Apsis {
            position: loc.position,
            time_ms,
            converged: loc.solution.converged,
        }
    }

    fn warn_unconverged(&self, label: &str, loc: &Location) {
        if !loc.solution.converged {
            log::warn!(
                "{} {}: Kepler solver did not converge after {} iterations (e = {:.6}, M = {:.4}°)",
                self.name,
                label,
                loc.solution.iterations,
                loc.elements.e,
                loc.elements.mean_anomaly,
            );
        }
    }

    /// Drop mean-motion history so the next update reseeds from √(u/a³).
    pub fn reset_history(&mut self) {
        self.mean_motion.reset();
    }
}

/// Seconds until the next periapsis (M = 0) and apoapsis (M = π), given
/// the mean anomaly `m` in (−π, π] and mean motion `n` in rad/s.
pub fn apsis_delays(m: f64, n: f64) -> (f64, f64) {
    if m > 0.0 {
        ((TAU - m) / n, (PI - m) / n)
    } else {
        (-m / n, (PI - m) / n)
    }
}
