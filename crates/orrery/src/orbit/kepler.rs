/// Kepler's equation, solved by Newton–Raphson in degrees.
///
/// `M = E − e*·sin(E)` with `e* = (180/π)·e`, so that every angle stays in
/// degrees through the iteration.

use crate::api::config::SolverConfig;

/// Outcome of one Kepler solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly in degrees (last iterate if not converged).
    pub eccentric_anomaly: f64,
    /// Newton steps taken.
    pub iterations: u32,
    /// Whether |ΔE| dropped below the tolerance before the cap.
    pub converged: bool,
}

/// Wrap an angle in degrees into (−180, 180].
pub fn normalize_degrees(angle: f64) -> f64 {
    let mut m = angle % 360.0;
    if m > 180.0 {
        m -= 360.0;
    } else if m <= -180.0 {
        m += 360.0;
    }
    m
}

/// Solve for the eccentric anomaly (degrees) given `e` and `M` in degrees.
///
/// Never loops past `config.max_iterations`. A solve that hits the cap
/// still returns its last iterate with `converged == false`; the caller
/// decides how loudly to report it.
pub fn solve_eccentric_anomaly(
    eccentricity: f64,
    mean_anomaly: f64,
    config: &SolverConfig,
) -> KeplerSolution {
    let e_star = eccentricity.to_degrees();
    let mut ea = mean_anomaly + e_star * mean_anomaly.to_radians().sin();

    let mut iterations = 0;
    while iterations < config.max_iterations {
        let delta_m = mean_anomaly - (ea - e_star * ea.to_radians().sin());
        let delta_e = delta_m / (1.0 - eccentricity * ea.to_radians().cos());
        ea += delta_e;
        iterations += 1;
        if delta_e.abs() < config.tolerance {
            return KeplerSolution { eccentric_anomaly: ea, iterations, converged: true };
        }
    }

    KeplerSolution { eccentric_anomaly: ea, iterations, converged: false }
}

/// True anomaly (radians) from the eccentric anomaly (degrees).
///
/// `acos` only covers [0, π]; the sign of `E` picks the branch.
pub fn true_anomaly(eccentricity: f64, eccentric_anomaly: f64) -> f64 {
    let cos_e = eccentric_anomaly.to_radians().cos();
    let cos_nu = ((cos_e - eccentricity) / (1.0 - eccentricity * cos_e)).clamp(-1.0, 1.0);
    sign(eccentric_anomaly) * cos_nu.acos()
}

/// `Math.sign` semantics: zero maps to zero.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
