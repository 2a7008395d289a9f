/// Keplerian elements with secular rates, and their propagation to a date.
///
/// Angles are kept in degrees here, matching the published element tables.
/// Conversion to radians happens in the geometry builder.

use serde::{Deserialize, Serialize};

use crate::error::{ElementError, Result};
use crate::orbit::kepler::normalize_degrees;

/// One element as `value = base + rate · T`, with `T` in Julian centuries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ElementRate {
    /// Value at J2000.0.
    pub base: f64,
    /// Change per Julian century.
    pub rate: f64,
}

impl ElementRate {
    pub const fn new(base: f64, rate: f64) -> Self {
        Self { base, rate }
    }

    /// A value that does not drift.
    pub const fn fixed(base: f64) -> Self {
        Self { base, rate: 0.0 }
    }

    /// Linear extrapolation to `t_centuries`.
    #[inline]
    pub fn at(&self, t_centuries: f64) -> f64 {
        self.base + self.rate * t_centuries
    }

    fn is_finite(&self) -> bool {
        self.base.is_finite() && self.rate.is_finite()
    }
}

impl From<[f64; 2]> for ElementRate {
    fn from([base, rate]: [f64; 2]) -> Self {
        Self { base, rate }
    }
}

impl From<ElementRate> for [f64; 2] {
    fn from(r: ElementRate) -> Self {
        [r.base, r.rate]
    }
}

/// Extra mean-anomaly terms for the outer planets (Standish, Table 2b):
/// `b·T² + c·cos(f·T) + s·sin(f·T)`, with `f·T` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Perturbations {
    #[serde(default)]
    pub b: f64,
    #[serde(default)]
    pub c: f64,
    #[serde(default)]
    pub s: f64,
    #[serde(default)]
    pub f: f64,
}

impl Perturbations {
    /// Correction to the mean anomaly in degrees at `t_centuries`.
    pub fn correction(&self, t_centuries: f64) -> f64 {
        let ft = (self.f * t_centuries).to_radians();
        self.b * t_centuries * t_centuries + self.c * ft.cos() + self.s * ft.sin()
    }
}

/// Validated osculating elements of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis (AU).
    pub a: ElementRate,
    /// Eccentricity.
    pub e: ElementRate,
    /// Inclination (degrees).
    pub i: ElementRate,
    /// Mean longitude (degrees).
    pub l: ElementRate,
    /// Longitude of perihelion (degrees).
    pub w: ElementRate,
    /// Longitude of the ascending node (degrees).
    pub omega: ElementRate,
    pub perturbations: Option<Perturbations>,
}

/// Element values at a specific date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedElements {
    /// Julian centuries since J2000.0 these values belong to.
    pub t: f64,
    pub a: f64,
    pub e: f64,
    /// Inclination (degrees).
    pub i: f64,
    /// Mean longitude (degrees).
    pub l: f64,
    /// Longitude of perihelion (degrees).
    pub w: f64,
    /// Longitude of the ascending node (degrees).
    pub omega: f64,
    /// Mean anomaly in (−180, 180] degrees, perturbations applied.
    pub mean_anomaly: f64,
}

impl ResolvedElements {
    /// Argument of perihelion `w − Ω` (degrees).
    pub fn argument_of_perihelion(&self) -> f64 {
        self.w - self.omega
    }

    /// Semi-minor axis `a·√(1 − e²)`.
    pub fn semi_minor_axis(&self) -> f64 {
        self.a * (1.0 - self.e * self.e).sqrt()
    }
}

impl OrbitalElements {
    /// Build and validate an element set for the body `name`.
    ///
    /// Rejects non-finite values, `e` outside `[0, 1)` and `a ≤ 0` at J2000.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        a: ElementRate,
        e: ElementRate,
        i: ElementRate,
        l: ElementRate,
        w: ElementRate,
        omega: ElementRate,
        perturbations: Option<Perturbations>,
    ) -> Result<Self> {
        let fields = [("a", a), ("e", e), ("I", i), ("L", l), ("w", w), ("omega", omega)];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ElementError::NonFinite { name: name.to_string(), field });
            }
        }
        if let Some(p) = &perturbations {
            if ![p.b, p.c, p.s, p.f].iter().all(|v| v.is_finite()) {
                return Err(ElementError::NonFinite {
                    name: name.to_string(),
                    field: "perturbations",
                });
            }
        }
        if !(0.0..1.0).contains(&e.base) {
            return Err(ElementError::Eccentricity { name: name.to_string(), value: e.base });
        }
        if a.base <= 0.0 {
            return Err(ElementError::SemiMajorAxis { name: name.to_string(), value: a.base });
        }

        Ok(Self { a, e, i, l, w, omega, perturbations })
    }

    /// Resolve every element at `t_centuries` Julian centuries from J2000.
    ///
    /// Linear rates are only meaningful within a few centuries of J2000.
    /// Far outside that range `e` is clamped into `[0, 1)` and `a` kept
    /// positive so the geometry stays a bound ellipse.
    pub fn propagate(&self, t_centuries: f64) -> ResolvedElements {
        let a = self.a.at(t_centuries).max(f64::MIN_POSITIVE);
        let e = self.e.at(t_centuries).clamp(0.0, MAX_ECCENTRICITY);
        let i = self.i.at(t_centuries);
        let l = self.l.at(t_centuries);
        let w = self.w.at(t_centuries);
        let omega = self.omega.at(t_centuries);

        let mut mean_anomaly = l - w;
        if let Some(p) = &self.perturbations {
            mean_anomaly += p.correction(t_centuries);
        }

        ResolvedElements {
            t: t_centuries,
            a,
            e,
            i,
            l,
            w,
            omega,
            mean_anomaly: normalize_degrees(mean_anomaly),
        }
    }
}

/// Largest eccentricity propagation will produce.
const MAX_ECCENTRICITY: f64 = 1.0 - 1e-9;
