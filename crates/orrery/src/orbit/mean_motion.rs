/// Smoothed mean-motion estimate from consecutive mean anomalies.

use std::f64::consts::TAU;

use crate::core::moving_average::MovingAverage;

/// Per-body finite-difference state. Owned by a `Body`, touched only by
/// its update.
#[derive(Debug, Clone)]
pub struct MeanMotionEstimator {
    /// (mean anomaly in radians, time in ms) from the previous update.
    last: Option<(f64, f64)>,
    average: MovingAverage,
}

impl MeanMotionEstimator {
    pub fn new(window: usize) -> Self {
        Self {
            last: None,
            average: MovingAverage::new(window),
        }
    }

    /// Record the mean anomaly `m` (radians, in (−π, π]) observed at
    /// `time_ms` and return the smoothed mean motion in rad/s.
    ///
    /// `analytic` (√(u/a³)) seeds the window on the first call and stands
    /// in whenever the clock did not move forward.
    pub fn sample(&mut self, m: f64, time_ms: f64, analytic: f64) -> f64 {
        let raw = match self.last {
            Some((last_m, last_ms)) if time_ms > last_ms => {
                let elapsed = (time_ms - last_ms) / 1000.0;
                let mut delta = m - last_m;
                // Crossed the ±π seam going forward.
                if m < 0.0 && last_m >= 0.0 {
                    delta += TAU;
                }
                delta / elapsed
            }
            _ => analytic,
        };

        self.average.push(raw);
        self.last = Some((m, time_ms));
        self.average.average()
    }

    /// Forget history, e.g. after the clock jumps.
    pub fn reset(&mut self) {
        self.last = None;
        self.average.clear();
    }
}
