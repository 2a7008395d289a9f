/// Tuning for the Newton–Raphson Kepler solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence threshold on |ΔE|, in degrees (default: 1e-5).
    pub tolerance: f64,
    /// Hard iteration cap (default: 10).
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iterations: 10,
        }
    }
}

/// Configuration for a solar system, provided at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrreryConfig {
    /// Kepler solver settings shared by every body.
    pub solver: SolverConfig,
    /// Number of mean-motion samples averaged per body (default: 5).
    pub average_window: usize,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            average_window: 5,
        }
    }
}
