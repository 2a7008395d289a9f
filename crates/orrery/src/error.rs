//! Errors raised while building bodies from element data.

use thiserror::Error;

/// Result type for element validation and table loading.
pub type Result<T> = std::result::Result<T, ElementError>;

/// Element data that the solver cannot work with.
///
/// Every variant is a construction-time rejection. Once a body exists its
/// updates never fail.
#[derive(Error, Debug)]
pub enum ElementError {
    #[error("{name}: eccentricity {value} is outside [0, 1) (only bound ellipses are supported)")]
    Eccentricity { name: String, value: f64 },

    #[error("{name}: semi-major axis {value} must be positive")]
    SemiMajorAxis { name: String, value: f64 },

    #[error("{name}: gravitational parameter {value} must be positive")]
    GravitationalParameter { name: String, value: f64 },

    #[error("{name}: element `{field}` is not a finite number")]
    NonFinite { name: String, field: &'static str },

    #[error("element table JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
