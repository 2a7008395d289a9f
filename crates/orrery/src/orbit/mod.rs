//! Keplerian orbit math: elements, Kepler's equation, frame rotation and
//! the per-body geometry built from them. f64 throughout.

pub mod body;
pub mod elements;
pub mod kepler;
pub mod mean_motion;
pub mod transform;

/// Immutable 3-vector value type (AU for positions).
pub type Vector3 = glam::DVec3;
