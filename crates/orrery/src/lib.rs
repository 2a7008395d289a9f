pub mod api;
pub mod assets;
pub mod bridge;
pub mod core;
pub mod error;
pub mod orbit;

// Re-export key types at crate root for convenience
pub use api::config::{OrreryConfig, SolverConfig};
pub use assets::table::{BodyDescriptor, ElementTable, GM_SUN_AU3_S2};
pub use bridge::protocol::{BodyBuffer, BodyInstance, BODY_FLOATS, PROTOCOL_VERSION};
pub use crate::core::clock::SimClock;
pub use crate::core::moving_average::MovingAverage;
pub use crate::core::system::SolarSystem;
pub use error::{ElementError, Result};
pub use orbit::body::{Apsis, Body, Derived, Location};
pub use orbit::elements::{ElementRate, OrbitalElements, Perturbations, ResolvedElements};
pub use orbit::kepler::{solve_eccentric_anomaly, true_anomaly, KeplerSolution};
pub use orbit::transform::to_ecliptic;
pub use orbit::Vector3;
