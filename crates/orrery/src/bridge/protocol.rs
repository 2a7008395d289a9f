/// Flat body-snapshot layout read by the JavaScript renderer.
/// Must stay in sync with the renderer's `protocol.ts`.
///
/// Layout (all values f32, one record per body, in table order):
/// ```text
/// [ position xyz | center xyz | periapsis xyz | apoapsis xyz
///   | semi-major | semi-minor | inclination | node | arg. perihelion
///   | mean anomaly | true anomaly | mean motion ]
/// ```
///
/// Positions are in AU, angles in radians, mean motion in rad/s.
/// The renderer reads the buffer through `get_bodies_ptr` / `get_body_count`.

use bytemuck::{Pod, Zeroable};

use crate::core::system::SolarSystem;
use crate::orbit::body::Derived;

/// Protocol version reported to the renderer.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per body record (wire format, never changes).
pub const BODY_FLOATS: usize = 20;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub center: [f32; 3],
    pub periapsis: [f32; 3],
    pub apoapsis: [f32; 3],
    pub semi_major_axis: f32,
    pub semi_minor_axis: f32,
    pub inclination: f32,
    pub node: f32,
    pub arg_perihelion: f32,
    pub mean_anomaly: f32,
    pub true_anomaly: f32,
    pub mean_motion: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = BODY_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&Derived> for BodyInstance {
    fn from(d: &Derived) -> Self {
        Self {
            position: d.position.as_vec3().to_array(),
            center: d.center.as_vec3().to_array(),
            periapsis: d.periapsis.position.as_vec3().to_array(),
            apoapsis: d.apoapsis.position.as_vec3().to_array(),
            semi_major_axis: d.semi_major_axis as f32,
            semi_minor_axis: d.semi_minor_axis as f32,
            inclination: d.inclination as f32,
            node: d.node as f32,
            arg_perihelion: d.arg_perihelion as f32,
            mean_anomaly: d.mean_anomaly as f32,
            true_anomaly: d.true_anomaly as f32,
            mean_motion: d.mean_motion as f32,
        }
    }
}

/// One record per body, rebuilt after each update.
pub struct BodyBuffer {
    instances: Vec<BodyInstance>,
}

impl BodyBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Repack every body's current snapshot.
    pub fn rebuild(&mut self, system: &SolarSystem) {
        self.instances.clear();
        self.instances
            .extend(system.bodies().iter().map(|b| BodyInstance::from(b.derived())));
    }

    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    /// The records as one flat f32 slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to record data for direct memory reads from JavaScript.
    pub fn ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for BodyBuffer {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::J2000_UNIX_MS;

    #[test]
    fn body_instance_is_20_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BODY_FLOATS * 4);
        assert_eq!(BodyInstance::STRIDE_BYTES, 80);
    }

    #[test]
    fn rebuild_packs_one_record_per_body() {
        let mut system = SolarSystem::builtin().unwrap();
        system.update(J2000_UNIX_MS);
        let mut buf = BodyBuffer::default();
        buf.rebuild(&system);
        assert_eq!(buf.count() as usize, system.len());
        assert_eq!(buf.as_floats().len(), system.len() * BODY_FLOATS);

        let earth = system.bodies().iter().position(|b| b.name() == "earth").unwrap();
        let floats = &buf.as_floats()[earth * BODY_FLOATS..][..3];
        let p = system.bodies()[earth].derived().position;
        assert!((floats[0] as f64 - p.x).abs() < 1e-6);
        assert!((floats[1] as f64 - p.y).abs() < 1e-6);
        assert!((floats[2] as f64 - p.z).abs() < 1e-6);
    }

    #[test]
    fn rebuild_replaces_previous_records() {
        let mut system = SolarSystem::builtin().unwrap();
        let mut buf = BodyBuffer::default();
        system.update(J2000_UNIX_MS);
        buf.rebuild(&system);
        buf.rebuild(&system);
        assert_eq!(buf.count() as usize, system.len());
    }
}
