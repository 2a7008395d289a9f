/// Orbital-plane → ecliptic rotation.

use crate::orbit::Vector3;

/// Rotate an orbital-plane position into the ecliptic frame.
///
/// Composite of three rotations: argument of perihelion in-plane,
/// inclination about the line of nodes, then longitude of the ascending
/// node about the ecliptic pole. All angles in radians. The input's `z`
/// is ignored, orbital-plane positions lie in z = 0.
pub fn to_ecliptic(
    position: Vector3,
    arg_perihelion: f64,
    node: f64,
    inclination: f64,
) -> Vector3 {
    let (sin_w, cos_w) = arg_perihelion.sin_cos();
    let (sin_o, cos_o) = node.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (x, y) = (position.x, position.y);

    Vector3::new(
        (cos_w * cos_o - sin_w * sin_o * cos_i) * x + (-sin_w * cos_o - cos_w * sin_o * cos_i) * y,
        (cos_w * sin_o + sin_w * cos_o * cos_i) * x + (-sin_w * sin_o + cos_w * cos_o * cos_i) * y,
        (sin_w * sin_i) * x + (cos_w * sin_i) * y,
    )
}
