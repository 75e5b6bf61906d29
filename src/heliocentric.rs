//! # Orbital plane → heliocentric scene coordinates
//!
//! Maps a point of an ellipse, given by its eccentric anomaly, to heliocentric Cartesian
//! coordinates in the **scene frame** used by the renderer.
//!
//! ## Frames
//!
//! The classical rotation `R_z(Ω)·R_x(I)·R_z(ω)` yields ecliptic coordinates
//! `(X_ecl, Y_ecl, Z_ecl)` with `Z_ecl` toward the north ecliptic pole. The scene is
//! **Y-up**, and the axes are permuted as
//!
//! ```text
//! scene.x = Y_ecl     scene.y = Z_ecl     scene.z = X_ecl
//! ```
//!
//! so the ecliptic plane is the scene's horizontal `xz` plane. [`to_heliocentric`]
//! writes the composition out in closed form; [`ecliptic_to_scene`] and
//! [`scene_to_ecliptic`] expose the permutation for callers working in the ecliptic frame.

use nalgebra::Vector3;

use crate::constants::{Radian, SceneUnit};

/// Position in the orbital plane, perihelion along `+x`.
///
/// Return
/// ------
/// * `(a(cos E − e), a·√(1 − e²)·sin E)`
#[inline]
pub fn orbital_plane_position(
    semi_major_axis: SceneUnit,
    eccentricity: f64,
    eccentric_anomaly: Radian,
) -> (f64, f64) {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    (
        semi_major_axis * (cos_e - eccentricity),
        semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt() * sin_e,
    )
}

/// Heliocentric scene-frame position of a point on an ellipse.
///
/// Arguments
/// ---------
/// * `semi_major_axis`: `a`, scene units.
/// * `eccentricity`: `e ∈ [0, 1)`.
/// * `inclination`: `I`, radians.
/// * `argument_of_perihelion`: `ω`, radians.
/// * `longitude_of_node`: `Ω`, radians.
/// * `eccentric_anomaly`: `E`, radians.
///
/// Return
/// ------
/// * `(x, y, z)` with, for `r` the focal distance and `v` the true anomaly,
///   - `z = r(cos Ω cos(v+ω) − sin Ω sin(v+ω) cos I)`
///   - `y = r sin(v+ω) sin I`
///   - `x = r(sin Ω cos(v+ω) + cos Ω sin(v+ω) cos I)`
pub fn to_heliocentric(
    semi_major_axis: SceneUnit,
    eccentricity: f64,
    inclination: Radian,
    argument_of_perihelion: Radian,
    longitude_of_node: Radian,
    eccentric_anomaly: Radian,
) -> Vector3<f64> {
    let (x_op, y_op) = orbital_plane_position(semi_major_axis, eccentricity, eccentric_anomaly);

    let r = (x_op * x_op + y_op * y_op).sqrt();
    let v = y_op.atan2(x_op);

    let (sin_u, cos_u) = (v + argument_of_perihelion).sin_cos();
    let (sin_node, cos_node) = longitude_of_node.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();

    Vector3::new(
        r * (sin_node * cos_u + cos_node * sin_u * cos_i),
        r * sin_u * sin_i,
        r * (cos_node * cos_u - sin_node * sin_u * cos_i),
    )
}

/// Ecliptic `(X, Y, Z)` → scene `(Y, Z, X)`.
#[inline]
pub fn ecliptic_to_scene(ecliptic: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(ecliptic.y, ecliptic.z, ecliptic.x)
}

/// Scene `(x, y, z)` → ecliptic `(z, x, y)`.
#[inline]
pub fn scene_to_ecliptic(scene: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(scene.z, scene.x, scene.y)
}
