//! Math type aliases and helper functions.
//!
//! Transforms use `f64` like the rest of the kinematics code; vertex and
//! color data use `f32`.

pub use nalgebra;

/// 3D vector (f64). Translations, scales, primitive sizes.
pub type Vec3 = nalgebra::Vector3<f64>;

/// 3D vector (f32). Mesh vertices and colors.
pub type Vec3f = nalgebra::Vector3<f32>;

/// 3D rotation matrix (f64).
pub type Rotation = nalgebra::Rotation3<f64>;

// ===== Helper functions =====

/// Convert radians to degrees.
pub fn degree(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Convert degrees to radians.
pub fn radian(deg: f64) -> f64 {
    deg.to_radians()
}

/// Decompose a rotation into a unit axis and an angle in `[0, π]`.
///
/// The identity rotation yields an angle of exactly `0.0` with the `+X`
/// axis, so callers can test the angle against zero without a tolerance.
pub fn angle_axis(rotation: &Rotation) -> (Vec3, f64) {
    let q = nalgebra::UnitQuaternion::from_rotation_matrix(rotation);
    let angle = q.angle();
    if angle == 0.0 {
        return (Vec3::x(), 0.0);
    }
    let axis = q.axis().map(|a| a.into_inner()).unwrap_or_else(Vec3::x);
    (axis, angle)
}

/// Build a rotation from an axis (normalized here) and an angle in radians.
pub fn rotation_from_angle_axis(axis: Vec3, angle: f64) -> Rotation {
    match nalgebra::Unit::try_new(axis, f64::EPSILON) {
        Some(axis) => Rotation::from_axis_angle(&axis, angle),
        None => Rotation::identity(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn degree_radian_roundtrip() {
        assert!((degree(PI) - 180.0).abs() < 1e-12);
        assert!((radian(90.0) - FRAC_PI_2).abs() < 1e-12);
        assert!((radian(degree(0.3)) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn identity_has_exact_zero_angle() {
        let (axis, angle) = angle_axis(&Rotation::identity());
        assert_eq!(angle, 0.0);
        assert_eq!(axis, Vec3::x());
    }

    #[test]
    fn quarter_turn_about_z() {
        let r = rotation_from_angle_axis(Vec3::z(), FRAC_PI_2);
        let (axis, angle) = angle_axis(&r);
        assert!((angle - FRAC_PI_2).abs() < 1e-9);
        assert!((axis - Vec3::z()).norm() < 1e-9);
    }

    #[test]
    fn half_turn_keeps_axis() {
        let r = rotation_from_angle_axis(Vec3::y(), PI);
        let (axis, angle) = angle_axis(&r);
        assert!((angle - PI).abs() < 1e-9);
        assert!((axis.abs() - Vec3::y()).norm() < 1e-9);
    }

    #[test]
    fn degenerate_axis_is_identity() {
        let r = rotation_from_angle_axis(Vec3::zeros(), 1.0);
        assert_eq!(r, Rotation::identity());
    }
}
