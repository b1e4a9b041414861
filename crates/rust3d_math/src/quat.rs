//! Quaternion rotations in 3D
//!
//! A unit quaternion `q = w + xi + yj + zk` represents a rotation of
//! `angle` radians about a unit axis `a` as
//! `w = cos(angle / 2)`, `(x, y, z) = sin(angle / 2) * a`.
//! Composition follows the matrix convention: `a * b` rotates by `b`
//! first, then by `a`.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::{scalar, Mat3, Mat4, MathError, Vec3};

/// Quaternion with scalar part `w` and vector part `(x, y, z)`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    /// Scalar component
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity rotation
    pub const IDENTITY: Self = Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    /// Create a quaternion from its components
    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle` radians about a unit `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        debug_assert!(axis.is_normalized(), "rotation axis must be unit length");
        let (sin_h, cos_h) = (angle * 0.5).sin_cos();
        Self::new(cos_h, axis.x * sin_h, axis.y * sin_h, axis.z * sin_h)
    }

    /// Axis and angle of a unit quaternion
    ///
    /// The identity rotation has no meaningful axis and reports `Vec3::X`.
    pub fn to_axis_angle(&self) -> (Vec3, f32) {
        let w = self.w.clamp(-1.0, 1.0);
        let angle = 2.0 * w.acos();
        let s = (1.0 - w * w).sqrt();
        if s < scalar::EPSILON {
            (Vec3::X, angle)
        } else {
            (self.vector() / s, angle)
        }
    }

    /// Vector part
    #[inline]
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// 4D dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Squared magnitude
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Magnitude
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// True when the magnitude is close to one
    #[inline]
    pub fn is_normalized(&self) -> bool {
        (self.length_squared() - 1.0).abs() < 1e-4
    }

    /// Normalize to unit magnitude
    ///
    /// Normalizing the zero quaternion is a precondition violation.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        debug_assert!(len > 0.0, "normalizing a zero quaternion");
        *self * (1.0 / len)
    }

    /// Normalize, reporting the zero quaternion as an error
    pub fn try_normalize(&self) -> Result<Self, MathError> {
        let len = self.length();
        if len > scalar::EPSILON {
            Ok(*self * (1.0 / len))
        } else {
            Err(MathError::ZeroLength)
        }
    }

    /// Conjugate (inverse rotation for unit quaternions)
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse
    pub fn inverse(&self) -> Self {
        let len_sq = self.length_squared();
        debug_assert!(len_sq > 0.0, "inverting a zero quaternion");
        self.conjugate() * (1.0 / len_sq)
    }

    /// Rotate a vector by a unit quaternion
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // v + 2w(q x v) + 2q x (q x v)
        let q = self.vector();
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Equivalent rotation matrix
    pub fn to_mat3(&self) -> Mat3 {
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Mat3::new([
            1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy),
            2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx),
            2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy),
        ])
    }

    /// Equivalent affine rotation matrix
    #[inline]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_mat3(&self.to_mat3())
    }

    /// Quaternion of a rotation matrix
    ///
    /// Only meaningful when `m` is a pure rotation.
    pub fn from_mat3(m: &Mat3) -> Self {
        let a = |r, c| m.get(r, c);
        let trace = a(1, 1) + a(2, 2) + a(3, 3);
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(0.25 * s, (a(3, 2) - a(2, 3)) / s, (a(1, 3) - a(3, 1)) / s, (a(2, 1) - a(1, 2)) / s)
        } else if a(1, 1) > a(2, 2) && a(1, 1) > a(3, 3) {
            let s = (1.0 + a(1, 1) - a(2, 2) - a(3, 3)).sqrt() * 2.0;
            Self::new((a(3, 2) - a(2, 3)) / s, 0.25 * s, (a(1, 2) + a(2, 1)) / s, (a(1, 3) + a(3, 1)) / s)
        } else if a(2, 2) > a(3, 3) {
            let s = (1.0 + a(2, 2) - a(1, 1) - a(3, 3)).sqrt() * 2.0;
            Self::new((a(1, 3) - a(3, 1)) / s, (a(1, 2) + a(2, 1)) / s, 0.25 * s, (a(2, 3) + a(3, 2)) / s)
        } else {
            let s = (1.0 + a(3, 3) - a(1, 1) - a(2, 2)).sqrt() * 2.0;
            Self::new((a(2, 1) - a(1, 2)) / s, (a(1, 3) + a(3, 1)) / s, (a(2, 3) + a(3, 2)) / s, 0.25 * s)
        };
        q.normalize()
    }

    /// Spherical linear interpolation along the shorter arc
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        let mut end = *other;
        let mut cos_theta = self.dot(other);
        if cos_theta < 0.0 {
            end = end * -1.0;
            cos_theta = -cos_theta;
        }

        // Nearly parallel: fall back to normalized lerp
        if cos_theta > 0.9995 {
            return (*self * (1.0 - t) + end * t).normalize();
        }

        let theta = cos_theta.acos();
        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;
        *self * a + end * b
    }

    /// Compare component-wise within `epsilon`
    pub fn approx_eq_eps(&self, other: &Self, epsilon: f32) -> bool {
        scalar::approx_eq_eps(self.w, other.w, epsilon)
            && scalar::approx_eq_eps(self.x, other.x, epsilon)
            && scalar::approx_eq_eps(self.y, other.y, epsilon)
            && scalar::approx_eq_eps(self.z, other.z, epsilon)
    }
}

/// Hamilton product: `a * b` rotates by `b` first, then by `a`
impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, q: Self) -> Self {
        Self::new(
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y - self.x * q.z + self.y * q.w + self.z * q.x,
            self.w * q.z + self.x * q.y - self.y * q.x + self.z * q.w,
        )
    }
}

impl std::ops::Mul<f32> for Quat {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f32) -> Self {
        Self::new(self.w * factor, self.x * factor, self.y * factor, self.z * factor)
    }
}

impl std::ops::Add for Quat {
    type Output = Self;

    #[inline]
    fn add(self, q: Self) -> Self {
        Self::new(self.w + q.w, self.x + q.x, self.y + q.y, self.z + q.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(Quat::IDENTITY.rotate(v), v));
    }

    #[test]
    fn test_rotate_90_about_z() {
        let q = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
        assert!(vec_approx_eq(q.rotate(Vec3::X), Vec3::Y));
        assert!(vec_approx_eq(q.rotate(Vec3::Y), -Vec3::X));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, -2.0, 0.5).normalized(), 2.3);
        let v = Vec3::new(3.0, -4.0, 12.0);
        assert!((q.rotate(v).length() - v.length()).abs() < EPSILON);
    }

    #[test]
    fn test_matches_matrix() {
        let axis = Vec3::new(1.0, 1.0, 0.0).normalized();
        let q = Quat::from_axis_angle(axis, 0.9);
        let m = Mat3::rotation_axis(axis, 0.9);
        assert!(q.to_mat3().approx_eq_eps(&m, EPSILON));
        let v = Vec3::new(0.3, -1.0, 2.0);
        assert!(vec_approx_eq(q.rotate(v), m * v));
    }

    #[test]
    fn test_from_mat3_roundtrip() {
        // angles large enough to hit the non-trace branches
        for (axis, angle) in [(Vec3::X, 3.0), (Vec3::Y, PI * 0.9), (Vec3::Z, 2.8), (Vec3::X, 0.2)] {
            let q = Quat::from_axis_angle(axis, angle);
            let back = Quat::from_mat3(&q.to_mat3());
            // q and -q are the same rotation
            assert!(back.approx_eq_eps(&q, EPSILON) || back.approx_eq_eps(&(q * -1.0), EPSILON));
        }
    }

    #[test]
    fn test_composition_order() {
        let a = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let b = Quat::from_axis_angle(Vec3::X, FRAC_PI_2);
        let v = Vec3::Y;
        assert!(vec_approx_eq((a * b).rotate(v), a.rotate(b.rotate(v))));
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let q = Quat::from_axis_angle(Vec3::Y, 1.2);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(q.inverse().rotate(q.rotate(v)), v));
        assert!((q * q.conjugate()).approx_eq_eps(&Quat::IDENTITY, EPSILON));
    }

    #[test]
    fn test_axis_angle_roundtrip() {
        let axis = Vec3::new(0.0, 0.6, 0.8);
        let (out_axis, angle) = Quat::from_axis_angle(axis, 1.0).to_axis_angle();
        assert!(vec_approx_eq(out_axis, axis));
        assert!((angle - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_slerp_endpoints_and_midpoint() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
        assert!(a.slerp(&b, 0.0).approx_eq_eps(&a, EPSILON));
        assert!(a.slerp(&b, 1.0).approx_eq_eps(&b, EPSILON));
        let mid = a.slerp(&b, 0.5);
        assert!(mid.approx_eq_eps(&Quat::from_axis_angle(Vec3::Z, FRAC_PI_2 * 0.5), EPSILON));
    }

    #[test]
    fn test_try_normalize_zero() {
        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).try_normalize(), Err(MathError::ZeroLength));
    }
}
