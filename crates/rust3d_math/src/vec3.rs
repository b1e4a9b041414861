//! 3D Vector type

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::{scalar, MathError};

/// 3D Vector with x, y, z components
///
/// Used both as a point and as a free vector; the distinction is up to the
/// caller and is not tracked by the type.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a new Vec3
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all components set to `value`
    #[inline]
    pub const fn splat(value: f32) -> Self {
        Self { x: value, y: value, z: value }
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (right-handed)
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (faster than length)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude)
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared distance between two points
    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Distance between two points
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Normalize to unit length
    ///
    /// Normalizing a zero vector is a precondition violation.
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        debug_assert!(len > 0.0, "normalizing a zero length Vec3");
        self / len
    }

    /// Normalize to unit length, reporting zero length vectors as an error
    pub fn try_normalized(self) -> Result<Self, MathError> {
        let len = self.length();
        if len > scalar::EPSILON {
            Ok(self / len)
        } else {
            Err(MathError::ZeroLength)
        }
    }

    /// Check whether the vector has unit length (within epsilon)
    #[inline]
    pub fn is_normalized(self) -> bool {
        (self.length_squared() - 1.0).abs() <= 4.0 * scalar::EPSILON.sqrt()
    }

    /// Unit normal of the triangle `a, b, c` (counter-clockwise winding)
    ///
    /// The triangle must not be degenerate.
    pub fn normal_of(a: Self, b: Self, c: Self) -> Self {
        (b - a).cross(c - a).normalized()
    }

    /// Build two unit vectors that together with `self` form a
    /// right-handed orthonormal basis
    ///
    /// `self` must be unit length.
    pub fn orthonormal_basis(self) -> (Self, Self) {
        debug_assert!(self.is_normalized(), "orthonormal_basis needs a unit vector");
        let u = if self.x.abs() >= self.y.abs() {
            let inv_len = scalar::inv_sqrt(self.x * self.x + self.z * self.z);
            Self::new(-self.z * inv_len, 0.0, self.x * inv_len)
        } else {
            let inv_len = scalar::inv_sqrt(self.y * self.y + self.z * self.z);
            Self::new(0.0, self.z * inv_len, -self.y * inv_len)
        };
        let v = self.cross(u);
        (u, v)
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }

    /// Component-wise minimum
    #[inline]
    pub fn min_components(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max_components(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Clamp each component between corresponding min and max values
    #[inline]
    pub fn clamp_components(self, min: Self, max: Self) -> Self {
        Self::new(
            self.x.clamp(min.x, max.x),
            self.y.clamp(min.y, max.y),
            self.z.clamp(min.z, max.z),
        )
    }

    /// Component-wise absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Components as an array
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Compare two vectors component-wise within [`scalar::EPSILON`]
    #[inline]
    pub fn approx_eq(self, other: Self) -> bool {
        scalar::approx_eq(self.x, other.x)
            && scalar::approx_eq(self.y, other.y)
            && scalar::approx_eq(self.z, other.z)
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f32; 3] {
    #[inline]
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

// Operator overloads

impl std::ops::Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Mul<Vec3> for f32 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

impl std::ops::MulAssign<f32> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl std::ops::Div<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::DivAssign<f32> for Vec3 {
    #[inline]
    fn div_assign(&mut self, scalar: f32) {
        self.x /= scalar;
        self.y /= scalar;
        self.z /= scalar;
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        // 4 + 10 + 18
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_cross_right_handed() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_length() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
    }

    #[test]
    fn test_normalized() {
        let n = Vec3::new(0.0, 0.0, 7.0).normalized();
        assert!(n.approx_eq(Vec3::Z));
        assert!(n.is_normalized());
    }

    #[test]
    fn test_try_normalized_zero() {
        assert_eq!(Vec3::ZERO.try_normalized(), Err(MathError::ZeroLength));
        assert!(Vec3::X.try_normalized().is_ok());
    }

    #[test]
    fn test_normal_of() {
        let n = Vec3::normal_of(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(n.approx_eq(Vec3::Z));
    }

    #[test]
    fn test_orthonormal_basis() {
        for dir in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, 2.0, -3.0).normalized()] {
            let (u, v) = dir.orthonormal_basis();
            assert!(u.dot(dir).abs() < 0.0001);
            assert!(v.dot(dir).abs() < 0.0001);
            assert!(u.dot(v).abs() < 0.0001);
            assert!((u.length() - 1.0).abs() < 0.0001);
            assert!((v.length() - 1.0).abs() < 0.0001);
            // right-handed: dir x u = v
            assert!((dir.cross(u) - v).length() < 0.0001);
        }
    }

    #[test]
    fn test_min_max_clamp() {
        let a = Vec3::new(1.0, 5.0, -2.0);
        let b = Vec3::new(3.0, 2.0, 4.0);
        assert_eq!(a.min_components(b), Vec3::new(1.0, 2.0, -2.0));
        assert_eq!(a.max_components(b), Vec3::new(3.0, 5.0, 4.0));
        assert_eq!(
            Vec3::new(-1.0, 5.0, 0.5).clamp_components(Vec3::ZERO, Vec3::ONE),
            Vec3::new(0.0, 1.0, 0.5)
        );
    }

    #[test]
    fn test_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(a + a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a - a, Vec3::ZERO);
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!((a * 2.0) / 2.0, a);
    }

    #[test]
    fn test_lerp() {
        let mid = Vec3::ZERO.lerp(Vec3::new(10.0, 10.0, 10.0), 0.5);
        assert_eq!(mid, Vec3::splat(5.0));
    }
}
