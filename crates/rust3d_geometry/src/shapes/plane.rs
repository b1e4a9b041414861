use rust3d_math::{Vec3, Vec4};
use serde::{Serialize, Deserialize};

/// Plane in `normal · p + offset = 0` form
///
/// Points with a positive signed distance lie on the side the normal
/// points to. Culling treats the negative side as "outside".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal pointing to the positive side
    pub normal: Vec3,
    /// Signed offset (the `D` in `Ax + By + Cz + D = 0`)
    pub offset: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self { normal: Vec3::Y, offset: 0.0 }
    }
}

impl Plane {
    /// Create a plane from a unit normal and offset
    pub fn new(normal: Vec3, offset: f32) -> Self {
        debug_assert!(normal.is_normalized(), "plane normal must be unit length");
        Self { normal, offset }
    }

    /// Plane through `point` with the given unit normal
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self::new(normal, -normal.dot(point))
    }

    /// Plane through three points, normal following counter-clockwise winding
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self::from_point_normal(a, Vec3::normal_of(a, b, c))
    }

    /// Plane from raw `(A, B, C, D)` coefficients, rescaled so the normal
    /// is unit length
    ///
    /// `(A, B, C)` must not be zero.
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.xyz();
        let len = normal.length();
        debug_assert!(len > 0.0, "plane coefficients with a zero normal");
        Self { normal: normal / len, offset: coefficients.w / len }
    }

    /// Coefficients `(A, B, C, D)`
    #[inline]
    pub fn to_vec4(&self) -> Vec4 {
        Vec4::new(self.normal.x, self.normal.y, self.normal.z, self.offset)
    }

    /// Signed distance from a point to the plane
    ///
    /// Positive = on the normal side
    /// Negative = behind the plane
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }

    /// Project a point onto the plane
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Check if a point is strictly on the positive side
    #[inline]
    pub fn is_above(&self, point: Vec3) -> bool {
        self.signed_distance(point) > 0.0
    }

    /// Same plane with the opposite orientation
    #[inline]
    pub fn flipped(&self) -> Self {
        Self { normal: -self.normal, offset: -self.offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_distance() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert_eq!(plane.offset, -2.0);
        assert_eq!(plane.signed_distance(Vec3::new(5.0, 5.0, 1.0)), 3.0);
        assert_eq!(plane.signed_distance(Vec3::ZERO), -2.0);
        assert!(!plane.is_above(Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(plane.flipped().signed_distance(Vec3::ZERO), 2.0);
    }

    #[test]
    fn test_from_points_winding() {
        let plane = Plane::from_points(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(plane.normal.approx_eq(Vec3::Z));
        assert_eq!(plane.offset, 0.0);
    }

    #[test]
    fn test_from_coefficients_normalizes() {
        let plane = Plane::from_coefficients(Vec4::new(0.0, 0.0, 2.0, -4.0));
        assert_eq!(plane.normal, Vec3::Z);
        assert_eq!(plane.offset, -2.0);
        assert_eq!(plane.to_vec4(), Vec4::new(0.0, 0.0, 1.0, -2.0));
    }

    #[test]
    fn test_project_point() {
        let plane = Plane::new(Vec3::Z, -1.0);
        assert_eq!(plane.project_point(Vec3::new(3.0, 4.0, 7.0)), Vec3::new(3.0, 4.0, 1.0));
    }
}
