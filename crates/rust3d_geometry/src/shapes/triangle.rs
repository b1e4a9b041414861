use rust3d_math::Vec3;
use serde::{Serialize, Deserialize};

/// Triangle with vertices stored as one array
///
/// `v0()`, `v1()` and `v2()` are views over `vertices`; there is no
/// separate named storage to keep in sync.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { vertices: [v0, v1, v2] }
    }

    #[inline]
    pub fn v0(&self) -> Vec3 {
        self.vertices[0]
    }

    #[inline]
    pub fn v1(&self) -> Vec3 {
        self.vertices[1]
    }

    #[inline]
    pub fn v2(&self) -> Vec3 {
        self.vertices[2]
    }

    /// First edge, `v1 - v0`
    #[inline]
    pub fn edge0(&self) -> Vec3 {
        self.vertices[1] - self.vertices[0]
    }

    /// Second edge, `v2 - v0`
    #[inline]
    pub fn edge1(&self) -> Vec3 {
        self.vertices[2] - self.vertices[0]
    }

    /// Unit normal following counter-clockwise winding
    ///
    /// The triangle must not be degenerate.
    pub fn normal(&self) -> Vec3 {
        Vec3::normal_of(self.vertices[0], self.vertices[1], self.vertices[2])
    }

    pub fn area(&self) -> f32 {
        0.5 * self.edge0().cross(self.edge1()).length()
    }

    pub fn centroid(&self) -> Vec3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }

    /// Point with barycentric coordinates `(b0, b1, b2)`
    pub fn point_from_barycentric(&self, b: [f32; 3]) -> Vec3 {
        self.vertices[0] * b[0] + self.vertices[1] * b[1] + self.vertices[2] * b[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_share_storage() {
        let mut tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        tri.vertices[1] = Vec3::new(2.0, 0.0, 0.0);
        assert_eq!(tri.v1(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_normal_area_centroid() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(tri.normal(), Vec3::Z);
        assert_eq!(tri.area(), 2.0);
        assert!(tri.centroid().approx_eq(Vec3::new(2.0 / 3.0, 2.0 / 3.0, 0.0)));
        assert_eq!(tri.point_from_barycentric([0.0, 0.5, 0.5]), Vec3::new(1.0, 1.0, 0.0));
    }
}
