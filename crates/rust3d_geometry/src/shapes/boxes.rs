//! Boxes and rectangles
//!
//! [`Aabb`] stores its corners. [`Obb`] and [`Rectangle`] store a center,
//! orthonormal axes and half extents along each axis; orthonormality is
//! the caller's responsibility and is not checked.

use rust3d_math::{Vec2, Vec3};
use serde::{Serialize, Deserialize};

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (all components are minimums)
    pub min: Vec3,
    /// Maximum corner (all components are maximums)
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z, "AABB min must not exceed max");
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Tightest box around a set of points, `None` when there are none
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest.iter().fold((*first, *first), |(min, max), &p| {
            (min.min_components(p), max.max_components(p))
        });
        Some(Self::new(min, max))
    }

    /// Create a unit cube centered at the origin
    pub fn unit() -> Self {
        Self::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5))
    }

    /// Get the center of the AABB
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size in each dimension
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the closest point inside or on the AABB to a given point
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp_components(self.min, self.max)
    }

    /// Translate the AABB by a delta
    pub fn translated(&self, delta: Vec3) -> Self {
        Self::new(self.min + delta, self.max + delta)
    }

    /// The eight corners, bit `i` of the index selecting max on axis `i`
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }
}

/// Oriented bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    pub center: Vec3,
    /// Orthonormal local axes
    pub axes: [Vec3; 3],
    /// Half extents along each axis
    pub extents: Vec3,
}

impl Obb {
    pub fn new(center: Vec3, axes: [Vec3; 3], extents: Vec3) -> Self {
        debug_assert!(extents.x >= 0.0 && extents.y >= 0.0 && extents.z >= 0.0, "OBB extents must not be negative");
        Self { center, axes, extents }
    }

    /// OBB covering the same volume as an axis-aligned box
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::new(aabb.center(), [Vec3::X, Vec3::Y, Vec3::Z], aabb.half_extents())
    }

    /// World position of the local coordinates `local`
    pub fn point_at(&self, local: Vec3) -> Vec3 {
        self.center + self.axes[0] * local.x + self.axes[1] * local.y + self.axes[2] * local.z
    }

    /// Local coordinates of a world position
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        let diff = point - self.center;
        Vec3::new(diff.dot(self.axes[0]), diff.dot(self.axes[1]), diff.dot(self.axes[2]))
    }

    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            let e = self.extents;
            self.point_at(Vec3::new(
                if i & 1 == 0 { -e.x } else { e.x },
                if i & 2 == 0 { -e.y } else { e.y },
                if i & 4 == 0 { -e.z } else { e.z },
            ))
        })
    }
}

/// Rectangle in 3D space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub center: Vec3,
    /// Orthonormal in-plane axes
    pub axes: [Vec3; 2],
    /// Half extents along each axis
    pub extents: Vec2,
}

impl Rectangle {
    pub fn new(center: Vec3, axes: [Vec3; 2], extents: Vec2) -> Self {
        debug_assert!(extents.x >= 0.0 && extents.y >= 0.0, "rectangle extents must not be negative");
        Self { center, axes, extents }
    }

    /// Point at rectangle coordinates `(s, t)`
    #[inline]
    pub fn point_at(&self, coords: Vec2) -> Vec3 {
        self.center + self.axes[0] * coords.x + self.axes[1] * coords.y
    }

    /// Unit normal, `axes[0] x axes[1]`
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.axes[0].cross(self.axes[1])
    }

    /// Corners in counter-clockwise order around the normal
    pub fn corners(&self) -> [Vec3; 4] {
        let Vec2 { x: e0, y: e1 } = self.extents;
        [
            self.point_at(Vec2::new(-e0, -e1)),
            self.point_at(Vec2::new(e0, -e1)),
            self.point_at(Vec2::new(e0, e1)),
            self.point_at(Vec2::new(-e0, e1)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 3.0, 2.0),
            Vec3::new(0.0, 0.0, -4.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -4.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 2.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_aabb_accessors() {
        let aabb = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.half_extents(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.closest_point(Vec3::new(5.0, -1.0, 3.0)), Vec3::new(2.0, 0.0, 3.0));
        assert_eq!(aabb.corners()[7], aabb.max);
        assert_eq!(aabb.corners()[0], aabb.min);
    }

    #[test]
    fn test_obb_local_roundtrip() {
        let obb = Obb::new(Vec3::new(1.0, 1.0, 1.0), [Vec3::Y, -Vec3::X, Vec3::Z], Vec3::new(1.0, 2.0, 3.0));
        let p = Vec3::new(0.5, -2.0, 4.0);
        assert!(obb.point_at(obb.to_local(p)).approx_eq(p));
    }

    #[test]
    fn test_rectangle_corners() {
        let rect = Rectangle::new(Vec3::ZERO, [Vec3::X, Vec3::Y], Vec2::new(2.0, 1.0));
        assert_eq!(rect.normal(), Vec3::Z);
        assert_eq!(rect.corners()[2], Vec3::new(2.0, 1.0, 0.0));
    }
}
