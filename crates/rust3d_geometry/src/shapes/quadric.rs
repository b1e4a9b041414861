//! Ellipsoids, ellipses, cylinders and cones

use rust3d_math::{Vec2, Vec3};
use serde::{Serialize, Deserialize};

/// Ellipsoid with orthonormal axes and per-axis radii
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    pub center: Vec3,
    pub axes: [Vec3; 3],
    /// Radius along each axis
    pub extents: Vec3,
}

impl Ellipsoid {
    pub fn new(center: Vec3, axes: [Vec3; 3], extents: Vec3) -> Self {
        debug_assert!(extents.x >= 0.0 && extents.y >= 0.0 && extents.z >= 0.0, "ellipsoid extents must not be negative");
        Self { center, axes, extents }
    }

    /// Value of `sum((local_i / extent_i)^2)`, at most one inside the ellipsoid
    pub fn normalized_radius_squared(&self, point: Vec3) -> f32 {
        let diff = point - self.center;
        (0..3)
            .map(|i| {
                let q = diff.dot(self.axes[i]) / self.extents.to_array()[i];
                q * q
            })
            .sum()
    }
}

/// Ellipse in the plane
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ellipse2 {
    pub center: Vec2,
    pub axes: [Vec2; 2],
    pub extents: Vec2,
}

impl Ellipse2 {
    pub fn new(center: Vec2, axes: [Vec2; 2], extents: Vec2) -> Self {
        debug_assert!(extents.x >= 0.0 && extents.y >= 0.0, "ellipse extents must not be negative");
        Self { center, axes, extents }
    }

    pub fn normalized_radius_squared(&self, point: Vec2) -> f32 {
        let diff = point - self.center;
        let q0 = diff.dot(self.axes[0]) / self.extents.x;
        let q1 = diff.dot(self.axes[1]) / self.extents.y;
        q0 * q0 + q1 * q1
    }
}

/// Finite cylinder centered on `center`, `height` measured along `axis`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    pub center: Vec3,
    /// Unit axis
    pub axis: Vec3,
    pub radius: f32,
    /// Full height, the caps sit at `center +- axis * height / 2`
    pub height: f32,
}

impl Cylinder {
    pub fn new(center: Vec3, axis: Vec3, radius: f32, height: f32) -> Self {
        debug_assert!(axis.is_normalized(), "cylinder axis must be unit length");
        debug_assert!(radius >= 0.0 && height >= 0.0, "cylinder dimensions must not be negative");
        Self { center, axis, radius, height }
    }
}

/// Finite cone from its apex towards its base disk
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub apex: Vec3,
    /// Unit axis pointing from the apex to the base
    pub axis: Vec3,
    pub height: f32,
    /// Radius of the base disk
    pub radius: f32,
}

impl Cone {
    pub fn new(apex: Vec3, axis: Vec3, height: f32, radius: f32) -> Self {
        debug_assert!(axis.is_normalized(), "cone axis must be unit length");
        debug_assert!(radius >= 0.0 && height >= 0.0, "cone dimensions must not be negative");
        Self { apex, axis, height, radius }
    }

    /// Center of the base disk
    #[inline]
    pub fn base_center(&self) -> Vec3 {
        self.apex + self.axis * self.height
    }
}
