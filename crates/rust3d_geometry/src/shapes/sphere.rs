use rust3d_math::{Vec2, Vec3};
use serde::{Serialize, Deserialize};

use super::Aabb;

/// A sphere defined by center and radius
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere at the given center with the given radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "sphere radius must not be negative");
        Self { center, radius }
    }

    /// Create a unit sphere at the origin
    pub fn unit() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }

    /// Smallest sphere around an axis-aligned box
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::new(aabb.center(), aabb.half_extents().length())
    }

    /// Get the closest point on the sphere surface to a given point
    ///
    /// The point must not coincide with the center.
    pub fn closest_surface_point(&self, point: Vec3) -> Vec3 {
        let direction = (point - self.center).normalized();
        self.center + direction * self.radius
    }

    /// Bounding box of the sphere
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, Vec3::splat(self.radius))
    }
}

/// A circle in the plane
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle2 {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle2 {
    pub fn new(center: Vec2, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "circle radius must not be negative");
        Self { center, radius }
    }
}
