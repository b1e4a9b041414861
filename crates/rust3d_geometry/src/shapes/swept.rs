//! Swept volumes: a spine primitive grown by a radius
//!
//! A capsule is every point within `radius` of a segment; a lozenge is
//! every point within `radius` of a rectangle.

use rust3d_math::{Vec2, Vec3};
use serde::{Serialize, Deserialize};

use super::{Rectangle, Segment2, Segment3, Sphere, Circle2};

/// Segment swept by a sphere
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    pub segment: Segment3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(segment: Segment3, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "capsule radius must not be negative");
        Self { segment, radius }
    }

    /// Capsule whose spine runs from `p0` to `p1`
    pub fn from_endpoints(p0: Vec3, p1: Vec3, radius: f32) -> Self {
        Self::new(Segment3::from_endpoints(p0, p1), radius)
    }

    /// Sphere capping the start of the spine
    pub fn start_sphere(&self) -> Sphere {
        Sphere::new(self.segment.start(), self.radius)
    }

    /// Sphere capping the end of the spine
    pub fn end_sphere(&self) -> Sphere {
        Sphere::new(self.segment.end(), self.radius)
    }
}

/// 2D capsule (stadium)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Capsule2 {
    pub segment: Segment2,
    pub radius: f32,
}

impl Capsule2 {
    pub fn new(segment: Segment2, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "capsule radius must not be negative");
        Self { segment, radius }
    }

    pub fn from_endpoints(p0: Vec2, p1: Vec2, radius: f32) -> Self {
        Self::new(Segment2::from_endpoints(p0, p1), radius)
    }

    pub fn start_circle(&self) -> Circle2 {
        Circle2::new(self.segment.start(), self.radius)
    }

    pub fn end_circle(&self) -> Circle2 {
        Circle2::new(self.segment.end(), self.radius)
    }
}

/// Rectangle swept by a sphere
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lozenge {
    pub rectangle: Rectangle,
    pub radius: f32,
}

impl Lozenge {
    pub fn new(rectangle: Rectangle, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "lozenge radius must not be negative");
        Self { rectangle, radius }
    }
}
