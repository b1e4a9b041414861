//! Lines, rays and segments in 2D and 3D
//!
//! All three share the parametric form `origin + t * direction` with a unit
//! direction. They only differ in the valid parameter range:
//!
//! | primitive | range |
//! |-----------|-------|
//! | line      | `(-inf, +inf)` |
//! | ray       | `[0, +inf)` |
//! | segment   | `[-extent, extent]` around the center |

use rust3d_math::{Vec2, Vec3};
use serde::{Serialize, Deserialize};

/// Infinite 3D line
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line3 {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Line3 {
    /// Create a line from an origin and a unit direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(direction.is_normalized(), "line direction must be unit length");
        Self { origin, direction }
    }

    /// Line through two distinct points
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(a, (b - a).normalized())
    }

    /// Point at parameter `t`
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Half-infinite 3D ray
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ray3 {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray3 {
    /// Create a ray from an origin and a unit direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(direction.is_normalized(), "ray direction must be unit length");
        Self { origin, direction }
    }

    /// Point at parameter `t >= 0`
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The line this ray lies on
    #[inline]
    pub fn line(&self) -> Line3 {
        Line3 { origin: self.origin, direction: self.direction }
    }
}

/// 3D segment in center-extent form
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment3 {
    pub center: Vec3,
    /// Unit direction
    pub direction: Vec3,
    /// Half length, never negative
    pub extent: f32,
}

impl Segment3 {
    /// Create a segment from its center, unit direction and half length
    pub fn new(center: Vec3, direction: Vec3, extent: f32) -> Self {
        debug_assert!(direction.is_normalized(), "segment direction must be unit length");
        debug_assert!(extent >= 0.0, "segment extent must not be negative");
        Self { center, direction, extent }
    }

    /// Segment between two end points
    ///
    /// A zero length segment gets an arbitrary direction.
    pub fn from_endpoints(p0: Vec3, p1: Vec3) -> Self {
        let delta = p1 - p0;
        let direction = delta.try_normalized().unwrap_or(Vec3::X);
        Self::new((p0 + p1) * 0.5, direction, delta.length() * 0.5)
    }

    /// End point at `t = -extent`
    #[inline]
    pub fn start(&self) -> Vec3 {
        self.center - self.direction * self.extent
    }

    /// End point at `t = extent`
    #[inline]
    pub fn end(&self) -> Vec3 {
        self.center + self.direction * self.extent
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.center + self.direction * t
    }

    #[inline]
    pub fn length(&self) -> f32 {
        2.0 * self.extent
    }

    /// The line this segment lies on, parameterized from the center
    #[inline]
    pub fn line(&self) -> Line3 {
        Line3 { origin: self.center, direction: self.direction }
    }
}

/// Infinite 2D line
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line2 {
    pub origin: Vec2,
    pub direction: Vec2,
}

impl Line2 {
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        debug_assert!((direction.length_squared() - 1.0).abs() < 1e-3, "line direction must be unit length");
        Self { origin, direction }
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }
}

/// Half-infinite 2D ray
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ray2 {
    pub origin: Vec2,
    pub direction: Vec2,
}

impl Ray2 {
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        debug_assert!((direction.length_squared() - 1.0).abs() < 1e-3, "ray direction must be unit length");
        Self { origin, direction }
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }
}

/// 2D segment in center-extent form
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment2 {
    pub center: Vec2,
    pub direction: Vec2,
    pub extent: f32,
}

impl Segment2 {
    pub fn new(center: Vec2, direction: Vec2, extent: f32) -> Self {
        debug_assert!((direction.length_squared() - 1.0).abs() < 1e-3, "segment direction must be unit length");
        debug_assert!(extent >= 0.0, "segment extent must not be negative");
        Self { center, direction, extent }
    }

    /// Segment between two end points
    pub fn from_endpoints(p0: Vec2, p1: Vec2) -> Self {
        let delta = p1 - p0;
        let direction = delta.try_normalized().unwrap_or(Vec2::X);
        Self::new((p0 + p1) * 0.5, direction, delta.length() * 0.5)
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.center - self.direction * self.extent
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.center + self.direction * self.extent
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.center + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_from_endpoints() {
        let s = Segment3::from_endpoints(Vec3::new(1.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(s.center, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(s.direction, Vec3::X);
        assert_eq!(s.extent, 2.0);
        assert_eq!(s.start(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(s.end(), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(s.length(), 4.0);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let s = Segment3::from_endpoints(p, p);
        assert_eq!(s.extent, 0.0);
        assert_eq!(s.start(), p);
    }

    #[test]
    fn test_point_at() {
        let line = Line3::from_points(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(line.point_at(-3.0), Vec3::new(0.0, 0.0, -3.0));
        let ray = Ray2::new(Vec2::new(1.0, 1.0), Vec2::Y);
        assert_eq!(ray.point_at(2.0), Vec2::new(1.0, 3.0));
    }
}
