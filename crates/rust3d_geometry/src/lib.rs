//! Geometric primitives and queries for rust3d
//!
//! This crate provides:
//! - Primitives (lines, segments, planes, triangles, boxes, spheres, capsules, ...)
//! - Squared-distance and closest-point queries between them
//! - Containment predicates and bounding-volume merges

pub mod containment;
pub mod distance;
pub mod shapes;

// Re-export commonly used types
pub use containment::{
    bounding_sphere, contains_object, crossing_parity, merge_aabbs, merge_capsules, merge_spheres,
    Contains,
};
pub use distance::{squared_distance, DistanceResult, SquaredDistance, TriangleClosest, TriangleRegion};
pub use shapes::{
    Aabb, Capsule, Capsule2, Circle2, Cone, Cylinder, Ellipse2, Ellipsoid, Line2, Line3, Lozenge, Obb,
    Plane, Polygon2, Ray2, Ray3, Rectangle, Segment2, Segment3, Sphere, Triangle,
};
