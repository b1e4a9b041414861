//! Geometric primitives
//!
//! Every primitive is a small `Copy` value stored in the parametric form
//! its distance and containment queries want. Preconditions such as unit
//! directions and non-negative radii are debug-asserted on construction;
//! the fields stay public so callers can build values directly.

mod boxes;
mod linear;
mod plane;
mod polygon;
mod quadric;
mod sphere;
mod swept;
mod triangle;

pub use boxes::{Aabb, Obb, Rectangle};
pub use linear::{Line2, Line3, Ray2, Ray3, Segment2, Segment3};
pub use plane::Plane;
pub use polygon::Polygon2;
pub use quadric::{Cone, Cylinder, Ellipse2, Ellipsoid};
pub use sphere::{Circle2, Sphere};
pub use swept::{Capsule, Capsule2, Lozenge};
pub use triangle::Triangle;
