//! Bounding-volume merges
//!
//! Each merge returns a volume containing both inputs. When one input
//! already contains the other it is returned unchanged, the first
//! argument winning ties.

use rust3d_math::Vec3;

use super::Contains;
use crate::distance::point_line;
use crate::shapes::{Aabb, Capsule, Line3, Segment3, Sphere};

/// Smallest sphere containing both spheres
pub fn merge_spheres(s0: &Sphere, s1: &Sphere) -> Sphere {
    let diff = s1.center - s0.center;
    let len_sq = diff.length_squared();
    let r_diff = s1.radius - s0.radius;

    if r_diff * r_diff >= len_sq {
        return if r_diff <= 0.0 { *s0 } else { *s1 };
    }

    let len = len_sq.sqrt();
    let center = s0.center + diff * ((len + r_diff) / (2.0 * len));
    Sphere::new(center, 0.5 * (len + s0.radius + s1.radius))
}

/// Capsule containing both capsules
///
/// The axis passes through the average of the two centers along the
/// bisector of the two directions. The radius covers the farthest end
/// sphere from that axis and the segment is trimmed to the shortest
/// range where every end sphere still fits. The result is not minimal.
pub fn merge_capsules(c0: &Capsule, c1: &Capsule) -> Capsule {
    if c0.contains(c1) {
        return *c0;
    }
    if c1.contains(c0) {
        return *c1;
    }

    let d0 = c0.segment.direction;
    let d1 = c1.segment.direction;
    let origin = (c0.segment.center + c1.segment.center) * 0.5;
    let bisector = if d0.dot(d1) >= 0.0 { d0 + d1 } else { d0 - d1 };
    let line = Line3::new(origin, bisector.try_normalized().unwrap_or(d0));

    let ends = [
        (c0.segment.start(), c0.radius),
        (c0.segment.end(), c0.radius),
        (c1.segment.start(), c1.radius),
        (c1.segment.end(), c1.radius),
    ];

    // Parameter of each end center on the axis and its squared distance to it
    let projected = ends.map(|(p, r)| (point_line(p, &line), r));

    let radius = projected
        .iter()
        .map(|(q, r)| q.distance() + r)
        .fold(f32::MIN, f32::max);

    // Range of line parameters whose sphere of `radius` holds each end
    // sphere, measured from the perpendicular distance to the axis
    let mut t_pos = f32::MIN;
    let mut t_neg = f32::MAX;
    for (q, r) in &projected {
        let r_diff = radius - r;
        let half_width = (r_diff * r_diff - q.squared_distance).max(0.0).sqrt();

        let lower = q.rhs - half_width;
        let upper = q.rhs + half_width;
        if lower > t_pos {
            t_pos = lower;
        }
        if upper < t_neg {
            t_neg = upper;
        }
    }

    let center = line.point_at(0.5 * (t_pos + t_neg));
    let extent = if t_pos > t_neg { 0.5 * (t_pos - t_neg) } else { 0.0 };
    log::trace!("merged capsules into radius {radius}, extent {extent}");
    Capsule::new(Segment3::new(center, line.direction, extent), radius)
}

/// Smallest box containing both boxes
pub fn merge_aabbs(a: &Aabb, b: &Aabb) -> Aabb {
    Aabb::new(a.min.min_components(b.min), a.max.max_components(b.max))
}

/// Sphere around a point set, centered on the centroid
///
/// Not the minimal enclosing sphere. Returns `None` for an empty slice.
pub fn bounding_sphere(points: &[Vec3]) -> Option<Sphere> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec3::ZERO, |acc, &p| acc + p);
    let center = sum / points.len() as f32;
    let radius_sq = points
        .iter()
        .map(|p| p.distance_squared(center))
        .fold(0.0, f32::max);
    Some(Sphere::new(center, radius_sq.sqrt()))
}
