//! Containment predicates and bounding-volume merges
//!
//! `container.contains(&x)` is true when every point of `x` lies in the
//! closed volume of `container`. Point tests compare exactly. Tests of one
//! sphere-swept volume inside another allow [`EPSILON`] on the distance
//! between centers, so a volume always contains a copy of itself, and the
//! polygon boundary test uses the same tolerance.

mod merge;
mod polygon;

pub use merge::{bounding_sphere, merge_aabbs, merge_capsules, merge_spheres};
pub use polygon::{crossing_parity, on_boundary};

use rust3d_math::{Vec2, Vec3, EPSILON};

use crate::distance::{point_rectangle, point_segment, point_segment2};
use crate::shapes::{
    Aabb, Capsule, Capsule2, Circle2, Cone, Cylinder, Ellipse2, Ellipsoid, Lozenge, Obb, Sphere,
};

/// Closed-set containment of `T` in `self`
pub trait Contains<T> {
    fn contains(&self, other: &T) -> bool;
}

/// Whether a ball at squared distance `distance_squared` from a core fits
/// within `r_diff`, the difference of the radii
#[inline]
fn ball_fits(distance_squared: f32, r_diff: f32) -> bool {
    r_diff >= -EPSILON && distance_squared.sqrt() <= r_diff + EPSILON
}

/// Check whether `contained` lies entirely inside `container`
#[inline]
pub fn contains_object<C, T>(container: &C, contained: &T) -> bool
where
    C: Contains<T>,
{
    container.contains(contained)
}

impl Contains<Vec3> for Sphere {
    #[inline]
    fn contains(&self, point: &Vec3) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

impl Contains<Sphere> for Sphere {
    fn contains(&self, other: &Sphere) -> bool {
        ball_fits(other.center.distance_squared(self.center), self.radius - other.radius)
    }
}

impl Contains<Vec3> for Aabb {
    fn contains(&self, p: &Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

impl Contains<Aabb> for Aabb {
    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }
}

impl Contains<Sphere> for Aabb {
    fn contains(&self, sphere: &Sphere) -> bool {
        let r = Vec3::splat(sphere.radius);
        self.contains(&(sphere.center - r)) && self.contains(&(sphere.center + r))
    }
}

impl Contains<Vec3> for Capsule {
    fn contains(&self, point: &Vec3) -> bool {
        point_segment(*point, &self.segment).squared_distance <= self.radius * self.radius
    }
}

impl Contains<Sphere> for Capsule {
    fn contains(&self, sphere: &Sphere) -> bool {
        ball_fits(
            point_segment(sphere.center, &self.segment).squared_distance,
            self.radius - sphere.radius,
        )
    }
}

/// A capsule is the convex hull of its two end spheres, so containing
/// both of them is enough
impl Contains<Capsule> for Capsule {
    fn contains(&self, other: &Capsule) -> bool {
        self.contains(&other.start_sphere()) && self.contains(&other.end_sphere())
    }
}

impl Contains<Vec3> for Lozenge {
    fn contains(&self, point: &Vec3) -> bool {
        point_rectangle(*point, &self.rectangle).squared_distance <= self.radius * self.radius
    }
}

impl Contains<Vec3> for Obb {
    fn contains(&self, point: &Vec3) -> bool {
        let local = self.to_local(*point).abs();
        local.x <= self.extents.x && local.y <= self.extents.y && local.z <= self.extents.z
    }
}

impl Contains<Vec3> for Ellipsoid {
    fn contains(&self, point: &Vec3) -> bool {
        self.normalized_radius_squared(*point) <= 1.0
    }
}

impl Contains<Vec3> for Cylinder {
    fn contains(&self, point: &Vec3) -> bool {
        let diff = *point - self.center;
        let axial = diff.dot(self.axis);
        let radial_sq = diff.length_squared() - axial * axial;
        axial.abs() <= 0.5 * self.height && radial_sq <= self.radius * self.radius
    }
}

impl Contains<Vec3> for Cone {
    fn contains(&self, point: &Vec3) -> bool {
        let diff = *point - self.apex;
        let axial = diff.dot(self.axis);
        if axial < 0.0 || axial > self.height {
            return false;
        }
        if self.height == 0.0 {
            return diff.length_squared() == 0.0;
        }
        // radius of the cross section at this height
        let r = self.radius * axial / self.height;
        diff.length_squared() - axial * axial <= r * r
    }
}

impl Contains<Vec2> for Circle2 {
    #[inline]
    fn contains(&self, point: &Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

impl Contains<Vec2> for Ellipse2 {
    fn contains(&self, point: &Vec2) -> bool {
        self.normalized_radius_squared(*point) <= 1.0
    }
}

impl Contains<Vec2> for Capsule2 {
    fn contains(&self, point: &Vec2) -> bool {
        point_segment2(*point, &self.segment).squared_distance <= self.radius * self.radius
    }
}

impl Contains<Circle2> for Capsule2 {
    fn contains(&self, circle: &Circle2) -> bool {
        ball_fits(
            point_segment2(circle.center, &self.segment).squared_distance,
            self.radius - circle.radius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, Segment3};

    #[test]
    fn test_point_in_sphere() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 2.0);
        assert!(contains_object(&sphere, &Vec3::new(3.0, 0.0, 0.0)));
        assert!(!contains_object(&sphere, &Vec3::new(3.0, 0.1, 0.0)));
    }

    #[test]
    fn test_sphere_in_sphere() {
        let outer = Sphere::new(Vec3::ZERO, 3.0);
        assert!(outer.contains(&Sphere::new(Vec3::new(1.0, 0.0, 0.0), 2.0)));
        assert!(!outer.contains(&Sphere::new(Vec3::new(1.5, 0.0, 0.0), 2.0)));
        assert!(!outer.contains(&Sphere::new(Vec3::ZERO, 4.0)));
    }

    #[test]
    fn test_aabb_containment() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(4.0));
        assert!(aabb.contains(&Vec3::new(4.0, 0.0, 2.0)));
        assert!(!aabb.contains(&Vec3::new(4.1, 0.0, 2.0)));
        assert!(aabb.contains(&Aabb::new(Vec3::ONE, Vec3::splat(2.0))));
        assert!(aabb.contains(&Sphere::new(Vec3::splat(2.0), 2.0)));
        assert!(!aabb.contains(&Sphere::new(Vec3::splat(2.0), 2.5)));
    }

    #[test]
    fn test_capsule_containment() {
        let capsule = Capsule::new(Segment3::new(Vec3::ZERO, Vec3::X, 2.0), 1.0);
        assert!(capsule.contains(&Vec3::new(2.5, 0.5, 0.0)));
        assert!(!capsule.contains(&Vec3::new(3.1, 0.0, 0.0)));

        assert!(capsule.contains(&Sphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0)));
        assert!(!capsule.contains(&Sphere::new(Vec3::new(1.0, 0.5, 0.0), 1.0)));
        assert!(!capsule.contains(&Sphere::new(Vec3::ZERO, 1.5)));

        let inner = Capsule::new(Segment3::new(Vec3::new(0.5, 0.0, 0.0), Vec3::Y, 0.2), 0.5);
        assert!(capsule.contains(&inner));
        let sticking_out = Capsule::new(Segment3::new(Vec3::ZERO, Vec3::Y, 1.0), 0.5);
        assert!(!capsule.contains(&sticking_out));
    }

    #[test]
    fn test_volume_contains_a_copy_of_itself() {
        let capsule = Capsule::from_endpoints(Vec3::new(0.3, 1.7, -2.1), Vec3::new(4.9, -3.3, 2.2), 1.3);
        assert!(contains_object(&capsule, &capsule));
        let sphere = Sphere::new(Vec3::new(0.3, 1.7, -2.1), 1.3);
        assert!(contains_object(&sphere, &sphere));

        let grown = Capsule::new(capsule.segment, 1.3001);
        assert!(!capsule.contains(&grown));
        assert!(grown.contains(&capsule));
    }

    #[test]
    fn test_point_in_lozenge() {
        let rect = Rectangle::new(Vec3::ZERO, [Vec3::X, Vec3::Y], Vec2::new(2.0, 1.0));
        let lozenge = Lozenge::new(rect, 0.5);
        assert!(lozenge.contains(&Vec3::new(1.5, 0.5, 0.5)));
        assert!(lozenge.contains(&Vec3::new(2.5, 0.0, 0.0)));
        assert!(!lozenge.contains(&Vec3::new(2.5, 1.5, 0.0)));
    }

    #[test]
    fn test_circle_in_capsule2() {
        let capsule = Capsule2::from_endpoints(Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0), 1.0);
        assert!(capsule.contains(&Circle2::new(Vec2::new(2.0, 0.0), 1.0)));
        assert!(capsule.contains(&Circle2::new(Vec2::new(0.0, 0.5), 0.5)));
        assert!(!capsule.contains(&Circle2::new(Vec2::new(0.0, 0.6), 0.5)));
        assert!(capsule.contains(&Vec2::new(-2.5, 0.5)));
    }

    #[test]
    fn test_point_in_oriented_volumes() {
        let axes = [Vec3::Y, -Vec3::X, Vec3::Z];
        let obb = Obb::new(Vec3::ZERO, axes, Vec3::new(2.0, 1.0, 1.0));
        // first axis is world y
        assert!(obb.contains(&Vec3::new(0.5, 1.8, 0.0)));
        assert!(!obb.contains(&Vec3::new(1.8, 0.5, 0.0)));

        let ellipsoid = Ellipsoid::new(Vec3::ZERO, axes, Vec3::new(2.0, 1.0, 1.0));
        assert!(ellipsoid.contains(&Vec3::new(0.0, 2.0, 0.0)));
        assert!(!ellipsoid.contains(&Vec3::new(0.8, 1.8, 0.0)));
    }

    #[test]
    fn test_point_in_cylinder_and_cone() {
        let cylinder = Cylinder::new(Vec3::ZERO, Vec3::Z, 1.0, 4.0);
        assert!(cylinder.contains(&Vec3::new(0.6, 0.6, 2.0)));
        assert!(!cylinder.contains(&Vec3::new(0.0, 0.0, 2.1)));
        assert!(!cylinder.contains(&Vec3::new(0.8, 0.8, 0.0)));

        let cone = Cone::new(Vec3::ZERO, Vec3::Z, 2.0, 1.0);
        assert!(cone.contains(&Vec3::new(0.4, 0.0, 1.0)));
        assert!(!cone.contains(&Vec3::new(0.6, 0.0, 1.0)));
        assert!(!cone.contains(&Vec3::new(0.0, 0.0, -0.1)));
        assert!(cone.contains(&Vec3::ZERO));
    }

    #[test]
    fn test_point_in_circle_and_ellipse() {
        let circle = Circle2::new(Vec2::ZERO, 1.0);
        assert!(circle.contains(&Vec2::new(0.6, 0.8)));
        let ellipse = Ellipse2::new(Vec2::ZERO, [Vec2::X, Vec2::Y], Vec2::new(3.0, 1.0));
        assert!(ellipse.contains(&Vec2::new(2.9, 0.0)));
        assert!(!ellipse.contains(&Vec2::new(0.0, 1.1)));
    }
}
