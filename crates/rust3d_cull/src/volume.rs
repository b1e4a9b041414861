//! Plane rejection tests for bounding volumes
//!
//! Each volume reports the largest signed distance any of its points
//! reaches against a plane. A volume is culled when even that value is
//! negative, meaning it lies entirely on the back side.

use rust3d_geometry::{Aabb, Capsule, Cone, Cylinder, Ellipsoid, Lozenge, Obb, Plane, Segment3, Sphere, Triangle};
use rust3d_math::Vec3;

/// A volume that can be tested against a culling plane
pub trait BoundedVolume {
    /// Largest signed distance from `plane` over the volume
    fn max_signed_distance(&self, plane: &Plane) -> f32;

    /// True when the volume is entirely behind `plane`
    #[inline]
    fn cull(&self, plane: &Plane) -> bool {
        self.max_signed_distance(plane) < 0.0
    }
}

/// Test `volume` against a single plane
#[inline]
pub fn cull_object<V: BoundedVolume + ?Sized>(plane: &Plane, volume: &V) -> bool {
    volume.cull(plane)
}

/// Half width of a disk of `radius` with unit normal `axis`, measured
/// along the plane normal
#[inline]
fn disk_support(plane: &Plane, axis: Vec3, radius: f32) -> f32 {
    let cos = plane.normal.dot(axis);
    radius * (1.0 - cos * cos).max(0.0).sqrt()
}

impl BoundedVolume for Vec3 {
    #[inline]
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        plane.signed_distance(*self)
    }
}

impl BoundedVolume for Sphere {
    #[inline]
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        plane.signed_distance(self.center) + self.radius
    }
}

impl BoundedVolume for Aabb {
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        let n = plane.normal;
        let corner = Vec3::new(
            if n.x >= 0.0 { self.max.x } else { self.min.x },
            if n.y >= 0.0 { self.max.y } else { self.min.y },
            if n.z >= 0.0 { self.max.z } else { self.min.z },
        );
        plane.signed_distance(corner)
    }
}

impl BoundedVolume for Obb {
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        let reach = self.extents.x * plane.normal.dot(self.axes[0]).abs()
            + self.extents.y * plane.normal.dot(self.axes[1]).abs()
            + self.extents.z * plane.normal.dot(self.axes[2]).abs();
        plane.signed_distance(self.center) + reach
    }
}

/// Uses the bounding box of the ellipsoid, which never culls too much
impl BoundedVolume for Ellipsoid {
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        Obb::new(self.center, self.axes, self.extents).max_signed_distance(plane)
    }
}

impl BoundedVolume for Segment3 {
    #[inline]
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        plane.signed_distance(self.center) + self.extent * plane.normal.dot(self.direction).abs()
    }
}

impl BoundedVolume for Capsule {
    #[inline]
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        self.segment.max_signed_distance(plane) + self.radius
    }
}

impl BoundedVolume for Lozenge {
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        let rect = &self.rectangle;
        let reach = rect.extents.x * plane.normal.dot(rect.axes[0]).abs()
            + rect.extents.y * plane.normal.dot(rect.axes[1]).abs();
        plane.signed_distance(rect.center) + reach + self.radius
    }
}

impl BoundedVolume for Cylinder {
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        let axial = 0.5 * self.height * plane.normal.dot(self.axis).abs();
        plane.signed_distance(self.center) + axial + disk_support(plane, self.axis, self.radius)
    }
}

/// The farthest point is either the apex or on the rim of the base
impl BoundedVolume for Cone {
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        let apex = plane.signed_distance(self.apex);
        let rim = plane.signed_distance(self.base_center()) + disk_support(plane, self.axis, self.radius);
        apex.max(rim)
    }
}

impl BoundedVolume for Triangle {
    fn max_signed_distance(&self, plane: &Plane) -> f32 {
        self.vertices
            .iter()
            .map(|&v| plane.signed_distance(v))
            .fold(f32::MIN, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust3d_geometry::Rectangle;
    use rust3d_math::Vec2;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Keeps everything with y >= 0
    fn floor() -> Plane {
        Plane::new(Vec3::Y, 0.0)
    }

    #[test]
    fn test_points() {
        assert!(cull_object(&floor(), &Vec3::new(0.0, -0.1, 0.0)));
        assert!(!cull_object(&floor(), &Vec3::ZERO));
    }

    #[test]
    fn test_sphere() {
        assert!(cull_object(&floor(), &Sphere::new(Vec3::new(0.0, -2.0, 0.0), 1.0)));
        assert!(!cull_object(&floor(), &Sphere::new(Vec3::new(0.0, -2.0, 0.0), 2.5)));
    }

    #[test]
    fn test_aabb_uses_positive_vertex() {
        let plane = Plane::new(Vec3::new(1.0, 1.0, 0.0).normalized(), 0.0);
        let aabb = Aabb::new(Vec3::new(-3.0, -3.0, -1.0), Vec3::new(-1.0, -1.0, 1.0));
        assert!(approx_eq(aabb.max_signed_distance(&plane), -2.0 / 2.0f32.sqrt()));
        assert!(cull_object(&plane, &aabb));
        assert!(!cull_object(&plane, &aabb.translated(Vec3::new(3.0, 0.0, 0.0))));
    }

    #[test]
    fn test_rotated_obb() {
        let d = 0.5f32.sqrt();
        let axes = [Vec3::new(d, d, 0.0), Vec3::new(-d, d, 0.0), Vec3::Z];
        let obb = Obb::new(Vec3::new(0.0, -1.5, 0.0), axes, Vec3::new(1.0, 1.0, 1.0));
        // the top edge stays just under the floor
        assert!(approx_eq(obb.max_signed_distance(&floor()), -1.5 + 2.0 * d));
        assert!(cull_object(&floor(), &obb));

        let ellipsoid = Ellipsoid::new(Vec3::new(0.0, -1.5, 0.0), axes, Vec3::new(1.0, 1.0, 1.0));
        assert!(cull_object(&floor(), &ellipsoid));
    }

    #[test]
    fn test_capsule_and_lozenge() {
        let capsule = Capsule::from_endpoints(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 0.5);
        assert!(approx_eq(capsule.max_signed_distance(&floor()), -0.5));
        assert!(!cull_object(&floor(), &Capsule::new(capsule.segment, 1.5)));

        let rect = Rectangle::new(Vec3::new(0.0, -2.0, 0.0), [Vec3::X, Vec3::Y], Vec2::new(1.0, 1.0));
        let lozenge = Lozenge::new(rect, 0.5);
        assert!(approx_eq(lozenge.max_signed_distance(&floor()), -0.5));
        assert!(cull_object(&floor(), &lozenge));
    }

    #[test]
    fn test_cylinder() {
        let upright = Cylinder::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y, 5.0, 4.0);
        assert!(approx_eq(upright.max_signed_distance(&floor()), -1.0));

        let lying = Cylinder::new(Vec3::new(0.0, -3.0, 0.0), Vec3::X, 2.5, 4.0);
        assert!(approx_eq(lying.max_signed_distance(&floor()), -0.5));
        assert!(cull_object(&floor(), &lying));
    }

    #[test]
    fn test_cone() {
        // pointing down, the apex is the highest point
        let down = Cone::new(Vec3::new(0.0, -1.0, 0.0), -Vec3::Y, 2.0, 3.0);
        assert!(approx_eq(down.max_signed_distance(&floor()), -1.0));

        // lying on its side, the rim pokes up by the base radius
        let side = Cone::new(Vec3::new(0.0, -1.0, 0.0), Vec3::X, 2.0, 1.5);
        assert!(approx_eq(side.max_signed_distance(&floor()), 0.5));
        assert!(!cull_object(&floor(), &side));
    }

    #[test]
    fn test_triangle() {
        let tri = Triangle::new(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, -0.5, 0.0),
            Vec3::new(0.0, -2.0, 1.0),
        );
        assert!(approx_eq(tri.max_signed_distance(&floor()), -0.5));
        assert!(cull_object(&floor(), &tri));
    }
}
