//! Point-to-primitive queries
//!
//! These are the re-solve step of every composite query, so they are
//! kept as plain functions next to the trait impls.

use rust3d_math::{Vec2, Vec3};

use super::{impl_reversed, DistanceResult, SquaredDistance};
use crate::shapes::{Aabb, Line2, Line3, Obb, Plane, Ray2, Ray3, Rectangle, Segment2, Segment3};

/// Point to infinite line
pub fn point_line(point: Vec3, line: &Line3) -> DistanceResult<(), f32> {
    let t = line.direction.dot(point - line.origin);
    DistanceResult::new(point.distance_squared(line.point_at(t)), (), t)
}

/// Point to ray, the parameter is clamped to `t >= 0`
pub fn point_ray(point: Vec3, ray: &Ray3) -> DistanceResult<(), f32> {
    let t = ray.direction.dot(point - ray.origin).max(0.0);
    DistanceResult::new(point.distance_squared(ray.point_at(t)), (), t)
}

/// Point to segment, the parameter is clamped to `[-extent, extent]`
pub fn point_segment(point: Vec3, segment: &Segment3) -> DistanceResult<(), f32> {
    let t = segment
        .direction
        .dot(point - segment.center)
        .clamp(-segment.extent, segment.extent);
    DistanceResult::new(point.distance_squared(segment.point_at(t)), (), t)
}

pub fn point_plane(point: Vec3, plane: &Plane) -> DistanceResult<(), ()> {
    let d = plane.signed_distance(point);
    DistanceResult::new(d * d, (), ())
}

/// Point to rectangle, parameter in rectangle coordinates
pub fn point_rectangle(point: Vec3, rect: &Rectangle) -> DistanceResult<(), Vec2> {
    let diff = point - rect.center;
    let coords = Vec2::new(
        diff.dot(rect.axes[0]).clamp(-rect.extents.x, rect.extents.x),
        diff.dot(rect.axes[1]).clamp(-rect.extents.y, rect.extents.y),
    );
    DistanceResult::new(point.distance_squared(rect.point_at(coords)), (), coords)
}

/// Point to solid box, parameter is the closest point in the box
pub fn point_aabb(point: Vec3, aabb: &Aabb) -> DistanceResult<(), Vec3> {
    let closest = aabb.closest_point(point);
    DistanceResult::new(point.distance_squared(closest), (), closest)
}

/// Point to solid oriented box, parameter in box coordinates
pub fn point_obb(point: Vec3, obb: &Obb) -> DistanceResult<(), Vec3> {
    let local = obb.to_local(point).clamp_components(-obb.extents, obb.extents);
    DistanceResult::new(point.distance_squared(obb.point_at(local)), (), local)
}

pub fn point_line2(point: Vec2, line: &Line2) -> DistanceResult<(), f32> {
    let t = line.direction.dot(point - line.origin);
    DistanceResult::new(point.distance_squared(line.point_at(t)), (), t)
}

pub fn point_ray2(point: Vec2, ray: &Ray2) -> DistanceResult<(), f32> {
    let t = ray.direction.dot(point - ray.origin).max(0.0);
    DistanceResult::new(point.distance_squared(ray.point_at(t)), (), t)
}

pub fn point_segment2(point: Vec2, segment: &Segment2) -> DistanceResult<(), f32> {
    let t = segment
        .direction
        .dot(point - segment.center)
        .clamp(-segment.extent, segment.extent);
    DistanceResult::new(point.distance_squared(segment.point_at(t)), (), t)
}

macro_rules! impl_point_query {
    ($($point:ty, $shape:ty => $func:ident -> $param:ty),* $(,)?) => {
        $(
            impl SquaredDistance<$shape> for $point {
                type LhsParam = ();
                type RhsParam = $param;

                #[inline]
                fn squared_distance(&self, other: &$shape) -> DistanceResult<(), $param> {
                    $func(*self, other)
                }
            }

            impl_reversed!($point => $shape);
        )*
    };
}

impl_point_query! {
    Vec3, Line3 => point_line -> f32,
    Vec3, Ray3 => point_ray -> f32,
    Vec3, Segment3 => point_segment -> f32,
    Vec3, Plane => point_plane -> (),
    Vec3, Rectangle => point_rectangle -> Vec2,
    Vec3, Aabb => point_aabb -> Vec3,
    Vec3, Obb => point_obb -> Vec3,
    Vec2, Line2 => point_line2 -> f32,
    Vec2, Ray2 => point_ray2 -> f32,
    Vec2, Segment2 => point_segment2 -> f32,
}
