//! Queries between lines, rays and segments
//!
//! Only [`line_line`] solves the quadratic directly. Every other pair
//! starts from a looser query, clamps the parameter that left its valid
//! range and re-solves from the clamped point. The objective is convex,
//! so the clamped boundary always holds a minimizer.

use rust3d_math::EPSILON;

use super::point::{point_line, point_ray, point_segment};
use super::{impl_reversed, DistanceResult, SquaredDistance};
use crate::shapes::{Line3, Ray3, Segment3};

/// Line to line
///
/// Parallel lines pair `line1.origin` with its projection onto `line0`.
pub fn line_line(line0: &Line3, line1: &Line3) -> DistanceResult<f32, f32> {
    let diff = line0.origin - line1.origin;
    let a01 = -line0.direction.dot(line1.direction);
    let b0 = diff.dot(line0.direction);
    let c = diff.length_squared();
    let det = (1.0 - a01 * a01).abs();

    if det >= EPSILON {
        let b1 = -diff.dot(line1.direction);
        let inv_det = 1.0 / det;
        let s0 = (a01 * b1 - b0) * inv_det;
        let s1 = (a01 * b0 - b1) * inv_det;
        let sqr = s0 * (s0 + a01 * s1 + 2.0 * b0) + s1 * (a01 * s0 + s1 + 2.0 * b1) + c;
        DistanceResult::new(sqr, s0, s1)
    } else {
        let s0 = -b0;
        DistanceResult::new(b0 * s0 + c, s0, 0.0)
    }
}

/// Line to ray
pub fn line_ray(line: &Line3, ray: &Ray3) -> DistanceResult<f32, f32> {
    let unclamped = line_line(line, &ray.line());
    if unclamped.rhs >= 0.0 {
        return unclamped;
    }
    let resolved = point_line(ray.origin, line);
    DistanceResult::new(resolved.squared_distance, resolved.rhs, 0.0)
}

/// Line to segment
pub fn line_segment(line: &Line3, segment: &Segment3) -> DistanceResult<f32, f32> {
    let unclamped = line_line(line, &segment.line());
    let t = unclamped.rhs.clamp(-segment.extent, segment.extent);
    if t == unclamped.rhs {
        return unclamped;
    }
    let resolved = point_line(segment.point_at(t), line);
    DistanceResult::new(resolved.squared_distance, resolved.rhs, t)
}

/// Ray to ray
pub fn ray_ray(ray0: &Ray3, ray1: &Ray3) -> DistanceResult<f32, f32> {
    let unclamped = line_ray(&ray0.line(), ray1);
    if unclamped.lhs >= 0.0 {
        return unclamped;
    }
    let resolved = point_ray(ray0.origin, ray1);
    DistanceResult::new(resolved.squared_distance, 0.0, resolved.rhs)
}

/// Ray to segment
pub fn ray_segment(ray: &Ray3, segment: &Segment3) -> DistanceResult<f32, f32> {
    let unclamped = line_segment(&ray.line(), segment);
    if unclamped.lhs >= 0.0 {
        return unclamped;
    }
    let resolved = point_segment(ray.origin, segment);
    DistanceResult::new(resolved.squared_distance, 0.0, resolved.rhs)
}

/// Segment to segment
pub fn segment_segment(segment0: &Segment3, segment1: &Segment3) -> DistanceResult<f32, f32> {
    let unclamped = line_segment(&segment0.line(), segment1);
    let s = unclamped.lhs.clamp(-segment0.extent, segment0.extent);
    if s == unclamped.lhs {
        return unclamped;
    }
    let resolved = point_segment(segment0.point_at(s), segment1);
    DistanceResult::new(resolved.squared_distance, s, resolved.rhs)
}

macro_rules! impl_linear_query {
    ($($lhs:ty, $rhs:ty => $func:ident),* $(,)?) => {
        $(
            impl SquaredDistance<$rhs> for $lhs {
                type LhsParam = f32;
                type RhsParam = f32;

                #[inline]
                fn squared_distance(&self, other: &$rhs) -> DistanceResult<f32, f32> {
                    $func(self, other)
                }
            }
        )*
    };
}

impl_linear_query! {
    Line3, Line3 => line_line,
    Line3, Ray3 => line_ray,
    Line3, Segment3 => line_segment,
    Ray3, Ray3 => ray_ray,
    Ray3, Segment3 => ray_segment,
    Segment3, Segment3 => segment_segment,
}

impl_reversed! {
    Line3 => Ray3,
    Line3 => Segment3,
    Ray3 => Segment3,
}
