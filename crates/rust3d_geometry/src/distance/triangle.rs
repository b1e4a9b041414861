//! Queries against triangles
//!
//! The point query minimizes
//! `Q(s, t) = |v0 + s * e0 + t * e1 - p|^2` over the triangle
//! `s >= 0, t >= 0, s + t <= 1`, with `e0 = v1 - v0` and `e1 = v2 - v0`.
//! The unconstrained minimum falls into one of seven regions of the
//! `(s, t)` plane and each region is finished by a one dimensional
//! clamp along the nearest edge.
//!
//! ```text
//!        t
//!   \ 2 |
//!    \  |
//!     \ |
//!      \|
//!       *
//!       |\
//!    3  | \   1
//!       |  \
//!       | 0 \
//!  -----*----*------ s
//!    4  | 5   \   6
//! ```

use rust3d_math::{Vec3, EPSILON};

use super::linear::line_segment;
use super::{impl_reversed, DistanceResult, SquaredDistance};
use crate::shapes::{Line3, Ray3, Segment3, Triangle};

/// Region of the `(s, t)` plane holding the unconstrained minimum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriangleRegion {
    /// Region 0, the projection lies inside the triangle
    Interior,
    /// Region 1, beyond the edge `v1 v2`
    Edge12,
    /// Region 2, past `v2`
    Vertex2,
    /// Region 3, beyond the edge `v0 v2`
    Edge02,
    /// Region 4, past `v0`
    Vertex0,
    /// Region 5, beyond the edge `v0 v1`
    Edge01,
    /// Region 6, past `v1`
    Vertex1,
}

impl TriangleRegion {
    /// Classic region number, 0 to 6
    pub fn index(self) -> u8 {
        match self {
            TriangleRegion::Interior => 0,
            TriangleRegion::Edge12 => 1,
            TriangleRegion::Vertex2 => 2,
            TriangleRegion::Edge02 => 3,
            TriangleRegion::Vertex0 => 4,
            TriangleRegion::Edge01 => 5,
            TriangleRegion::Vertex1 => 6,
        }
    }
}

/// Full result of a point-triangle query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleClosest {
    pub squared_distance: f32,
    /// Weights of `v0`, `v1`, `v2`
    pub barycentric: [f32; 3],
    pub region: TriangleRegion,
}

/// Closest point on a (non-degenerate) triangle
pub fn closest_point_on_triangle(point: Vec3, triangle: &Triangle) -> TriangleClosest {
    let diff = triangle.v0() - point;
    let edge0 = triangle.edge0();
    let edge1 = triangle.edge1();
    let a00 = edge0.length_squared();
    let a01 = edge0.dot(edge1);
    let a11 = edge1.length_squared();
    let b0 = diff.dot(edge0);
    let b1 = diff.dot(edge1);
    let c = diff.length_squared();
    let det = (a00 * a11 - a01 * a01).abs();
    let mut s = a01 * b1 - a11 * b0;
    let mut t = a01 * b0 - a00 * b1;

    let quadratic = |s: f32, t: f32| s * (a00 * s + a01 * t + 2.0 * b0) + t * (a01 * s + a11 * t + 2.0 * b1) + c;

    let sqr;
    let region;
    if s + t <= det {
        if s < 0.0 {
            if t < 0.0 {
                region = TriangleRegion::Vertex0;
                if b0 < 0.0 {
                    t = 0.0;
                    if -b0 >= a00 {
                        s = 1.0;
                        sqr = a00 + 2.0 * b0 + c;
                    } else {
                        s = -b0 / a00;
                        sqr = b0 * s + c;
                    }
                } else {
                    s = 0.0;
                    if b1 >= 0.0 {
                        t = 0.0;
                        sqr = c;
                    } else if -b1 >= a11 {
                        t = 1.0;
                        sqr = a11 + 2.0 * b1 + c;
                    } else {
                        t = -b1 / a11;
                        sqr = b1 * t + c;
                    }
                }
            } else {
                region = TriangleRegion::Edge02;
                s = 0.0;
                if b1 >= 0.0 {
                    t = 0.0;
                    sqr = c;
                } else if -b1 >= a11 {
                    t = 1.0;
                    sqr = a11 + 2.0 * b1 + c;
                } else {
                    t = -b1 / a11;
                    sqr = b1 * t + c;
                }
            }
        } else if t < 0.0 {
            region = TriangleRegion::Edge01;
            t = 0.0;
            if b0 >= 0.0 {
                s = 0.0;
                sqr = c;
            } else if -b0 >= a00 {
                s = 1.0;
                sqr = a00 + 2.0 * b0 + c;
            } else {
                s = -b0 / a00;
                sqr = b0 * s + c;
            }
        } else {
            region = TriangleRegion::Interior;
            let inv_det = 1.0 / det;
            s *= inv_det;
            t *= inv_det;
            sqr = quadratic(s, t);
        }
    } else if s < 0.0 {
        region = TriangleRegion::Vertex2;
        let tmp0 = a01 + b0;
        let tmp1 = a11 + b1;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a00 - 2.0 * a01 + a11;
            if numer >= denom {
                s = 1.0;
                t = 0.0;
                sqr = a00 + 2.0 * b0 + c;
            } else {
                s = numer / denom;
                t = 1.0 - s;
                sqr = quadratic(s, t);
            }
        } else {
            s = 0.0;
            if tmp1 <= 0.0 {
                t = 1.0;
                sqr = a11 + 2.0 * b1 + c;
            } else if b1 >= 0.0 {
                t = 0.0;
                sqr = c;
            } else {
                t = -b1 / a11;
                sqr = b1 * t + c;
            }
        }
    } else if t < 0.0 {
        region = TriangleRegion::Vertex1;
        let tmp0 = a01 + b1;
        let tmp1 = a00 + b0;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a00 - 2.0 * a01 + a11;
            if numer >= denom {
                t = 1.0;
                s = 0.0;
                sqr = a11 + 2.0 * b1 + c;
            } else {
                t = numer / denom;
                s = 1.0 - t;
                sqr = quadratic(s, t);
            }
        } else {
            t = 0.0;
            if tmp1 <= 0.0 {
                s = 1.0;
                sqr = a00 + 2.0 * b0 + c;
            } else if b0 >= 0.0 {
                s = 0.0;
                sqr = c;
            } else {
                s = -b0 / a00;
                sqr = b0 * s + c;
            }
        }
    } else {
        region = TriangleRegion::Edge12;
        let numer = a11 + b1 - a01 - b0;
        if numer <= 0.0 {
            s = 0.0;
            t = 1.0;
            sqr = a11 + 2.0 * b1 + c;
        } else {
            let denom = a00 - 2.0 * a01 + a11;
            if numer >= denom {
                s = 1.0;
                t = 0.0;
                sqr = a00 + 2.0 * b0 + c;
            } else {
                s = numer / denom;
                t = 1.0 - s;
                sqr = quadratic(s, t);
            }
        }
    }

    TriangleClosest {
        squared_distance: sqr.max(0.0),
        barycentric: [1.0 - s - t, s, t],
        region,
    }
}

/// Line to triangle
///
/// A line crossing the triangle is at distance zero. Otherwise, and for
/// lines parallel to the triangle's plane, the closest point lies on one
/// of the three edges.
pub fn line_triangle(line: &Line3, triangle: &Triangle) -> DistanceResult<f32, [f32; 3]> {
    let edge0 = triangle.edge0();
    let edge1 = triangle.edge1();
    let normal = edge0.cross(edge1).normalized();

    if normal.dot(line.direction).abs() > EPSILON {
        // Solve v0 + b1 * e0 + b2 * e1 = origin + t * direction in the
        // plane orthogonal to the line direction
        let diff = line.origin - triangle.v0();
        let (u, v) = line.direction.orthonormal_basis();
        let (ud_e0, ud_e1, ud_diff) = (u.dot(edge0), u.dot(edge1), u.dot(diff));
        let (vd_e0, vd_e1, vd_diff) = (v.dot(edge0), v.dot(edge1), v.dot(diff));
        let inv_det = 1.0 / (ud_e0 * vd_e1 - ud_e1 * vd_e0);

        let b1 = (vd_e1 * ud_diff - ud_e1 * vd_diff) * inv_det;
        let b2 = (ud_e0 * vd_diff - vd_e0 * ud_diff) * inv_det;
        let b0 = 1.0 - b1 - b2;

        if b0 >= 0.0 && b1 >= 0.0 && b2 >= 0.0 {
            let t = b1 * line.direction.dot(edge0) + b2 * line.direction.dot(edge1) - line.direction.dot(diff);
            return DistanceResult::new(0.0, t, [b0, b1, b2]);
        }
    }

    let mut best = DistanceResult::new(f32::MAX, 0.0, [0.0; 3]);
    for (i0, i1) in [(2, 0), (0, 1), (1, 2)] {
        let edge = Segment3::from_endpoints(triangle.vertices[i0], triangle.vertices[i1]);
        let r = line_segment(line, &edge);
        if r.squared_distance < best.squared_distance {
            let mut bary = [0.0; 3];
            // weight of the end vertex grows from 0 at -extent to 1 at +extent
            let w1 = if edge.extent > 0.0 { (r.rhs + edge.extent) / (2.0 * edge.extent) } else { 0.0 };
            bary[i0] = 1.0 - w1;
            bary[i1] = w1;
            best = DistanceResult::new(r.squared_distance, r.lhs, bary);
        }
    }
    best
}

/// Ray to triangle
pub fn ray_triangle(ray: &Ray3, triangle: &Triangle) -> DistanceResult<f32, [f32; 3]> {
    let unclamped = line_triangle(&ray.line(), triangle);
    if unclamped.lhs >= 0.0 {
        return unclamped;
    }
    let resolved = closest_point_on_triangle(ray.origin, triangle);
    DistanceResult::new(resolved.squared_distance, 0.0, resolved.barycentric)
}

/// Segment to triangle
pub fn segment_triangle(segment: &Segment3, triangle: &Triangle) -> DistanceResult<f32, [f32; 3]> {
    let unclamped = line_triangle(&segment.line(), triangle);
    let s = unclamped.lhs.clamp(-segment.extent, segment.extent);
    if s == unclamped.lhs {
        return unclamped;
    }
    let resolved = closest_point_on_triangle(segment.point_at(s), triangle);
    DistanceResult::new(resolved.squared_distance, s, resolved.barycentric)
}

impl SquaredDistance<Triangle> for Vec3 {
    type LhsParam = ();
    type RhsParam = [f32; 3];

    fn squared_distance(&self, other: &Triangle) -> DistanceResult<(), [f32; 3]> {
        let closest = closest_point_on_triangle(*self, other);
        DistanceResult::new(closest.squared_distance, (), closest.barycentric)
    }
}

macro_rules! impl_triangle_query {
    ($($lhs:ty => $func:ident),* $(,)?) => {
        $(
            impl SquaredDistance<Triangle> for $lhs {
                type LhsParam = f32;
                type RhsParam = [f32; 3];

                #[inline]
                fn squared_distance(&self, other: &Triangle) -> DistanceResult<f32, [f32; 3]> {
                    $func(self, other)
                }
            }
        )*
    };
}

impl_triangle_query! {
    Line3 => line_triangle,
    Ray3 => ray_triangle,
    Segment3 => segment_triangle,
}

impl_reversed! {
    Vec3 => Triangle,
    Line3 => Triangle,
    Ray3 => Triangle,
    Segment3 => Triangle,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn bary_approx_eq(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b).all(|(&x, y)| approx_eq(x, y))
    }

    fn unit_triangle() -> Triangle {
        Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y)
    }

    #[test]
    fn test_point_above_interior() {
        let r = closest_point_on_triangle(Vec3::new(0.25, 0.25, 2.0), &unit_triangle());
        assert_eq!(r.region, TriangleRegion::Interior);
        assert!(approx_eq(r.squared_distance, 4.0));
        assert!(bary_approx_eq(r.barycentric, [0.5, 0.25, 0.25]));
    }

    #[test]
    fn test_all_seven_regions() {
        let tri = unit_triangle();
        let cases = [
            (Vec3::new(0.2, 0.2, 0.0), TriangleRegion::Interior, [0.6, 0.2, 0.2], 0.0),
            (Vec3::new(1.0, 1.0, 0.0), TriangleRegion::Edge12, [0.0, 0.5, 0.5], 0.5),
            (Vec3::new(-1.0, 2.5, 0.0), TriangleRegion::Vertex2, [0.0, 0.0, 1.0], 3.25),
            (Vec3::new(-1.0, 0.5, 0.0), TriangleRegion::Edge02, [0.5, 0.0, 0.5], 1.0),
            (Vec3::new(-1.0, -1.0, 0.0), TriangleRegion::Vertex0, [1.0, 0.0, 0.0], 2.0),
            (Vec3::new(0.5, -1.0, 0.0), TriangleRegion::Edge01, [0.5, 0.5, 0.0], 1.0),
            (Vec3::new(2.5, -1.0, 0.0), TriangleRegion::Vertex1, [0.0, 1.0, 0.0], 3.25),
        ];
        for (point, region, bary, sqr) in cases {
            let r = closest_point_on_triangle(point, &tri);
            assert_eq!(r.region, region, "region for {:?}", point);
            assert!(bary_approx_eq(r.barycentric, bary), "barycentric for {:?}: {:?}", point, r.barycentric);
            assert!(approx_eq(r.squared_distance, sqr), "distance for {:?}", point);
        }
    }

    #[test]
    fn test_region_index() {
        assert_eq!(TriangleRegion::Interior.index(), 0);
        assert_eq!(TriangleRegion::Vertex1.index(), 6);
    }

    #[test]
    fn test_outside_regions_clamp_to_vertices() {
        // beyond the v1 v2 edge but past its end
        let r = closest_point_on_triangle(Vec3::new(3.0, 0.1, 0.0), &unit_triangle());
        assert_eq!(r.region, TriangleRegion::Edge12);
        assert!(bary_approx_eq(r.barycentric, [0.0, 1.0, 0.0]));
        assert!(approx_eq(r.squared_distance, 4.01));

        let r = closest_point_on_triangle(Vec3::new(-0.5, 1.7, 0.0), &unit_triangle());
        assert_eq!(r.region, TriangleRegion::Vertex2);
        assert!(bary_approx_eq(r.barycentric, [0.0, 0.0, 1.0]));
        assert!(approx_eq(r.squared_distance, 0.74));
    }

    #[test]
    fn test_line_through_triangle() {
        let line = Line3::new(Vec3::new(0.25, 0.25, 5.0), -Vec3::Z);
        let r = line_triangle(&line, &unit_triangle());
        assert_eq!(r.squared_distance, 0.0);
        assert!(approx_eq(r.lhs, 5.0));
        assert!(bary_approx_eq(r.rhs, [0.5, 0.25, 0.25]));
    }

    #[test]
    fn test_line_missing_triangle() {
        // vertical line next to the v1 v2 edge
        let line = Line3::new(Vec3::new(1.0, 1.0, 0.0), Vec3::Z);
        let r = line_triangle(&line, &unit_triangle());
        assert!(approx_eq(r.squared_distance, 0.5));
        assert!(approx_eq(r.lhs, 0.0));
        assert!(bary_approx_eq(r.rhs, [0.0, 0.5, 0.5]));
    }

    #[test]
    fn test_parallel_line_above_triangle() {
        let line = Line3::new(Vec3::new(0.0, 0.25, 3.0), Vec3::X);
        let r = line_triangle(&line, &unit_triangle());
        assert!(approx_eq(r.squared_distance, 9.0));
    }

    #[test]
    fn test_ray_pointing_away() {
        let ray = Ray3::new(Vec3::new(0.25, 0.25, 2.0), Vec3::Z);
        let r = ray_triangle(&ray, &unit_triangle());
        assert_eq!(r.lhs, 0.0);
        assert!(approx_eq(r.squared_distance, 4.0));
    }

    #[test]
    fn test_segment_short_of_triangle() {
        let seg = Segment3::new(Vec3::new(0.25, 0.25, 3.0), -Vec3::Z, 1.0);
        let r = segment_triangle(&seg, &unit_triangle());
        assert_eq!(r.lhs, 1.0);
        assert!(approx_eq(r.squared_distance, 4.0));
        assert!(bary_approx_eq(r.rhs, [0.5, 0.25, 0.25]));
    }

    #[test]
    fn test_trait_both_orders() {
        let p = Vec3::new(2.0, -1.0, 0.0);
        let tri = unit_triangle();
        let a = p.squared_distance(&tri);
        let b = tri.squared_distance(&p);
        assert_eq!(a.squared_distance, b.squared_distance);
        assert_eq!(a.rhs, b.lhs);
    }
}
