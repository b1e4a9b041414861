//! Closest-point and squared-distance queries
//!
//! Every query returns a [`DistanceResult`] carrying the squared distance
//! and the parametric location of the closest point on each operand:
//!
//! | operand | parameter |
//! |---------|-----------|
//! | point | `()` |
//! | line, ray, segment | `f32` along the direction (segments measure from the center) |
//! | triangle | `[f32; 3]` barycentric weights for `v0, v1, v2` |
//! | rectangle | `Vec2` along its two axes |
//! | AABB | `Vec3` closest point |
//! | OBB | `Vec3` local coordinates |
//! | plane | `()` |
//!
//! Pairs are implemented in both argument orders, so
//! `squared_distance(&a, &b)` and `squared_distance(&b, &a)` agree with
//! swapped parameters.
//!
//! Line, ray and segment pairs all reduce to the line-line solution: one
//! operand is treated as its supporting line, the unconstrained minimum
//! is found, the parameter is clamped back into the finite range and the
//! query is re-solved against a point when clamping happened. Nearly
//! parallel inputs take a degenerate branch that pairs one origin with
//! its projection. The distance is still right there, the chosen point
//! pair is just one of many.

mod linear;
mod point;
mod triangle;

pub use linear::{line_line, line_ray, line_segment, ray_ray, ray_segment, segment_segment};
pub use point::{
    point_aabb, point_line, point_line2, point_obb, point_plane, point_ray, point_ray2, point_rectangle,
    point_segment, point_segment2,
};
pub use triangle::{
    closest_point_on_triangle, line_triangle, ray_triangle, segment_triangle, TriangleClosest, TriangleRegion,
};

/// Result of a closest-point query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceResult<L, R> {
    /// Squared distance between the closest points, never negative
    pub squared_distance: f32,
    /// Closest-point parameter on the left operand
    pub lhs: L,
    /// Closest-point parameter on the right operand
    pub rhs: R,
}

impl<L, R> DistanceResult<L, R> {
    /// Negative values from rounding are clamped to zero
    #[inline]
    pub fn new(squared_distance: f32, lhs: L, rhs: R) -> Self {
        Self { squared_distance: squared_distance.max(0.0), lhs, rhs }
    }

    /// Euclidean distance
    #[inline]
    pub fn distance(&self) -> f32 {
        self.squared_distance.sqrt()
    }

    /// Same result with the operands exchanged
    #[inline]
    pub fn swap(self) -> DistanceResult<R, L> {
        DistanceResult { squared_distance: self.squared_distance, lhs: self.rhs, rhs: self.lhs }
    }
}

/// Squared distance between `self` and a primitive of type `Rhs`
pub trait SquaredDistance<Rhs> {
    /// Parameter type locating the closest point on `self`
    type LhsParam;
    /// Parameter type locating the closest point on `Rhs`
    type RhsParam;

    fn squared_distance(&self, other: &Rhs) -> DistanceResult<Self::LhsParam, Self::RhsParam>;
}

/// Squared distance between two primitives, see [`SquaredDistance`]
#[inline]
pub fn squared_distance<A, B>(a: &A, b: &B) -> DistanceResult<A::LhsParam, A::RhsParam>
where
    A: SquaredDistance<B>,
{
    a.squared_distance(b)
}

/// Implement `SquaredDistance<$a> for $b` by swapping an existing
/// `SquaredDistance<$b> for $a`
macro_rules! impl_reversed {
    ($($a:ty => $b:ty),* $(,)?) => {
        $(
            impl SquaredDistance<$a> for $b {
                type LhsParam = <$a as SquaredDistance<$b>>::RhsParam;
                type RhsParam = <$a as SquaredDistance<$b>>::LhsParam;

                #[inline]
                fn squared_distance(&self, other: &$a) -> DistanceResult<Self::LhsParam, Self::RhsParam> {
                    other.squared_distance(self).swap()
                }
            }
        )*
    };
}

pub(crate) use impl_reversed;
