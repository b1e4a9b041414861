//! 2D affine transform stored as a 2x3 matrix
//!
//! The implicit third row is `(0, 0, 1)`. The left 2x2 block is the
//! linear part and the third column holds the translation.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::{scalar, MathError, Vec2};

/// 2D affine transform
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat2x3 {
    /// Row-major elements: `elements[(row - 1) * 3 + (col - 1)]`
    pub elements: [f32; 6],
}

impl Default for Mat2x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat2x3 {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
        ],
    };

    /// Create a transform from its row-major elements
    #[inline]
    pub const fn new(elements: [f32; 6]) -> Self {
        Self { elements }
    }

    #[inline]
    fn offset(row: usize, col: usize) -> usize {
        debug_assert!((1..=2).contains(&row) && (1..=3).contains(&col),
            "Mat2x3 index ({}, {}) out of range", row, col);
        (row - 1) * 3 + (col - 1)
    }

    /// Element at `row`, `col` (1-based)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.elements[Self::offset(row, col)]
    }

    /// Set the element at `row`, `col` (1-based)
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.elements[Self::offset(row, col)] = value;
    }

    /// Translation
    pub fn translation(t: Vec2) -> Self {
        Self::new([1.0, 0.0, t.x, 0.0, 1.0, t.y])
    }

    /// Counter-clockwise rotation about the origin (radians)
    pub fn rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([c, -s, 0.0, s, c, 0.0])
    }

    /// Non-uniform scaling about the origin
    pub fn scaling(scale: Vec2) -> Self {
        Self::new([scale.x, 0.0, 0.0, 0.0, scale.y, 0.0])
    }

    /// Translation part
    #[inline]
    pub fn translation_part(&self) -> Vec2 {
        Vec2::new(self.elements[2], self.elements[5])
    }

    /// Determinant of the linear part
    #[inline]
    pub fn determinant(&self) -> f32 {
        let e = &self.elements;
        e[0] * e[4] - e[1] * e[3]
    }

    /// Largest determinant the linear part could have given its row and
    /// column lengths
    fn determinant_bound(&self) -> f32 {
        let e = &self.elements;
        let rows = e[0].hypot(e[1]) * e[3].hypot(e[4]);
        let cols = e[0].hypot(e[3]) * e[1].hypot(e[4]);
        rows.min(cols)
    }

    /// Check whether the transform can be inverted
    ///
    /// The determinant is compared relative to the scale of the linear part.
    #[inline]
    pub fn is_invertible(&self) -> bool {
        !scalar::is_negligible(self.determinant(), self.determinant_bound())
    }

    fn inverse_with(&self, inv_det: f32) -> Self {
        let e = &self.elements;
        let (a, b, c, d) = (e[4] * inv_det, -e[1] * inv_det, -e[3] * inv_det, e[0] * inv_det);
        let (tx, ty) = (e[2], e[5]);
        Self::new([
            a, b, -(a * tx + b * ty),
            c, d, -(c * tx + d * ty),
        ])
    }

    /// Inverse transform
    ///
    /// The linear part must be invertible.
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        debug_assert!(!scalar::is_negligible(det, self.determinant_bound()), "inverting a singular Mat2x3");
        self.inverse_with(1.0 / det)
    }

    /// Inverse transform, reporting singular transforms as an error
    pub fn try_inverse(&self) -> Result<Self, MathError> {
        let determinant = self.determinant();
        if scalar::is_negligible(determinant, self.determinant_bound()) {
            return Err(MathError::SingularMatrix { determinant });
        }
        Ok(self.inverse_with(1.0 / determinant))
    }

    /// Transform a point (translation applied)
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        self.transform_vector(p) + self.translation_part()
    }

    /// Transform a direction (translation ignored)
    #[inline]
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        let e = &self.elements;
        Vec2::new(e[0] * v.x + e[1] * v.y, e[3] * v.x + e[4] * v.y)
    }

    /// Compare element-wise within `epsilon`
    pub fn approx_eq_eps(&self, other: &Self, epsilon: f32) -> bool {
        self.elements.iter().zip(&other.elements).all(|(&a, &b)| scalar::approx_eq_eps(a, b, epsilon))
    }
}

/// Compose two transforms: `a * b` applies `b` first, then `a`
impl std::ops::Mul for Mat2x3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = &self.elements;
        let b = &rhs.elements;
        Self::new([
            a[0] * b[0] + a[1] * b[3],
            a[0] * b[1] + a[1] * b[4],
            a[0] * b[2] + a[1] * b[5] + a[2],
            a[3] * b[0] + a[4] * b[3],
            a[3] * b[1] + a[4] * b[4],
            a[3] * b[2] + a[4] * b[5] + a[5],
        ])
    }
}
