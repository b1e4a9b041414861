//! 3x3 matrix
//!
//! Row-major storage, column vectors multiplied on the right (`M * v`).
//! `get`/`set`/`row`/`column` take 1-based indices: `get(1, 1)` is the
//! top-left element `a11`.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::{scalar, MathError, Vec3};

/// 3x3 matrix of reals
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat3 {
    /// Row-major elements: `elements[(row - 1) * 3 + (col - 1)]`
    pub elements: [f32; 9],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix
    pub const ZERO: Self = Self { elements: [0.0; 9] };

    /// Create a matrix from its row-major elements
    #[inline]
    pub const fn new(elements: [f32; 9]) -> Self {
        Self { elements }
    }

    /// Create a matrix from three row vectors
    pub fn from_rows(r1: Vec3, r2: Vec3, r3: Vec3) -> Self {
        Self::new([
            r1.x, r1.y, r1.z,
            r2.x, r2.y, r2.z,
            r3.x, r3.y, r3.z,
        ])
    }

    /// Create a matrix from three column vectors
    pub fn from_columns(c1: Vec3, c2: Vec3, c3: Vec3) -> Self {
        Self::from_rows(c1, c2, c3).transpose()
    }

    /// Diagonal matrix
    pub fn from_diagonal(d: Vec3) -> Self {
        Self::new([
            d.x, 0.0, 0.0,
            0.0, d.y, 0.0,
            0.0, 0.0, d.z,
        ])
    }

    #[inline]
    fn offset(row: usize, col: usize) -> usize {
        debug_assert!((1..=3).contains(&row) && (1..=3).contains(&col),
            "Mat3 index ({}, {}) out of 1..=3", row, col);
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

    /// Row `row` (1-based)
    pub fn row(&self, row: usize) -> Vec3 {
        Vec3::new(self.get(row, 1), self.get(row, 2), self.get(row, 3))
    }

    /// Column `col` (1-based)
    pub fn column(&self, col: usize) -> Vec3 {
        Vec3::new(self.get(1, col), self.get(2, col), self.get(3, col))
    }

    /// Transposed matrix
    pub fn transpose(&self) -> Self {
        let e = &self.elements;
        Self::new([
            e[0], e[3], e[6],
            e[1], e[4], e[7],
            e[2], e[5], e[8],
        ])
    }

    /// Determinant
    pub fn determinant(&self) -> f32 {
        let e = &self.elements;
        e[0] * (e[4] * e[8] - e[5] * e[7])
            - e[1] * (e[3] * e[8] - e[5] * e[6])
            + e[2] * (e[3] * e[7] - e[4] * e[6])
    }

    /// Transposed cofactor matrix (`inverse * determinant`)
    pub fn adjugate(&self) -> Self {
        let e = &self.elements;
        Self::new([
            e[4] * e[8] - e[5] * e[7],
            e[2] * e[7] - e[1] * e[8],
            e[1] * e[5] - e[2] * e[4],
            e[5] * e[6] - e[3] * e[8],
            e[0] * e[8] - e[2] * e[6],
            e[2] * e[3] - e[0] * e[5],
            e[3] * e[7] - e[4] * e[6],
            e[1] * e[6] - e[0] * e[7],
            e[0] * e[4] - e[1] * e[3],
        ])
    }

    /// Hadamard bound on the determinant, the smaller of the products of
    /// the row lengths and of the column lengths
    fn determinant_bound(&self) -> f32 {
        let rows: f32 = (1..=3).map(|i| self.row(i).length()).product();
        let cols: f32 = (1..=3).map(|i| self.column(i).length()).product();
        rows.min(cols)
    }

    /// Check whether the matrix can be inverted
    ///
    /// The determinant is compared relative to its Hadamard bound, so
    /// `Mat3::scaling(Vec3::splat(0.01))` is regular.
    #[inline]
    pub fn is_invertible(&self) -> bool {
        !scalar::is_negligible(self.determinant(), self.determinant_bound())
    }

    /// Inverse matrix
    ///
    /// The matrix must be invertible, see [`Mat3::is_invertible`].
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        debug_assert!(!scalar::is_negligible(det, self.determinant_bound()), "inverting a singular Mat3");
        self.adjugate() * (1.0 / det)
    }

    /// Inverse matrix, reporting singular matrices as an error
    pub fn try_inverse(&self) -> Result<Self, MathError> {
        let determinant = self.determinant();
        if scalar::is_negligible(determinant, self.determinant_bound()) {
            return Err(MathError::SingularMatrix { determinant });
        }
        Ok(self.adjugate() * (1.0 / determinant))
    }

    /// Apply the matrix to a vector (`M * v`)
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        *self * v
    }

    /// Rotation about the X axis (radians, counter-clockwise looking down the axis)
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            1.0, 0.0, 0.0,
            0.0, c, -s,
            0.0, s, c,
        ])
    }

    /// Rotation about the Y axis
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c, 0.0, s,
            0.0, 1.0, 0.0,
            -s, 0.0, c,
        ])
    }

    /// Rotation about the Z axis
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c, -s, 0.0,
            s, c, 0.0,
            0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about an arbitrary unit axis (Rodrigues)
    pub fn rotation_axis(axis: Vec3, angle: f32) -> Self {
        debug_assert!(axis.is_normalized(), "rotation axis must be unit length");
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let Vec3 { x, y, z } = axis;
        Self::new([
            t * x * x + c, t * x * y - s * z, t * x * z + s * y,
            t * x * y + s * z, t * y * y + c, t * y * z - s * x,
            t * x * z - s * y, t * y * z + s * x, t * z * z + c,
        ])
    }

    /// Non-uniform scaling
    #[inline]
    pub fn scaling(scale: Vec3) -> Self {
        Self::from_diagonal(scale)
    }

    /// Compare element-wise within [`scalar::EPSILON`]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_eps(other, scalar::EPSILON)
    }

    /// Compare element-wise within `epsilon`
    pub fn approx_eq_eps(&self, other: &Self, epsilon: f32) -> bool {
        self.elements.iter().zip(&other.elements).all(|(&a, &b)| scalar::approx_eq_eps(a, b, epsilon))
    }
}

impl std::ops::Mul for Mat3 {
    type Output = Self;

    #[allow(clippy::needless_range_loop)]
    fn mul(self, rhs: Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += self.elements[i * 3 + k] * rhs.elements[k * 3 + j];
                }
                result.elements[i * 3 + j] = sum;
            }
        }
        result
    }
}

impl std::ops::Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        Vec3::new(self.row(1).dot(v), self.row(2).dot(v), self.row(3).dot(v))
    }
}

impl std::ops::Mul<f32> for Mat3 {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        Self::new(self.elements.map(|e| e * factor))
    }
}

impl std::ops::Add for Mat3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        out.elements.iter_mut().zip(rhs.elements).for_each(|(a, b)| *a += b);
        out
    }
}

impl std::ops::Sub for Mat3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        out.elements.iter_mut().zip(rhs.elements).for_each(|(a, b)| *a -= b);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 0.0001
    }

    #[test]
    fn test_one_based_access() {
        let m = Mat3::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.get(1, 3), 3.0);
        assert_eq!(m.get(3, 1), 7.0);
        assert_eq!(m.row(2), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.column(2), Vec3::new(2.0, 5.0, 8.0));
    }

    #[test]
    fn test_set_matches_flat_storage() {
        let mut m = Mat3::ZERO;
        m.set(2, 3, 5.0);
        assert_eq!(m.elements[5], 5.0);
    }

    #[test]
    fn test_determinant_and_inverse() {
        let m = Mat3::new([2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 2.0]);
        // 2 * (6 - 2) - 0 + 1 * (1 - 3)
        assert!((m.determinant() - 6.0).abs() < 0.0001);
        assert!(m.is_invertible());
        let product = m * m.inverse();
        assert!(product.approx_eq_eps(&Mat3::IDENTITY, 0.0001));
    }

    #[test]
    fn test_singular_inverse_is_error() {
        let m = Mat3::new([1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0]);
        assert!(!m.is_invertible());
        assert!(matches!(m.try_inverse(), Err(MathError::SingularMatrix { .. })));
    }

    #[test]
    fn test_rotation_z() {
        let m = Mat3::rotation_z(FRAC_PI_2);
        assert!(vec_approx_eq(m * Vec3::X, Vec3::Y));
        assert!(vec_approx_eq(m * Vec3::Y, -Vec3::X));
    }

    #[test]
    fn test_rotation_axis_matches_principal_axes() {
        let angle = 0.7;
        assert!(Mat3::rotation_axis(Vec3::X, angle).approx_eq_eps(&Mat3::rotation_x(angle), 0.0001));
        assert!(Mat3::rotation_axis(Vec3::Y, angle).approx_eq_eps(&Mat3::rotation_y(angle), 0.0001));
        assert!(Mat3::rotation_axis(Vec3::Z, angle).approx_eq_eps(&Mat3::rotation_z(angle), 0.0001));
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let m = Mat3::rotation_axis(Vec3::new(1.0, 1.0, 1.0).normalized(), 1.1);
        assert!((m * m.transpose()).approx_eq_eps(&Mat3::IDENTITY, 0.0001));
        assert!((m.determinant() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_small_uniform_scale_is_invertible() {
        let m = Mat3::scaling(Vec3::splat(0.01));
        assert!(m.is_invertible());
        let inv = m.try_inverse().unwrap();
        assert!(inv.approx_eq_eps(&Mat3::scaling(Vec3::splat(100.0)), 0.01));
    }
}
