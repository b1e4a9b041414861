//! 4x4 matrix for affine and projective transformations
//!
//! Row-major storage with column vectors multiplied on the right
//! (`M * v`), so translation lives in the fourth column (`a14, a24, a34`)
//! and `a * b` applies `b` first, then `a`.
//!
//! Element accessors are 1-based: `get(1, 4)` is the x translation.
//! GPU code that wants column-major arrays should go through
//! [`Mat4::to_cols_array_2d`].

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::{scalar, Mat3, MathError, Vec3, Vec4};

/// 4x4 matrix of reals
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    /// Row-major elements: `elements[(row - 1) * 4 + (col - 1)]`
    pub elements: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix
    pub const ZERO: Self = Self { elements: [0.0; 16] };

    /// Create a matrix from its row-major elements
    #[inline]
    pub const fn new(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Create a matrix from four row vectors
    pub fn from_rows(r1: Vec4, r2: Vec4, r3: Vec4, r4: Vec4) -> Self {
        Self::new([
            r1.x, r1.y, r1.z, r1.w,
            r2.x, r2.y, r2.z, r2.w,
            r3.x, r3.y, r3.z, r3.w,
            r4.x, r4.y, r4.z, r4.w,
        ])
    }

    /// Create a matrix from four column vectors
    pub fn from_columns(c1: Vec4, c2: Vec4, c3: Vec4, c4: Vec4) -> Self {
        Self::from_rows(c1, c2, c3, c4).transpose()
    }

    /// Embed a 3x3 linear transform, translation zero
    pub fn from_mat3(m: &Mat3) -> Self {
        Self::from_rotation_translation(m, Vec3::ZERO)
    }

    /// Affine matrix from a 3x3 linear part and a translation
    pub fn from_rotation_translation(m: &Mat3, translation: Vec3) -> Self {
        let e = &m.elements;
        Self::new([
            e[0], e[1], e[2], translation.x,
            e[3], e[4], e[5], translation.y,
            e[6], e[7], e[8], translation.z,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[inline]
    fn offset(row: usize, col: usize) -> usize {
        debug_assert!((1..=4).contains(&row) && (1..=4).contains(&col),
            "Mat4 index ({}, {}) out of 1..=4", row, col);
        (row - 1) * 4 + (col - 1)
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
    pub fn row(&self, row: usize) -> Vec4 {
        Vec4::new(self.get(row, 1), self.get(row, 2), self.get(row, 3), self.get(row, 4))
    }

    /// Column `col` (1-based)
    pub fn column(&self, col: usize) -> Vec4 {
        Vec4::new(self.get(1, col), self.get(2, col), self.get(3, col), self.get(4, col))
    }

    /// Replace row `row` (1-based)
    pub fn set_row(&mut self, row: usize, v: Vec4) {
        self.set(row, 1, v.x);
        self.set(row, 2, v.y);
        self.set(row, 3, v.z);
        self.set(row, 4, v.w);
    }

    /// Upper-left 3x3 linear part
    pub fn upper_left(&self) -> Mat3 {
        let e = &self.elements;
        Mat3::new([e[0], e[1], e[2], e[4], e[5], e[6], e[8], e[9], e[10]])
    }

    /// Translation part (fourth column)
    #[inline]
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.elements[3], self.elements[7], self.elements[11])
    }

    /// Transpose a matrix
    pub fn transpose(&self) -> Self {
        let e = &self.elements;
        Self::new([
            e[0], e[4], e[8], e[12],
            e[1], e[5], e[9], e[13],
            e[2], e[6], e[10], e[14],
            e[3], e[7], e[11], e[15],
        ])
    }

    /// Column-major nested array, the layout shaders expect
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.transpose().to_rows_array_2d()
    }

    /// Row-major nested array
    pub fn to_rows_array_2d(&self) -> [[f32; 4]; 4] {
        let e = &self.elements;
        [
            [e[0], e[1], e[2], e[3]],
            [e[4], e[5], e[6], e[7]],
            [e[8], e[9], e[10], e[11]],
            [e[12], e[13], e[14], e[15]],
        ]
    }

    // 2x2 sub-determinants of the top two and bottom two rows, shared by
    // the determinant and the inverse
    fn sub_determinants(&self) -> ([f32; 6], [f32; 6]) {
        let a = |r: usize, c: usize| self.elements[r * 4 + c];
        let s = [
            a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1),
            a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2),
            a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3),
            a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2),
            a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3),
            a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3),
        ];
        let c = [
            a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1),
            a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2),
            a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3),
            a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2),
            a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3),
            a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3),
        ];
        (s, c)
    }

    /// Determinant
    pub fn determinant(&self) -> f32 {
        let (s, c) = self.sub_determinants();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Hadamard bound on the determinant, the smaller of the products of
    /// the row lengths and of the column lengths
    fn determinant_bound(&self) -> f32 {
        let rows: f32 = (1..=4).map(|i| self.row(i).length()).product();
        let cols: f32 = (1..=4).map(|i| self.column(i).length()).product();
        rows.min(cols)
    }

    /// Check whether the matrix can be inverted
    ///
    /// The determinant is tested relative to the scale of the matrix, not
    /// against an absolute threshold.
    #[inline]
    pub fn is_invertible(&self) -> bool {
        !scalar::is_negligible(self.determinant(), self.determinant_bound())
    }

    fn inverse_with(&self, s: [f32; 6], c: [f32; 6], inv_det: f32) -> Self {
        let a = |r: usize, col: usize| self.elements[r * 4 + col];
        Self::new([
            (a(1, 1) * c[5] - a(1, 2) * c[4] + a(1, 3) * c[3]) * inv_det,
            (-a(0, 1) * c[5] + a(0, 2) * c[4] - a(0, 3) * c[3]) * inv_det,
            (a(3, 1) * s[5] - a(3, 2) * s[4] + a(3, 3) * s[3]) * inv_det,
            (-a(2, 1) * s[5] + a(2, 2) * s[4] - a(2, 3) * s[3]) * inv_det,
            (-a(1, 0) * c[5] + a(1, 2) * c[2] - a(1, 3) * c[1]) * inv_det,
            (a(0, 0) * c[5] - a(0, 2) * c[2] + a(0, 3) * c[1]) * inv_det,
            (-a(3, 0) * s[5] + a(3, 2) * s[2] - a(3, 3) * s[1]) * inv_det,
            (a(2, 0) * s[5] - a(2, 2) * s[2] + a(2, 3) * s[1]) * inv_det,
            (a(1, 0) * c[4] - a(1, 1) * c[2] + a(1, 3) * c[0]) * inv_det,
            (-a(0, 0) * c[4] + a(0, 1) * c[2] - a(0, 3) * c[0]) * inv_det,
            (a(3, 0) * s[4] - a(3, 1) * s[2] + a(3, 3) * s[0]) * inv_det,
            (-a(2, 0) * s[4] + a(2, 1) * s[2] - a(2, 3) * s[0]) * inv_det,
            (-a(1, 0) * c[3] + a(1, 1) * c[1] - a(1, 2) * c[0]) * inv_det,
            (a(0, 0) * c[3] - a(0, 1) * c[1] + a(0, 2) * c[0]) * inv_det,
            (-a(3, 0) * s[3] + a(3, 1) * s[1] - a(3, 2) * s[0]) * inv_det,
            (a(2, 0) * s[3] - a(2, 1) * s[1] + a(2, 2) * s[0]) * inv_det,
        ])
    }

    /// Inverse matrix
    ///
    /// The matrix must be invertible, see [`Mat4::is_invertible`].
    pub fn inverse(&self) -> Self {
        let (s, c) = self.sub_determinants();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        debug_assert!(!scalar::is_negligible(det, self.determinant_bound()), "inverting a singular Mat4");
        self.inverse_with(s, c, 1.0 / det)
    }

    /// Inverse matrix, reporting singular matrices as an error
    pub fn try_inverse(&self) -> Result<Self, MathError> {
        let determinant = self.determinant();
        if scalar::is_negligible(determinant, self.determinant_bound()) {
            return Err(MathError::SingularMatrix { determinant });
        }
        let (s, c) = self.sub_determinants();
        Ok(self.inverse_with(s, c, 1.0 / determinant))
    }

    /// Transform a direction; translation is ignored
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let e = &self.elements;
        Vec3::new(
            e[0] * v.x + e[1] * v.y + e[2] * v.z,
            e[4] * v.x + e[5] * v.y + e[6] * v.z,
            e[8] * v.x + e[9] * v.y + e[10] * v.z,
        )
    }

    /// Transform a point as `(x, y, z, 1)` and drop the resulting w
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_point(p)).xyz()
    }

    /// Transform a point with the top three rows only, assuming the
    /// bottom row is `(0, 0, 0, 1)`
    pub fn transform_affine_point(&self, p: Vec3) -> Vec3 {
        self.transform_vector(p) + self.translation_part()
    }

    /// Transform a point as `(x, y, z, 1)` and perform the perspective divide
    pub fn transform_homogeneous_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_point(p)).project()
    }

    /// Translation matrix
    pub fn translation(t: Vec3) -> Self {
        Self::new([
            1.0, 0.0, 0.0, t.x,
            0.0, 1.0, 0.0, t.y,
            0.0, 0.0, 1.0, t.z,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Non-uniform scaling matrix
    pub fn scaling(scale: Vec3) -> Self {
        Self::from_mat3(&Mat3::scaling(scale))
    }

    /// Rotation about the X axis
    pub fn rotation_x(angle: f32) -> Self {
        Self::from_mat3(&Mat3::rotation_x(angle))
    }

    /// Rotation about the Y axis
    pub fn rotation_y(angle: f32) -> Self {
        Self::from_mat3(&Mat3::rotation_y(angle))
    }

    /// Rotation about the Z axis
    pub fn rotation_z(angle: f32) -> Self {
        Self::from_mat3(&Mat3::rotation_z(angle))
    }

    /// Rotation about an arbitrary unit axis
    pub fn rotation_axis(axis: Vec3, angle: f32) -> Self {
        Self::from_mat3(&Mat3::rotation_axis(axis, angle))
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

/// Multiply two 4x4 matrices: result = a * b
///
/// This applies b first, then a.
impl std::ops::Mul for Mat4 {
    type Output = Self;

    #[allow(clippy::needless_range_loop)]
    fn mul(self, rhs: Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.elements[i * 4 + k] * rhs.elements[k * 4 + j];
                }
                result.elements[i * 4 + j] = sum;
            }
        }
        result
    }
}

/// Transform a Vec4 by a 4x4 matrix: result = M * v
impl std::ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        Vec4::new(self.row(1).dot(v), self.row(2).dot(v), self.row(3).dot(v), self.row(4).dot(v))
    }
}

impl std::ops::Mul<f32> for Mat4 {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        Self::new(self.elements.map(|e| e * factor))
    }
}
