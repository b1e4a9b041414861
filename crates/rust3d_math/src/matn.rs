//! Dense matrix with dimensions chosen at runtime
//!
//! Row-major heap storage. Accessors are 1-based like the fixed-size
//! matrices. Mismatched dimensions are a precondition violation and
//! panic; the `try_*` variants report them instead.

use serde::{Serialize, Deserialize};

use crate::{scalar, MathError, VecN};

/// `rows x cols` matrix of reals
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatN {
    rows: usize,
    cols: usize,
    elements: Vec<f32>,
}

impl MatN {
    /// Zero matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, elements: vec![0.0; rows * cols] }
    }

    /// Square identity matrix
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size, size);
        for i in 0..size {
            m.elements[i * size + i] = 1.0;
        }
        m
    }

    /// Build a matrix from row-major elements
    pub fn from_row_major(rows: usize, cols: usize, elements: &[f32]) -> Self {
        assert_eq!(elements.len(), rows * cols, "MatN element count does not match {}x{}", rows, cols);
        Self { rows, cols, elements: elements.to_vec() }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True for square matrices
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major elements
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.elements
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row >= 1 && row <= self.rows && col >= 1 && col <= self.cols,
            "MatN index ({}, {}) out of {}x{}", row, col, self.rows, self.cols);
        (row - 1) * self.cols + (col - 1)
    }

    /// Element at `row`, `col` (1-based)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.elements[self.offset(row, col)]
    }

    /// Set the element at `row`, `col` (1-based)
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        let i = self.offset(row, col);
        self.elements[i] = value;
    }

    /// Row `row` (1-based)
    pub fn row(&self, row: usize) -> VecN {
        let start = (row - 1) * self.cols;
        VecN::from_slice(&self.elements[start..start + self.cols])
    }

    /// Column `col` (1-based)
    pub fn column(&self, col: usize) -> VecN {
        (1..=self.rows).map(|r| self.get(r, col)).collect::<Vec<_>>().into()
    }

    /// Transposed matrix
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.elements[c * self.rows + r] = self.elements[r * self.cols + c];
            }
        }
        out
    }

    /// Checked matrix product
    pub fn try_mul(&self, rhs: &Self) -> Result<Self, MathError> {
        if self.cols != rhs.rows {
            return Err(MathError::DimensionMismatch { expected: self.cols, actual: rhs.rows });
        }
        let mut out = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                out.elements[i * rhs.cols + j] = (0..self.cols)
                    .map(|k| self.elements[i * self.cols + k] * rhs.elements[k * rhs.cols + j])
                    .sum();
            }
        }
        Ok(out)
    }

    /// Checked matrix-vector product
    pub fn try_mul_vec(&self, v: &VecN) -> Result<VecN, MathError> {
        if self.cols != v.len() {
            return Err(MathError::DimensionMismatch { expected: self.cols, actual: v.len() });
        }
        let values = v.as_slice();
        Ok((0..self.rows)
            .map(|r| {
                let row = &self.elements[r * self.cols..(r + 1) * self.cols];
                row.iter().zip(values).map(|(a, b)| a * b).sum()
            })
            .collect::<Vec<f32>>()
            .into())
    }

    /// Determinant via LU decomposition with partial pivoting
    ///
    /// The matrix must be square.
    pub fn determinant(&self) -> f32 {
        assert!(self.is_square(), "determinant of a non-square {}x{} MatN", self.rows, self.cols);
        let n = self.rows;
        let mut lu = self.elements.clone();
        let mut det = 1.0;
        for k in 0..n {
            let pivot = (k..n)
                .max_by(|&a, &b| lu[a * n + k].abs().total_cmp(&lu[b * n + k].abs()))
                .unwrap_or(k);
            if lu[pivot * n + k] == 0.0 {
                return 0.0;
            }
            if pivot != k {
                for c in 0..n {
                    lu.swap(k * n + c, pivot * n + c);
                }
                det = -det;
            }
            let p = lu[k * n + k];
            det *= p;
            for r in (k + 1)..n {
                let factor = lu[r * n + k] / p;
                for c in k..n {
                    lu[r * n + c] -= factor * lu[k * n + c];
                }
            }
        }
        det
    }

    /// Hadamard bound on the determinant of a square matrix
    fn determinant_bound(&self) -> f32 {
        let n = self.rows;
        let rows: f32 = self
            .elements
            .chunks(n)
            .map(|row| row.iter().map(|v| v * v).sum::<f32>().sqrt())
            .product();
        let cols: f32 = (0..n)
            .map(|c| (0..n).map(|r| self.elements[r * n + c].powi(2)).sum::<f32>().sqrt())
            .product();
        rows.min(cols)
    }

    /// Check whether the matrix is square and can be inverted
    ///
    /// The determinant is compared relative to the scale of the matrix.
    pub fn is_invertible(&self) -> bool {
        self.is_square() && !scalar::is_negligible(self.determinant(), self.determinant_bound())
    }

    /// Inverse via Gauss-Jordan elimination with partial pivoting
    pub fn try_inverse(&self) -> Result<Self, MathError> {
        if !self.is_square() {
            return Err(MathError::DimensionMismatch { expected: self.rows, actual: self.cols });
        }
        let n = self.rows;
        let scale = self.elements.iter().fold(0.0f32, |m, v| m.max(v.abs()));
        let mut a = self.elements.clone();
        let mut inv = Self::identity(n).elements;
        for k in 0..n {
            let pivot = (k..n)
                .max_by(|&x, &y| a[x * n + k].abs().total_cmp(&a[y * n + k].abs()))
                .unwrap_or(k);
            let p = a[pivot * n + k];
            if scalar::is_negligible(p, scale) {
                return Err(MathError::SingularMatrix { determinant: 0.0 });
            }
            if pivot != k {
                for c in 0..n {
                    a.swap(k * n + c, pivot * n + c);
                    inv.swap(k * n + c, pivot * n + c);
                }
            }
            let p_inv = 1.0 / p;
            for c in 0..n {
                a[k * n + c] *= p_inv;
                inv[k * n + c] *= p_inv;
            }
            for r in (0..n).filter(|&r| r != k) {
                let factor = a[r * n + k];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..n {
                    a[r * n + c] -= factor * a[k * n + c];
                    inv[r * n + c] -= factor * inv[k * n + c];
                }
            }
        }
        Ok(Self { rows: n, cols: n, elements: inv })
    }

    /// Inverse matrix
    ///
    /// The matrix must be square and invertible.
    pub fn inverse(&self) -> Self {
        match self.try_inverse() {
            Ok(m) => m,
            Err(err) => panic!("MatN::inverse: {}", err),
        }
    }

    /// Compare element-wise within `epsilon`
    pub fn approx_eq_eps(&self, other: &Self, epsilon: f32) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.elements.iter().zip(&other.elements).all(|(&a, &b)| scalar::approx_eq_eps(a, b, epsilon))
    }
}

impl std::ops::Mul for &MatN {
    type Output = MatN;

    fn mul(self, rhs: &MatN) -> MatN {
        match self.try_mul(rhs) {
            Ok(m) => m,
            Err(err) => panic!("MatN product: {}", err),
        }
    }
}

impl std::ops::Mul<&VecN> for &MatN {
    type Output = VecN;

    fn mul(self, v: &VecN) -> VecN {
        match self.try_mul_vec(v) {
            Ok(out) => out,
            Err(err) => panic!("MatN * VecN: {}", err),
        }
    }
}
