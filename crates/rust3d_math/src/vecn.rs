//! N-dimensional vector with heap storage
//!
//! Element access through [`VecN::get`] and [`VecN::set`] is 1-based, the
//! same as the matrix accessors. [`VecN::as_slice`] exposes the plain
//! 0-based storage.

use serde::{Serialize, Deserialize};

use crate::{scalar, MathError};

/// Vector with a dimension chosen at runtime
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VecN {
    elements: Vec<f32>,
}

impl VecN {
    /// Zero vector of the given dimension
    pub fn zeros(len: usize) -> Self {
        Self { elements: vec![0.0; len] }
    }

    /// Build a vector from a slice of components
    pub fn from_slice(values: &[f32]) -> Self {
        Self { elements: values.to_vec() }
    }

    /// Number of components
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True for the 0-dimensional vector
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Component `index` (1-based)
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        debug_assert!(index >= 1 && index <= self.len(), "VecN index {} out of 1..={}", index, self.len());
        self.elements[index - 1]
    }

    /// Set component `index` (1-based)
    #[inline]
    pub fn set(&mut self, index: usize, value: f32) {
        debug_assert!(index >= 1 && index <= self.len(), "VecN index {} out of 1..={}", index, self.len());
        self.elements[index - 1] = value;
    }

    /// Components as a 0-based slice
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.elements
    }

    /// Components as a mutable 0-based slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.elements
    }

    /// Dot product
    ///
    /// Both vectors must have the same dimension.
    pub fn dot(&self, other: &Self) -> f32 {
        assert_eq!(self.len(), other.len(), "VecN dimension mismatch");
        self.elements.iter().zip(&other.elements).map(|(a, b)| a * b).sum()
    }

    /// Checked dot product
    pub fn try_dot(&self, other: &Self) -> Result<f32, MathError> {
        if self.len() != other.len() {
            return Err(MathError::DimensionMismatch { expected: self.len(), actual: other.len() });
        }
        Ok(self.dot(other))
    }

    /// Length squared
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude)
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalize to unit length
    ///
    /// Normalizing a zero vector is a precondition violation.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        debug_assert!(len > 0.0, "normalizing a zero length VecN");
        self.scaled(1.0 / len)
    }

    /// Normalize to unit length, reporting zero length vectors as an error
    pub fn try_normalized(&self) -> Result<Self, MathError> {
        let len = self.length();
        if len > scalar::EPSILON {
            Ok(self.scaled(1.0 / len))
        } else {
            Err(MathError::ZeroLength)
        }
    }

    /// Multiply every component by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self { elements: self.elements.iter().map(|v| v * factor).collect() }
    }

    fn zip_with(&self, other: &Self, op: impl Fn(f32, f32) -> f32) -> Self {
        assert_eq!(self.len(), other.len(), "VecN dimension mismatch");
        Self {
            elements: self.elements.iter().zip(&other.elements).map(|(&a, &b)| op(a, b)).collect(),
        }
    }

    /// Compare component-wise within [`scalar::EPSILON`]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.elements.iter().zip(&other.elements).all(|(&a, &b)| scalar::approx_eq(a, b))
    }
}

impl From<Vec<f32>> for VecN {
    fn from(elements: Vec<f32>) -> Self {
        Self { elements }
    }
}

impl std::ops::Add for &VecN {
    type Output = VecN;
    fn add(self, other: &VecN) -> VecN {
        self.zip_with(other, |a, b| a + b)
    }
}

impl std::ops::Sub for &VecN {
    type Output = VecN;
    fn sub(self, other: &VecN) -> VecN {
        self.zip_with(other, |a, b| a - b)
    }
}

impl std::ops::Mul<f32> for &VecN {
    type Output = VecN;
    fn mul(self, factor: f32) -> VecN {
        self.scaled(factor)
    }
}

impl std::ops::Div<f32> for &VecN {
    type Output = VecN;
    fn div(self, factor: f32) -> VecN {
        self.scaled(1.0 / factor)
    }
}

impl std::ops::Neg for &VecN {
    type Output = VecN;
    fn neg(self) -> VecN {
        self.scaled(-1.0)
    }
}
