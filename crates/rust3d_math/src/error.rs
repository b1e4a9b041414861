//! Error type for the checked API wrappers
//!
//! The kernel treats degenerate input as a programmer error and only
//! debug-asserts on it. Callers that would rather recover use the `try_*`
//! variants, which report the violated precondition through [`MathError`].

use thiserror::Error;

/// Precondition violations reported by the checked wrappers
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// A matrix with a (near) zero determinant was inverted
    #[error("matrix is singular (determinant {determinant})")]
    SingularMatrix {
        /// Determinant that failed the invertibility test
        determinant: f32,
    },
    /// A zero length vector or quaternion was normalized
    #[error("cannot normalize a zero length value")]
    ZeroLength,
    /// Two dynamic operands have incompatible sizes
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Size required by the operation
        expected: usize,
        /// Size that was supplied
        actual: usize,
    },
    /// A polygon was built from fewer than three vertices
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    /// A user plane slot outside of the writable range was addressed
    #[error("plane slot {0} is out of range")]
    PlaneSlotOutOfRange(usize),
    /// The culler was queried before a camera was bound
    #[error("no camera bound to the culler")]
    CameraNotBound,
}
