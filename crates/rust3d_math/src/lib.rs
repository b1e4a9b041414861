//! 3D Mathematics Library
//!
//! Vector, matrix and quaternion algebra for the rust3d geometry kernel.
//!
//! ## Core Types
//!
//! - [`Vec2`], [`Vec3`], [`Vec4`] - fixed-size vectors
//! - [`VecN`] - vector with a runtime dimension
//! - [`Mat2x3`] - 2D affine transform
//! - [`Mat3`], [`Mat4`] - square matrices (row-major, 1-based accessors)
//! - [`MatN`] - matrix with runtime dimensions
//! - [`Quat`] - rotation quaternion
//!
//! Projection and view builders live in [`transform`]. Every tolerant
//! comparison in the workspace goes through [`EPSILON`].

pub mod scalar;
mod error;
mod vec2;
mod vec3;
mod vec4;
mod vecn;
mod mat2x3;
mod mat3;
pub mod mat4;
mod matn;
mod quat;
pub mod transform;

pub use scalar::EPSILON;
pub use error::MathError;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use vecn::VecN;
pub use mat2x3::Mat2x3;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use matn::MatN;
pub use quat::Quat;
