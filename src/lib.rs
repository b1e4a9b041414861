//! rust3d - geometry kernel
//!
//! Re-exports the workspace crates and hosts the configuration used by
//! the `rust3d` probe binary.

pub mod config;

pub use rust3d_cull as cull;
pub use rust3d_geometry as geometry;
pub use rust3d_math as math;
