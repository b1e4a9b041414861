//! Plane culling for rust3d
//!
//! This crate provides:
//! - The [`FrustumSource`] camera contract and a [`PerspectiveCamera`]
//! - Per-volume plane rejection through [`BoundedVolume`]
//! - A [`Culler`] holding the camera frustum plus a stack of user planes

pub mod camera;
pub mod culler;
pub mod volume;

// Re-export commonly used types
pub use camera::{FrustumPlane, FrustumSource, PerspectiveCamera};
pub use culler::{Culler, PlaneMask, FRUSTUM_PLANE_COUNT, MAX_PLANES};
pub use volume::{cull_object, BoundedVolume};
