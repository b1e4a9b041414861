//! Transform and projection builders
//!
//! Free functions producing [`Mat4`] values. All matrices act on column
//! vectors (`M * v`), so in [`compose`] the transform applied last is
//! the leftmost argument.
//!
//! View space is right-handed with the camera looking down `-z`. The
//! projection builders take the clip-space depth range explicitly:
//! `(-1, 1)` gives the OpenGL convention, `(0, 1)` the Direct3D/Vulkan one.

use crate::{Mat3, Mat4, Vec3, Vec4};

/// Multiply two 4x4 matrices: result = a * b
///
/// This applies b first, then a.
#[inline]
pub fn compose(a: &Mat4, b: &Mat4) -> Mat4 {
    *a * *b
}

/// Translation matrix
#[inline]
pub fn translation(t: Vec3) -> Mat4 {
    Mat4::translation(t)
}

/// Non-uniform scaling matrix
#[inline]
pub fn scaling(s: Vec3) -> Mat4 {
    Mat4::scaling(s)
}

/// Rotation of `angle` radians about a unit `axis`
#[inline]
pub fn rotation_axis(axis: Vec3, angle: f32) -> Mat4 {
    Mat4::rotation_axis(axis, angle)
}

/// Right-handed view matrix looking from `eye` towards `target`
///
/// `up` must not be parallel to the viewing direction.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let forward = (target - eye).normalized();
    let right = forward.cross(up).normalized();
    let cam_up = right.cross(forward);
    let rotation = Mat3::from_rows(right, cam_up, -forward);
    Mat4::from_rotation_translation(&rotation, -(rotation * eye))
}

/// Perspective projection
///
/// `fov_y` is the full vertical field of view in radians. View-space
/// depths `-near` and `-far` map to `depth_min` and `depth_max` after
/// the perspective divide; clip `w` is the view-space distance `-z`.
pub fn perspective(aspect: f32, fov_y: f32, near: f32, far: f32, depth_min: f32, depth_max: f32) -> Mat4 {
    debug_assert!(aspect > 0.0, "aspect ratio must be positive");
    debug_assert!(0.0 < near && near < far, "expected 0 < near < far");
    let focal = 1.0 / (fov_y * 0.5).tan();
    let range = far - near;
    let a = (depth_min * near - depth_max * far) / range;
    let b = near * far * (depth_min - depth_max) / range;
    Mat4::new([
        focal / aspect, 0.0, 0.0, 0.0,
        0.0, focal, 0.0, 0.0,
        0.0, 0.0, a, b,
        0.0, 0.0, -1.0, 0.0,
    ])
}

/// Perspective projection whose near plane is replaced by `clip_plane`
///
/// `clip_plane` is given in view space as `(a, b, c, d)` with
/// `a*x + b*y + c*z + d = 0`, and the camera must lie on its negative
/// side. Points on the plane map to `depth_min`; the far plane is
/// skewed to keep depth monotonic over the frustum.
#[allow(clippy::too_many_arguments)]
pub fn perspective_oblique(
    aspect: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    depth_min: f32,
    depth_max: f32,
    clip_plane: Vec4,
) -> Mat4 {
    let mut m = perspective(aspect, fov_y, near, far, depth_min, depth_max);
    // View-space corner of the frustum opposite the clip plane
    let corner = Vec4::new(clip_plane.x.signum(), clip_plane.y.signum(), depth_max, 1.0);
    let q = m.inverse() * corner;
    let scale = (depth_max - depth_min) / clip_plane.dot(q);
    m.set_row(3, clip_plane * scale + m.row(4) * depth_min);
    m
}

/// Orthographic projection of the box `[left, right] x [bottom, top]`
/// between view-space depths `-near` and `-far`
#[allow(clippy::too_many_arguments)]
pub fn orthographic(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
    depth_min: f32,
    depth_max: f32,
) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let a = (depth_min - depth_max) / (far - near);
    Mat4::new([
        2.0 / width, 0.0, 0.0, -(right + left) / width,
        0.0, 2.0 / height, 0.0, -(top + bottom) / height,
        0.0, 0.0, a, depth_min + a * near,
        0.0, 0.0, 0.0, 1.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn ndc_depth(m: &Mat4, view_z: f32) -> f32 {
        m.transform_homogeneous_point(Vec3::new(0.0, 0.0, view_z)).z
    }

    #[test]
    fn test_perspective_gl_depth_range() {
        let m = perspective(1.5, FRAC_PI_2, 0.1, 100.0, -1.0, 1.0);
        assert!((ndc_depth(&m, -0.1) + 1.0).abs() < EPSILON);
        assert!((ndc_depth(&m, -100.0) - 1.0).abs() < 0.001);
        // clip w is the view distance
        let clip = m * Vec4::new(0.0, 0.0, -7.0, 1.0);
        assert!((clip.w - 7.0).abs() < EPSILON);
    }

    #[test]
    fn test_perspective_zero_to_one_depth_range() {
        let m = perspective(1.0, 1.0, 1.0, 10.0, 0.0, 1.0);
        assert!(ndc_depth(&m, -1.0).abs() < EPSILON);
        assert!((ndc_depth(&m, -10.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_perspective_edge_of_fov() {
        let m = perspective(1.0, FRAC_PI_2, 1.0, 10.0, -1.0, 1.0);
        // 45 degrees up maps to the top of the viewport
        let p = m.transform_homogeneous_point(Vec3::new(0.0, 5.0, -5.0));
        assert!((p.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_oblique_plane_maps_to_depth_min() {
        // plane z = -2, normal pointing away from the camera
        let plane = Vec4::new(0.0, 0.0, -1.0, -2.0);
        let m = perspective_oblique(1.0, FRAC_PI_2, 0.5, 50.0, -1.0, 1.0, plane);
        for p in [Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.5, -0.3, -2.0)] {
            let ndc = m.transform_homogeneous_point(p);
            assert!((ndc.z + 1.0).abs() < 0.001);
        }
        // x and y are untouched
        let plain = perspective(1.0, FRAC_PI_2, 0.5, 50.0, -1.0, 1.0);
        assert_eq!(m.row(1), plain.row(1));
        assert_eq!(m.row(4), plain.row(4));
    }

    #[test]
    fn test_orthographic() {
        let m = orthographic(-2.0, 2.0, -1.0, 1.0, 1.0, 11.0, 0.0, 1.0);
        let near_corner = m.transform_affine_point(Vec3::new(2.0, 1.0, -1.0));
        assert!(near_corner.approx_eq(Vec3::new(1.0, 1.0, 0.0)));
        let far_center = m.transform_affine_point(Vec3::new(0.0, 0.0, -11.0));
        assert!((far_center.z - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_look_at() {
        let view = look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let p = view.transform_affine_point(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -5.0)).length() < EPSILON);
        let side = look_at(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);
        // looking down -x, world +z is to the camera's left
        let q = side.transform_affine_point(Vec3::new(0.0, 0.0, 1.0));
        assert!((q - Vec3::new(-1.0, 0.0, -3.0)).length() < EPSILON);
    }

    #[test]
    fn test_compose_order() {
        let m = compose(&translation(Vec3::X), &scaling(Vec3::splat(2.0)));
        // scale first, then translate
        assert!(m.transform_affine_point(Vec3::X).approx_eq(Vec3::new(3.0, 0.0, 0.0)));
    }
}
