//! Camera contract for frustum culling and a perspective camera
//!
//! The culler only needs six planes and the near-plane window, so any
//! camera type can take part by implementing [`FrustumSource`].

use rust3d_geometry::Plane;
use rust3d_math::{transform, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Index of each frustum plane in the array filled by
/// [`FrustumSource::extract_frustum_planes`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrustumPlane {
    Near = 0,
    Far = 1,
    Left = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

impl FrustumPlane {
    /// All planes in extraction order
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Near,
        FrustumPlane::Far,
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Top,
        FrustumPlane::Bottom,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Anything that can describe a view frustum
pub trait FrustumSource {
    /// Write the six world-space planes, normals pointing into the frustum,
    /// in [`FrustumPlane`] order
    fn extract_frustum_planes(&self, planes: &mut [Plane; 6]);

    /// Write `[near, far, left, right, bottom, top]`, the last four being
    /// the frustum window on the near plane
    fn copy_frustum_params(&self, params: &mut [f32; 6]);
}

/// Symmetric perspective camera
///
/// Looks down its local -Z axis with +Y up, like a right-handed view
/// space. Orientation is rebuilt from yaw (about world Y) and pitch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Full vertical field of view in radians
    pub fov_y: f32,
    /// Width over height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    orientation: Quat,
    yaw: f32,
    pitch: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0)
    }
}

impl PerspectiveCamera {
    /// Pitch limit that keeps the view away from the poles
    pub const PITCH_LIMIT: f32 = 1.5;

    /// Create a camera looking down -Z
    pub fn new(position: Vec3, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        debug_assert!(fov_y > 0.0 && fov_y < std::f32::consts::PI, "fov_y must be in (0, pi)");
        debug_assert!(aspect > 0.0, "aspect ratio must be positive");
        debug_assert!(0.0 < near && near < far, "expected 0 < near < far");
        Self {
            position,
            fov_y,
            aspect,
            near,
            far,
            orientation: Quat::IDENTITY,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Turn to face `target`
    ///
    /// Roll is always zero, so looking straight up or down clamps to
    /// [`Self::PITCH_LIMIT`].
    pub fn look_at(&mut self, target: Vec3) {
        let Ok(dir) = (target - self.position).try_normalized() else {
            return;
        };
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.yaw = (-dir.x).atan2(-dir.z);
        self.rebuild_orientation();
    }

    /// Mouse-look style rotation
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.rebuild_orientation();
    }

    /// Move along the camera's own axes
    pub fn move_local(&mut self, forward: f32, right: f32, up: f32) {
        self.position += self.forward() * forward + self.right() * right + self.up() * up;
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation.rotate(-Vec3::Z)
    }

    pub fn right(&self) -> Vec3 {
        self.orientation.rotate(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.orientation.rotate(Vec3::Y)
    }

    /// World to view transform
    pub fn view_matrix(&self) -> Mat4 {
        transform::look_at(self.position, self.position + self.forward(), self.up())
    }

    /// View to clip transform with the given depth range
    pub fn projection_matrix(&self, depth_min: f32, depth_max: f32) -> Mat4 {
        transform::perspective(self.aspect, self.fov_y, self.near, self.far, depth_min, depth_max)
    }

    /// Tangent of half the vertical field of view
    #[inline]
    fn half_tan(&self) -> f32 {
        (self.fov_y * 0.5).tan()
    }

    fn rebuild_orientation(&mut self) {
        let yaw = Quat::from_axis_angle(Vec3::Y, self.yaw);
        let pitch = Quat::from_axis_angle(Vec3::X, self.pitch);
        self.orientation = (yaw * pitch).normalize();
    }
}

impl FrustumSource for PerspectiveCamera {
    fn extract_frustum_planes(&self, planes: &mut [Plane; 6]) {
        let f = self.forward();
        let r = self.right();
        let u = self.up();
        let t = self.half_tan();
        let at = self.aspect * t;
        let p = self.position;

        // side planes all pass through the eye
        let side = |n: Vec3| Plane::from_point_normal(p, n.normalized());

        planes[FrustumPlane::Near.index()] = Plane::new(f, -f.dot(p) - self.near);
        planes[FrustumPlane::Far.index()] = Plane::new(-f, f.dot(p) + self.far);
        planes[FrustumPlane::Left.index()] = side(f * at + r);
        planes[FrustumPlane::Right.index()] = side(f * at - r);
        planes[FrustumPlane::Top.index()] = side(f * t - u);
        planes[FrustumPlane::Bottom.index()] = side(f * t + u);
    }

    fn copy_frustum_params(&self, params: &mut [f32; 6]) {
        let top = self.near * self.half_tan();
        let right = top * self.aspect;
        *params = [self.near, self.far, -right, right, -top, top];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn planes_of(camera: &PerspectiveCamera) -> [Plane; 6] {
        let mut planes = [Plane::default(); 6];
        camera.extract_frustum_planes(&mut planes);
        planes
    }

    #[test]
    fn test_default_axes() {
        let camera = PerspectiveCamera::default();
        assert!(vec_approx_eq(camera.forward(), -Vec3::Z));
        assert!(vec_approx_eq(camera.right(), Vec3::X));
        assert!(vec_approx_eq(camera.up(), Vec3::Y));
    }

    #[test]
    fn test_look_at_faces_target() {
        let mut camera = PerspectiveCamera::new(Vec3::ZERO, 1.0, 1.0, 0.1, 10.0);
        camera.look_at(Vec3::new(3.0, 0.0, 0.0));
        assert!(vec_approx_eq(camera.forward(), Vec3::X));
        camera.look_at(Vec3::new(0.0, 1.0, -1.0));
        assert!(vec_approx_eq(camera.forward(), Vec3::new(0.0, 1.0, -1.0).normalized()));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = PerspectiveCamera::default();
        camera.rotate(0.0, 10.0);
        assert!(camera.forward().y < 1.0);
        assert!(approx_eq(camera.forward().y, PerspectiveCamera::PITCH_LIMIT.sin()));
    }

    #[test]
    fn test_frustum_params() {
        let camera = PerspectiveCamera::new(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 2.0, 1.0, 50.0);
        let mut params = [0.0; 6];
        camera.copy_frustum_params(&mut params);
        assert!(approx_eq(params[0], 1.0));
        assert!(approx_eq(params[1], 50.0));
        assert!(approx_eq(params[2], -2.0));
        assert!(approx_eq(params[3], 2.0));
        assert!(approx_eq(params[4], -1.0));
        assert!(approx_eq(params[5], 1.0));
    }

    #[test]
    fn test_planes_face_inward() {
        let camera = PerspectiveCamera::new(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let planes = planes_of(&camera);
        let inside = Vec3::new(0.0, 0.0, -10.0);
        for plane in &planes {
            assert!(plane.signed_distance(inside) > 0.0);
        }

        let left = planes[FrustumPlane::Left.index()];
        assert!(vec_approx_eq(left.normal, Vec3::new(1.0, 0.0, -1.0).normalized()));
        assert!(approx_eq(left.offset, 0.0));
        // 90 degree fov: the edge ray runs at 45 degrees
        assert!(approx_eq(left.signed_distance(Vec3::new(-5.0, 0.0, -5.0)), 0.0));
    }

    #[test]
    fn test_near_and_far_planes() {
        let camera = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 1.0, 1.0, 20.0);
        let planes = planes_of(&camera);
        let near = planes[FrustumPlane::Near.index()];
        let far = planes[FrustumPlane::Far.index()];
        assert!(approx_eq(near.signed_distance(Vec3::new(0.0, 0.0, 4.0)), 0.0));
        assert!(approx_eq(far.signed_distance(Vec3::new(0.0, 0.0, -15.0)), 0.0));
        assert!(near.signed_distance(Vec3::new(0.0, 0.0, 4.5)) < 0.0);
        assert!(far.signed_distance(Vec3::new(0.0, 0.0, -16.0)) < 0.0);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let mut camera = PerspectiveCamera::new(Vec3::new(1.0, 2.0, 3.0), 1.0, 1.0, 0.1, 10.0);
        camera.rotate(0.3, -0.2);
        let view = camera.view_matrix();
        assert!(vec_approx_eq(view.transform_point(camera.position), Vec3::ZERO));
        let ahead = camera.position + camera.forward() * 2.0;
        assert!(vec_approx_eq(view.transform_point(ahead), Vec3::new(0.0, 0.0, -2.0)));
    }
}
