//! Multi-plane culler
//!
//! Slots 0..6 hold the frustum planes of the bound camera and are always
//! active. Slots 6..32 form a stack of user planes. A volume is culled
//! as soon as one active plane rejects it; the culler never tries to
//! prove a volume is visible.

use bitflags::bitflags;
use rust3d_geometry::Plane;
use rust3d_math::MathError;

use crate::camera::FrustumSource;
use crate::volume::BoundedVolume;

/// Total plane slots
pub const MAX_PLANES: usize = 32;
/// Slots reserved for the camera frustum
pub const FRUSTUM_PLANE_COUNT: usize = 6;

bitflags! {
    /// Active plane slots, bit `i` for slot `i`
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PlaneMask: u32 {
        const NEAR = 1 << 0;
        const FAR = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const TOP = 1 << 4;
        const BOTTOM = 1 << 5;
        /// The six camera planes
        const FRUSTUM = 0x3F;
        /// The 26 user slots
        const USER = !0x3F;
    }
}

impl PlaneMask {
    /// Mask with only slot `id` set
    #[inline]
    pub fn slot(id: usize) -> Self {
        debug_assert!(id < MAX_PLANES, "plane slot {id} out of range");
        Self::from_bits_retain(1 << id)
    }
}

/// Checks that `id` names a user slot
fn user_slot(id: usize) -> Result<usize, MathError> {
    if (FRUSTUM_PLANE_COUNT..MAX_PLANES).contains(&id) {
        Ok(id)
    } else {
        Err(MathError::PlaneSlotOutOfRange(id))
    }
}

/// Plane-set culler bound to one camera at a time
///
/// The camera is sampled by [`Culler::set_camera`]; call it again after
/// the camera moves.
#[derive(Clone, Debug)]
pub struct Culler {
    planes: [Plane; MAX_PLANES],
    /// Slots in use, including the frustum slots
    count: usize,
    active: PlaneMask,
    frustum_params: [f32; 6],
    camera_bound: bool,
}

impl Default for Culler {
    fn default() -> Self {
        Self::new()
    }
}

impl Culler {
    /// Create a culler with no camera bound
    pub fn new() -> Self {
        Self {
            planes: [Plane::default(); MAX_PLANES],
            count: FRUSTUM_PLANE_COUNT,
            active: PlaneMask::empty(),
            frustum_params: [0.0; 6],
            camera_bound: false,
        }
    }

    /// Copy the frustum of `camera` into the first six slots
    ///
    /// User planes are kept.
    pub fn set_camera<C: FrustumSource + ?Sized>(&mut self, camera: &C) {
        let mut frustum = [Plane::default(); FRUSTUM_PLANE_COUNT];
        camera.extract_frustum_planes(&mut frustum);
        self.planes[..FRUSTUM_PLANE_COUNT].copy_from_slice(&frustum);
        camera.copy_frustum_params(&mut self.frustum_params);
        self.active |= PlaneMask::FRUSTUM;
        if !self.camera_bound {
            log::debug!("culler bound to camera");
        }
        self.camera_bound = true;
    }

    /// True once a camera has been bound
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.camera_bound
    }

    /// Push an active user plane, returning its slot
    ///
    /// Returns `None` when all slots are taken.
    pub fn push_plane(&mut self, plane: Plane) -> Option<usize> {
        if self.count == MAX_PLANES {
            log::warn!("culler plane stack is full ({MAX_PLANES} planes), plane ignored");
            return None;
        }
        let id = self.count;
        self.planes[id] = plane;
        self.active |= PlaneMask::slot(id);
        self.count += 1;
        log::debug!("pushed culling plane into slot {id}");
        Some(id)
    }

    /// Remove the most recently pushed user plane
    ///
    /// Does nothing when only the frustum planes remain.
    pub fn pop_plane(&mut self) -> Option<Plane> {
        if self.count == FRUSTUM_PLANE_COUNT {
            return None;
        }
        self.count -= 1;
        let id = self.count;
        self.active.remove(PlaneMask::slot(id));
        log::debug!("popped culling plane from slot {id}");
        Some(self.planes[id])
    }

    /// Overwrite user slot `id` and activate it
    ///
    /// Writing past the top of the stack grows it; skipped slots stay
    /// inactive.
    pub fn set_plane(&mut self, id: usize, plane: Plane) {
        debug_assert!(user_slot(id).is_ok(), "plane slot {id} is not a user slot");
        self.planes[id] = plane;
        self.active |= PlaneMask::slot(id);
        if id >= self.count {
            for skipped in self.count..id {
                self.planes[skipped] = Plane::default();
            }
            self.count = id + 1;
        }
    }

    /// Checked [`Culler::set_plane`]
    pub fn try_set_plane(&mut self, id: usize, plane: Plane) -> Result<(), MathError> {
        self.set_plane(user_slot(id)?, plane);
        Ok(())
    }

    /// Enable or disable user slot `id`
    ///
    /// Slots above the top of the stack hold no plane and are left alone.
    pub fn toggle_plane_state(&mut self, id: usize, on: bool) {
        debug_assert!(user_slot(id).is_ok(), "plane slot {id} is not a user slot");
        if id >= self.count {
            log::warn!("plane slot {id} is unused, toggle ignored");
            return;
        }
        self.active.set(PlaneMask::slot(id), on);
    }

    /// Checked [`Culler::toggle_plane_state`]
    pub fn try_toggle_plane_state(&mut self, id: usize, on: bool) -> Result<(), MathError> {
        self.toggle_plane_state(user_slot(id)?, on);
        Ok(())
    }

    /// Drop every user plane
    pub fn clear(&mut self) {
        self.count = FRUSTUM_PLANE_COUNT;
        self.active &= PlaneMask::FRUSTUM;
        log::debug!("culler cleared to frustum planes");
    }

    /// True when some active plane proves `volume` is outside
    ///
    /// Without a bound camera nothing is culled.
    pub fn cull<V: BoundedVolume + ?Sized>(&self, volume: &V) -> bool {
        if !self.camera_bound {
            log::warn!("culling without a camera, volume kept");
            return false;
        }
        for id in 0..self.count {
            if !self.active.contains(PlaneMask::slot(id)) {
                continue;
            }
            if volume.cull(&self.planes[id]) {
                log::trace!("volume rejected by plane {id}");
                return true;
            }
        }
        false
    }

    /// Checked [`Culler::cull`]
    pub fn try_cull<V: BoundedVolume + ?Sized>(&self, volume: &V) -> Result<bool, MathError> {
        if !self.camera_bound {
            return Err(MathError::CameraNotBound);
        }
        Ok(self.cull(volume))
    }

    /// Plane in slot `id`, if that slot is in use
    pub fn plane(&self, id: usize) -> Option<&Plane> {
        if id < self.count {
            self.planes.get(id)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_plane_active(&self, id: usize) -> bool {
        id < MAX_PLANES && self.active.contains(PlaneMask::slot(id))
    }

    #[inline]
    pub fn active_planes(&self) -> PlaneMask {
        self.active
    }

    /// Slots in use, the six frustum slots included
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.count
    }

    /// `[near, far, left, right, bottom, top]` of the bound camera
    #[inline]
    pub fn frustum_params(&self) -> &[f32; 6] {
        &self.frustum_params
    }
}
