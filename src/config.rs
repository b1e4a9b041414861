//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`R3D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use rust3d_cull::PerspectiveCamera;
use rust3d_geometry::{Aabb, Plane, Sphere};
use rust3d_math::{scalar, Vec3, Vec4};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Camera the culler is bound to
    #[serde(default)]
    pub camera: CameraConfig,
    /// Extra culling planes
    #[serde(default)]
    pub culling: CullingConfig,
    /// Volumes tested by the probe
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`R3D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // R3D_CAMERA__FOV=60 -> camera.fov = 60
        figment = figment.merge(Env::prefixed("R3D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Eye position [x, y, z]
    pub position: [f32; 3],
    /// Point the camera looks at
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov: 90.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    /// Build the camera described by this section
    pub fn to_camera(&self) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(
            Vec3::from(self.position),
            scalar::to_radians(self.fov),
            self.aspect,
            self.near,
            self.far,
        );
        camera.look_at(Vec3::from(self.target));
        camera
    }
}

/// A plane as raw `normal · p + offset = 0` coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneConfig {
    /// Normal, rescaled to unit length on load
    pub normal: [f32; 3],
    pub offset: f32,
}

impl PlaneConfig {
    /// `None` when the normal is zero
    pub fn to_plane(&self) -> Option<Plane> {
        let [x, y, z] = self.normal;
        if Vec3::new(x, y, z).length_squared() == 0.0 {
            return None;
        }
        Some(Plane::from_coefficients(Vec4::new(x, y, z, self.offset)))
    }
}

/// Culling configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CullingConfig {
    /// User planes pushed after the frustum, in order
    #[serde(default)]
    pub user_planes: Vec<PlaneConfig>,
}

/// Sphere tested by the probe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereProbe {
    pub center: [f32; 3],
    pub radius: f32,
}

impl SphereProbe {
    pub fn to_sphere(&self) -> Sphere {
        Sphere::new(Vec3::from(self.center), self.radius)
    }
}

/// Box tested by the probe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxProbe {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoxProbe {
    /// `None` when `min` exceeds `max` on some axis
    pub fn to_aabb(&self) -> Option<Aabb> {
        let (min, max) = (Vec3::from(self.min), Vec3::from(self.max));
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return None;
        }
        Some(Aabb::new(min, max))
    }
}

/// Probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub spheres: Vec<SphereProbe>,
    #[serde(default)]
    pub boxes: Vec<BoxProbe>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            spheres: vec![
                SphereProbe { center: [0.0, 0.0, 0.0], radius: 0.1 },
                SphereProbe { center: [100.0, 0.0, 0.0], radius: 1.0 },
            ],
            boxes: vec![BoxProbe { min: [-0.5, -0.5, -0.5], max: [0.5, 0.5, 0.5] }],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.camera.fov, 90.0);
        assert_eq!(config.debug.log_level, "info");
        assert!(config.culling.user_planes.is_empty());
        assert_eq!(config.probe.spheres.len(), 2);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("fov"));
        assert!(toml.contains("log_level"));
        assert!(toml.contains("spheres"));
    }

    #[test]
    fn test_plane_config_is_normalized() {
        let plane = PlaneConfig { normal: [0.0, 2.0, 0.0], offset: 4.0 }.to_plane().unwrap();
        assert_eq!(plane.normal, Vec3::Y);
        assert_eq!(plane.offset, 2.0);
        assert!(PlaneConfig { normal: [0.0; 3], offset: 1.0 }.to_plane().is_none());
    }

    #[test]
    fn test_box_probe_rejects_inverted_bounds() {
        let inverted = BoxProbe { min: [1.0, 0.0, 0.0], max: [0.0, 1.0, 1.0] };
        assert!(inverted.to_aabb().is_none());
    }

    #[test]
    fn test_camera_config_builds_camera() {
        let camera = CameraConfig::default().to_camera();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert!((camera.forward() - (-Vec3::Z)).length() < 0.0001);
        assert!((camera.fov_y - std::f32::consts::FRAC_PI_2).abs() < 0.0001);
    }
}
