//! rust3d probe
//!
//! Binds a culler to the configured camera, pushes the configured user
//! planes and reports which probe volumes survive culling.

use rust3d::config::AppConfig;
use rust3d_cull::{BoundedVolume, Culler, FrustumSource};
use rust3d_geometry::Plane;

fn main() {
    let loaded = AppConfig::load();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()))
        .init();
    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting rust3d probe");

    let camera = config.camera.to_camera();
    let mut culler = Culler::new();
    culler.set_camera(&camera);

    let mut planes = [Plane::default(); 6];
    camera.extract_frustum_planes(&mut planes);
    for (i, plane) in planes.iter().enumerate() {
        log::debug!("frustum plane {i}: normal {:?}, offset {}", plane.normal, plane.offset);
    }

    for (i, entry) in config.culling.user_planes.iter().enumerate() {
        let Some(plane) = entry.to_plane() else {
            log::warn!("user plane {i} has a zero normal, skipped");
            continue;
        };
        if culler.push_plane(plane).is_none() {
            break;
        }
    }
    log::info!("culling with {} planes", culler.plane_count());

    for probe in &config.probe.spheres {
        let label = format!("sphere {:?} r={}", probe.center, probe.radius);
        report(&culler, &label, &probe.to_sphere());
    }
    for (i, probe) in config.probe.boxes.iter().enumerate() {
        match probe.to_aabb() {
            Some(aabb) => report(&culler, &format!("box {:?}..{:?}", probe.min, probe.max), &aabb),
            None => log::warn!("probe box {i} has min > max, skipped"),
        }
    }
}

fn report<V: BoundedVolume>(culler: &Culler, label: &str, volume: &V) {
    let verdict = if culler.cull(volume) { "culled" } else { "visible" };
    println!("{label:<48} {verdict}");
}
