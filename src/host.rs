//! Terminal host adapters for the external boundaries: a console
//! notification surface and a map view that logs recentering and can dump
//! each rendered scene as GeoJSON.

use crate::models::Coordinates;
use crate::services::map_view::{MapScene, MapView};
use crate::services::presenter::{NotificationSurface, Permission};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;

/// Native notifications printed to stdout.
pub struct ConsoleSurface {
    permission: Mutex<Permission>,
}

impl ConsoleSurface {
    pub fn new(initial: Permission) -> Self {
        ConsoleSurface {
            permission: Mutex::new(initial),
        }
    }
}

#[async_trait]
impl NotificationSurface for ConsoleSurface {
    fn permission(&self) -> Permission {
        self.permission
            .lock()
            .map(|p| *p)
            .unwrap_or(Permission::Denied)
    }

    /// A terminal has no prompt; an undecided state is granted.
    async fn request_permission(&self) -> Permission {
        match self.permission.lock() {
            Ok(mut p) => {
                if *p == Permission::Default {
                    *p = Permission::Granted;
                }
                *p
            }
            Err(_) => Permission::Denied,
        }
    }

    fn show(&self, title: &str, body: &str) {
        println!("\u{1F514} {}\n   {}", title, body);
    }
}

/// Map view for the terminal host.
pub struct TerminalMapView {
    scene_path: Option<PathBuf>,
    last_center: Option<Coordinates>,
}

impl TerminalMapView {
    pub fn new(scene_path: Option<PathBuf>) -> Self {
        TerminalMapView {
            scene_path,
            last_center: None,
        }
    }

    pub fn last_center(&self) -> Option<Coordinates> {
        self.last_center
    }
}

impl MapView for TerminalMapView {
    fn recenter(&mut self, center: Coordinates, zoom: u8) {
        tracing::debug!("Map centred on {} at zoom {}", center, zoom);
        self.last_center = Some(center);
    }

    fn render(&mut self, scene: &MapScene) {
        let Some(path) = &self.scene_path else {
            return;
        };
        if let Err(e) = std::fs::write(path, scene.to_geojson().to_string()) {
            tracing::warn!("Failed to write scene to {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::registry::PoiRegistry;

    #[test]
    fn console_surface_grants_undecided_only() {
        let undecided = ConsoleSurface::new(Permission::Default);
        assert_eq!(
            tokio_test::block_on(undecided.request_permission()),
            Permission::Granted
        );
        assert_eq!(undecided.permission(), Permission::Granted);

        let denied = ConsoleSurface::new(Permission::Denied);
        assert_eq!(
            tokio_test::block_on(denied.request_permission()),
            Permission::Denied
        );
    }

    #[test]
    fn terminal_view_writes_scene() {
        let path = std::env::temp_dir().join(format!("tourguide-scene-{}.geojson", std::process::id()));
        let mut view = TerminalMapView::new(Some(path.clone()));
        let registry = PoiRegistry::builtin().unwrap();
        let scene = MapScene::build(&registry, None, 16);

        view.recenter(scene.center, 16);
        view.render(&scene);

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
        assert_eq!(parsed["zoom"], 16);
        assert_eq!(view.last_center(), Some(scene.center));
    }
}
