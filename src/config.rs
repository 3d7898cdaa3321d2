use crate::constants::*;
use crate::models::Mode;
use crate::services::presenter::Permission;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Position source the session starts with
    pub mode: Mode,

    /// JSON file replacing the built-in famous places
    pub places_path: Option<PathBuf>,

    /// Recorded track replayed as the live position platform.
    /// Without one, live mode reports the capability as unavailable.
    pub track_path: Option<PathBuf>,

    /// Delay between replayed track samples
    pub track_interval: Duration,

    pub zoom: u8,

    /// Initial permission of the console notification surface
    pub native_notifications: Permission,

    /// Where to write the rendered map scene as GeoJSON
    pub scene_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            places_path: None,
            track_path: None,
            track_interval: Duration::from_millis(DEFAULT_TRACK_INTERVAL_MS),
            zoom: DEFAULT_ZOOM,
            native_notifications: Permission::Default,
            scene_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();
        Self::from_vars()
    }

    /// Read settings from the process environment without loading `.env`.
    pub fn from_vars() -> Result<Self, String> {
        let defaults = Self::default();

        let zoom: u8 = env::var("TOURGUIDE_ZOOM")
            .unwrap_or_else(|_| defaults.zoom.to_string())
            .parse()
            .map_err(|_| "Invalid TOURGUIDE_ZOOM")?;

        if zoom == 0 || zoom > MAX_ZOOM {
            return Err(format!("TOURGUIDE_ZOOM must be between 1 and {}", MAX_ZOOM));
        }

        let track_interval_ms: u64 = env::var("TOURGUIDE_TRACK_INTERVAL_MS")
            .unwrap_or_else(|_| defaults.track_interval.as_millis().to_string())
            .parse()
            .map_err(|_| "Invalid TOURGUIDE_TRACK_INTERVAL_MS")?;

        Ok(Config {
            mode: env::var("TOURGUIDE_MODE")
                .unwrap_or_else(|_| defaults.mode.to_string())
                .parse()?,
            places_path: env::var("TOURGUIDE_PLACES_PATH").ok().map(PathBuf::from),
            track_path: env::var("TOURGUIDE_TRACK_PATH").ok().map(PathBuf::from),
            track_interval: Duration::from_millis(track_interval_ms),
            zoom,
            native_notifications: env::var("TOURGUIDE_NATIVE_NOTIFICATIONS")
                .unwrap_or_else(|_| defaults.native_notifications.to_string())
                .parse()?,
            scene_path: env::var("TOURGUIDE_SCENE_PATH").ok().map(PathBuf::from),
        })
    }
}
