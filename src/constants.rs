//! Stable application-wide constants.
//!
//! Values here are the fixed behaviour of the proximity engine and default
//! fallbacks for env-var-based configuration. The engine constants (cooldown,
//! presenter limits, watch options) are not configurable.
//! For host-level settings see [`Config`](crate::config::Config).

use std::time::Duration;

// --- Distance calculation ---

/// Mean Earth radius (meters) used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// --- Proximity monitor ---

/// Minimum time between two notifications for the same POI.
pub const NOTIFICATION_COOLDOWN: Duration = Duration::from_secs(10);

// --- Notification presenter ---

/// Maximum notices visible at once; older ones are dropped on insert.
pub const MAX_VISIBLE_NOTIFICATIONS: usize = 5;
/// How long each notice stays visible after insertion.
pub const NOTIFICATION_DISPLAY_DURATION: Duration = Duration::from_secs(8);

// --- Live position watch ---

/// Per-update timeout after which a failure is reported.
pub const WATCH_TIMEOUT: Duration = Duration::from_millis(5_000);
/// Maximum age of a cached fix. Zero means cached fixes are never accepted.
pub const WATCH_MAX_CACHE_AGE: Duration = Duration::ZERO;
/// Minimum movement (meters) before a new live sample is reported.
pub const WATCH_MIN_DISTANCE_METERS: f64 = 1.0;
/// Buffer size of the channel between a platform watch and the session.
pub const POSITION_CHANNEL_CAPACITY: usize = 64;

// --- Simulated position ---

/// Degrees moved per simulated step (~11m of latitude).
pub const SIMULATED_STEP_DEGREES: f64 = 0.0001;

// --- Map view defaults (used when env vars are absent) ---

/// Default zoom level for the map view. Overridden by `TOURGUIDE_ZOOM`.
pub const DEFAULT_ZOOM: u8 = 16;
/// Highest zoom level served by the tile layer.
pub const MAX_ZOOM: u8 = 19;
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

// --- Track replay defaults ---

/// Default delay between replayed track samples. Overridden by
/// `TOURGUIDE_TRACK_INTERVAL_MS`.
pub const DEFAULT_TRACK_INTERVAL_MS: u64 = 1_000;
