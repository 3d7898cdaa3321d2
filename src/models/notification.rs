use crate::models::{Poi, PoiCategory};
use tokio::time::Instant;

/// Emitted by the proximity monitor when a POI comes into range.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub title: String,
    pub message: String,
    pub category: PoiCategory,
    pub related_poi_id: u32,
    pub distance_m: f64,
    pub emitted_at: Instant,
}

impl NotificationEvent {
    pub fn for_poi(poi: &Poi, distance_m: f64, emitted_at: Instant) -> Self {
        NotificationEvent {
            title: format!("Nearby: {}", poi.name),
            message: format!("You are {:.0}m away. {}", distance_m, poi.description),
            category: poi.category,
            related_poi_id: poi.id,
            distance_m,
            emitted_at,
        }
    }
}
