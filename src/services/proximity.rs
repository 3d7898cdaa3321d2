use crate::constants::NOTIFICATION_COOLDOWN;
use crate::models::{NotificationEvent, PositionSample};
use crate::services::registry::PoiRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Decides which POIs fire for each incoming sample.
///
/// Cooldown state is keyed by POI id and lives as long as the monitor. Only
/// in-range evaluations touch it, so leaving and re-entering a radius after
/// the cooldown fires again.
pub struct ProximityMonitor {
    registry: Arc<PoiRegistry>,
    cooldown: Duration,
    last_notified: HashMap<u32, Instant>,
}

impl ProximityMonitor {
    pub fn new(registry: Arc<PoiRegistry>) -> Self {
        ProximityMonitor {
            registry,
            cooldown: NOTIFICATION_COOLDOWN,
            last_notified: HashMap::new(),
        }
    }

    pub fn evaluate(&mut self, position: &PositionSample, now: Instant) -> Vec<NotificationEvent> {
        let mut events = Vec::new();

        for poi in self.registry.iter() {
            let (in_range, distance_m) = poi.range_check(&position.location);
            if !in_range {
                continue;
            }

            let due = match self.last_notified.get(&poi.id) {
                None => true,
                Some(last) => now.saturating_duration_since(*last) > self.cooldown,
            };
            if !due {
                tracing::trace!("{} in range but cooling down", poi.name);
                continue;
            }

            tracing::debug!("{} in range at {:.1}m", poi.name, distance_m);
            self.last_notified.insert(poi.id, now);
            events.push(NotificationEvent::for_poi(poi, distance_m, now));
        }

        events
    }

    /// Last notification time for a POI, if any.
    pub fn last_notified(&self, poi_id: u32) -> Option<Instant> {
        self.last_notified.get(&poi_id).copied()
    }

    /// Forget all cooldowns. Used when a new monitoring session begins.
    pub fn reset(&mut self) {
        self.last_notified.clear();
    }
}
