use super::{GeolocationPlatform, PlatformWatch, WatchEvent, WatchId, WatchOptions};
use crate::constants::POSITION_CHANNEL_CAPACITY;
use crate::error::{GuideError, Result};
use crate::models::PositionSample;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Geolocation platform that replays a recorded track, one sample per
/// interval. Once the track is exhausted the watch stays open but silent,
/// like a receiver that lost its fix.
pub struct TrackReplay {
    track: Vec<PositionSample>,
    interval: Duration,
    next_id: AtomicU64,
    tasks: Mutex<HashMap<WatchId, JoinHandle<()>>>,
}

impl TrackReplay {
    pub fn new(track: Vec<PositionSample>, interval: Duration) -> Self {
        TrackReplay {
            track,
            interval,
            next_id: AtomicU64::new(1),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Load a track from a JSON array of position samples.
    pub fn from_file(path: impl AsRef<Path>, interval: Duration) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let track: Vec<PositionSample> = serde_json::from_str(&raw)?;
        if track.is_empty() {
            return Err(GuideError::Config(format!(
                "track {} has no samples",
                path.as_ref().display()
            )));
        }
        Ok(Self::new(track, interval))
    }

    pub fn active_watches(&self) -> usize {
        self.tasks.lock().map(|t| t.len()).unwrap_or(0)
    }
}

impl GeolocationPlatform for TrackReplay {
    fn watch_position(&self, options: &WatchOptions) -> Result<PlatformWatch> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(POSITION_CHANNEL_CAPACITY);
        let track = self.track.clone();
        let interval = self.interval;

        tracing::debug!(
            "Replaying {} samples every {:?} (high_accuracy={})",
            track.len(),
            interval,
            options.high_accuracy
        );

        let task = tokio::spawn(replay(track, interval, tx));
        self.tasks
            .lock()
            .map_err(|_| GuideError::PositionUnavailable("replay state poisoned".to_string()))?
            .insert(id, task);

        Ok(PlatformWatch { id, events: rx })
    }

    fn clear_watch(&self, id: WatchId) {
        if let Ok(mut tasks) = self.tasks.lock() {
            if let Some(task) = tasks.remove(&id) {
                task.abort();
            }
        }
    }
}

async fn replay(track: Vec<PositionSample>, interval: Duration, tx: mpsc::Sender<WatchEvent>) {
    for sample in track {
        if tx.send(Ok(sample)).await.is_err() {
            return;
        }
        tokio::time::sleep(interval).await;
    }
    // Keep the sender alive so the consumer observes timeouts, not closure.
    tx.closed().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn track() -> Vec<PositionSample> {
        vec![
            PositionSample::new(Coordinates { lat: 10.2929, lng: 123.9013 }).with_accuracy(4.0),
            PositionSample::new(Coordinates { lat: 10.2935, lng: 123.9016 }).with_accuracy(6.5),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn replays_in_order() {
        let platform = TrackReplay::new(track(), Duration::from_secs(1));
        let mut watch = platform.watch_position(&WatchOptions::default()).unwrap();

        assert_eq!(watch.events.recv().await.unwrap().unwrap(), track()[0]);
        assert_eq!(watch.events.recv().await.unwrap().unwrap(), track()[1]);
        assert_eq!(platform.active_watches(), 1);
    }

    #[tokio::test]
    async fn clear_watch_stops_replay() {
        let platform = TrackReplay::new(track(), Duration::from_secs(1));
        let watch = platform.watch_position(&WatchOptions::default()).unwrap();

        platform.clear_watch(watch.id);
        platform.clear_watch(watch.id);
        assert_eq!(platform.active_watches(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn sample_track_walks_to_the_fort() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_track.json");
        let platform = TrackReplay::from_file(path, Duration::from_millis(500)).unwrap();
        let mut watch = platform.watch_position(&WatchOptions::default()).unwrap();

        let first = watch.events.recv().await.unwrap().unwrap();
        assert_eq!(first.location, Coordinates { lat: 10.2929, lng: 123.9013 });
        let mut rest = Vec::new();
        for _ in 1..10 {
            rest.push(watch.events.recv().await.unwrap().unwrap());
        }
        assert_eq!(rest[8].location, Coordinates { lat: 10.2925, lng: 123.9058 });
    }

    #[test]
    fn empty_track_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("tourguide-empty-{}.json", std::process::id()));
        std::fs::write(&path, "[]").unwrap();
        let result = TrackReplay::from_file(&path, Duration::from_secs(1));
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(GuideError::Config(_))));
    }
}
