use super::{
    GeolocationPlatform, PlatformWatch, PositionUpdate, UpdateKind, UpdateSender, WatchEvent,
    WatchId, WatchOptions,
};
use crate::error::Result;
use crate::models::Coordinates;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

struct ActiveWatch {
    id: WatchId,
    forwarder: JoinHandle<()>,
}

/// Live device-location source.
///
/// Holds at most one platform watch. The watch is released on `stop` and on
/// drop, so a torn-down session never leaks a platform subscription.
pub struct LiveSource {
    platform: Arc<dyn GeolocationPlatform>,
    options: WatchOptions,
    active: Option<ActiveWatch>,
}

impl LiveSource {
    pub fn new(platform: Arc<dyn GeolocationPlatform>) -> Self {
        Self::with_options(platform, WatchOptions::default())
    }

    pub fn with_options(platform: Arc<dyn GeolocationPlatform>, options: WatchOptions) -> Self {
        LiveSource {
            platform,
            options,
            active: None,
        }
    }

    /// Open the platform watch and spawn the forwarding task. A second call
    /// while active is a no-op; a watch the platform already ended is
    /// released and replaced.
    pub fn start(&mut self, epoch: u64, updates: UpdateSender) -> Result<()> {
        if self.is_active() {
            tracing::debug!("Live watch already running");
            return Ok(());
        }
        self.stop();

        let PlatformWatch { id, events } = self.platform.watch_position(&self.options)?;
        tracing::info!("Live watch {} started", id);

        let forwarder = tokio::spawn(forward_watch(events, self.options.clone(), epoch, updates));
        self.active = Some(ActiveWatch { id, forwarder });
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(watch) = self.active.take() {
            watch.forwarder.abort();
            self.platform.clear_watch(watch.id);
            tracing::info!("Live watch {} cleared", watch.id);
        }
    }

    /// False once stopped or once the platform has ended the watch.
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|watch| !watch.forwarder.is_finished())
    }
}

impl Drop for LiveSource {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Relay platform events to the session, applying the per-update timeout and
/// the minimum movement filter. Runs until the platform closes the watch,
/// which is reported as `Closed`, or the session goes away.
async fn forward_watch(
    mut events: mpsc::Receiver<WatchEvent>,
    options: WatchOptions,
    epoch: u64,
    updates: UpdateSender,
) {
    let mut last_reported: Option<Coordinates> = None;

    loop {
        let kind = match tokio::time::timeout(options.timeout, events.recv()).await {
            Ok(Some(Ok(sample))) => {
                if let Some(prev) = last_reported {
                    if prev.distance_to(&sample.location) < options.min_distance_m {
                        continue;
                    }
                }
                last_reported = Some(sample.location);
                UpdateKind::Sample(sample)
            }
            Ok(Some(Err(message))) => {
                tracing::warn!("Live position error: {}", message);
                UpdateKind::Failed(message)
            }
            Ok(None) => {
                tracing::warn!("Platform closed live watch");
                let _ = updates.send(PositionUpdate {
                    epoch,
                    kind: UpdateKind::Closed,
                });
                break;
            }
            Err(_) => {
                tracing::warn!(
                    "No live position within {}ms",
                    options.timeout.as_millis()
                );
                UpdateKind::Failed("Timeout expired".to_string())
            }
        };

        if updates.send(PositionUpdate { epoch, kind }).is_err() {
            break;
        }
    }
}
