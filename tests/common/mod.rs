use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tourguide::models::{Coordinates, Mode, PositionSample};
use tourguide::services::map_view::{MapScene, MapView};
use tourguide::services::position::{
    GeolocationPlatform, PlatformWatch, WatchEvent, WatchId, WatchOptions,
};
use tourguide::services::presenter::{NotificationPresenter, NotificationSurface, Permission};
use tourguide::services::registry::PoiRegistry;
use tourguide::TourGuideSession;

#[allow(dead_code)]
pub const MAGELLANS_CROSS: Coordinates = Coordinates {
    lat: 10.2929,
    lng: 123.9013,
};

/// Geolocation platform driven by the test through `emit`.
#[derive(Default)]
pub struct FakeGeolocation {
    watches: Mutex<HashMap<WatchId, mpsc::Sender<WatchEvent>>>,
    next_id: AtomicU64,
    opened: AtomicUsize,
}

#[allow(dead_code)]
impl FakeGeolocation {
    pub fn active(&self) -> usize {
        self.watches.lock().unwrap().len()
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// End every open watch from the platform side.
    pub fn close_all(&self) {
        self.watches.lock().unwrap().clear();
    }

    /// Deliver an event to every open watch.
    pub async fn emit(&self, event: WatchEvent) {
        let senders: Vec<_> = self.watches.lock().unwrap().values().cloned().collect();
        for tx in senders {
            tx.send(event.clone()).await.unwrap();
        }
    }
}

impl GeolocationPlatform for FakeGeolocation {
    fn watch_position(&self, options: &WatchOptions) -> tourguide::Result<PlatformWatch> {
        assert!(options.high_accuracy);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let (tx, rx) = mpsc::channel(16);
        self.watches.lock().unwrap().insert(id, tx);
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(PlatformWatch { id, events: rx })
    }

    fn clear_watch(&self, id: WatchId) {
        self.watches.lock().unwrap().remove(&id);
    }
}

/// Map view that records what the session asked of it.
#[derive(Clone, Default)]
pub struct RecordingMap {
    pub recenters: Arc<Mutex<Vec<Coordinates>>>,
    pub renders: Arc<AtomicUsize>,
}

impl MapView for RecordingMap {
    fn recenter(&mut self, center: Coordinates, zoom: u8) {
        assert_eq!(zoom, 16);
        self.recenters.lock().unwrap().push(center);
    }

    fn render(&mut self, _scene: &MapScene) {
        self.renders.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notification surface with a fixed answer to permission prompts.
pub struct RecordingSurface {
    permission: Mutex<Permission>,
    answer: Permission,
    pub requests: AtomicUsize,
    pub shown: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingSurface {
    pub fn new(initial: Permission, answer: Permission) -> Arc<Self> {
        Arc::new(RecordingSurface {
            permission: Mutex::new(initial),
            answer,
            requests: AtomicUsize::new(0),
            shown: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl NotificationSurface for RecordingSurface {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> Permission {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.permission.lock().unwrap() = self.answer;
        self.answer
    }

    fn show(&self, title: &str, _body: &str) {
        self.shown.lock().unwrap().push(title.to_string());
    }
}

#[allow(dead_code)]
pub fn sample(lat: f64, lng: f64) -> PositionSample {
    PositionSample::new(Coordinates { lat, lng }).with_accuracy(8.0)
}

/// Session over the built-in places with the given fakes.
#[allow(dead_code)]
pub fn create_session(
    mode: Mode,
    platform: Arc<FakeGeolocation>,
    map: RecordingMap,
    presenter: NotificationPresenter,
) -> TourGuideSession {
    TourGuideSession::new(
        Arc::new(PoiRegistry::builtin().unwrap()),
        platform,
        presenter,
        Box::new(map),
        mode,
        16,
    )
}
