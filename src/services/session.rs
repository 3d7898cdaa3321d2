use crate::error::GuideError;
use crate::models::{Direction, Mode, PositionSample};
use crate::services::map_view::{MapScene, MapView};
use crate::services::position::{
    GeolocationPlatform, LiveSource, PositionSource, PositionUpdate, SimulatedSource,
    UpdateKind, UpdateReceiver, UpdateSender,
};
use crate::services::presenter::NotificationPresenter;
use crate::services::proximity::ProximityMonitor;
use crate::services::registry::PoiRegistry;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use uuid::Uuid;

/// User-visible error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Stays until the mode changes.
    Persistent(String),
    /// Cleared by the next good sample.
    Transient(String),
}

impl From<&GuideError> for StatusMessage {
    fn from(err: &GuideError) -> Self {
        if err.is_transient() {
            StatusMessage::Transient(err.to_string())
        } else {
            StatusMessage::Persistent(err.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeView {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub related_poi_id: u32,
}

/// Snapshot of what the view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub mode: Mode,
    pub position: Option<PositionSample>,
    pub message: Option<StatusMessage>,
    pub notices: Vec<NoticeView>,
}

pub enum Command {
    Step(Direction),
    SetMode(Mode),
    ToggleMode,
    Dismiss(Uuid),
    Status(oneshot::Sender<SessionStatus>),
    Shutdown,
}

/// One monitoring session: the active position source, the proximity
/// monitor's cooldowns, the visible notices and the map view.
///
/// All state is owned here and mutated from a single task. Switching mode
/// restarts the position source and clears the last position and banner;
/// cooldowns carry over.
pub struct TourGuideSession {
    registry: Arc<PoiRegistry>,
    monitor: ProximityMonitor,
    presenter: NotificationPresenter,
    platform: Arc<dyn GeolocationPlatform>,
    source: PositionSource,
    epoch: u64,
    position: Option<PositionSample>,
    message: Option<StatusMessage>,
    map: Box<dyn MapView>,
    zoom: u8,
    updates_tx: UpdateSender,
    updates_rx: UpdateReceiver,
}

impl TourGuideSession {
    pub fn new(
        registry: Arc<PoiRegistry>,
        platform: Arc<dyn GeolocationPlatform>,
        presenter: NotificationPresenter,
        map: Box<dyn MapView>,
        mode: Mode,
        zoom: u8,
    ) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let source = build_source(mode, &registry, &platform);

        TourGuideSession {
            monitor: ProximityMonitor::new(registry.clone()),
            registry,
            presenter,
            platform,
            source,
            epoch: 0,
            position: None,
            message: None,
            map,
            zoom,
            updates_tx,
            updates_rx,
        }
    }

    /// Ask for native notification permission, then activate the source.
    pub async fn start(&mut self) {
        self.presenter.init_permission().await;
        self.activate(Instant::now());
        self.render();
    }

    fn activate(&mut self, now: Instant) {
        self.epoch += 1;
        match self.source.start(self.epoch, &self.updates_tx) {
            Ok(Some(sample)) => self.apply_sample(sample, now),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Could not start {} position source: {}", self.mode(), e);
                self.message = Some(StatusMessage::from(&e));
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.source.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode() && self.source.is_active() {
            return;
        }
        tracing::info!("Switching position source to {}", mode);

        self.source.stop();
        self.position = None;
        self.message = None;
        self.source = build_source(mode, &self.registry, &self.platform);
        self.activate(Instant::now());
        self.render();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode().toggled());
    }

    /// Manual step; ignored outside simulated mode.
    pub fn step(&mut self, direction: Direction) {
        match self.source.step(direction) {
            Some(sample) => self.apply_sample(sample, Instant::now()),
            None => tracing::debug!("Step {:?} ignored in {} mode", direction, self.mode()),
        }
    }

    pub fn handle_update(&mut self, update: PositionUpdate, now: Instant) {
        if update.epoch != self.epoch {
            tracing::trace!("Discarding update from stopped source");
            return;
        }
        match update.kind {
            UpdateKind::Sample(sample) => self.apply_sample(sample, now),
            UpdateKind::Failed(reason) => {
                let err = GuideError::PositionUpdateFailed(reason);
                self.message = Some(StatusMessage::from(&err));
            }
            UpdateKind::Closed => {
                // Release the ended watch so selecting live again resubscribes
                self.source.stop();
                let err = GuideError::PositionUnavailable(
                    "Location updates stopped by the platform".to_string(),
                );
                self.message = Some(StatusMessage::from(&err));
            }
        }
    }

    fn apply_sample(&mut self, sample: PositionSample, now: Instant) {
        self.position = Some(sample);
        if matches!(self.message, Some(StatusMessage::Transient(_))) {
            self.message = None;
        }
        self.map.recenter(sample.location, self.zoom);

        for event in self.monitor.evaluate(&sample, now) {
            tracing::info!("{}: {}", event.title, event.message);
            self.presenter.push(event, now);
        }
        self.render();
    }

    fn render(&mut self) {
        let scene = MapScene::build(&self.registry, self.position.as_ref(), self.zoom);
        self.map.render(&scene);
    }

    pub fn expire_notices(&mut self, now: Instant) -> usize {
        self.presenter.expire(now)
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        self.presenter.dismiss(id)
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            mode: self.mode(),
            position: self.position,
            message: self.message.clone(),
            notices: self
                .presenter
                .visible()
                .map(|n| NoticeView {
                    id: n.id,
                    title: n.event.title.clone(),
                    message: n.event.message.clone(),
                    related_poi_id: n.event.related_poi_id,
                })
                .collect(),
        }
    }

    pub fn is_source_active(&self) -> bool {
        self.source.is_active()
    }

    /// Release the position source. Idempotent.
    pub fn shutdown(&mut self) {
        self.source.stop();
    }

    /// Event loop: commands, position updates and notice expiry, one at a
    /// time. Returns when a `Shutdown` arrives or every handle is dropped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        self.start().await;

        loop {
            let next_expiry = self.presenter.next_expiry();

            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(Command::Step(direction)) => self.step(direction),
                        Some(Command::SetMode(mode)) => self.set_mode(mode),
                        Some(Command::ToggleMode) => self.toggle_mode(),
                        Some(Command::Dismiss(id)) => {
                            self.dismiss(id);
                        }
                        Some(Command::Status(reply)) => {
                            let _ = reply.send(self.status());
                        }
                        Some(Command::Shutdown) | None => break,
                    }
                }
                Some(update) = self.updates_rx.recv() => {
                    self.handle_update(update, Instant::now());
                }
                _ = tokio::time::sleep_until(next_expiry.unwrap_or_else(Instant::now)), if next_expiry.is_some() => {
                    let removed = self.expire_notices(Instant::now());
                    tracing::debug!("Expired {} notices", removed);
                }
            }
        }

        self.shutdown();
        tracing::info!("Session ended");
    }
}

impl Drop for TourGuideSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn build_source(
    mode: Mode,
    registry: &PoiRegistry,
    platform: &Arc<dyn GeolocationPlatform>,
) -> PositionSource {
    match mode {
        Mode::Live => PositionSource::Live(LiveSource::new(platform.clone())),
        Mode::Simulated => {
            PositionSource::Simulated(SimulatedSource::new(registry.first().location))
        }
    }
}

/// Cloneable front end for a spawned session.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
}

impl SessionHandle {
    /// Spawn the session's event loop on the current runtime.
    pub fn spawn(session: TourGuideSession) -> (Self, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(32);
        let task = tokio::spawn(session.run(rx));
        (SessionHandle { commands: tx }, task)
    }

    /// Returns false when the session has ended.
    pub async fn send(&self, command: Command) -> bool {
        self.commands.send(command).await.is_ok()
    }

    pub async fn status(&self) -> Option<SessionStatus> {
        let (tx, rx) = oneshot::channel();
        if !self.send(Command::Status(tx)).await {
            return None;
        }
        rx.await.ok()
    }
}
