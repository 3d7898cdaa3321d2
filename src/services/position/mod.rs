//! Position sources.
//!
//! A session is driven by exactly one [`PositionSource`] at a time: the live
//! variant wraps a platform location watch and delivers samples
//! asynchronously over a channel, the simulated variant moves on manual steps
//! and returns samples synchronously.

pub mod live;
pub mod replay;
pub mod simulated;

pub use live::LiveSource;
pub use replay::TrackReplay;
pub use simulated::SimulatedSource;

use crate::constants::{WATCH_MAX_CACHE_AGE, WATCH_MIN_DISTANCE_METERS, WATCH_TIMEOUT};
use crate::error::{GuideError, Result};
use crate::models::{Direction, Mode, PositionSample};
use std::time::Duration;
use tokio::sync::mpsc;

/// Options handed to the platform when a watch is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    pub high_accuracy: bool,
    pub max_cache_age: Duration,
    pub timeout: Duration,
    pub min_distance_m: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            max_cache_age: WATCH_MAX_CACHE_AGE,
            timeout: WATCH_TIMEOUT,
            min_distance_m: WATCH_MIN_DISTANCE_METERS,
        }
    }
}

pub type WatchId = u64;

/// A sample, or a human-readable error from the platform.
pub type WatchEvent = std::result::Result<PositionSample, String>;

/// An open platform watch. Dropping the receiver does not release the
/// platform side; call [`GeolocationPlatform::clear_watch`].
pub struct PlatformWatch {
    pub id: WatchId,
    pub events: mpsc::Receiver<WatchEvent>,
}

/// Host capability that produces continuous location updates.
pub trait GeolocationPlatform: Send + Sync {
    /// Open a watch. Fails with `PositionUnavailable` when the host has no
    /// location capability.
    fn watch_position(&self, options: &WatchOptions) -> Result<PlatformWatch>;

    fn clear_watch(&self, id: WatchId);
}

/// Platform for hosts without any location capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeolocation;

impl GeolocationPlatform for NoGeolocation {
    fn watch_position(&self, _options: &WatchOptions) -> Result<PlatformWatch> {
        Err(GuideError::PositionUnavailable(
            "Geolocation is not supported on this host".to_string(),
        ))
    }

    fn clear_watch(&self, _id: WatchId) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Sample(PositionSample),
    Failed(String),
    /// The platform ended the watch; no further updates will follow.
    Closed,
}

/// Update delivered to the session. `epoch` identifies the source activation
/// that produced it so updates from a stopped source can be discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionUpdate {
    pub epoch: u64,
    pub kind: UpdateKind,
}

pub type UpdateSender = mpsc::UnboundedSender<PositionUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<PositionUpdate>;

/// The active producer of positions, selected by [`Mode`].
pub enum PositionSource {
    Live(LiveSource),
    Simulated(SimulatedSource),
}

impl PositionSource {
    pub fn mode(&self) -> Mode {
        match self {
            PositionSource::Live(_) => Mode::Live,
            PositionSource::Simulated(_) => Mode::Simulated,
        }
    }

    /// Start producing positions. Idempotent. The simulated variant returns
    /// its activation sample immediately; the live variant delivers over
    /// `updates`.
    pub fn start(&mut self, epoch: u64, updates: &UpdateSender) -> Result<Option<PositionSample>> {
        match self {
            PositionSource::Live(live) => {
                live.start(epoch, updates.clone())?;
                Ok(None)
            }
            PositionSource::Simulated(sim) => Ok(Some(sim.activate())),
        }
    }

    /// Stop producing positions. Safe to call when already stopped.
    pub fn stop(&mut self) {
        match self {
            PositionSource::Live(live) => live.stop(),
            PositionSource::Simulated(sim) => sim.deactivate(),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            PositionSource::Live(live) => live.is_active(),
            PositionSource::Simulated(sim) => sim.is_active(),
        }
    }

    /// Manual step. Only the active simulated variant moves.
    pub fn step(&mut self, direction: Direction) -> Option<PositionSample> {
        match self {
            PositionSource::Live(_) => None,
            PositionSource::Simulated(sim) => sim.step(direction),
        }
    }
}
