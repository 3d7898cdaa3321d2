use crate::constants::{MAX_VISIBLE_NOTIFICATIONS, NOTIFICATION_DISPLAY_DURATION};
use crate::models::NotificationEvent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// Permission state of the host's native notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Default,
    Granted,
    Denied,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Permission::Default => "default",
            Permission::Granted => "granted",
            Permission::Denied => "denied",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Permission::Default),
            "granted" => Ok(Permission::Granted),
            "denied" => Ok(Permission::Denied),
            _ => Err(format!("Invalid notification permission: {}", s)),
        }
    }
}

/// Native notification capability of the host.
#[async_trait]
pub trait NotificationSurface: Send + Sync {
    fn permission(&self) -> Permission;

    /// Ask the user. Resolves with the resulting state.
    async fn request_permission(&self) -> Permission;

    fn show(&self, title: &str, body: &str);
}

/// A notification currently on screen.
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: Uuid,
    pub event: NotificationEvent,
    pub inserted_at: Instant,
}

/// Rolling list of recent notices, newest first.
pub struct NotificationPresenter {
    visible: VecDeque<Notice>,
    max_visible: usize,
    display_duration: Duration,
    surface: Option<Arc<dyn NotificationSurface>>,
}

impl Default for NotificationPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPresenter {
    pub fn new() -> Self {
        NotificationPresenter {
            visible: VecDeque::with_capacity(MAX_VISIBLE_NOTIFICATIONS + 1),
            max_visible: MAX_VISIBLE_NOTIFICATIONS,
            display_duration: NOTIFICATION_DISPLAY_DURATION,
            surface: None,
        }
    }

    pub fn with_surface(mut self, surface: Arc<dyn NotificationSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Request native permission once, and only if the user has not decided
    /// yet. Returns the resulting state, or `None` without a surface.
    pub async fn init_permission(&self) -> Option<Permission> {
        let surface = self.surface.as_ref()?;
        let current = surface.permission();
        if current != Permission::Default {
            tracing::debug!("Native notification permission already {}", current);
            return Some(current);
        }
        let decided = surface.request_permission().await;
        tracing::info!("Native notification permission {}", decided);
        Some(decided)
    }

    /// Insert an event at the front. Anything beyond the visible limit is
    /// dropped immediately.
    pub fn push(&mut self, event: NotificationEvent, now: Instant) -> Uuid {
        if let Some(surface) = &self.surface {
            if surface.permission() == Permission::Granted {
                surface.show(&event.title, &event.message);
            }
        }

        let id = Uuid::new_v4();
        self.visible.push_front(Notice {
            id,
            event,
            inserted_at: now,
        });
        while self.visible.len() > self.max_visible {
            if let Some(dropped) = self.visible.pop_back() {
                tracing::debug!("Dropped notice {} to make room", dropped.event.title);
            }
        }
        id
    }

    /// Remove notices whose display time has elapsed. Returns how many went.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.visible.len();
        let duration = self.display_duration;
        self.visible.retain(|n| now < n.inserted_at + duration);
        before - self.visible.len()
    }

    /// Earliest pending expiry, for the session timer.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.visible
            .iter()
            .map(|n| n.inserted_at + self.display_duration)
            .min()
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.visible.len();
        self.visible.retain(|n| n.id != id);
        before != self.visible.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notice> {
        self.visible.iter()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}
