use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuideError {
    /// The live position capability is absent on this host.
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// A single live update failed; the watch keeps running.
    #[error("Position update failed: {0}")]
    PositionUpdateFailed(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GuideError {
    /// Transient errors are shown briefly and cleared by the next good sample.
    pub fn is_transient(&self) -> bool {
        matches!(self, GuideError::PositionUpdateFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;
