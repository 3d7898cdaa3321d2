// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use error::{GuideError, Result};
pub use services::session::{SessionHandle, TourGuideSession};
