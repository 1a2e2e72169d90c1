//! Error types for build extraction
//!
//! Only failures that abandon a whole build are errors. Lookup misses
//! (affix, aspect, slot) are `None` and the caller skips the contribution.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("No planner ID found in {0}")]
    MissingPlannerId(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Build a fetch error from any displayable cause
    pub fn fetch(url: &str, cause: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.to_string(),
            message: cause.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
