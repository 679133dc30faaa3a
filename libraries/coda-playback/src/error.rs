//! Error types for playback

use coda_core::{CoreError, RepositoryError};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A track change is already settling; the request was rejected
    #[error("Another track change is in flight")]
    Busy,

    /// The deck is empty; nothing has been loaded yet
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Catalog lookup failed (empty catalog, unknown id)
    #[error("Catalog error: {0}")]
    Catalog(#[from] CoreError),

    /// The track repository failed
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The audio engine refused an operation
    #[error("Audio engine error: {0}")]
    Engine(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
