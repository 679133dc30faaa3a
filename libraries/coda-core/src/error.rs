//! Error types for Coda core

use crate::ids::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using [`CoreError`]
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors from catalog operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog has no tracks to select from
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// A track id was not found in the cached catalog
    #[error("Track not in catalog: {0}")]
    NotInCatalog(TrackId),
}

/// Errors surfaced by the collaborator traits ([`crate::TrackRepository`],
/// [`crate::VolumeStore`]).
///
/// Concrete repositories map their own error types into this one at the
/// trait boundary so the playback engine stays transport-agnostic.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Track does not exist on the server
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Playlist does not exist on the server
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Transport-level failure (network, HTTP, timeouts)
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response arrived but could not be interpreted
    #[error("Malformed response: {0}")]
    Malformed(String),
}
