//! Collaborator traits
//!
//! The playback engine depends on the remote service only through these
//! traits: track fetching ([`TrackRepository`]) and persisted volume
//! ([`VolumeStore`]). The HTTP client implements both; tests substitute
//! in-memory fakes.

use crate::error::RepositoryError;
use crate::ids::{PlaylistId, TrackId};
use crate::track::Track;
use async_trait::async_trait;
use std::sync::Arc;

/// A playlist listing as returned by the server.
#[derive(Debug, Clone)]
pub struct PlaylistListing {
    /// Playlist name
    pub name: String,

    /// Display name of the playlist's owner
    pub owner_name: String,

    /// Tracks in playlist order, already validated
    pub tracks: Vec<Arc<Track>>,
}

/// Source of track metadata and stream locations.
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// Fetch a single track by id.
    async fn track_by_id(&self, id: &TrackId) -> Result<Arc<Track>, RepositoryError>;

    /// Fetch the full song listing.
    async fn all_tracks(&self) -> Result<Vec<Arc<Track>>, RepositoryError>;

    /// Fetch one playlist's listing.
    async fn playlist(&self, id: &PlaylistId) -> Result<PlaylistListing, RepositoryError>;

    /// URL of the audio byte stream for a track.
    fn audio_url(&self, id: &TrackId) -> String;

    /// URL of the artwork image for a track.
    fn artwork_url(&self, id: &TrackId) -> String;
}

/// Read/write access to the user's persisted volume level.
#[async_trait]
pub trait VolumeStore: Send + Sync {
    /// The saved volume level (0-100), if the user has one.
    async fn load_volume(&self) -> Result<Option<u8>, RepositoryError>;

    /// Persist a volume level (0-100).
    async fn save_volume(&self, level: u8) -> Result<(), RepositoryError>;
}
