//! Wire types for Coda API requests and responses.
//!
//! Track records are validated here, at the fetch boundary: a record
//! without a title or a length never becomes a [`Track`].

use coda_core::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Response envelope wrapping every API payload.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub status_code: u16,
    pub data: T,
}

/// Track ids arrive as either numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for TrackId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => TrackId::from(n),
            RawId::Text(s) => TrackId::new(s),
        }
    }
}

/// A track record as the server sends it, before validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    pub id: RawId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    /// Length in seconds
    #[serde(default)]
    pub length: Option<f64>,
}

impl RawTrack {
    /// Validate the record, returning `None` when required fields are
    /// missing (no title, or no usable length).
    pub fn into_track(self) -> Option<Track> {
        let title = non_empty(self.title)?;
        let length = self.length.filter(|s| s.is_finite() && *s > 0.0)?;

        let mut track = Track::new(self.id.into(), title, Duration::from_secs_f64(length));
        track.artist = non_empty(self.artist);
        track.album = non_empty(self.album);
        Some(track)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Validate a listing, skipping records without required fields.
pub(crate) fn validate_tracks(raw: Vec<RawTrack>) -> Vec<Arc<Track>> {
    let total = raw.len();
    let tracks: Vec<Arc<Track>> = raw
        .into_iter()
        .filter_map(|r| r.into_track().map(Arc::new))
        .collect();

    if tracks.len() < total {
        debug!(
            skipped = total - tracks.len(),
            kept = tracks.len(),
            "Skipped track records with missing title or length"
        );
    }

    tracks
}

/// Listing payload for `GET /songs`.
#[derive(Debug, Deserialize)]
pub(crate) struct TracksPayload {
    pub tracks: Vec<RawTrack>,
}

/// Listing payload for `GET /playlists/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistPayload {
    pub name: String,
    pub owner_name: String,
    pub tracks: Vec<RawTrack>,
}

/// Session payload for `GET /current_user`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserStatus {
    /// Whether the request carried a valid session cookie
    pub logged_in: bool,

    /// The logged-in user, when there is one
    #[serde(default)]
    pub user: Option<ApiUser>,
}

/// A user as returned by the session endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    /// Account name
    pub username: String,

    /// Administrator flag
    #[serde(default)]
    pub admin: bool,

    /// Persisted volume level (0-100)
    #[serde(default)]
    pub volume: Option<u8>,
}

/// Request body for `POST /set_volume`.
#[derive(Debug, Serialize)]
pub(crate) struct SetVolumeRequest {
    pub volume: u8,
}
