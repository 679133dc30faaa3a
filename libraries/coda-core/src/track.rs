//! Track domain type

use crate::ids::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single track as served by the remote API.
///
/// Title and length are required; records missing either are rejected at
/// the fetch boundary and never reach this type. Tracks are immutable once
/// fetched and shared as `Arc<Track>` between the catalog and the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Server-assigned identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name (optional)
    pub artist: Option<String>,

    /// Album name (optional)
    pub album: Option<String>,

    /// Track length
    pub length: Duration,
}

impl Track {
    /// Create a track with only the required fields set.
    pub fn new(id: TrackId, title: impl Into<String>, length: Duration) -> Self {
        Self {
            id,
            title: title.into(),
            artist: None,
            album: None,
            length,
        }
    }

    /// Set the artist name.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the album name.
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }
}
