//! Track catalog
//!
//! The full ordered track listing for the current context (all songs, or
//! one playlist). Fetched once, cached by the playback layer, and consulted
//! for sequential-next computation, random selection, and search.

use crate::error::{CoreError, Result};
use crate::ids::{PlaylistId, TrackId};
use crate::track::Track;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Which listing the catalog should be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogScope {
    /// Every track the server knows about
    AllSongs,

    /// A single playlist's tracks
    Playlist(PlaylistId),
}

impl Default for CatalogScope {
    fn default() -> Self {
        Self::AllSongs
    }
}

/// Where a loaded catalog actually came from.
///
/// Distinct from [`CatalogScope`]: a playlist scope that fails to load
/// falls back to the full listing, and the banner reflects what loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The full song listing
    AllSongs,

    /// A playlist listing, with its display metadata
    Playlist {
        /// Playlist name
        name: String,
        /// Display name of the playlist's owner
        owner_name: String,
    },
}

/// Ordered, immutable track listing.
#[derive(Debug, Clone)]
pub struct Catalog {
    source: CatalogSource,
    tracks: Vec<Arc<Track>>,
}

impl Catalog {
    /// Create a catalog from an already-validated track listing.
    pub fn new(source: CatalogSource, tracks: Vec<Arc<Track>>) -> Self {
        Self { source, tracks }
    }

    /// Where this catalog was loaded from.
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// All tracks, in server order.
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the catalog has no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look up a track by id.
    pub fn get(&self, id: &TrackId) -> Option<Arc<Track>> {
        self.tracks.iter().find(|t| &t.id == id).cloned()
    }

    /// The track following `id` in catalog order, wrapping to the start
    /// after the last entry.
    ///
    /// Used for sequential (shuffle-off) playback.
    pub fn next_after(&self, id: &TrackId) -> Result<Arc<Track>> {
        if self.tracks.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }

        let index = self
            .tracks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| CoreError::NotInCatalog(id.clone()))?;

        let next_index = (index + 1) % self.tracks.len();
        Ok(self.tracks[next_index].clone())
    }

    /// Pick a track uniformly at random.
    pub fn random(&self) -> Result<Arc<Track>> {
        self.tracks
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(CoreError::EmptyCatalog)
    }

    /// Case-insensitive substring search over title, artist, and album.
    ///
    /// Punctuation is stripped and whitespace collapsed on both sides, so
    /// "dont stop" matches "Don't Stop".
    pub fn filter(&self, query: &str) -> Vec<Arc<Track>> {
        let needle = normalize(query);
        if needle.is_empty() {
            return self.tracks.clone();
        }

        self.tracks
            .iter()
            .filter(|t| {
                normalize(&t.title).contains(&needle)
                    || t.artist.as_deref().is_some_and(|a| normalize(a).contains(&needle))
                    || t.album.as_deref().is_some_and(|a| normalize(a).contains(&needle))
            })
            .cloned()
            .collect()
    }

    /// The "You're listening to ..." banner for this catalog.
    pub fn banner(&self) -> String {
        match &self.source {
            CatalogSource::AllSongs => "You're listening to all songs.".to_string(),
            CatalogSource::Playlist { name, owner_name } => {
                format!("You're listening to {name} by {owner_name}")
            }
        }
    }
}

/// Lowercase, strip punctuation, collapse whitespace.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if ch.is_alphanumeric() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.extend(ch.to_lowercase());
        }
        // Punctuation is dropped entirely.
    }

    out
}
