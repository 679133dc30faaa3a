//! Configuration and state snapshot types

use crate::deck::DEFAULT_DECK_CAP;
use coda_core::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Track to load first (the page's `songid` parameter); a random
    /// catalog track is picked when absent
    pub initial_track: Option<TrackId>,

    /// Maximum deck size (default: 100)
    pub deck_cap: usize,

    /// Initial shuffle mode (default: on)
    pub shuffle: bool,

    /// Initial volume (0-100, default: 100)
    pub volume: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_track: None,
            deck_cap: DEFAULT_DECK_CAP,
            shuffle: true,
            volume: 100,
        }
    }
}

/// Snapshot of the player's externally visible state
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Whether shuffle mode is on
    pub shuffle: bool,

    /// Volume level (0-100), preserved while muted
    pub volume: u8,

    /// Whether audio is muted
    pub muted: bool,

    /// The deck entry currently loaded
    pub current_track: Option<Arc<Track>>,

    /// Whether the engine is playing
    pub is_playing: bool,
}
