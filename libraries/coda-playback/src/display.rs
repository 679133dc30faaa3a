//! Now-playing display state
//!
//! What the page shows for the loaded track: window title, sidebar
//! fields, artwork URL, and the progress line. The player writes this;
//! everything else only reads it.

use coda_core::{format_duration, Track, TrackId};
use std::time::Duration;

/// Service name used in window titles
pub const SERVICE_NAME: &str = "Coda";

/// Placeholder rendered for an absent artist or album field, so the
/// sidebar rows keep their height.
pub const BLANK_FIELD: &str = "\u{a0}";

/// "{title} - {artist}", or just the title without an artist.
pub fn track_label(track: &Track) -> String {
    match &track.artist {
        Some(artist) => format!("{} - {}", track.title, artist),
        None => track.title.clone(),
    }
}

/// Window title for a loaded track: "{title} - {artist} | Coda".
pub fn page_title(track: &Track) -> String {
    format!("{} | {}", track_label(track), SERVICE_NAME)
}

/// Share link for a track on the given page origin.
pub fn share_url(page_base: &str, id: &TrackId) -> String {
    format!("{}/?songid={}", page_base.trim_end_matches('/'), id)
}

/// Suggested filename for a track download (dots stripped, so the
/// browser does not misread an extension).
pub fn download_name(track: &Track) -> String {
    track.title.replace('.', "")
}

/// Display state for the currently loaded track.
#[derive(Debug, Clone)]
pub struct NowPlaying {
    window_title: String,
    track_title: String,
    artist: String,
    album: String,
    track_id: Option<TrackId>,
    artwork_url: Option<String>,
    progress: String,
    playing: bool,
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self {
            window_title: SERVICE_NAME.to_string(),
            track_title: String::new(),
            artist: BLANK_FIELD.to_string(),
            album: BLANK_FIELD.to_string(),
            track_id: None,
            artwork_url: None,
            progress: "0:00 / 0:00".to_string(),
            playing: false,
        }
    }
}

impl NowPlaying {
    /// Point every field at a newly loaded track.
    pub(crate) fn show_track(&mut self, track: &Track, artwork_url: String) {
        self.window_title = page_title(track);
        self.track_title.clone_from(&track.title);
        self.artist = track
            .artist
            .clone()
            .unwrap_or_else(|| BLANK_FIELD.to_string());
        self.album = track
            .album
            .clone()
            .unwrap_or_else(|| BLANK_FIELD.to_string());
        self.track_id = Some(track.id.clone());
        self.artwork_url = Some(artwork_url);
    }

    /// Reset the progress line to `0:00 / 0:00`.
    pub(crate) fn reset_progress(&mut self) {
        self.progress = "0:00 / 0:00".to_string();
    }

    /// Update the progress line from the engine's position and duration.
    pub(crate) fn set_progress(&mut self, position: Duration, duration: Option<Duration>) {
        let total = duration.map_or_else(|| "0:00".to_string(), format_duration);
        self.progress = format!("{} / {}", format_duration(position), total);
    }

    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Window title ("{title} - {artist} | Coda" once a track loads).
    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    /// Title of the loaded track, empty before the first load.
    pub fn track_title(&self) -> &str {
        &self.track_title
    }

    /// Artist line (NBSP placeholder when absent).
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Album line (NBSP placeholder when absent).
    pub fn album(&self) -> &str {
        &self.album
    }

    /// Id of the loaded track.
    pub fn track_id(&self) -> Option<&TrackId> {
        self.track_id.as_ref()
    }

    /// Artwork image URL for the loaded track.
    pub fn artwork_url(&self) -> Option<&str> {
        self.artwork_url.as_deref()
    }

    /// Progress line, e.g. "1:03 / 3:45".
    pub fn progress(&self) -> &str {
        &self.progress
    }

    /// Whether the play/pause indicator shows "playing".
    pub fn playing(&self) -> bool {
        self.playing
    }
}
