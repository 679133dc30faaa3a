//! The player state machine
//!
//! Orchestrates deck, catalog, volume, display, and the audio engine.
//! Decides what plays next or previous, keeps the engine and the
//! now-playing display synchronized, and reacts to engine events.

use crate::deck::Deck;
use crate::display::NowPlaying;
use crate::engine::AudioEngine;
use crate::error::{PlaybackError, Result};
use crate::events::EngineEvent;
use crate::library::Library;
use crate::types::{PlaybackState, PlayerConfig};
use crate::volume::Volume;
use coda_core::{Track, TrackId, VolumeStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The playback state machine.
///
/// All mutation of playback state goes through this type, driven either
/// by user actions (next/previous/select/seek/toggles) or by engine
/// events. Track changes are single-flight: a second advance arriving
/// while one is still settling is rejected with [`PlaybackError::Busy`]
/// instead of interleaving deck mutations.
pub struct Player {
    library: Arc<Library>,
    volume_store: Arc<dyn VolumeStore>,
    engine: Box<dyn AudioEngine>,
    deck: Deck,
    shuffle: bool,
    volume: Volume,
    is_playing: bool,
    advancing: bool,
    initial_track: Option<TrackId>,
    display: NowPlaying,
}

impl Player {
    /// Create a player over a library, a volume store, and an engine.
    pub fn new(
        library: Arc<Library>,
        volume_store: Arc<dyn VolumeStore>,
        mut engine: Box<dyn AudioEngine>,
        config: PlayerConfig,
    ) -> Self {
        let volume = Volume::new(config.volume);
        engine.set_gain(volume.gain());

        Self {
            library,
            volume_store,
            engine,
            deck: Deck::new(config.deck_cap),
            shuffle: config.shuffle,
            volume,
            is_playing: false,
            advancing: false,
            initial_track: config.initial_track,
            display: NowPlaying::default(),
        }
    }

    /// Load the first track: the configured one if set, otherwise a
    /// random catalog pick. Also restores the user's persisted volume.
    ///
    /// Fetch failures are logged and leave the player idle.
    pub async fn start(&mut self) {
        match self.volume_store.load_volume().await {
            Ok(Some(level)) => self.set_volume(level),
            Ok(None) => {}
            Err(err) => debug!(error = %err, "No saved volume applied"),
        }

        let fetched = match self.initial_track.take() {
            Some(id) => self.library.track_by_id(&id).await,
            None => self.library.random_track().await,
        };

        match fetched {
            Ok(track) => {
                self.deck.push(track.clone());
                self.load_track(&track);
            }
            Err(err) => {
                warn!(error = %err, "Could not fetch initial track; player stays idle");
            }
        }
    }

    /// Advance to the next track.
    ///
    /// Deck lookahead replays deterministically; at the frontier, shuffle
    /// picks a random catalog track and sequential mode takes the catalog
    /// entry after the current one, wrapping at the end. On failure the
    /// current track keeps playing.
    pub async fn play_next(&mut self) -> Result<()> {
        if self.advancing {
            return Err(PlaybackError::Busy);
        }

        self.advancing = true;
        let chosen = self.choose_next().await;
        self.advancing = false;

        match chosen {
            Ok(track) => {
                self.load_track(&track);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Could not choose next track; keeping current playback");
                Err(err)
            }
        }
    }

    /// Go back one deck entry, or replay the current one from the start
    /// when already at the oldest entry.
    pub fn play_prev(&mut self) -> Result<()> {
        let track = self.deck.retreat().ok_or(PlaybackError::NoTrackLoaded)?;
        self.load_track(&track);
        Ok(())
    }

    /// Handle a track-list selection: resolve the id against the cached
    /// catalog and jump to it.
    pub async fn select_track(&mut self, id: &TrackId) -> Result<()> {
        if self.advancing {
            return Err(PlaybackError::Busy);
        }

        self.advancing = true;
        let resolved = self.library.resolve(id).await;
        self.advancing = false;

        match resolved {
            Ok(track) => {
                self.go_to_track(track);
                Ok(())
            }
            Err(err) => {
                warn!(track_id = %id, error = %err, "Could not select track");
                Err(err)
            }
        }
    }

    /// Jump to an explicitly chosen track: forward history after the
    /// current deck position is discarded (this is a branch point), the
    /// track is appended with cap eviction, and loaded.
    pub fn go_to_track(&mut self, track: Arc<Track>) {
        self.deck.branch_to(track.clone());
        self.load_track(&track);
    }

    /// React to an engine event.
    pub async fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ended => {
                // Failure is already logged; the current track stays.
                let _ = self.play_next().await;
            }
            EngineEvent::Playing => self.set_playing(true),
            EngineEvent::Paused => self.set_playing(false),
            EngineEvent::MetadataLoaded | EngineEvent::TimeUpdate => self.refresh_progress(),
        }
    }

    /// Toggle between playing and paused.
    pub fn toggle_play(&mut self) {
        if self.engine.is_paused() {
            match self.engine.play() {
                Ok(()) => self.set_playing(true),
                Err(err) => {
                    debug!(error = %err, "Engine refused to resume");
                    self.set_playing(false);
                }
            }
        } else {
            self.engine.pause();
            self.set_playing(false);
        }
    }

    /// Flip shuffle mode, returning the new setting.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    /// Toggle mute, preserving the volume level.
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.engine.set_gain(self.volume.gain());
    }

    /// Set the volume level (0-100). Unmutes if muted.
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.engine.set_gain(self.volume.gain());
    }

    /// Persist the current volume level. Failures are logged only.
    pub async fn commit_volume(&self) {
        if let Err(err) = self.volume_store.save_volume(self.volume.level()).await {
            warn!(error = %err, "Could not persist volume level");
        }
    }

    /// Seek to a fraction (0.0 - 1.0) of the track.
    ///
    /// Ignored while the duration is unknown or the computed target is
    /// not finite, rather than handing the engine a bad position.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let Some(duration) = self.engine.duration() else {
            warn!("Ignoring seek: track duration not yet known");
            return;
        };

        let total = duration.as_secs_f64();
        let target = fraction * total;
        if !target.is_finite() || target < 0.0 {
            warn!(target, "Ignoring seek to non-finite position");
            return;
        }

        self.engine
            .set_position(Duration::from_secs(target.min(total) as u64));
    }

    /// Whether a track change is currently settling.
    pub fn is_busy(&self) -> bool {
        self.advancing
    }

    /// Whether shuffle mode is on.
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// The deck (read-only).
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The now-playing display state (read-only).
    pub fn display(&self) -> &NowPlaying {
        &self.display
    }

    /// Snapshot of the externally visible playback state.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            shuffle: self.shuffle,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            current_track: self.deck.current().cloned(),
            is_playing: self.is_playing,
        }
    }

    /// Compute the next track and record it in the deck.
    async fn choose_next(&mut self) -> Result<Arc<Track>> {
        // Queued lookahead replays before anything new is generated.
        if let Some(track) = self.deck.advance() {
            debug!(position = ?self.deck.position(), "Replaying queued deck entry");
            return Ok(track);
        }

        if self.shuffle {
            let track = self.library.random_track().await?;
            self.deck.push(track.clone());
            Ok(track)
        } else {
            let current = self
                .deck
                .current()
                .cloned()
                .ok_or(PlaybackError::NoTrackLoaded)?;
            let catalog = self.library.catalog().await?;
            let next = catalog.next_after(&current.id)?;
            self.deck.push(next.clone());
            Ok(next)
        }
    }

    /// Point the engine and the display at a track and start playback.
    fn load_track(&mut self, track: &Arc<Track>) {
        let stream_url = self.library.repo().audio_url(&track.id);
        debug!(track_id = %track.id, title = %track.title, "Loading track");

        self.engine.set_source(&stream_url);
        self.display.reset_progress();

        match self.engine.play() {
            Ok(()) => self.set_playing(true),
            Err(err) => {
                // Autoplay refusal is normal; show the paused state.
                debug!(error = %err, "Engine refused to start playback");
                self.set_playing(false);
            }
        }

        let artwork_url = self.library.repo().artwork_url(&track.id);
        self.display.show_track(track, artwork_url);
    }

    fn refresh_progress(&mut self) {
        let position = self.engine.position();
        let duration = self.engine.duration();
        self.display.set_progress(position, duration);
    }

    fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
        self.display.set_playing(playing);
    }
}
