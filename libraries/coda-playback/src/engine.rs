//! Platform-agnostic audio engine trait
//!
//! Abstracts the host's audio element (an HTML `<audio>` tag, a native
//! pipeline, a test fake). The player drives it through source/play/
//! pause/seek and never assumes more than this surface.

use crate::error::Result;
use std::time::Duration;

/// Audio output driven by the player.
///
/// Implementations are expected to stream the given source URL and report
/// position/duration as playback proceeds. `duration` is `None` until the
/// stream's metadata has loaded.
pub trait AudioEngine: Send {
    /// Point the engine at a new stream URL, resetting position to zero.
    fn set_source(&mut self, url: &str);

    /// Begin or resume playback.
    ///
    /// May be refused (autoplay policy, no source); the player treats a
    /// refusal as "paused", not as a fatal error.
    fn play(&mut self) -> Result<()>;

    /// Pause playback.
    fn pause(&mut self);

    /// Seek to a position from the start of the stream.
    fn set_position(&mut self, position: Duration);

    /// Current playback position.
    fn position(&self) -> Duration;

    /// Total stream duration, once metadata is known.
    fn duration(&self) -> Option<Duration>;

    /// Set the output gain (0.0 - 1.0).
    fn set_gain(&mut self, gain: f32);

    /// Whether the engine is currently paused.
    fn is_paused(&self) -> bool;
}
