//! Duration display formatting

use std::time::Duration;

/// Format a duration for track-length and progress displays.
///
/// Seconds are zero-padded, minutes are not; hours appear only when
/// non-zero: `0:07`, `3:05`, `1:02:03`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
