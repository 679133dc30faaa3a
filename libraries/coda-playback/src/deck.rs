//! The playback deck
//!
//! An ordered, bounded sequence of played and queued-ahead tracks with a
//! cursor. Backing history for previous/next navigation: entries behind
//! the cursor were played, entries ahead of it are deterministic replay
//! material queued by earlier navigation.

use coda_core::Track;
use std::collections::VecDeque;
use std::sync::Arc;

/// Default maximum deck size
pub const DEFAULT_DECK_CAP: usize = 100;

/// Bounded play history + lookahead.
///
/// Appending past the cap evicts oldest entries and re-clamps the cursor
/// to the new last index, so `len() <= cap()` always holds and the cursor
/// is a valid index whenever the deck is non-empty.
#[derive(Debug, Clone)]
pub struct Deck {
    entries: VecDeque<Arc<Track>>,
    position: Option<usize>,
    cap: usize,
}

impl Deck {
    /// Create an empty deck with the given cap (at least 1).
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            position: None,
            cap: cap.max(1),
        }
    }

    /// Append a track, evicting oldest entries past the cap, and move the
    /// cursor to it.
    pub fn push(&mut self, track: Arc<Track>) {
        self.entries.push_back(track);
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
        self.position = Some(self.entries.len() - 1);
    }

    /// Drop all entries after the cursor, then append.
    ///
    /// The branch point of an explicit selection: forward history queued
    /// by earlier back-navigation is discarded.
    pub fn branch_to(&mut self, track: Arc<Track>) {
        if let Some(position) = self.position {
            self.entries.truncate(position + 1);
        }
        self.push(track);
    }

    /// Move the cursor forward into queued lookahead, if any.
    pub fn advance(&mut self) -> Option<Arc<Track>> {
        let position = self.position?;
        if position + 1 < self.entries.len() {
            self.position = Some(position + 1);
            self.entries.get(position + 1).cloned()
        } else {
            None
        }
    }

    /// Move the cursor back one entry, or stay at the first.
    ///
    /// Always returns the entry at the resulting cursor; at position 0
    /// that is the current entry again (the replay-from-start fallback).
    pub fn retreat(&mut self) -> Option<Arc<Track>> {
        let position = self.position?;
        let target = position.saturating_sub(1);
        self.position = Some(target);
        self.entries.get(target).cloned()
    }

    /// The entry at the cursor.
    pub fn current(&self) -> Option<&Arc<Track>> {
        self.entries.get(self.position?)
    }

    /// The cursor, if a track has been loaded.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Whether entries are queued ahead of the cursor.
    pub fn has_lookahead(&self) -> bool {
        matches!(self.position, Some(p) if p + 1 < self.entries.len())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the deck has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum deck size.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Iterate entries oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Track>> {
        self.entries.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(DEFAULT_DECK_CAP)
    }
}
