//! Coda Playback
//!
//! The playback deck and autoplay state machine for the Coda music client.
//!
//! This crate provides:
//! - Bounded play history + lookahead (the deck) with branch-point
//!   truncation for explicit track selection
//! - The choose-next algorithm: deterministic deck replay first, then
//!   shuffle (uniform random) or sequential (catalog order, wrapping)
//! - Volume control (0-100%, mute preserving the level)
//! - Now-playing display state (window title, sidebar fields, progress)
//! - Seek with non-finite-target guarding
//!
//! # Architecture
//!
//! `coda-playback` never talks to the network or an audio device directly.
//! The remote service is reached through `coda_core`'s `TrackRepository`
//! and `VolumeStore` traits, and audio output through the [`AudioEngine`]
//! trait the host platform implements. The host forwards engine events
//! (ended, playing, paused, metadata loaded) to [`Player::handle_event`];
//! a track that ends advances playback automatically.
//!
//! # Example
//!
//! ```ignore
//! use coda_client::{ApiConfig, CodaClient};
//! use coda_core::CatalogScope;
//! use coda_playback::{Library, Player, PlayerConfig};
//! use std::sync::Arc;
//!
//! let client = Arc::new(CodaClient::new(ApiConfig::new("https://api.music.example.com"))?);
//! let library = Arc::new(Library::new(client.clone(), CatalogScope::AllSongs));
//!
//! let engine = Box::new(MyAudioEngine::new());
//! let mut player = Player::new(library, client, engine, PlayerConfig::default());
//!
//! player.start().await;
//! player.play_next().await?;
//! ```

#![forbid(unsafe_code)]

pub mod deck;
pub mod display;
pub mod engine;
mod error;
mod events;
mod library;
mod player;
pub mod types;
mod volume;

pub use deck::{Deck, DEFAULT_DECK_CAP};
pub use display::NowPlaying;
pub use engine::AudioEngine;
pub use error::{PlaybackError, Result};
pub use events::EngineEvent;
pub use library::Library;
pub use player::Player;
pub use types::{PlaybackState, PlayerConfig};
pub use volume::Volume;
