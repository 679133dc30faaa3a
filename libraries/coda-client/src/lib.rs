//! Coda API client
//!
//! HTTP client for the remote Coda music API: track metadata, catalog and
//! playlist listings, session state, and persisted volume. Stream and
//! artwork URLs are constructed here so the playback layer never sees the
//! endpoint layout.
//!
//! Every API response is a `{status_code, data}` envelope; the client
//! checks the embedded status in addition to the HTTP status. Session
//! credentials ride on a cookie, so the underlying HTTP client keeps a
//! cookie store.
//!
//! # Example
//!
//! ```ignore
//! use coda_client::{ApiConfig, CodaClient};
//! use coda_core::TrackId;
//!
//! let client = CodaClient::new(ApiConfig::new("https://api.music.example.com"))?;
//!
//! let track = client.track(&TrackId::new("42")).await?;
//! println!("{} ({})", track.title, client.audio_url(&track.id));
//!
//! let user = client.current_user().await?;
//! if user.logged_in {
//!     client.set_volume(80).await?;
//! }
//! ```

#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod repo;
mod types;

pub use client::CodaClient;
pub use config::ApiConfig;
pub use error::{ClientError, Result};
pub use types::{ApiUser, UserStatus};
