//! Coda Core
//!
//! Shared types, traits, and error handling for the Coda music client.
//!
//! This crate provides the foundational building blocks used by the HTTP
//! client and the playback engine:
//! - **Domain types**: [`Track`], [`TrackId`], [`PlaylistId`]
//! - **Catalog**: the ordered track listing for the current context, with
//!   sequential-next, random selection, and search filtering
//! - **Collaborator traits**: [`TrackRepository`], [`VolumeStore`]
//! - **Error handling**: [`CoreError`], [`RepositoryError`]
//!
//! # Example
//!
//! ```rust
//! use coda_core::{Catalog, CatalogSource, Track, TrackId};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let tracks = vec![
//!     Arc::new(Track::new(TrackId::new("1"), "Intro", Duration::from_secs(61))),
//!     Arc::new(Track::new(TrackId::new("2"), "Outro", Duration::from_secs(183))),
//! ];
//! let catalog = Catalog::new(CatalogSource::AllSongs, tracks);
//!
//! // Sequential playback wraps around at the end of the catalog.
//! let next = catalog.next_after(&TrackId::new("2")).unwrap();
//! assert_eq!(next.id, TrackId::new("1"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod format;
pub mod ids;
pub mod repo;
pub mod track;

pub use catalog::{Catalog, CatalogScope, CatalogSource};
pub use error::{CoreError, RepositoryError, Result};
pub use format::format_duration;
pub use ids::{PlaylistId, TrackId};
pub use repo::{PlaylistListing, TrackRepository, VolumeStore};
pub use track::Track;
