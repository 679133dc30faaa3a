//! Library context
//!
//! The application context shared by the player and the track-list UI:
//! the repository handle, the catalog scope, and the cached catalog. The
//! catalog loads lazily exactly once; the player reads it and never
//! writes it.

use crate::error::Result;
use coda_core::{
    Catalog, CatalogScope, CatalogSource, CoreError, Track, TrackId, TrackRepository,
};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Shared track source for one page session.
pub struct Library {
    repo: Arc<dyn TrackRepository>,
    scope: CatalogScope,
    catalog: OnceCell<Arc<Catalog>>,
}

impl Library {
    /// Create a library over the given repository and catalog scope.
    pub fn new(repo: Arc<dyn TrackRepository>, scope: CatalogScope) -> Self {
        Self {
            repo,
            scope,
            catalog: OnceCell::new(),
        }
    }

    /// The underlying repository (for stream/artwork URL construction).
    pub fn repo(&self) -> &dyn TrackRepository {
        self.repo.as_ref()
    }

    /// The catalog, loading it on first use.
    ///
    /// A playlist scope whose listing fails falls back to the full song
    /// listing; only a failure of that fallback propagates.
    pub async fn catalog(&self) -> Result<Arc<Catalog>> {
        let catalog = self
            .catalog
            .get_or_try_init(|| self.load_catalog())
            .await?;
        Ok(catalog.clone())
    }

    async fn load_catalog(&self) -> Result<Arc<Catalog>> {
        let catalog = match &self.scope {
            CatalogScope::AllSongs => self.load_all_songs().await?,
            CatalogScope::Playlist(id) => match self.repo.playlist(id).await {
                Ok(listing) => Catalog::new(
                    CatalogSource::Playlist {
                        name: listing.name,
                        owner_name: listing.owner_name,
                    },
                    listing.tracks,
                ),
                Err(err) => {
                    warn!(
                        playlist_id = %id,
                        error = %err,
                        "Playlist listing failed, falling back to all songs"
                    );
                    self.load_all_songs().await?
                }
            },
        };

        debug!(tracks = catalog.len(), "Catalog loaded");
        Ok(Arc::new(catalog))
    }

    async fn load_all_songs(&self) -> Result<Catalog> {
        let tracks = self.repo.all_tracks().await?;
        Ok(Catalog::new(CatalogSource::AllSongs, tracks))
    }

    /// Pick a track uniformly at random from the catalog.
    pub async fn random_track(&self) -> Result<Arc<Track>> {
        let catalog = self.catalog().await?;
        Ok(catalog.random()?)
    }

    /// Fetch a track by id from the repository (not the cached catalog).
    pub async fn track_by_id(&self, id: &TrackId) -> Result<Arc<Track>> {
        Ok(self.repo.track_by_id(id).await?)
    }

    /// Resolve a track-list selection against the cached catalog.
    pub async fn resolve(&self, id: &TrackId) -> Result<Arc<Track>> {
        let catalog = self.catalog().await?;
        Ok(catalog
            .get(id)
            .ok_or_else(|| CoreError::NotInCatalog(id.clone()))?)
    }

    /// The "You're listening to ..." banner for the loaded catalog.
    pub async fn banner(&self) -> Result<String> {
        Ok(self.catalog().await?.banner())
    }
}
