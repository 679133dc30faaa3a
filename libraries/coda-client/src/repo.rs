//! Collaborator-trait implementations for [`CodaClient`].
//!
//! The playback engine consumes the client through `coda_core`'s
//! [`TrackRepository`] and [`VolumeStore`] traits; client errors are
//! mapped into [`RepositoryError`] at this seam.

use crate::client::CodaClient;
use crate::error::ClientError;
use async_trait::async_trait;
use coda_core::{
    PlaylistId, PlaylistListing, RepositoryError, Track, TrackId, TrackRepository, VolumeStore,
};
use std::sync::Arc;
use tracing::debug;

fn not_found(err: &ClientError) -> bool {
    matches!(
        err,
        ClientError::ApiStatus(404) | ClientError::Server { status: 404, .. }
    )
}

fn transport(err: ClientError) -> RepositoryError {
    match err {
        ClientError::Parse(msg) => RepositoryError::Malformed(msg),
        other => RepositoryError::Transport(Box::new(other)),
    }
}

#[async_trait]
impl TrackRepository for CodaClient {
    async fn track_by_id(&self, id: &TrackId) -> Result<Arc<Track>, RepositoryError> {
        self.track(id).await.map_err(|e| {
            if not_found(&e) {
                RepositoryError::TrackNotFound(id.clone())
            } else {
                transport(e)
            }
        })
    }

    async fn all_tracks(&self) -> Result<Vec<Arc<Track>>, RepositoryError> {
        CodaClient::all_tracks(self).await.map_err(transport)
    }

    async fn playlist(&self, id: &PlaylistId) -> Result<PlaylistListing, RepositoryError> {
        CodaClient::playlist(self, id).await.map_err(|e| {
            if not_found(&e) {
                RepositoryError::PlaylistNotFound(id.clone())
            } else {
                transport(e)
            }
        })
    }

    fn audio_url(&self, id: &TrackId) -> String {
        CodaClient::audio_url(self, id)
    }

    fn artwork_url(&self, id: &TrackId) -> String {
        CodaClient::artwork_url(self, id)
    }
}

#[async_trait]
impl VolumeStore for CodaClient {
    async fn load_volume(&self) -> Result<Option<u8>, RepositoryError> {
        let status = self.current_user().await.map_err(transport)?;

        let level = status.user.and_then(|u| u.volume);
        debug!(?level, logged_in = status.logged_in, "Loaded saved volume");
        Ok(level)
    }

    async fn save_volume(&self, level: u8) -> Result<(), RepositoryError> {
        self.set_volume(level).await.map_err(transport)
    }
}
