//! Main Coda API client.

use crate::config::ApiConfig;
use crate::error::{ClientError, Result};
use crate::types::{
    Envelope, PlaylistPayload, RawTrack, SetVolumeRequest, TracksPayload, UserStatus,
    validate_tracks,
};
use coda_core::{PlaylistId, PlaylistListing, Track, TrackId};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for the Coda music API.
///
/// Wraps a cookie-keeping HTTP client (the session credential is a
/// cookie) and checks the `{status_code, data}` envelope on every
/// response. Also the place where stream and artwork URLs are built, so
/// nothing above it needs to know the endpoint layout.
pub struct CodaClient {
    http: Client,
    config: ApiConfig,
}

impl CodaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .user_agent(format!("Coda/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: ApiConfig { base_url, ..config },
        })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Whether stream URLs request lossless audio.
    pub fn flac(&self) -> bool {
        self.config.flac
    }

    /// GET `url`, unwrap the response envelope, and return its payload.
    async fn api_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::Unreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        // Check the embedded status before interpreting the payload: an
        // error envelope carries no usable data.
        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        if envelope.status_code != 200 {
            return Err(ClientError::ApiStatus(envelope.status_code));
        }

        serde_json::from_value(envelope.data).map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Fetch a single track by id.
    ///
    /// A record missing its required fields is a parse error here: a
    /// directly requested track has nothing to fall back to.
    pub async fn track(&self, id: &TrackId) -> Result<Arc<Track>> {
        let url = format!("{}/songs/{}", self.config.base_url, id);
        debug!(url = %url, track_id = %id, "Fetching track");

        let raw: RawTrack = self.api_get(&url).await?;
        raw.into_track()
            .map(Arc::new)
            .ok_or_else(|| ClientError::Parse("track record missing title or length".into()))
    }

    /// Fetch the full song listing, skipping invalid records.
    pub async fn all_tracks(&self) -> Result<Vec<Arc<Track>>> {
        let url = format!("{}/songs", self.config.base_url);
        debug!(url = %url, "Fetching all tracks");

        let payload: TracksPayload = self.api_get(&url).await?;
        let tracks = validate_tracks(payload.tracks);

        debug!(tracks = tracks.len(), "Fetched song listing");
        Ok(tracks)
    }

    /// Fetch a playlist's listing, skipping invalid records.
    pub async fn playlist(&self, id: &PlaylistId) -> Result<PlaylistListing> {
        let url = format!("{}/playlists/{}", self.config.base_url, id);
        debug!(url = %url, playlist_id = %id, "Fetching playlist");

        let payload: PlaylistPayload = self.api_get(&url).await?;
        let listing = PlaylistListing {
            name: payload.name,
            owner_name: payload.owner_name,
            tracks: validate_tracks(payload.tracks),
        };

        debug!(
            playlist = %listing.name,
            tracks = listing.tracks.len(),
            "Fetched playlist listing"
        );
        Ok(listing)
    }

    /// Check the session cookie against the server.
    pub async fn current_user(&self) -> Result<UserStatus> {
        let url = format!("{}/current_user", self.config.base_url);
        debug!(url = %url, "Checking login status");

        self.api_get(&url).await
    }

    /// Persist the user's volume level (0-100).
    ///
    /// The response body is not inspected; only the HTTP status matters.
    pub async fn set_volume(&self, level: u8) -> Result<()> {
        let url = format!("{}/set_volume", self.config.base_url);
        debug!(url = %url, level, "Persisting volume");

        let response = self
            .http
            .post(&url)
            .json(&SetVolumeRequest { volume: level })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ClientError::Unreachable(e.to_string())
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// URL of a track's audio stream, honoring the lossless preference.
    pub fn audio_url(&self, id: &TrackId) -> String {
        if self.config.flac {
            format!("{}/songs/{}/audio?flac=1", self.config.base_url, id)
        } else {
            format!("{}/songs/{}/audio", self.config.base_url, id)
        }
    }

    /// URL of a track's audio stream as a download.
    pub fn download_url(&self, id: &TrackId) -> String {
        if self.config.flac {
            format!("{}/songs/{}/audio?flac=1&dl=1", self.config.base_url, id)
        } else {
            format!("{}/songs/{}/audio?dl=1", self.config.base_url, id)
        }
    }

    /// URL of a track's artwork image.
    pub fn artwork_url(&self, id: &TrackId) -> String {
        format!("{}/songs/{}/artwork", self.config.base_url, id)
    }
}
