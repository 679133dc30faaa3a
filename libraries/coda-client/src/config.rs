//! Client configuration

/// Configuration for connecting to a Coda API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API (e.g., "https://api.music.example.com")
    pub base_url: String,

    /// Request lossless (FLAC) audio streams.
    ///
    /// Mirrors the client-side preference the web UI persists in a cookie;
    /// when set, stream URLs carry `flac=1`.
    pub flac: bool,
}

impl ApiConfig {
    /// Create a config with just the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            flac: false,
        }
    }

    /// Toggle the lossless-stream preference.
    pub fn with_flac(mut self, flac: bool) -> Self {
        self.flac = flac;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_lossy() {
        let config = ApiConfig::new("https://example.com");
        assert_eq!(config.base_url, "https://example.com");
        assert!(!config.flac);
    }

    #[test]
    fn flac_preference() {
        let config = ApiConfig::new("https://example.com").with_flac(true);
        assert!(config.flac);
    }
}
