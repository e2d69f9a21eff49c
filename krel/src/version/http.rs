//! HTTP client abstraction for testability

use std::time::Duration;

use super::error::{VersionError, VersionResult};

/// Default timeout for HTTP requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as text, or a fetch error when the request fails or
    /// the server answers with a non-success status.
    fn get_text(&self, url: &str) -> VersionResult<String>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> VersionResult<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout: Duration) -> VersionResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VersionError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get_text(&self, url: &str) -> VersionResult<String> {
        let response = self.client.get(url).send().map_err(|e| VersionError::Fetch {
            url: url.to_string(),
            reason: format!("request failed: {}", e),
        })?;

        if !response.status().is_success() {
            return Err(VersionError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        response.text().map_err(|e| VersionError::Fetch {
            url: url.to_string(),
            reason: format!("failed to read response: {}", e),
        })
    }
}
