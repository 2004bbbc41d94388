//! HTTP client for the NFT indexing API.

use crate::utils::config::DEFAULT_HTTP_TIMEOUT;
use crate::utils::error::FetchError;
use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

/// Anything that can answer a GET-style query with a JSON document.
///
/// The collector only talks to this trait, so tests can script responses.
pub trait Fetch {
    fn fetch(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, FetchError> {
        (**self).fetch(endpoint, query)
    }
}

/// Blocking HTTP fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher with the default timeout
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::RequestFailed)?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, FetchError> {
        debug!("GET {} {:?}", endpoint, query);

        let response = self
            .client
            .get(endpoint)
            .query(query)
            .header("Content-Type", "application/json")
            .send()
            .map_err(FetchError::RequestFailed)?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        response.json().map_err(FetchError::RequestFailed)
    }
}
