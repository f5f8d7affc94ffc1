//! HTTP fetcher implementation
//!
//! One GET per call, no retries, reqwest's default redirect policy. Any
//! non-success status or transport failure is returned as a [`FetchError`].

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Errors raised while fetching a listing page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: Url, status: StatusCode },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// Builds an HTTP client with the given user agent
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches raw listing documents
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a fetcher with its own HTTP client
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = build_http_client(user_agent).map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// Fetches a URL and returns the response body
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the page
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The decoded response body
    /// * `Err(FetchError)` - Transport failure or non-2xx status
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        tracing::info!("Downloading page: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })
    }
}
