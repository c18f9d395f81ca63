//! Cache-first page fetching
//!
//! This module retrieves raw page content for the walker:
//! - A cache lookup first; a hit never touches the network
//! - On a miss, an HTTP GET with status validation
//! - The fetched body is written back to the cache before it is returned
//!
//! A cache write failure fails the whole fetch even though the body is
//! already in memory; callers treat any `FetchError` as the end of the walk.

use crate::cache::{CacheError, PageCache};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("Failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cache error for {url}: {source}")]
    Cache {
        url: String,
        #[source]
        source: CacheError,
    },
}

/// Builds the HTTP client used for all page fetches
///
/// The client decodes gzip and brotli bodies and identifies itself as
/// `skimmer/<version>`. No timeouts are configured: a hung remote server
/// stalls the run until the process is terminated.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("skimmer/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Cache-first fetcher for raw page content
///
/// Owns the content cache for the run; the walker is its only caller and
/// drives it strictly sequentially.
pub struct PageFetcher {
    client: Client,
    cache: PageCache,
}

impl PageFetcher {
    /// Creates a fetcher from a built client and a cache handle
    pub fn new(client: Client, cache: PageCache) -> Self {
        Self { client, cache }
    }

    /// Retrieves the raw content for a URL
    ///
    /// # Algorithm
    ///
    /// 1. Consult the cache; on a hit, return the cached content
    /// 2. On a miss, GET the URL
    /// 3. A non-2xx status is an error carrying the [`StatusCode`]
    /// 4. Read the full body, store it in the cache, return it
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The page's raw markup
    /// * `Err(FetchError)` - Network, status, body-read, or cache failure
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match self.cache.get(url) {
            Ok(Some(content)) => {
                debug!("Cache hit for {}", url);
                return Ok(content);
            }
            Ok(None) => {}
            Err(e) => {
                return Err(FetchError::Cache {
                    url: url.to_string(),
                    source: e,
                })
            }
        }

        debug!("Cache miss for {}, fetching", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })?;

        self.cache.put(url, &body).map_err(|e| FetchError::Cache {
            url: url.to_string(),
            source: e,
        })?;

        Ok(body)
    }
}
