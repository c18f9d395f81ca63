//! Filesystem-backed page content cache
//!
//! Raw page content is stored under a process-scoped temporary directory so
//! a URL fetched once during a run is never fetched from the network again.
//! The cache is an explicit value: it is created at startup, handed to the
//! fetcher, and its directory (including every entry) is removed when the
//! value drops at process exit.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to create cache directory: {0}")]
    Create(#[from] std::io::Error),

    #[error("Failed to read cache entry '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write cache entry '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Derives the filesystem-safe cache key for a URL
///
/// Every path separator in the URL is replaced with an underscore, turning
/// the whole URL into a single flat file name.
///
/// # Example
///
/// ```
/// use skimmer::cache::cache_key;
///
/// assert_eq!(cache_key("http://x/p1"), "http:__x_p1");
/// ```
pub fn cache_key(url: &str) -> String {
    url.replace('/', "_")
}

/// URL-keyed content cache backed by a temporary directory
///
/// One file per cached URL, named by [`cache_key`]. A `get` miss is
/// `Ok(None)`, not an error; read and write failures propagate so the
/// caller can fail the surrounding fetch.
#[derive(Debug)]
pub struct PageCache {
    dir: TempDir,
}

impl PageCache {
    /// Creates a cache backed by a fresh temporary directory
    ///
    /// # Returns
    ///
    /// * `Ok(PageCache)` - Directory created and owned by the returned value
    /// * `Err(CacheError)` - The directory could not be created
    pub fn new() -> CacheResult<Self> {
        let dir = tempfile::Builder::new().prefix("skimmer-cache-").tempdir()?;
        debug!("Page cache directory: {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Filesystem path of the cache directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Looks up previously cached content for a URL
    ///
    /// # Returns
    ///
    /// * `Ok(Some(content))` - Cache hit
    /// * `Ok(None)` - No entry for this URL
    /// * `Err(CacheError)` - An entry exists but could not be read
    pub fn get(&self, url: &str) -> CacheResult<Option<String>> {
        let path = self.entry_path(url);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| CacheError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(Some(content))
    }

    /// Stores content for a URL, replacing any existing entry
    pub fn put(&self, url: &str, content: &str) -> CacheResult<()> {
        let path = self.entry_path(url);
        fs::write(&path, content).map_err(|e| CacheError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.path().join(cache_key(url))
    }
}
