//! Crawler module for page fetching and pagination walking
//!
//! This module contains the core scraping pipeline, including:
//! - Cache-first HTTP fetching
//! - Token-bucket rate limiting of fetch attempts
//! - Field extraction and next-link location
//! - The sequential pagination walk

mod fetcher;
mod limiter;
mod parser;
mod walker;

pub use fetcher::{build_http_client, FetchError, PageFetcher};
pub use limiter::FetchLimiter;
pub use parser::{extract_record, find_next_href, PageRecord};
pub use walker::{StopReason, WalkOutcome, Walker};

use crate::config::JobConfig;
use crate::Result;

/// Runs a complete pagination walk for one job
///
/// Builds a walker (fresh cache, HTTP client, and rate limiter) and drives
/// it to completion.
///
/// # Arguments
///
/// * `config` - The validated job configuration
///
/// # Returns
///
/// * `Ok(WalkOutcome)` - Accumulated records and the stop reason
/// * `Err(SkimmerError)` - Walker construction failed
pub async fn walk(config: JobConfig) -> Result<WalkOutcome> {
    let walker = Walker::new(config)?;
    Ok(walker.run().await)
}
