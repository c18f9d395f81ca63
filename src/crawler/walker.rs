//! Pagination walk orchestration
//!
//! This module contains the main scraping loop that coordinates the whole
//! pipeline:
//! - Rate-limit every fetch attempt
//! - Fetch the current cursor through the content cache
//! - Extract a record and locate the next-page anchor
//! - Replace the cursor, pause, repeat until a stop condition
//!
//! The walk is strictly sequential: one page at a time, one task, awaits in
//! order. A fetch failure ends the walk but never discards the records
//! gathered before it.

use crate::cache::PageCache;
use crate::config::JobConfig;
use crate::crawler::fetcher::{build_http_client, FetchError, PageFetcher};
use crate::crawler::limiter::FetchLimiter;
use crate::crawler::parser::{extract_record, find_next_href, PageRecord};
use crate::Result;
use scraper::Html;
use std::fmt;
use tracing::{debug, error, info, warn};

/// Why a walk ended
#[derive(Debug)]
pub enum StopReason {
    /// The configured page limit was reached
    LimitReached,

    /// The current page had no usable next-page anchor
    NoNextLink,

    /// A fetch failed; records gathered before it are kept
    Fetch(FetchError),
}

impl StopReason {
    /// True when the walk ended without a failure
    pub fn is_success(&self) -> bool {
        !matches!(self, StopReason::Fetch(_))
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::LimitReached => write!(f, "page limit reached"),
            StopReason::NoNextLink => write!(f, "no next-page link"),
            StopReason::Fetch(e) => write!(f, "fetch failed: {}", e),
        }
    }
}

/// Result of a completed walk
#[derive(Debug)]
pub struct WalkOutcome {
    /// One record per scraped page, in fetch order
    pub records: Vec<PageRecord>,

    /// Why the walk stopped
    pub reason: StopReason,
}

/// Sequential pagination walker
///
/// Owns the fetcher (and through it the content cache) and the rate
/// limiter for one job.
pub struct Walker {
    config: JobConfig,
    fetcher: PageFetcher,
    limiter: FetchLimiter,
}

impl Walker {
    /// Creates a walker with a fresh cache, HTTP client, and rate limiter
    ///
    /// # Arguments
    ///
    /// * `config` - The validated job configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Walker)` - Ready to run
    /// * `Err(SkimmerError)` - Cache directory or HTTP client creation failed
    pub fn new(config: JobConfig) -> Result<Self> {
        let cache = PageCache::new()?;
        let client = build_http_client()?;
        let limiter = FetchLimiter::new(config.requests_per_second, config.burst);

        Ok(Self {
            config,
            fetcher: PageFetcher::new(client, cache),
            limiter,
        })
    }

    /// Runs the walk to completion
    ///
    /// # Per iteration
    ///
    /// 1. Stop with [`StopReason::LimitReached`] once the page limit is hit
    /// 2. Wait for a rate permit (every attempt, cache hits included)
    /// 3. Fetch the cursor; a failure stops the walk with
    ///    [`StopReason::Fetch`], keeping the records gathered so far
    /// 4. Extract a record and append it to the results
    /// 5. Find the next-page anchor; absence stops the walk with
    ///    [`StopReason::NoNextLink`]
    /// 6. Replace the cursor with the anchor's href verbatim, count the
    ///    completed page, pause for the inter-page delay, repeat
    ///
    /// The pause in step 6 runs even when step 1 will stop the walk on the
    /// next iteration. `run` never returns an error: failures become the
    /// outcome's stop reason.
    pub async fn run(&self) -> WalkOutcome {
        let mut cursor = self.config.seed_url();
        let mut pages_done: u32 = 0;
        let mut records = Vec::new();

        info!(
            "Starting walk at {} (limit {} page(s))",
            cursor, self.config.max_pages
        );

        loop {
            if pages_done >= self.config.max_pages {
                info!("Page limit reached after {} page(s)", pages_done);
                return WalkOutcome {
                    records,
                    reason: StopReason::LimitReached,
                };
            }

            self.limiter.acquire().await;

            let content = match self.fetcher.fetch(&cursor).await {
                Ok(content) => content,
                Err(e) => {
                    error!("Fetch failed for {}: {}", cursor, e);
                    return WalkOutcome {
                        records,
                        reason: StopReason::Fetch(e),
                    };
                }
            };

            // Parse once, take everything needed, drop the document before
            // the next await
            let (record, next) = {
                let document = Html::parse_document(&content);
                (
                    extract_record(&document, &self.config.rules, &cursor),
                    find_next_href(&document, &self.config.next_selector),
                )
            };

            info!("Scraped {}: {}", cursor, describe_counts(&record));
            if record.is_empty() {
                warn!("No selector rule matched anything on {}", cursor);
            }
            records.push(record);

            match next {
                Some(href) => {
                    debug!("Next page: {}", href);
                    cursor = href;
                    pages_done += 1;
                    tokio::time::sleep(self.config.page_delay).await;
                }
                None => {
                    info!("No next-page link ({}) on {}", self.config.next_expression, cursor);
                    return WalkOutcome {
                        records,
                        reason: StopReason::NoNextLink,
                    };
                }
            }
        }
    }
}

/// Formats per-field match counts for the progress log
fn describe_counts(record: &PageRecord) -> String {
    record
        .field_names()
        .map(|name| format!("{}={}", name, record.values(name).len()))
        .collect::<Vec<_>>()
        .join(", ")
}
