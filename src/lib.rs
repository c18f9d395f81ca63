//! Skimmer: a one-shot paginated listing scraper
//!
//! This crate implements a linear scraping pipeline: fetch a page (through a
//! temporary-directory content cache), extract fields with CSS selector rules,
//! follow the next-page link, repeat up to a page limit, and export one of the
//! accumulated records as CSV.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for skimmer operations
#[derive(Debug, Error)]
pub enum SkimmerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("No extracted record at index {index}: only {available} page(s) scraped")]
    RecordUnavailable { index: usize, available: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed selector entry '{0}': expected name=selector")]
    MalformedRule(String),

    #[error("Invalid CSS selector for field '{field}': {message}")]
    InvalidSelector { field: String, message: String },

    #[error("Malformed column entry '{0}': expected Header=field")]
    MalformedColumn(String),

    #[error("Invalid seed URL '{url}': {message}")]
    InvalidSeedUrl { url: String, message: String },
}

/// Result type alias for skimmer operations
pub type Result<T> = std::result::Result<T, SkimmerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::PageCache;
pub use config::{ExportConfig, JobArgs, JobConfig, SelectorRules};
pub use crawler::{PageFetcher, PageRecord, StopReason, WalkOutcome, Walker};
pub use output::export_record;
