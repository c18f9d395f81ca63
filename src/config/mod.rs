//! Configuration module for skimmer
//!
//! This module turns raw command-line parameters into a validated job
//! description: compiled selector rules, the pagination anchor selector,
//! iteration and rate limits, and the export schema.
//!
//! # Example
//!
//! ```
//! use skimmer::config::{build_job, JobArgs};
//!
//! let config = build_job(JobArgs {
//!     base_url: "http://example.com/".to_string(),
//!     start_page: "page1.html".to_string(),
//!     selectors: "title=h3 a,price=.price_color".to_string(),
//!     max_pages: 5,
//!     next_selector: "a.next".to_string(),
//!     out: "books.csv".into(),
//!     columns: "Title=title,Price=price".to_string(),
//!     record: 0,
//! }).unwrap();
//!
//! assert_eq!(config.seed_url(), "http://example.com/page1.html");
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ColumnSpec, ExportConfig, FieldRule, JobArgs, JobConfig, SelectorRules, DEFAULT_BURST,
    DEFAULT_COLUMNS, DEFAULT_MAX_PAGES, DEFAULT_NEXT_SELECTOR, DEFAULT_OUTPUT_PATH,
    DEFAULT_PAGE_DELAY, DEFAULT_REQUESTS_PER_SECOND,
};

// Re-export parser functions
pub use parser::{build_job, parse_columns, parse_selector_rules};

// Re-export validation
pub use validation::validate;
