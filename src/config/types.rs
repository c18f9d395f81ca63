use scraper::Selector;
use std::path::PathBuf;
use std::time::Duration;

/// Default iteration cap for the pagination walk
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Default CSS selector for the next-page anchor
pub const DEFAULT_NEXT_SELECTOR: &str = "a.next";

/// Default output path for the exported CSV
pub const DEFAULT_OUTPUT_PATH: &str = "books.csv";

/// Default export schema: header name paired with the extracted field it reads
pub const DEFAULT_COLUMNS: &str = "Title=title,Price=price";

/// Steady-state outbound request rate (permits per second)
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 5;

/// Token-bucket burst capacity
pub const DEFAULT_BURST: u32 = 1;

/// Pause between pages, applied after a next link is found
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Raw job parameters as they arrive from the command line
///
/// Everything here is an unparsed string (or plain number); `build_job`
/// turns it into a validated [`JobConfig`].
#[derive(Debug, Clone)]
pub struct JobArgs {
    /// Scheme+host prefix prepended to the start page
    pub base_url: String,

    /// Path (or full URL) appended to `base_url` to form the seed
    pub start_page: String,

    /// Comma-separated `name=selector` pairs
    pub selectors: String,

    /// Iteration cap for the walk
    pub max_pages: u32,

    /// CSS selector for the next-page anchor
    pub next_selector: String,

    /// Output CSV path
    pub out: PathBuf,

    /// Comma-separated `Header=field` pairs for the export schema
    pub columns: String,

    /// Index of the accumulated record to export
    pub record: usize,
}

/// One field-extraction rule: a field name bound to a compiled CSS selector
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// User-chosen field name
    pub name: String,

    /// The selector expression as written, kept for messages and logs
    pub expression: String,

    /// Compiled form of `expression`
    pub selector: Selector,
}

/// The immutable set of field-extraction rules for one job
#[derive(Debug, Clone, Default)]
pub struct SelectorRules {
    rules: Vec<FieldRule>,
}

impl SelectorRules {
    /// Wraps an already-parsed rule list
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One export column: CSV header paired with the record field it reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header text written to the first CSV row
    pub header: String,

    /// Name of the extracted field supplying this column's values
    pub field: String,
}

/// Export settings: where to write, which columns, which record
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output CSV path
    pub path: PathBuf,

    /// Column schema, in output order
    pub columns: Vec<ColumnSpec>,

    /// Index into the accumulated record list
    pub record_index: usize,
}

/// Fully parsed and validated configuration for one scraping job
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Scheme+host prefix prepended to the start page
    pub base_url: String,

    /// Path (or full URL) appended to `base_url` to form the seed
    pub start_page: String,

    /// Iteration cap for the walk
    pub max_pages: u32,

    /// Field-extraction rules
    pub rules: SelectorRules,

    /// Next-page anchor selector expression, kept for messages and logs
    pub next_expression: String,

    /// Compiled next-page anchor selector
    pub next_selector: Selector,

    /// Steady-state outbound request rate (permits per second)
    pub requests_per_second: u32,

    /// Token-bucket burst capacity
    pub burst: u32,

    /// Pause between pages, applied after a next link is found
    pub page_delay: Duration,

    /// Export settings
    pub export: ExportConfig,
}

impl JobConfig {
    /// The first pagination cursor: `base_url` and `start_page` concatenated
    /// verbatim, with no path resolution.
    pub fn seed_url(&self) -> String {
        format!("{}{}", self.base_url, self.start_page)
    }
}
