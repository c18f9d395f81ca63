use crate::config::types::{
    ColumnSpec, ExportConfig, FieldRule, JobArgs, JobConfig, SelectorRules, DEFAULT_BURST,
    DEFAULT_PAGE_DELAY, DEFAULT_REQUESTS_PER_SECOND,
};
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use scraper::Selector;

/// Builds a validated [`JobConfig`] from raw command-line parameters
///
/// Selector and column lists are parsed eagerly: every entry must split into
/// a non-empty name and a non-empty expression on its first `=`, and every
/// selector expression must compile. A malformed entry is an error, never a
/// silent drop.
///
/// # Arguments
///
/// * `args` - Raw job parameters from the command line
///
/// # Returns
///
/// * `Ok(JobConfig)` - Parsed and validated configuration
/// * `Err(ConfigError)` - A malformed entry, an invalid selector, or a
///   validation failure
///
/// # Example
///
/// ```
/// use skimmer::config::{build_job, JobArgs};
///
/// let config = build_job(JobArgs {
///     base_url: "http://example.com/".to_string(),
///     start_page: "page1.html".to_string(),
///     selectors: "title=.t,price=.p".to_string(),
///     max_pages: 3,
///     next_selector: "a.next".to_string(),
///     out: "out.csv".into(),
///     columns: "Title=title,Price=price".to_string(),
///     record: 0,
/// }).unwrap();
///
/// assert_eq!(config.rules.len(), 2);
/// assert_eq!(config.export.columns.len(), 2);
/// ```
pub fn build_job(args: JobArgs) -> ConfigResult<JobConfig> {
    let rules = parse_selector_rules(&args.selectors)?;
    let columns = parse_columns(&args.columns)?;

    let next_selector = compile_selector("next-page anchor", &args.next_selector)?;

    let config = JobConfig {
        base_url: args.base_url,
        start_page: args.start_page,
        max_pages: args.max_pages,
        rules,
        next_expression: args.next_selector,
        next_selector,
        requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        burst: DEFAULT_BURST,
        page_delay: DEFAULT_PAGE_DELAY,
        export: ExportConfig {
            path: args.out,
            columns,
            record_index: args.record,
        },
    };

    validate(&config)?;

    Ok(config)
}

/// Parses a comma-separated `name=selector` list into compiled rules
///
/// Each entry is trimmed, then split on its first `=` so that attribute
/// selectors containing `=` (for example `[data-price="usd"]`) stay intact.
/// Duplicate field names are rejected: the extracted record is keyed by
/// field name, so a duplicate would overwrite an earlier rule's matches.
///
/// # Arguments
///
/// * `raw` - The selector list as passed on the command line
///
/// # Returns
///
/// * `Ok(SelectorRules)` - One compiled rule per entry, in input order
/// * `Err(ConfigError)` - Empty list, malformed entry, invalid selector, or
///   duplicate field name
pub fn parse_selector_rules(raw: &str) -> ConfigResult<SelectorRules> {
    if raw.trim().is_empty() {
        return Err(ConfigError::Validation(
            "selector list cannot be empty".to_string(),
        ));
    }

    let mut rules: Vec<FieldRule> = Vec::new();

    for entry in raw.split(',') {
        let entry = entry.trim();

        let (name, expression) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedRule(entry.to_string()))?;

        let name = name.trim();
        let expression = expression.trim();

        if name.is_empty() || expression.is_empty() {
            return Err(ConfigError::MalformedRule(entry.to_string()));
        }

        if rules.iter().any(|r| r.name == name) {
            return Err(ConfigError::Validation(format!(
                "duplicate field name '{}' in selector list",
                name
            )));
        }

        let selector = compile_selector(name, expression)?;

        rules.push(FieldRule {
            name: name.to_string(),
            expression: expression.to_string(),
            selector,
        });
    }

    Ok(SelectorRules::new(rules))
}

/// Parses a comma-separated `Header=field` list into export columns
///
/// Split and trim rules match [`parse_selector_rules`]; headers may repeat
/// (CSV permits duplicate header cells) but each entry must name a field.
///
/// # Arguments
///
/// * `raw` - The column list as passed on the command line
///
/// # Returns
///
/// * `Ok(Vec<ColumnSpec>)` - One column per entry, in output order
/// * `Err(ConfigError)` - Empty list or malformed entry
pub fn parse_columns(raw: &str) -> ConfigResult<Vec<ColumnSpec>> {
    if raw.trim().is_empty() {
        return Err(ConfigError::Validation(
            "column list cannot be empty".to_string(),
        ));
    }

    let mut columns = Vec::new();

    for entry in raw.split(',') {
        let entry = entry.trim();

        let (header, field) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedColumn(entry.to_string()))?;

        let header = header.trim();
        let field = field.trim();

        if header.is_empty() || field.is_empty() {
            return Err(ConfigError::MalformedColumn(entry.to_string()));
        }

        columns.push(ColumnSpec {
            header: header.to_string(),
            field: field.to_string(),
        });
    }

    Ok(columns)
}

/// Compiles a CSS selector expression, attributing failures to `field`
fn compile_selector(field: &str, expression: &str) -> ConfigResult<Selector> {
    Selector::parse(expression).map_err(|e| ConfigError::InvalidSelector {
        field: field.to_string(),
        message: e.to_string(),
    })
}
