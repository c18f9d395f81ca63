use crate::config::types::{ExportConfig, JobConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates a fully assembled job configuration
pub fn validate(config: &JobConfig) -> ConfigResult<()> {
    validate_seed(config)?;
    validate_limits(config)?;
    validate_export(&config.export)?;
    Ok(())
}

/// Validates the seed URL formed from base_url and start_page
fn validate_seed(config: &JobConfig) -> ConfigResult<()> {
    if config.base_url.is_empty() {
        return Err(ConfigError::Validation(
            "base_url cannot be empty".to_string(),
        ));
    }

    if config.start_page.is_empty() {
        return Err(ConfigError::Validation(
            "start_page cannot be empty".to_string(),
        ));
    }

    let seed = config.seed_url();
    let url = Url::parse(&seed).map_err(|e| ConfigError::InvalidSeedUrl {
        url: seed.clone(),
        message: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "seed URL '{}' must use http or https, got '{}'",
            seed,
            url.scheme()
        )));
    }

    Ok(())
}

/// Validates iteration and rate limits
fn validate_limits(config: &JobConfig) -> ConfigResult<()> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.requests_per_second < 1 {
        return Err(ConfigError::Validation(format!(
            "requests_per_second must be >= 1, got {}",
            config.requests_per_second
        )));
    }

    if config.burst < 1 {
        return Err(ConfigError::Validation(format!(
            "burst must be >= 1, got {}",
            config.burst
        )));
    }

    if config.rules.is_empty() {
        return Err(ConfigError::Validation(
            "at least one selector rule is required".to_string(),
        ));
    }

    Ok(())
}

/// Validates export settings
fn validate_export(config: &ExportConfig) -> ConfigResult<()> {
    if config.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    if config.columns.is_empty() {
        return Err(ConfigError::Validation(
            "at least one export column is required".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{build_job, JobArgs};

    fn job_args() -> JobArgs {
        JobArgs {
            base_url: "http://example.com/".to_string(),
            start_page: "page1.html".to_string(),
            selectors: "title=.t,price=.p".to_string(),
            max_pages: 5,
            next_selector: "a.next".to_string(),
            out: "books.csv".into(),
            columns: "Title=title,Price=price".to_string(),
            record: 0,
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(build_job(job_args()).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut args = job_args();
        args.base_url = String::new();
        let result = build_job(args);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_start_page() {
        let mut args = job_args();
        args.start_page = String::new();
        assert!(build_job(args).is_err());
    }

    #[test]
    fn test_validate_rejects_unparseable_seed() {
        let mut args = job_args();
        args.base_url = "not a url ".to_string();
        args.start_page = "at all".to_string();
        let result = build_job(args);
        assert!(matches!(result, Err(ConfigError::InvalidSeedUrl { .. })));
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let mut args = job_args();
        args.base_url = "ftp://example.com/".to_string();
        let result = build_job(args);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_zero_max_pages() {
        let mut args = job_args();
        args.max_pages = 0;
        let result = build_job(args);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_output_path() {
        let mut args = job_args();
        args.out = "".into();
        let result = build_job(args);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
