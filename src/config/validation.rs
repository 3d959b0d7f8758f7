use crate::config::types::{Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_selector_config(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site profile
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if !config.page_url_template.contains("{page}") {
        return Err(ConfigError::Validation(format!(
            "page-url-template must contain the {{page}} placeholder, got '{}'",
            config.page_url_template
        )));
    }

    // The template must also be a URL once the placeholder is substituted
    let probe = config.page_url_template.replace("{page}", "2");
    Url::parse(&probe)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid page-url-template: {}", e)))?;

    if config.detail_path_marker.trim_matches('/').is_empty() {
        return Err(ConfigError::Validation(
            "detail-path-marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler behavior settings
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max-pages must be >= 1 when set, got {}",
                max_pages
            )));
        }
    }

    if config.settle_poll_interval < 1 {
        return Err(ConfigError::Validation(
            "settle-poll-interval must be >= 1ms".to_string(),
        ));
    }

    if config.settle_timeout < config.settle_poll_interval {
        return Err(ConfigError::Validation(format!(
            "settle-timeout ({}ms) must be >= settle-poll-interval ({}ms)",
            config.settle_timeout, config.settle_poll_interval
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every configured CSS selector parses
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    validate_selector("pagination", &config.pagination)?;
    validate_selector("page-link", &config.page_link)?;
    if let Some(marker) = &config.settle_marker {
        validate_selector("settle-marker", marker)?;
    }
    validate_selector("header-block", &config.header_block)?;
    validate_selector("lineup", &config.lineup)?;
    Ok(())
}

fn validate_selector(name: &str, selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("{} = '{}': {:?}", name, selector, e)))?;
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.base_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output base-name cannot be empty".to_string(),
        ));
    }

    Ok(())
}
