//! Configuration loading and validation
//!
//! This module handles:
//! - TOML configuration file parsing
//! - Configuration validation (URLs, templates, CSS selectors)
//! - Type definitions for all configuration sections

mod parser;
pub mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig};
pub use validation::validate;
