//! Crawl pipeline: pagination discovery, link collection, coordination
//!
//! This module contains the listing-side crawl logic:
//! - Pagination discovery from the first listing page
//! - Per-page link extraction with cross-page deduplication
//! - The sequential crawl loop driving renderer, collector, and extractor

mod coordinator;
mod links;
mod pagination;

pub use coordinator::Crawler;
pub use links::{collect_links, CrawlState, FestivalLink};
pub use pagination::discover_total_pages;

use crate::config::Config;
use crate::output::ScrapeReport;
use crate::render::HttpRenderer;
use crate::Result;

/// Runs a complete scrape with the HTTP renderer
///
/// This is the main library entry point. It will:
/// 1. Build the HTTP renderer from the configuration
/// 2. Crawl the listing pages and collect deduplicated links
/// 3. Scrape every detail page sequentially
/// 4. Aggregate the records into a report
///
/// # Arguments
///
/// * `config` - The validated scraper configuration
///
/// # Returns
///
/// * `Ok(ScrapeReport)` - The retained records plus summary counts
/// * `Err(ScrapeError)` - Startup failed, or the first listing page was
///   unreachable
pub async fn run_scrape(config: Config) -> Result<ScrapeReport> {
    let renderer = HttpRenderer::new(&config)?;
    let crawler = Crawler::new(config, renderer);
    crawler.run().await
}
