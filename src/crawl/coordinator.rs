//! Crawl coordination - the main scrape pipeline
//!
//! This module drives the whole run:
//! - Fetch the first listing page and discover the page count
//! - Walk listing pages 1..=bound, collecting deduplicated detail links
//! - Fetch each detail page sequentially and extract its record
//! - Hand the records to the aggregator
//!
//! One fetch is in flight at a time, with a politeness delay between
//! successive requests. A failed listing or detail page is logged, skipped,
//! and never retried; the run always completes with whatever it gathered.

use crate::config::Config;
use crate::crawl::links::{collect_links, CrawlState, FestivalLink};
use crate::crawl::pagination::discover_total_pages;
use crate::extract::{extract, FestivalRecord};
use crate::output::{aggregate, ScrapeReport};
use crate::render::PageRenderer;
use crate::Result;
use std::time::Duration;
use url::Url;

/// Sequential crawler over one listing site
pub struct Crawler<R: PageRenderer> {
    config: Config,
    renderer: R,
}

impl<R: PageRenderer> Crawler<R> {
    pub fn new(config: Config, renderer: R) -> Self {
        Self { config, renderer }
    }

    /// Runs the full pipeline: collect links, scrape details, aggregate
    pub async fn run(&self) -> Result<ScrapeReport> {
        let links = self.collect_links().await?;
        if links.is_empty() {
            tracing::warn!("No festival links found on the listing");
        }

        let records = self.scrape_details(&links).await;
        Ok(aggregate(records))
    }

    /// Crawls the listing pages and returns the deduplicated links
    ///
    /// The first page is fetched once: its markup serves both pagination
    /// discovery and the page-1 link collection. Failing to fetch it is the
    /// one fatal fetch in the run; there is nothing to crawl without it.
    /// Every later page degrades to zero links on failure.
    pub async fn collect_links(&self) -> Result<Vec<FestivalLink>> {
        let base = Url::parse(&self.config.site.base_url)?;
        let marker = &self.config.site.detail_path_marker;

        tracing::info!("Loading first listing page: {}", base);
        let first_markup = self.renderer.fetch(base.as_str()).await?;

        let total_pages = discover_total_pages(&first_markup, &self.config.selectors);
        let bound = match self.config.crawler.max_pages {
            Some(max) => total_pages.min(max),
            None => total_pages,
        };
        tracing::info!(
            "Total pages detected: {}, scraping up to page {}",
            total_pages,
            bound
        );

        let mut state = CrawlState::new();

        for page in 1..=bound {
            let (markup, page_base) = if page == 1 {
                (first_markup.clone(), base.clone())
            } else {
                self.pace().await;
                let page_url = self.page_url(page);
                let page_base = match Url::parse(&page_url) {
                    Ok(u) => u,
                    Err(e) => {
                        tracing::warn!("Skipping page {}: bad URL {}: {}", page, page_url, e);
                        continue;
                    }
                };
                tracing::info!("Fetching page {}/{}: {}", page, bound, page_url);
                match self.renderer.fetch(&page_url).await {
                    Ok(m) => (m, page_base),
                    Err(e) => {
                        tracing::warn!("Skipping page {}: {}", page, e);
                        continue;
                    }
                }
            };

            let found = collect_links(&markup, &page_base, marker);
            let added = state.merge(found);
            tracing::info!(
                "Page {}/{}: {} new links ({} unique so far)",
                page,
                bound,
                added,
                state.len()
            );
        }

        tracing::info!("Collected {} unique festival links", state.len());
        Ok(state.into_links())
    }

    /// Fetches every detail page in link order and extracts its record
    ///
    /// Always returns one record per link, in the same order. A fetch
    /// failure yields an empty record for that link; the aggregator drops
    /// nameless records later.
    pub async fn scrape_details(&self, links: &[FestivalLink]) -> Vec<FestivalRecord> {
        let mut records = Vec::with_capacity(links.len());

        for (index, link) in links.iter().enumerate() {
            if index > 0 {
                self.pace().await;
            }
            tracing::info!("[{}/{}] Scraping: {}", index + 1, links.len(), link.name);

            let record = match self.renderer.fetch(&link.url).await {
                Ok(markup) => extract(&markup, &self.config.selectors),
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", link.url, e);
                    FestivalRecord::default()
                }
            };
            records.push(record);
        }

        records
    }

    /// Builds the URL for listing page N from the configured template
    fn page_url(&self, page: u32) -> String {
        self.config
            .site
            .page_url_template
            .replace("{page}", &page.to_string())
    }

    /// Politeness delay between successive fetches
    async fn pace(&self) {
        let delay = self.config.crawler.request_delay;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig};
    use crate::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Renderer serving canned markup per URL; unknown URLs return 404
    struct CannedRenderer {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageRenderer for CannedRenderer {
        async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn test_config(max_pages: Option<u32>) -> Config {
        Config {
            site: SiteConfig {
                base_url: "https://fests.example.com/all/".to_string(),
                page_url_template: "https://fests.example.com/all/page/{page}/".to_string(),
                detail_path_marker: "/festivals/".to_string(),
            },
            crawler: CrawlerConfig {
                max_pages,
                request_delay: 0,
                settle_timeout: 100,
                settle_poll_interval: 10,
                user_agent: "TestAgent/1.0".to_string(),
            },
            selectors: SelectorConfig {
                pagination: "ul.page-numbers".to_string(),
                page_link: "a.page-numbers".to_string(),
                settle_marker: None,
                header_block: "div.headerblock".to_string(),
                lineup: "div.hublineup".to_string(),
            },
            output: OutputConfig {
                directory: ".".to_string(),
                base_name: "Festival Output".to_string(),
            },
        }
    }

    fn listing_page(pagination: &str, links: &[(&str, &str)]) -> String {
        let anchors: String = links
            .iter()
            .map(|(href, text)| format!(r#"<a href="{}">{}</a>"#, href, text))
            .collect();
        format!("<html><body>{}{}</body></html>", pagination, anchors)
    }

    const PAGINATION_TWO_PAGES: &str = r#"<ul class="page-numbers">
        <a class="page-numbers" href="/all/page/1/">1</a>
        <a class="page-numbers" href="/all/page/2/">2</a>
    </ul>"#;

    #[tokio::test]
    async fn test_collect_links_across_pages_dedups() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://fests.example.com/all/".to_string(),
            listing_page(
                PAGINATION_TWO_PAGES,
                &[
                    ("/festivals/moon-fest/", "Moon Fest"),
                    ("/festivals/desert-daze/", "Desert Daze"),
                ],
            ),
        );
        pages.insert(
            "https://fests.example.com/all/page/2/".to_string(),
            listing_page(
                PAGINATION_TWO_PAGES,
                &[
                    // Repeated on page 2; must not duplicate
                    ("/festivals/desert-daze/", "Desert Daze"),
                    ("/festivals/fork-fest/", "Fork Fest"),
                ],
            ),
        );

        let crawler = Crawler::new(test_config(None), CannedRenderer { pages });
        let links = crawler.collect_links().await.unwrap();

        let names: Vec<_> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Moon Fest", "Desert Daze", "Fork Fest"]);
    }

    #[tokio::test]
    async fn test_page_cap_limits_crawl() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://fests.example.com/all/".to_string(),
            listing_page(
                PAGINATION_TWO_PAGES,
                &[("/festivals/moon-fest/", "Moon Fest")],
            ),
        );
        // Page 2 exists but max_pages = 1 means it is never requested;
        // the canned renderer would 404 it anyway

        let crawler = Crawler::new(test_config(Some(1)), CannedRenderer { pages });
        let links = crawler.collect_links().await.unwrap();
        assert_eq!(links.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_listing_page_is_skipped() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://fests.example.com/all/".to_string(),
            listing_page(
                r#"<ul class="page-numbers">
                    <a class="page-numbers" href="/all/page/3/">3</a>
                </ul>"#,
                &[("/festivals/moon-fest/", "Moon Fest")],
            ),
        );
        // Page 2 missing entirely (404); page 3 present
        pages.insert(
            "https://fests.example.com/all/page/3/".to_string(),
            listing_page("", &[("/festivals/fork-fest/", "Fork Fest")]),
        );

        let crawler = Crawler::new(test_config(None), CannedRenderer { pages });
        let links = crawler.collect_links().await.unwrap();

        let names: Vec<_> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Moon Fest", "Fork Fest"]);
    }

    #[tokio::test]
    async fn test_first_page_failure_is_fatal() {
        let crawler = Crawler::new(
            test_config(None),
            CannedRenderer {
                pages: HashMap::new(),
            },
        );
        assert!(crawler.collect_links().await.is_err());
    }

    #[tokio::test]
    async fn test_scrape_details_keeps_link_order_and_tolerates_failures() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://fests.example.com/festivals/a/".to_string(),
            r#"<html><body><div class="headerblock"><h1>Fest A</h1></div></body></html>"#
                .to_string(),
        );
        // /festivals/b/ missing: its record comes back empty
        pages.insert(
            "https://fests.example.com/festivals/c/".to_string(),
            r#"<html><body><div class="headerblock"><h1>Fest C</h1></div></body></html>"#
                .to_string(),
        );

        let links = vec![
            FestivalLink {
                name: "A".to_string(),
                url: "https://fests.example.com/festivals/a/".to_string(),
            },
            FestivalLink {
                name: "B".to_string(),
                url: "https://fests.example.com/festivals/b/".to_string(),
            },
            FestivalLink {
                name: "C".to_string(),
                url: "https://fests.example.com/festivals/c/".to_string(),
            },
        ];

        let crawler = Crawler::new(test_config(None), CannedRenderer { pages });
        let records = crawler.scrape_details(&links).await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Fest A");
        assert_eq!(records[1], FestivalRecord::default());
        assert_eq!(records[2].name, "Fest C");
    }
}
