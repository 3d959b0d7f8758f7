//! Page fetching and rendering
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client with the configured user agent
//! - GET requests with error classification
//! - A bounded settle wait: re-fetch until a marker element is present,
//!   so dynamically populated listings are read only once they have content
//!
//! Everything downstream consumes the [`PageRenderer`] trait, so tests can
//! substitute a canned or mock-server-backed renderer.

use crate::config::Config;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::{Duration, Instant};

/// A source of rendered page markup
///
/// The single seam between the crawl pipeline and the network. Production
/// code uses [`HttpRenderer`]; tests swap in whatever they need.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Fetches a URL and returns its rendered markup
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP-backed renderer with a marker-based settle wait
pub struct HttpRenderer {
    client: Client,
    settle_marker: Option<String>,
    settle_timeout: Duration,
    poll_interval: Duration,
}

/// Builds an HTTP client with the configured user agent and timeouts
///
/// # Arguments
///
/// * `user_agent` - The user agent string to send with every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

impl HttpRenderer {
    /// Creates a renderer from the crawler configuration
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client =
            build_http_client(&config.crawler.user_agent).map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            settle_marker: config.selectors.settle_marker.clone(),
            settle_timeout: Duration::from_millis(config.crawler.settle_timeout),
            poll_interval: Duration::from_millis(config.crawler.settle_poll_interval),
        })
    }

    /// Single GET request with error classification
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    /// Fetches a URL, re-fetching on the poll interval until the settle
    /// marker matches the markup or the settle timeout elapses
    ///
    /// On timeout the last markup is returned anyway: a page without the
    /// marker yields zero links downstream, which is a degraded result for
    /// that page, not a failed run.
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let marker = match &self.settle_marker {
            Some(m) => m,
            None => return self.get(url).await,
        };

        let deadline = Instant::now() + self.settle_timeout;
        loop {
            let body = self.get(url).await?;

            if markup_matches(&body, marker) {
                return Ok(body);
            }

            if Instant::now() + self.poll_interval > deadline {
                tracing::warn!(
                    "Settle marker '{}' never appeared on {} within {:?}",
                    marker,
                    url,
                    self.settle_timeout
                );
                return Ok(body);
            }

            tracing::debug!("Waiting for settle marker on {}", url);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Checks whether a CSS selector matches anywhere in the markup
///
/// The `Html` document is confined to this function so it never lives
/// across an await point.
fn markup_matches(markup: &str, selector: &str) -> bool {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        // Selectors are validated at config load; an unparseable marker
        // counts as settled
        Err(_) => return true,
    };

    let document = Html::parse_document(markup);
    document.select(&selector).next().is_some()
}
