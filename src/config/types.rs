use serde::Deserialize;

/// Main configuration structure for festcrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Target site profile
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// URL of the first listing page
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// URL template for listing pages 2..N; `{page}` is replaced by the
    /// page number
    #[serde(rename = "page-url-template")]
    pub page_url_template: String,

    /// Path segment that identifies a detail-page link (e.g. "/festivals/")
    #[serde(rename = "detail-path-marker")]
    pub detail_path_marker: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of listing pages to visit; absent means all pages
    /// the site reports
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    /// Delay between successive page fetches (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// How long to keep re-fetching while waiting for the settle marker
    /// (milliseconds)
    #[serde(rename = "settle-timeout")]
    pub settle_timeout: u64,

    /// Interval between settle re-fetches (milliseconds)
    #[serde(rename = "settle-poll-interval")]
    pub settle_poll_interval: u64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// CSS selectors describing the site's markup contract
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// Pagination container on the listing pages
    pub pagination: String,

    /// Page-number links within the pagination container
    #[serde(rename = "page-link")]
    pub page_link: String,

    /// Marker element whose presence means detail links have rendered;
    /// absent disables the settle wait
    #[serde(rename = "settle-marker")]
    pub settle_marker: Option<String>,

    /// Header block on a detail page (heading + date/location paragraphs)
    #[serde(rename = "header-block")]
    pub header_block: String,

    /// Lineup container on a detail page
    pub lineup: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the CSV export is written into
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Base name for the export file; date and a counter are appended
    #[serde(rename = "base-name", default = "default_base_name")]
    pub base_name: String,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36"
        .to_string()
}

fn default_output_directory() -> String {
    ".".to_string()
}

fn default_base_name() -> String {
    "Festival Output".to_string()
}
