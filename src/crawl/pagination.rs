//! Pagination discovery for the listing's first page

use crate::config::SelectorConfig;
use scraper::{Html, Selector};

/// Determines the total number of listing pages from rendered markup
///
/// Locates the pagination container and takes the maximum numeric token
/// among the page-number links. Non-numeric tokens ("Next »", "…") are
/// skipped silently.
///
/// Never fails: a missing container, a parse problem, or a pagination
/// control with no numeric links all degrade to a single page.
///
/// # Arguments
///
/// * `markup` - Rendered markup of the first listing page
/// * `selectors` - Site selector configuration
///
/// # Returns
///
/// The total page count, always >= 1
pub fn discover_total_pages(markup: &str, selectors: &SelectorConfig) -> u32 {
    let container_selector = match Selector::parse(&selectors.pagination) {
        Ok(s) => s,
        Err(_) => return 1,
    };
    let link_selector = match Selector::parse(&selectors.page_link) {
        Ok(s) => s,
        Err(_) => return 1,
    };

    let document = Html::parse_document(markup);

    let container = match document.select(&container_selector).next() {
        Some(c) => c,
        None => return 1,
    };

    container
        .select(&link_selector)
        .filter_map(|link| {
            let text: String = link.text().collect();
            text.trim().parse::<u32>().ok()
        })
        .max()
        .unwrap_or(1)
}
