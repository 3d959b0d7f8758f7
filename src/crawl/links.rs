//! Detail-link collection and cross-page deduplication

use crate::url::{canonicalize_url, slug_title};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Anchor text shorter than this falls back to a URL-derived label
const MIN_LABEL_LEN: usize = 3;

/// A discovered link to a festival detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestivalLink {
    /// Human-readable label for the festival
    pub name: String,

    /// Absolute, canonical URL of the detail page
    pub url: String,
}

/// Link collection state carried across listing pages
///
/// Insertion order is preserved and significant: it drives scrape order and
/// output order. The first occurrence of a URL wins; later duplicates are
/// discarded without error.
#[derive(Debug, Default)]
pub struct CrawlState {
    seen_urls: HashSet<String>,
    links: Vec<FestivalLink>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one page's links into the collection, returning how many
    /// were new
    pub fn merge(&mut self, new_links: Vec<FestivalLink>) -> usize {
        let mut added = 0;
        for link in new_links {
            if self.seen_urls.insert(link.url.clone()) {
                self.links.push(link);
                added += 1;
            }
        }
        added
    }

    /// Number of unique links collected so far
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Consumes the state, yielding the links in first-seen order
    pub fn into_links(self) -> Vec<FestivalLink> {
        self.links
    }
}

/// Extracts candidate detail-page links from one listing page
///
/// # Rules
///
/// - Candidate anchors are those whose href contains `detail_path_marker`
/// - The listing root itself (an href resolving to exactly the marker path)
///   is excluded; it is the index link, not an entry
/// - Relative hrefs are resolved against `base`; unresolvable or
///   non-HTTP(S) hrefs are skipped
/// - Labels come from trimmed anchor text when it carries at least three
///   characters, otherwise from the URL's last path segment
///
/// Duplicates within the page are kept here; [`CrawlState::merge`] is the
/// single place deduplication happens.
///
/// # Arguments
///
/// * `markup` - Rendered markup of one listing page
/// * `base` - URL the page was fetched from, for resolving relative hrefs
/// * `detail_path_marker` - Path segment identifying detail pages
pub fn collect_links(markup: &str, base: &Url, detail_path_marker: &str) -> Vec<FestivalLink> {
    let anchor_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let document = Html::parse_document(markup);
    let mut links = Vec::new();

    for anchor in document.select(&anchor_selector) {
        let href = match anchor.value().attr("href") {
            Some(h) if h.contains(detail_path_marker) => h,
            _ => continue,
        };

        let url = match canonicalize_url(href, base) {
            Ok(u) => u,
            Err(_) => continue,
        };

        if is_listing_root(&url, detail_path_marker) {
            continue;
        }

        let text: String = anchor.text().collect();
        let text = text.trim();
        let name = if text.chars().count() >= MIN_LABEL_LEN {
            text.to_string()
        } else {
            slug_title(&url)
        };

        links.push(FestivalLink {
            name,
            url: url.to_string(),
        });
    }

    links
}

/// True when the URL is the listing root for the marker, not a real entry
fn is_listing_root(url: &Url, detail_path_marker: &str) -> bool {
    url.path().trim_end_matches('/') == detail_path_marker.trim_end_matches('/')
}
