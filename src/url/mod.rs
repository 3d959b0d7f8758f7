//! URL resolution and canonicalization
//!
//! Every candidate link is resolved to an absolute, canonical form before it
//! is compared for deduplication, so the same festival reached through a
//! relative and an absolute href counts once.

use crate::UrlError;
use url::Url;

/// Resolves an href against a base URL and canonicalizes the result
///
/// # Canonicalization Steps
///
/// 1. Resolve the (possibly relative) href against `base`
/// 2. Reject non-HTTP(S) schemes
/// 3. Lowercase the host
/// 4. Remove the fragment (everything after #)
///
/// Query strings are kept: listing URLs on festival sites carry filter
/// parameters that distinguish real pages.
///
/// # Arguments
///
/// * `href` - The raw href attribute value
/// * `base` - The URL of the page the href appeared on
///
/// # Returns
///
/// * `Ok(Url)` - Canonical absolute URL
/// * `Err(UrlError)` - The href cannot be resolved to a crawlable URL
///
/// # Examples
///
/// ```
/// use festcrawl::url::canonicalize_url;
/// use url::Url;
///
/// let base = Url::parse("https://festivals.example.com/all-festivals/").unwrap();
/// let url = canonicalize_url("/festivals/moon-fest/#lineup", &base).unwrap();
/// assert_eq!(url.as_str(), "https://festivals.example.com/festivals/moon-fest/");
/// ```
pub fn canonicalize_url(href: &str, base: &Url) -> Result<Url, UrlError> {
    let href = href.trim();

    if href.is_empty() {
        return Err(UrlError::Parse("empty href".to_string()));
    }

    let mut url = base
        .join(href)
        .map_err(|e| UrlError::Parse(format!("'{}': {}", href, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let host = url.host_str().ok_or(UrlError::MissingHost)?;
    let lowered = host.to_lowercase();
    if lowered != host {
        url.set_host(Some(&lowered))
            .map_err(|e| UrlError::Parse(format!("failed to set host: {}", e)))?;
    }

    url.set_fragment(None);

    Ok(url)
}

/// Derives a human-readable title from the last non-empty path segment
///
/// Used when a detail link carries no usable anchor text: separators become
/// spaces and each word is title-cased, so `/festivals/moon-fest-2026/`
/// yields "Moon Fest 2026".
pub fn slug_title(url: &Url) -> String {
    let segment = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .last()
        .unwrap_or_default();

    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
