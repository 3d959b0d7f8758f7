//! HTML fallback stage and lineup extraction
//!
//! When a page carries no structured data (or an incomplete block), the
//! header block's layout is read positionally: heading, date paragraph,
//! location paragraph. The lineup list is plain markup on every page and
//! has no structured counterpart.

use scraper::{ElementRef, Html, Selector};

/// Fields read from the page's header block
///
/// `Some` means the header block exists; fields the block does not provide
/// stay empty, which is an absent value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    pub name: String,
    pub date: String,
    pub location: String,
}

/// Reads name/date/location from the header block, positionally
///
/// The first heading supplies the name. Paragraphs are read in document
/// order: the first supplies the date, the second the location.
pub fn header_stage(document: &Html, header_block: &str) -> Option<HeaderFields> {
    let block_selector = Selector::parse(header_block).ok()?;
    let block = document.select(&block_selector).next()?;

    let name = first_text(&block, "h1");

    let paragraph_selector = Selector::parse("p").ok()?;
    let mut paragraphs = block.select(&paragraph_selector);
    let date = paragraphs
        .next()
        .map(|p| element_text(&p))
        .unwrap_or_default();
    let location = paragraphs
        .next()
        .map(|p| element_text(&p))
        .unwrap_or_default();

    Some(HeaderFields {
        name,
        date,
        location,
    })
}

/// Collects the lineup: every list item's trimmed, non-empty text, in
/// document order
///
/// A missing lineup container yields an empty sequence.
pub fn lineup_stage(document: &Html, lineup: &str) -> Vec<String> {
    let container_selector = match Selector::parse(lineup) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let item_selector = match Selector::parse("li") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let container = match document.select(&container_selector).next() {
        Some(c) => c,
        None => return Vec::new(),
    };

    container
        .select(&item_selector)
        .map(|li| element_text(&li))
        .filter(|artist| !artist.is_empty())
        .collect()
}

fn first_text(block: &ElementRef, selector: &str) -> String {
    Selector::parse(selector)
        .ok()
        .and_then(|s| block.select(&s).next().map(|el| element_text(&el)))
        .unwrap_or_default()
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
