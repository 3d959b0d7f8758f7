//! Detail-page extraction
//!
//! This module produces one [`FestivalRecord`] per detail page using a
//! layered strategy:
//! - Structured stage: the embedded JSON-LD event block, when present
//! - HTML fallback stage: header-block heading and paragraphs, filling
//!   only the fields the structured stage left empty
//! - Lineup extraction: always attempted, independent of the other two
//!
//! The precedence is load-bearing. Structured data is a site-maintained
//! contract; the positional header read is a heuristic. Flipping the order
//! would silently degrade data quality with no visible error.

mod fallback;
mod structured;

pub use fallback::{header_stage, lineup_stage, HeaderFields};
pub use structured::{structured_stage, StructuredEvent};

use crate::config::SelectorConfig;
use scraper::Html;

/// Structured details for one festival
///
/// All fields default to empty. A record is produced once per link and not
/// modified afterwards; a record whose `name` is still empty after both
/// stages is dropped before export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FestivalRecord {
    pub name: String,
    pub date: String,
    pub location: String,
    pub artists: Vec<String>,
}

impl FestivalRecord {
    /// True when the lineup has at least one artist
    pub fn has_lineup(&self) -> bool {
        !self.artists.is_empty()
    }
}

/// Extracts a festival record from detail-page markup
///
/// Never fails: whatever the stages could not produce stays empty, and the
/// caller decides what an empty record means.
///
/// # Arguments
///
/// * `markup` - Rendered markup of one detail page
/// * `selectors` - Site selector configuration
pub fn extract(markup: &str, selectors: &SelectorConfig) -> FestivalRecord {
    let document = Html::parse_document(markup);
    let mut record = FestivalRecord::default();

    if let Some(event) = structured_stage(&document) {
        record.name = event.name;
        record.date = event.date;
        record.location = event.location;
    }

    let needs_fallback =
        record.name.is_empty() || record.date.is_empty() || record.location.is_empty();
    if needs_fallback {
        if let Some(header) = header_stage(&document, &selectors.header_block) {
            if record.name.is_empty() {
                record.name = header.name;
            }
            if record.date.is_empty() {
                record.date = header.date;
            }
            if record.location.is_empty() {
                record.location = header.location;
            }
        }
    }

    record.artists = lineup_stage(&document, &selectors.lineup);

    record
}
