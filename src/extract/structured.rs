//! Structured-data stage: embedded JSON-LD event blocks
//!
//! Festival pages that carry a `script[type="application/ld+json"]` event
//! document are the preferred source: the block is a site-maintained
//! contract, unlike the surrounding layout markup.

use scraper::{Html, Selector};
use serde_json::Value;

/// Fields read from a JSON-LD event document
///
/// An explicit stage result: `Some` means a block was found and parsed
/// (individual fields may still be empty), `None` means the stage produced
/// nothing and the fallback owns every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredEvent {
    pub name: String,
    pub date: String,
    pub location: String,
}

/// Reads the first JSON-LD script block from the document
///
/// Missing keys are not errors; they leave the matching field empty. A
/// malformed document (unparseable JSON, or no script block at all) yields
/// `None`.
pub fn structured_stage(document: &Html) -> Option<StructuredEvent> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
    let script = document.select(&selector).next()?;
    let raw: String = script.text().collect();

    let value: Value = serde_json::from_str(raw.trim()).ok()?;

    Some(StructuredEvent {
        name: string_field(&value, "name"),
        date: event_date(&value),
        location: event_location(&value),
    })
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Formats the event date per the start/end rules
///
/// Both present and different: `"{start} - {end}"`. Only a start date:
/// the start alone. Equal dates: the single date, no range separator.
/// An end date without a start is ignored.
fn event_date(value: &Value) -> String {
    let start = string_field(value, "startDate");
    let end = string_field(value, "endDate");

    if !start.is_empty() && !end.is_empty() && start != end {
        format!("{} - {}", start, end)
    } else {
        start
    }
}

/// Joins the nested address locality and region with ", "
///
/// A missing side leaves no dangling separator. `location.address` must be
/// an object; any other shape yields an empty location.
fn event_location(value: &Value) -> String {
    let address = match value
        .get("location")
        .and_then(|l| l.get("address"))
        .and_then(Value::as_object)
    {
        Some(a) => a,
        None => return String::new(),
    };

    let locality = address
        .get("addressLocality")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim();
    let region = address
        .get("addressRegion")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim();

    match (locality.is_empty(), region.is_empty()) {
        (false, false) => format!("{}, {}", locality, region),
        (false, true) => locality.to_string(),
        (true, false) => region.to_string(),
        (true, true) => String::new(),
    }
}
