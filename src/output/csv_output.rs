//! CSV export
//!
//! Writes the retained records as a four-column CSV and generates dated,
//! collision-free output filenames.

use crate::extract::FestivalRecord;
use crate::Result;
use std::path::{Path, PathBuf};

/// Column header row, in fixed output order
const HEADERS: [&str; 4] = ["Festival", "Date", "Location", "Artists"];

/// Writes records to a CSV file at the given path
///
/// One row per record; the `Artists` column joins the lineup with ", ".
///
/// # Arguments
///
/// * `records` - The retained records, already aggregated and ordered
/// * `path` - Destination file path
pub fn write_csv(records: &[FestivalRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(HEADERS)?;
    for record in records {
        let artists = record.artists.join(", ");
        writer.write_record([
            record.name.as_str(),
            record.date.as_str(),
            record.location.as_str(),
            artists.as_str(),
        ])?;
    }
    writer.flush()?;

    tracing::info!("Saved {} festivals to {}", records.len(), path.display());
    Ok(())
}

/// Generates a unique, dated output path inside a directory
///
/// The filename is `"<base_name> <MM-DD-YYYY>.csv"`; when that file already
/// exists, ` (2)`, ` (3)`, … are appended until a free name is found.
pub fn unique_output_path(directory: &Path, base_name: &str) -> PathBuf {
    let date = chrono::Local::now().format("%m-%d-%Y");

    let mut candidate = directory.join(format!("{} {}.csv", base_name, date));
    let mut counter = 1;
    while candidate.exists() {
        counter += 1;
        candidate = directory.join(format!("{} {} ({}).csv", base_name, date, counter));
    }
    candidate
}
