//! Result aggregation and run summary
//!
//! The aggregator consumes per-link records in link order, drops the ones
//! extraction could not even name, and computes the summary counts shown
//! at the end of a run.

use crate::extract::FestivalRecord;

/// Aggregated scrape results
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    /// Retained records, in original link order
    pub records: Vec<FestivalRecord>,

    /// Records dropped for having no name after both extraction stages
    pub dropped: usize,
}

impl ScrapeReport {
    /// Total festivals retained
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Festivals with at least one lineup entry
    pub fn with_lineup(&self) -> usize {
        self.records.iter().filter(|r| r.has_lineup()).count()
    }

    /// Total artist entries across all records, duplicates counted
    pub fn total_artists(&self) -> usize {
        self.records.iter().map(|r| r.artists.len()).sum()
    }
}

/// Aggregates per-link records into a report
///
/// Records arrive one per crawled link, in link order, and keep that order.
/// A record with an empty `name` is dropped here and counts toward no
/// summary total except `dropped`.
pub fn aggregate(records: Vec<FestivalRecord>) -> ScrapeReport {
    let mut report = ScrapeReport::default();

    for record in records {
        if record.name.is_empty() {
            report.dropped += 1;
        } else {
            report.records.push(record);
        }
    }

    if report.dropped > 0 {
        tracing::warn!(
            "Dropped {} record(s) with no extractable name",
            report.dropped
        );
    }

    report
}

/// Prints the run summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The aggregated results
/// * `output_path` - Where the CSV was written, if it was
pub fn print_report(report: &ScrapeReport, output_path: Option<&std::path::Path>) {
    println!("=== Scrape Summary ===\n");

    println!("Total festivals scraped: {}", report.total());
    println!("Festivals with lineups: {}", report.with_lineup());
    println!("Total artists collected: {}", report.total_artists());
    if report.dropped > 0 {
        println!("Records dropped (no name): {}", report.dropped);
    }
    if let Some(path) = output_path {
        println!("File saved as: {}", path.display());
    }
}
