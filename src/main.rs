//! Festcrawl main entry point
//!
//! Command-line interface for the festival listing scraper.

use anyhow::Result;
use clap::Parser;
use festcrawl::config::{load_config, Config};
use festcrawl::crawl::{run_scrape, Crawler};
use festcrawl::output::{print_report, unique_output_path, write_csv};
use festcrawl::render::HttpRenderer;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Festcrawl: a sequential festival listing scraper
///
/// Crawls a paginated festival listing site, scrapes every festival's
/// detail page, and exports name, date, location, and lineup to CSV.
#[derive(Parser, Debug)]
#[command(name = "festcrawl")]
#[command(version = "1.0.0")]
#[command(about = "A sequential festival listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Cap the number of listing pages, overriding the config
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Directory for the CSV export, overriding the config
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Validate config and show what would be scraped without fetching
    #[arg(long, conflicts_with = "links_only")]
    dry_run: bool,

    /// Collect and print detail links, skipping detail scraping and export
    #[arg(long, conflicts_with = "dry_run")]
    links_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)?;

    // Apply CLI overrides
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = Some(max_pages);
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        Ok(())
    } else if cli.links_only {
        handle_links_only(config).await
    } else {
        handle_scrape(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("festcrawl=info,warn"),
            1 => EnvFilter::new("festcrawl=debug,info"),
            2 => EnvFilter::new("festcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &Config) {
    println!("=== Festcrawl Dry Run ===\n");

    println!("Site:");
    println!("  Listing: {}", config.site.base_url);
    println!("  Page template: {}", config.site.page_url_template);
    println!("  Detail marker: {}", config.site.detail_path_marker);

    println!("\nCrawler:");
    match config.crawler.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: all detected"),
    }
    println!("  Request delay: {}ms", config.crawler.request_delay);
    println!(
        "  Settle wait: up to {}ms, polling every {}ms",
        config.crawler.settle_timeout, config.crawler.settle_poll_interval
    );
    match &config.selectors.settle_marker {
        Some(marker) => println!("  Settle marker: {}", marker),
        None => println!("  Settle marker: none (no wait)"),
    }

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Base name: {}", config.output.base_name);

    println!("\n✓ Configuration is valid");
}

/// Handles the --links-only mode: crawl the listing, print the links
async fn handle_links_only(config: Config) -> Result<()> {
    let renderer = HttpRenderer::new(&config)?;
    let crawler = Crawler::new(config, renderer);

    let links = crawler.collect_links().await?;

    println!("Collected {} unique festival links:\n", links.len());
    for link in &links {
        println!("  {} — {}", link.name, link.url);
    }

    Ok(())
}

/// Handles the default mode: full scrape plus CSV export and summary
async fn handle_scrape(config: Config) -> Result<()> {
    let output = config.output.clone();

    let report = run_scrape(config).await?;

    let path = unique_output_path(Path::new(&output.directory), &output.base_name);
    write_csv(&report.records, &path)?;

    print_report(&report, Some(path.as_path()));

    Ok(())
}
