//! Course Crawler main entry point
//!
//! This is the command-line interface for crawling a course catalog into
//! JSON batches and inspecting the resulting course index.

use anyhow::Context;
use clap::Parser;
use course_crawler::config::{load_config_with_hash, Config};
use course_crawler::crawler::CrawlSession;
use course_crawler::output::{print_crawl_report, print_statistics};
use course_crawler::store::{write_batch, CourseStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Course Crawler: course catalog extraction and indexing
///
/// Walks a course catalog from its term list down to the individual
/// course pages, extracts one record per course and writes the records
/// as a JSON batch into the configured data directory.
#[derive(Parser, Debug)]
#[command(name = "course-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Course catalog crawler and indexer", long_about = None)]
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

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Load the data directory, show index statistics and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("course_crawler=info,warn"),
            1 => EnvFilter::new("course_crawler=debug,info"),
            2 => EnvFilter::new("course_crawler=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Course Crawler Dry Run ===\n");

    println!("Catalog:");
    println!("  Base URL: {}", config.catalog.base_url);
    if let Some(term) = &config.catalog.start_term {
        println!("  Start term: {}", term);
    }
    print_allow_list("Terms", &config.catalog.allowed_terms());
    print_allow_list("Schools", &config.catalog.schools);

    println!("\nCrawler Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);
    println!(
        "  Unparsed identity: {:?}",
        config.index.unparsed_identity
    );

    println!("\n✓ Configuration is valid");
}

fn print_allow_list(label: &str, entries: &[String]) {
    if entries.is_empty() {
        println!("  {}: all", label);
    } else {
        println!("  {}: {}", label, entries.join(", "));
    }
}

/// Handles the --stats mode: loads the data directory and reports on it
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let data_dir = Path::new(&config.output.data_dir);
    println!("Data directory: {}\n", data_dir.display());

    let store = CourseStore::load(data_dir, config.index.unparsed_identity)
        .with_context(|| format!("Failed to load course index from {}", data_dir.display()))?;
    print_statistics(&store.statistics());

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Term allow-list: {:?}, school allow-list: {:?}",
        config.catalog.allowed_terms(),
        config.catalog.schools
    );

    let session = CrawlSession::new(config).context("Failed to start crawl session")?;
    let outcome = session.run().await;

    let path = write_batch(Path::new(&config.output.data_dir), &outcome.courses)
        .context("Failed to write course batch")?;

    print_crawl_report(&outcome);
    println!("\n✓ Batch written to: {}", path.display());

    Ok(())
}
