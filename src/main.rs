//! Product-Scout main entry point
//!
//! This is the command-line interface for the Product-Scout pipeline.

use anyhow::Context;
use clap::Parser;
use product_scout::catalog::ModelCatalog;
use product_scout::config::{load_config_with_hash, Config, ScoringMode};
use product_scout::crawler::crawl;
use product_scout::output::{load_cache_statistics, print_cache_statistics, print_report};
use product_scout::storage::open_cache;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Product-Scout: finds product pages and extracts their details
///
/// Product-Scout discovers candidate pages on a site, scores them, matches
/// them against a catalog of known models and exports descriptions and
/// images of the pages that qualify.
#[derive(Parser, Debug)]
#[command(name = "product-scout")]
#[command(version)]
#[command(about = "Product page discovery and extraction", long_about = None)]
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

    /// Clear the discovery cache and rediscover URLs
    #[arg(long)]
    force: bool,

    /// Score pages with the external classifier
    #[arg(long)]
    assisted: bool,

    /// Validate config and catalog and show the plan without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show discovery cache statistics and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Secrets for assisted scoring may live in a .env file
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.force {
        config.crawler.force = true;
    }
    if cli.assisted {
        config.scoring.mode = ScoringMode::Assisted;
    }

    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_crawl(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("product_scout=info,warn"),
            1 => EnvFilter::new("product_scout=debug,info"),
            2 => EnvFilter::new("product_scout=trace,debug"),
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

/// Handles the --dry-run mode: validates config and catalog and prints the plan
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let catalog = ModelCatalog::from_path(Path::new(&config.catalog.models_path))
        .context("failed to load model catalog")?;

    println!("=== Product-Scout Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);

    println!("\nCatalog:");
    println!("  Path: {}", config.catalog.models_path);
    println!("  Models: {}", catalog.len());

    println!("\nCrawler:");
    println!("  Delay between pages: {}s", config.crawler.delay_seconds);
    println!("  Score threshold: {}", config.crawler.score_threshold);
    println!("  Cache TTL: {}h", config.crawler.cache_ttl_hours);
    println!("  Force refresh: {}", config.crawler.force);
    println!("  Max retries: {}", config.crawler.max_retries);

    println!("\nScoring:");
    match config.scoring.mode {
        ScoringMode::Rules => println!("  Mode: rules"),
        ScoringMode::Assisted => {
            println!("  Mode: assisted");
            println!("  Endpoint: {}", config.scoring.endpoint);
            println!("  Model: {}", config.scoring.model);
            let key_state = match std::env::var(&config.scoring.api_key_env) {
                Ok(key) if !key.trim().is_empty() => "set",
                _ => "MISSING",
            };
            println!("  API key ({}): {}", config.scoring.api_key_env, key_state);
        }
    }

    println!("\nOutput:");
    println!("  Cache: {}", config.output.cache_path);
    println!("  CSV: {}", config.output.csv_path);
    if let Some(html_path) = &config.output.html_path {
        println!("  HTML: {}", html_path);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --stats mode: shows discovery cache statistics
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Cache: {}\n", config.output.cache_path);

    let cache = open_cache(Path::new(&config.output.cache_path))
        .context("failed to open discovery cache")?;
    let stats = load_cache_statistics(&cache, config.crawler.cache_ttl_hours)?;

    print_cache_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    match crawl(config).await {
        Ok(report) => {
            tracing::info!("Crawl completed successfully");
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
