//! Crawler module for discovering, fetching and qualifying product pages
//!
//! This module contains the core pipeline, including:
//! - Candidate URL discovery from sitemaps and category listings
//! - HTTP fetching with optional retry
//! - Page parsing
//! - Politeness delay between page fetches
//! - Overall run orchestration

mod coordinator;
mod discovery;
mod fetcher;
mod parser;
mod politeness;

pub use coordinator::{export_report, CrawlReport, Orchestrator};
pub use discovery::{
    extract_product_links, parse_sitemap, SiteDiscoverer, Sitemap, CATEGORY_PATHS, SITEMAP_PATHS,
};
pub use fetcher::{build_http_client, fetch_url, fetch_with_retry, user_agent_string, FetchResult};
pub use parser::PageContent;
pub use politeness::Politeness;

use crate::catalog::ModelCatalog;
use crate::config::Config;
use crate::output::exporters_from_config;
use crate::scoring::ScoringStrategy;
use crate::storage::open_cache;
use crate::ScoutError;
use std::path::Path;

/// Runs a complete crawl and exports its records
///
/// This is the main entry point for a run. It will:
/// 1. Load the model catalog
/// 2. Open the discovery cache
/// 3. Build the HTTP client and scoring strategy
/// 4. Collect candidate URLs and process each one
/// 5. Write the configured exports
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Run completed and exports were written
/// * `Err(ScoutError)` - Configuration, catalog, storage or export failure
pub async fn crawl(config: &Config) -> Result<CrawlReport, ScoutError> {
    let catalog = ModelCatalog::from_path(Path::new(&config.catalog.models_path))?;
    let cache = open_cache(Path::new(&config.output.cache_path))?;
    let client = build_http_client(&config.user_agent)?;
    let scorer = ScoringStrategy::from_config(&config.scoring, client.clone())?;

    let mut orchestrator = Orchestrator::new(config, cache, catalog, scorer, client)?;
    let report = orchestrator.run().await?;

    export_report(&report, &exporters_from_config(&config.output))?;

    Ok(report)
}
