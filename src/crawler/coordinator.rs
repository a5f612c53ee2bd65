//! Crawl orchestration
//!
//! A run moves through four phases:
//! 1. Init: optionally clear the discovery cache (`force`)
//! 2. Candidate URLs: reuse the fresh cached set, or discover and record
//! 3. Process each URL in order: fetch, score, gate, match, extract
//! 4. Export the ordered records
//!
//! Pages are processed one at a time with a politeness delay between
//! fetches, so record order equals candidate order.

use crate::catalog::ModelCatalog;
use crate::config::{Config, CrawlerConfig};
use crate::crawler::discovery::SiteDiscoverer;
use crate::crawler::fetcher::{fetch_with_retry, FetchResult};
use crate::crawler::parser::PageContent;
use crate::crawler::politeness::Politeness;
use crate::extract::{extract_fields, ProductRecord};
use crate::output::RecordExporter;
use crate::scoring::ScoringStrategy;
use crate::state::{OutcomeCounts, PageOutcome};
use crate::storage::DiscoveryCache;
use crate::ScoutError;
use reqwest::Client;
use url::Url;

/// Result of one run
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Qualifying records in candidate order
    pub records: Vec<ProductRecord>,

    /// Outcome tally over all processed URLs
    pub counts: OutcomeCounts,

    /// True if the candidate set came from the cache
    pub cache_hit: bool,

    /// Number of candidate URLs considered
    pub candidates: usize,
}

/// Drives a run over one site
pub struct Orchestrator<C: DiscoveryCache> {
    cache: C,
    catalog: ModelCatalog,
    scorer: ScoringStrategy,
    client: Client,
    base: Url,
    settings: CrawlerConfig,
}

impl<C: DiscoveryCache> Orchestrator<C> {
    /// Creates an orchestrator for the configured site
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration
    /// * `cache` - An opened discovery cache
    /// * `catalog` - Known model identifiers
    /// * `scorer` - Page scoring strategy
    /// * `client` - HTTP client used for discovery and page fetches
    pub fn new(
        config: &Config,
        cache: C,
        catalog: ModelCatalog,
        scorer: ScoringStrategy,
        client: Client,
    ) -> Result<Self, ScoutError> {
        let base = Url::parse(&config.site.base_url)?;

        Ok(Self {
            cache,
            catalog,
            scorer,
            client,
            base,
            settings: config.crawler.clone(),
        })
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Runs every phase except export
    pub async fn run(&mut self) -> Result<CrawlReport, ScoutError> {
        tracing::info!(
            "Starting run for {} ({} scoring, threshold {})",
            self.base,
            self.scorer.name(),
            self.settings.score_threshold
        );

        if self.settings.force {
            tracing::info!("Force refresh: clearing discovery cache");
            self.cache.clear()?;
        }

        let (urls, cache_hit) = self.candidate_urls().await?;
        let mut report = CrawlReport {
            cache_hit,
            candidates: urls.len(),
            ..CrawlReport::default()
        };

        let mut politeness = Politeness::from_secs_f64(self.settings.delay_seconds);

        for (index, url) in urls.iter().enumerate() {
            politeness.wait_turn().await;

            let (outcome, record) = self.process_url(url).await?;
            politeness.mark_done();
            tracing::debug!("[{}/{}] {}: {}", index + 1, urls.len(), url, outcome);

            report.counts.add(outcome);
            if let Some(record) = record {
                report.records.push(record);
            }
        }

        tracing::info!(
            "Run complete: {} records from {} candidates ({} fetch failures, {} below threshold, {} without model)",
            report.counts.recorded,
            report.candidates,
            report.counts.fetch_failed,
            report.counts.below_threshold,
            report.counts.no_model
        );

        Ok(report)
    }

    /// Returns the candidate URLs and whether they came from the cache
    ///
    /// A non-empty fresh cached set is used as is. Otherwise the site is
    /// discovered and every URL is recorded before any is processed.
    pub async fn candidate_urls(&mut self) -> Result<(Vec<String>, bool), ScoutError> {
        if !self.settings.force {
            let cached = self.cache.fresh_urls(self.settings.cache_ttl_hours)?;
            if !cached.is_empty() {
                tracing::info!("Using {} cached URLs", cached.len());
                return Ok((cached, true));
            }
        }

        tracing::info!("Discovering candidate URLs on {}", self.base);
        let discoverer =
            SiteDiscoverer::new(self.client.clone(), self.base.clone(), self.settings.max_retries);
        let urls = discoverer.discover().await;

        for url in &urls {
            self.cache.record_discovery(url, 0)?;
        }
        tracing::info!("Recorded {} discovered URLs", urls.len());

        Ok((urls, false))
    }

    /// Processes one candidate URL
    ///
    /// Only storage failures are returned as errors; every page-level
    /// problem becomes a skip outcome.
    pub async fn process_url(
        &mut self,
        url: &str,
    ) -> Result<(PageOutcome, Option<ProductRecord>), ScoutError> {
        let page = match fetch_with_retry(&self.client, url, self.settings.max_retries).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => match Url::parse(url) {
                Ok(page_url) => {
                    if final_url != url {
                        tracing::debug!("{} redirected to {} ({})", url, final_url, status_code);
                    }
                    PageContent::parse(page_url, body)
                }
                Err(e) => {
                    tracing::debug!("Skipping unparseable URL {}: {}", url, e);
                    return Ok((PageOutcome::FetchFailed, None));
                }
            },
            FetchResult::HttpError { status_code } => {
                tracing::debug!("Skipping {}: HTTP {}", url, status_code);
                return Ok((PageOutcome::FetchFailed, None));
            }
            FetchResult::NetworkError { error, .. } => {
                tracing::debug!("Skipping {}: {}", url, error);
                return Ok((PageOutcome::FetchFailed, None));
            }
        };

        let score = self.scorer.score(&page).await;
        self.cache.record_score(url, score)?;

        if score < self.settings.score_threshold {
            return Ok((PageOutcome::BelowThreshold { score }, None));
        }

        let text = page.text_sample(usize::MAX);
        let Some(model) = self.catalog.find_model(&text) else {
            return Ok((PageOutcome::NoModel, None));
        };

        let record = ProductRecord::new(model, url, extract_fields(&page));
        tracing::info!("Matched {} at {}", record.model, url);

        Ok((PageOutcome::Recorded, Some(record)))
    }
}

/// Hands the ordered records to every exporter
pub fn export_report(
    report: &CrawlReport,
    exporters: &[Box<dyn RecordExporter>],
) -> Result<(), ScoutError> {
    for exporter in exporters {
        exporter.export(&report.records)?;
    }
    Ok(())
}
