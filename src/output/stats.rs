//! Run and cache statistics
//!
//! This module prints the end-of-run summary and the discovery cache
//! statistics shown by `--stats`.

use crate::crawler::CrawlReport;
use crate::storage::{DiscoveryCache, StorageResult};

/// Discovery cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Number of URLs in the cache
    pub total_urls: u64,

    /// Number of URLs younger than the TTL
    pub fresh_urls: u64,

    /// TTL used for the freshness count
    pub ttl_hours: u64,
}

impl CacheStatistics {
    pub fn stale_urls(&self) -> u64 {
        self.total_urls.saturating_sub(self.fresh_urls)
    }
}

/// Loads statistics from the discovery cache
pub fn load_cache_statistics(
    cache: &dyn DiscoveryCache,
    ttl_hours: u64,
) -> StorageResult<CacheStatistics> {
    let total_urls = cache.count()?;
    let fresh_urls = cache.fresh_urls(ttl_hours)?.len() as u64;

    Ok(CacheStatistics {
        total_urls,
        fresh_urls,
        ttl_hours,
    })
}

/// Prints cache statistics to stdout
pub fn print_cache_statistics(stats: &CacheStatistics) {
    println!("=== Discovery Cache ===\n");
    println!("  Cached URLs: {}", stats.total_urls);
    println!(
        "  Fresh (< {}h): {}",
        stats.ttl_hours, stats.fresh_urls
    );
    println!("  Stale: {}", stats.stale_urls());

    if stats.fresh_urls > 0 {
        println!("\n  The next run will reuse the cached URL set.");
    } else {
        println!("\n  The next run will rediscover URLs.");
    }
}

/// Formats the end-of-run summary
pub fn format_report(report: &CrawlReport) -> String {
    let counts = &report.counts;
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");
    out.push_str(&format!(
        "  URL source: {}\n",
        if report.cache_hit { "cache" } else { "discovery" }
    ));
    out.push_str(&format!("  Candidate URLs: {}\n", report.candidates));
    out.push_str(&format!("  Pages processed: {}\n", counts.total()));
    out.push_str(&format!("  Records: {}\n", counts.recorded));
    out.push_str(&format!("  Fetch failures: {}\n", counts.fetch_failed));
    out.push_str(&format!("  Below threshold: {}\n", counts.below_threshold));
    out.push_str(&format!("  No model match: {}\n", counts.no_model));
    out.push_str(&format!("  Success rate: {:.1}%\n", counts.success_rate()));

    out
}

/// Prints the end-of-run summary to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}
