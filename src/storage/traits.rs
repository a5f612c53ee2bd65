//! Storage traits and error types
//!
//! This module defines the trait interface for the discovery cache and
//! associated error types.

use crate::storage::CandidateUrl;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable URL -> (discovered_at, score) mapping with TTL-based freshness
///
/// Every mutation is persisted before the call returns. There is at most one
/// entry per URL; re-recording a URL overwrites the previous entry.
pub trait DiscoveryCache {
    /// Returns true if the URL has an entry younger than `ttl_hours`
    fn is_fresh(&self, url: &str, ttl_hours: u64) -> StorageResult<bool>;

    /// Upserts the URL with the current timestamp and the given score
    fn record_discovery(&mut self, url: &str, score: u32) -> StorageResult<()>;

    /// Updates the stored score of an existing entry, keeping its timestamp
    fn record_score(&mut self, url: &str, score: u32) -> StorageResult<()>;

    /// Returns every URL younger than `ttl_hours`, in first-discovery order
    fn fresh_urls(&self, ttl_hours: u64) -> StorageResult<Vec<String>>;

    /// Gets the entry for a URL
    fn get(&self, url: &str) -> StorageResult<Option<CandidateUrl>>;

    /// Counts all entries regardless of age
    fn count(&self) -> StorageResult<u64>;

    /// Removes every entry
    fn clear(&mut self) -> StorageResult<()>;
}
