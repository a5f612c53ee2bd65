//! Storage module for the discovery cache
//!
//! This module persists discovered candidate URLs so repeated runs within the
//! TTL window can skip discovery:
//! - SQLite database initialization and schema management
//! - Last-write-wins upserts keyed by URL
//! - TTL-based freshness queries

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteDiscoveryCache;
pub use traits::{DiscoveryCache, StorageError, StorageResult};

use std::path::Path;

/// Opens (or creates) the discovery cache at the given path
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteDiscoveryCache)` - Successfully opened cache
/// * `Err(StorageError)` - Failed to open the database
pub fn open_cache(path: &Path) -> StorageResult<SqliteDiscoveryCache> {
    SqliteDiscoveryCache::new(path)
}

/// A discovered candidate URL as stored in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrl {
    pub url: String,
    /// Epoch seconds of the most recent discovery
    pub discovered_at: i64,
    pub last_score: u32,
}
