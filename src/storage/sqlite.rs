//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the DiscoveryCache trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{DiscoveryCache, StorageResult};
use crate::storage::CandidateUrl;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const SECONDS_PER_HOUR: i64 = 3600;

/// SQLite-backed discovery cache
pub struct SqliteDiscoveryCache {
    conn: Connection,
}

impl SqliteDiscoveryCache {
    /// Opens or creates the cache database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteDiscoveryCache)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Every mutation must reach disk before the call returns
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = FULL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Upserts a URL with an explicit discovery timestamp (epoch seconds)
    pub fn record_discovery_at(
        &mut self,
        url: &str,
        score: u32,
        discovered_at: i64,
    ) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO discovered_urls (url, discovered_at, score) VALUES (?1, ?2, ?3)
             ON CONFLICT(url) DO UPDATE SET discovered_at = excluded.discovered_at,
                                            score = excluded.score",
            params![url, discovered_at, score],
        )?;
        Ok(())
    }

    /// Freshness check against an explicit clock (epoch seconds)
    pub fn is_fresh_at(&self, url: &str, ttl_hours: u64, now: i64) -> StorageResult<bool> {
        let discovered_at: Option<i64> = self
            .conn
            .query_row(
                "SELECT discovered_at FROM discovered_urls WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;

        Ok(discovered_at.is_some_and(|at| now - at < ttl_seconds(ttl_hours)))
    }

    /// Fresh URL listing against an explicit clock (epoch seconds)
    pub fn fresh_urls_at(&self, ttl_hours: u64, now: i64) -> StorageResult<Vec<String>> {
        let cutoff = now - ttl_seconds(ttl_hours);
        let mut stmt = self.conn.prepare(
            "SELECT url FROM discovered_urls WHERE discovered_at > ?1 ORDER BY rowid",
        )?;

        let urls = stmt
            .query_map(params![cutoff], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(urls)
    }
}

fn ttl_seconds(ttl_hours: u64) -> i64 {
    i64::try_from(ttl_hours)
        .unwrap_or(i64::MAX / SECONDS_PER_HOUR)
        .saturating_mul(SECONDS_PER_HOUR)
}

impl DiscoveryCache for SqliteDiscoveryCache {
    fn is_fresh(&self, url: &str, ttl_hours: u64) -> StorageResult<bool> {
        self.is_fresh_at(url, ttl_hours, Utc::now().timestamp())
    }

    fn record_discovery(&mut self, url: &str, score: u32) -> StorageResult<()> {
        self.record_discovery_at(url, score, Utc::now().timestamp())
    }

    fn record_score(&mut self, url: &str, score: u32) -> StorageResult<()> {
        self.conn.execute(
            "UPDATE discovered_urls SET score = ?1 WHERE url = ?2",
            params![score, url],
        )?;
        Ok(())
    }

    fn fresh_urls(&self, ttl_hours: u64) -> StorageResult<Vec<String>> {
        self.fresh_urls_at(ttl_hours, Utc::now().timestamp())
    }

    fn get(&self, url: &str) -> StorageResult<Option<CandidateUrl>> {
        let entry = self
            .conn
            .query_row(
                "SELECT url, discovered_at, score FROM discovered_urls WHERE url = ?1",
                params![url],
                |row| {
                    Ok(CandidateUrl {
                        url: row.get(0)?,
                        discovered_at: row.get(1)?,
                        last_score: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(entry)
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM discovered_urls", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM discovered_urls", [])?;
        Ok(())
    }
}
