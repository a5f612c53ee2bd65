//! Database schema definitions
//!
//! This module contains the SQL schema for the discovery cache database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per discovered URL; re-discovery overwrites the row
CREATE TABLE IF NOT EXISTS discovered_urls (
    url TEXT PRIMARY KEY,
    discovered_at INTEGER NOT NULL,
    score INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_discovered_urls_at ON discovered_urls(discovered_at);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
