//! Exporter trait and error types

use crate::extract::ProductRecord;
use thiserror::Error;

/// Errors that can occur while writing exports
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the ordered record list of a run somewhere
pub trait RecordExporter {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Renders the records without writing them
    fn render(&self, records: &[ProductRecord]) -> OutputResult<String>;

    /// Destination path
    fn path(&self) -> &str;

    /// Renders and writes the records, replacing any previous export
    fn export(&self, records: &[ProductRecord]) -> OutputResult<()> {
        let rendered = self.render(records)?;

        std::fs::write(self.path(), rendered).map_err(|source| OutputError::Io {
            path: self.path().to_string(),
            source,
        })?;

        tracing::info!(
            "Wrote {} records to {} ({})",
            records.len(),
            self.path(),
            self.name()
        );
        Ok(())
    }
}
