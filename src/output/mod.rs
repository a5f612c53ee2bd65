//! Output module for exporting records and reporting run statistics
//!
//! This module handles:
//! - Pipe-separated record export
//! - HTML table export
//! - Run summaries and discovery cache statistics

mod csv;
mod html;
pub mod stats;
mod traits;

pub use csv::{escape_field, format_record, split_line, unescape_field, CsvExporter};
pub use html::HtmlExporter;
pub use stats::{
    format_report, load_cache_statistics, print_cache_statistics, print_report, CacheStatistics,
};
pub use traits::{OutputError, OutputResult, RecordExporter};

use crate::config::OutputConfig;

/// Builds the exporters named in the output configuration
pub fn exporters_from_config(config: &OutputConfig) -> Vec<Box<dyn RecordExporter>> {
    let mut exporters: Vec<Box<dyn RecordExporter>> =
        vec![Box::new(CsvExporter::new(config.csv_path.clone()))];

    if let Some(html_path) = &config.html_path {
        exporters.push(Box::new(HtmlExporter::new(html_path.clone())));
    }

    exporters
}
