//! Pipe-separated record export
//!
//! One header line, then one line per record:
//! `model|url|description|short_description|images`, with images joined by
//! single spaces. A literal `|` inside a field is written as `\|` and a
//! literal `\` as `\\`.

use crate::extract::ProductRecord;
use crate::output::traits::{OutputResult, RecordExporter};

/// Field separator
pub const SEPARATOR: char = '|';

/// Prefix that makes the next character literal
pub const ESCAPE: char = '\\';

/// Column names written on the first line
pub const HEADER: [&str; 5] = ["model", "url", "description", "short_description", "images"];

/// Escapes separators and backslashes inside a field
///
/// ```
/// use product_scout::output::{escape_field, unescape_field};
///
/// let escaped = escape_field("A | B");
/// assert_eq!(escaped, "A \\| B");
/// assert_eq!(unescape_field(&escaped), "A | B");
/// ```
pub fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        if c == SEPARATOR || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Reverses [`escape_field`]
pub fn unescape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => out.push(chars.next().unwrap_or(ESCAPE)),
            _ => out.push(c),
        }
    }

    out
}

/// Splits a line on unescaped separators, unescaping each field
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => current.push(chars.next().unwrap_or(ESCAPE)),
            SEPARATOR => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Formats one record as a line, without the trailing newline
pub fn format_record(record: &ProductRecord) -> String {
    let images = record.images.join(" ");

    [
        record.model.as_str(),
        record.url.as_str(),
        record.description.as_str(),
        record.short_description.as_str(),
        images.as_str(),
    ]
    .iter()
    .map(|field| escape_field(&field.replace(['\r', '\n'], " ")))
    .collect::<Vec<_>>()
    .join("|")
}

/// Writes records as pipe-separated lines
pub struct CsvExporter {
    path: String,
}

impl CsvExporter {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordExporter for CsvExporter {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn render(&self, records: &[ProductRecord]) -> OutputResult<String> {
        let mut out = HEADER.join("|");
        out.push('\n');

        for record in records {
            out.push_str(&format_record(record));
            out.push('\n');
        }

        Ok(out)
    }
}
