//! Standalone HTML table export

use crate::extract::ProductRecord;
use crate::output::traits::{OutputResult, RecordExporter};
use html_escape::{encode_double_quoted_attribute, encode_safe};

/// Writes records as an HTML document with one table row per record
pub struct HtmlExporter {
    path: String,
}

impl HtmlExporter {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordExporter for HtmlExporter {
    fn name(&self) -> &'static str {
        "html"
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn render(&self, records: &[ProductRecord]) -> OutputResult<String> {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Product Scout Results</title>\n");
        html.push_str("<style>table { border-collapse: collapse; } td, th { border: 1px solid #ccc; padding: 4px; vertical-align: top; } img { max-width: 80px; max-height: 80px; margin: 2px; }</style>\n");
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>Products ({})</h1>\n", records.len()));
        html.push_str("<table>\n<tr><th>Model</th><th>URL</th><th>Description</th><th>Short description</th><th>Images</th></tr>\n");

        for record in records {
            let images: String = record
                .images
                .iter()
                .map(|src| {
                    let src = encode_double_quoted_attribute(src);
                    format!("<a href=\"{src}\"><img src=\"{src}\" alt=\"\"></a>")
                })
                .collect();

            html.push_str(&format!(
                "<tr><td>{}</td><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                encode_safe(&record.model),
                encode_double_quoted_attribute(&record.url),
                encode_safe(&record.url),
                encode_safe(&record.description),
                encode_safe(&record.short_description),
                images,
            ));
        }

        html.push_str("</table>\n</body>\n</html>\n");
        Ok(html)
    }
}
