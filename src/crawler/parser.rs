//! Parsed page content
//!
//! This module wraps a fetched page's raw markup together with its parsed
//! document and offers the small queries shared by scoring and extraction:
//! - Page title and first `<h1>`
//! - Visible text sample with scripts and styles removed

use scraper::{Html, Selector};
use url::Url;

/// Elements whose text never counts as visible page text
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// A fetched page: raw markup plus its queryable document
pub struct PageContent {
    /// The URL the page was fetched from
    pub url: Url,

    /// Raw markup as received
    pub raw: String,

    /// Parsed document
    pub document: Html,
}

impl PageContent {
    /// Parses markup fetched from `url`
    ///
    /// # Example
    ///
    /// ```
    /// use product_scout::crawler::PageContent;
    /// use url::Url;
    ///
    /// let html = "<html><head><title>X100</title></head><body></body></html>";
    /// let page = PageContent::parse(Url::parse("https://example.com/").unwrap(), html.to_string());
    /// assert_eq!(page.title(), Some("X100".to_string()));
    /// ```
    pub fn parse(url: Url, raw: String) -> Self {
        let document = Html::parse_document(&raw);
        Self { url, raw, document }
    }

    /// Text of the `<title>` element, trimmed
    pub fn title(&self) -> Option<String> {
        self.first_text("title")
    }

    /// Text of the first `<h1>` element, trimmed
    pub fn h1(&self) -> Option<String> {
        self.first_text("h1")
    }

    /// Returns true if at least one element matches the CSS selector
    pub fn has(&self, css: &str) -> bool {
        Selector::parse(css)
            .map(|selector| self.document.select(&selector).next().is_some())
            .unwrap_or(false)
    }

    /// Visible text with scripts and styles removed, whitespace collapsed,
    /// cut to `max_chars` characters
    pub fn text_sample(&self, max_chars: usize) -> String {
        let mut text = String::new();

        for node in self.document.root_element().descendants() {
            let Some(fragment) = node.value().as_text() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
            });
            if hidden {
                continue;
            }

            text.push_str(fragment);
            text.push(' ');
        }

        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(max_chars)
            .collect()
    }

    /// Extracts the trimmed text of the first element matching `css`
    fn first_text(&self, css: &str) -> Option<String> {
        let selector = Selector::parse(css).ok()?;

        self.document
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
