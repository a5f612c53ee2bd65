use crate::crawler::PageContent;
use crate::extract::jsonld::json_ld_description;
use crate::extract::normalize::{normalize_text, truncate_chars};
use scraper::Selector;

/// Longest description taken from a page element
pub const MAX_ELEMENT_DESCRIPTION_CHARS: usize = 500;

/// Long description, first non-empty of:
/// JSON-LD `description`, `<meta name="description">`, then the text of the
/// first element whose class or id mentions "description"
pub fn extract_description(page: &PageContent) -> String {
    let sources: [fn(&PageContent) -> Option<String>; 3] = [
        |page| json_ld_description(&page.document),
        meta_description,
        description_element_text,
    ];

    sources
        .iter()
        .filter_map(|source| source(page))
        .map(|text| normalize_text(&text))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Short description: `<h1>` text, else `<title>` text
pub fn extract_short_description(page: &PageContent) -> String {
    [page.h1(), page.title()]
        .into_iter()
        .flatten()
        .map(|text| normalize_text(&text))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn meta_description(page: &PageContent) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;

    page.document
        .select(&selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_string)
}

fn description_element_text(page: &PageContent) -> Option<String> {
    let selector = Selector::parse(r#"[class*="description"], [id*="description"]"#).ok()?;
    let element = page.document.select(&selector).next()?;

    let text = element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    Some(truncate_chars(&text, MAX_ELEMENT_DESCRIPTION_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(head: &str, body: &str) -> PageContent {
        PageContent::parse(
            Url::parse("https://shop.example.com/product/x100").unwrap(),
            format!("<html><head>{}</head><body>{}</body></html>", head, body),
        )
    }

    #[test]
    fn test_json_ld_description_wins() {
        let page = page(
            r#"<script type="application/ld+json">{"@type":"Product","description":"From JSON-LD"}</script>
               <meta name="description" content="From meta">"#,
            r#"<div class="product-description">From element</div>"#,
        );
        assert_eq!(extract_description(&page), "From JSON-LD");
    }

    #[test]
    fn test_meta_description_second() {
        let page = page(
            r#"<meta name="description" content="Blends &amp; crushes ice">"#,
            r#"<div class="product-description">From element</div>"#,
        );
        assert_eq!(extract_description(&page), "Blends & crushes ice");
    }

    #[test]
    fn test_element_description_last() {
        let page = page(
            r#"<meta name="description" content="   ">"#,
            r#"<div id="long-description"><p>Line one</p>
               <p>Line   two</p></div>"#,
        );
        assert_eq!(extract_description(&page), "Line one Line two");
    }

    #[test]
    fn test_element_description_truncated() {
        let long = "a".repeat(800);
        let page = page("", &format!(r#"<div class="description">{}</div>"#, long));
        assert_eq!(extract_description(&page).chars().count(), 500);
    }

    #[test]
    fn test_no_description() {
        let page = page("<title>X100</title>", "<p>nothing here</p>");
        assert_eq!(extract_description(&page), "");
    }

    #[test]
    fn test_short_description_prefers_h1() {
        let page = page("<title>X100 | Shop</title>", "<h1>  X100   Blender </h1>");
        assert_eq!(extract_short_description(&page), "X100 Blender");
    }

    #[test]
    fn test_short_description_falls_back_to_title() {
        let page = page("<title>X100 | Shop</title>", "<h1></h1>");
        assert_eq!(extract_short_description(&page), "X100 Shop");
    }
}
