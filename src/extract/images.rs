//! Product image collection
//!
//! Sources are read in priority order and accumulated:
//! 1. `<picture>`: each `<source srcset>` then its `<img src>`
//! 2. `<img srcset>`
//! 3. `<img data-src>`
//! 4. `<img src>`
//!
//! Only the first candidate of a `srcset` is used. Icons, logos and other
//! placeholder artwork are dropped, the rest is resolved, de-duplicated in
//! first-seen order and capped.

use crate::crawler::PageContent;
use crate::url::resolve_link;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

/// Maximum number of images kept per product
pub const MAX_IMAGES: usize = 10;

/// Path fragments that mark non-product artwork
const PLACEHOLDER_MARKERS: &[&str] = &["icon", "logo", "placeholder", "avatar", "sprite"];

fn size_token() -> &'static Regex {
    static SIZE_TOKEN: OnceLock<Regex> = OnceLock::new();
    SIZE_TOKEN.get_or_init(|| Regex::new(r"(\d+)x(\d+)").expect("size token pattern is valid"))
}

/// Collects up to [`MAX_IMAGES`] absolute product image URLs from a page
pub fn extract_images(page: &PageContent) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Ok(picture) = Selector::parse("picture") {
        let source = Selector::parse("source[srcset]").ok();
        let img = Selector::parse("img[src]").ok();

        for element in page.document.select(&picture) {
            if let Some(source) = &source {
                candidates.extend(
                    element
                        .select(source)
                        .filter_map(|s| s.value().attr("srcset"))
                        .filter_map(first_srcset_candidate),
                );
            }
            if let Some(img) = &img {
                candidates.extend(attr_values(element.select(img), "src"));
            }
        }
    }

    for (css, attr) in [
        ("img[srcset]", "srcset"),
        ("img[data-src]", "data-src"),
        ("img[src]", "src"),
    ] {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        let values = attr_values(page.document.select(&selector), attr);

        if attr == "srcset" {
            candidates.extend(values.iter().filter_map(|v| first_srcset_candidate(v)));
        } else {
            candidates.extend(values);
        }
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|candidate| candidate.trim().to_string())
        .filter(|candidate| !candidate.is_empty() && !is_placeholder_image(candidate))
        .filter_map(|candidate| resolve_link(&candidate, &page.url))
        .filter(|url| seen.insert(url.clone()))
        .take(MAX_IMAGES)
        .collect()
}

fn attr_values<'a>(elements: impl Iterator<Item = ElementRef<'a>>, attr: &str) -> Vec<String> {
    elements
        .filter_map(|e| e.value().attr(attr))
        .map(str::to_string)
        .collect()
}

/// First URL of a `srcset` value (`"a.jpg 1x, b.jpg 2x"` -> `"a.jpg"`)
pub fn first_srcset_candidate(srcset: &str) -> Option<String> {
    srcset
        .split_whitespace()
        .next()
        .map(|candidate| candidate.trim_end_matches(','))
        .filter(|candidate| !candidate.is_empty())
        .map(str::to_string)
}

/// Returns true for icons, logos, SVGs and square thumbnails like `32x32`
pub fn is_placeholder_image(candidate: &str) -> bool {
    let lower = candidate_path(candidate).to_ascii_lowercase();
    let path = lower.as_str();

    if PLACEHOLDER_MARKERS.iter().any(|marker| path.contains(marker)) {
        return true;
    }

    if path.ends_with(".svg") {
        return true;
    }

    size_token()
        .captures_iter(path)
        .any(|caps| caps[1] == caps[2])
}

/// Path part of a candidate, without scheme, host, query or fragment
fn candidate_path(candidate: &str) -> String {
    let absolute = if candidate.starts_with("//") {
        Url::parse(&format!("https:{}", candidate))
    } else {
        Url::parse(candidate)
    };

    match absolute {
        Ok(url) => url.path().to_string(),
        Err(_) => candidate
            .split(['?', '#'])
            .next()
            .unwrap_or(candidate)
            .to_string(),
    }
}
