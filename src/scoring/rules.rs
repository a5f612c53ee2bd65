//! Rule-based page scoring
//!
//! | Signal | Points |
//! |--------|--------|
//! | `<title>` present | 5 |
//! | `<h1>` present | 3 |
//! | specification keywords | 5 |
//! | 3 or more images | 3 |
//! | measurement keywords | 4 |
//! | documentation keywords | 3 |
//! | JSON-LD Product block | 5 |
//! | canonical link | 2 |

use crate::crawler::PageContent;
use crate::extract::has_product_block;
use scraper::Selector;

/// Highest score any page can reach
pub const MAX_SCORE: u32 = 30;

const SPEC_KEYWORDS: &[&str] = &["specification", "specs", "technical", "features"];
const MEASUREMENT_KEYWORDS: &[&str] = &["dimensions", "weight", "size", "capacity"];
const DOCUMENTATION_KEYWORDS: &[&str] = &["manual", "documentation", "guide", "instructions"];

/// Minimum image count for the image signal
const MIN_IMAGES: usize = 3;

/// Scores a page from its markup alone, in `0..=MAX_SCORE`
pub fn rule_score(page: &PageContent) -> u32 {
    let markup = page.raw.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| markup.contains(k));

    let signals = [
        (page.has("title"), 5),
        (page.has("h1"), 3),
        (mentions(SPEC_KEYWORDS), 5),
        (image_count(page) >= MIN_IMAGES, 3),
        (mentions(MEASUREMENT_KEYWORDS), 4),
        (mentions(DOCUMENTATION_KEYWORDS), 3),
        (has_product_block(&page.document), 5),
        (page.has(r#"link[rel="canonical"]"#), 2),
    ];

    let score = signals
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, points)| points)
        .sum::<u32>();

    tracing::trace!("Rule score for {}: {}", page.url, score);
    score.min(MAX_SCORE)
}

fn image_count(page: &PageContent) -> usize {
    Selector::parse("img[src], img[data-src]")
        .map(|selector| page.document.select(&selector).count())
        .unwrap_or(0)
}
