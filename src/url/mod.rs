//! URL handling module for Product-Scout
//!
//! This module provides link resolution against the site base URL and the
//! product-path heuristics used while harvesting category pages.

mod resolve;

// Re-export main functions
pub use resolve::{resolve_link, site_origin};

/// Path fragments that mark a link as a likely product page
pub const PRODUCT_PATH_MARKERS: &[&str] = &["/product/", "/item/", "/p/", "/shop/", "/catalog/"];

/// Returns true if the URL contains one of the product path markers
///
/// # Examples
///
/// ```
/// use product_scout::url::has_product_marker;
///
/// assert!(has_product_marker("https://example.com/product/x100"));
/// assert!(!has_product_marker("https://example.com/about"));
/// ```
pub fn has_product_marker(url: &str) -> bool {
    PRODUCT_PATH_MARKERS
        .iter()
        .any(|marker| url.contains(marker))
}
