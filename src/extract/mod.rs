//! Field extraction from qualifying product pages
//!
//! This module turns a parsed page into the exported fields:
//! - Long description from structured data, meta tags or page elements
//! - Short description from the page heading or title
//! - Product image URLs from the page's image elements

mod fields;
mod images;
mod jsonld;
mod normalize;

pub use fields::{extract_description, extract_short_description};
pub use images::{extract_images, first_srcset_candidate, is_placeholder_image, MAX_IMAGES};
pub use jsonld::{has_product_block, json_ld_description, json_ld_nodes};
pub use normalize::{normalize_text, truncate_chars};

use crate::crawler::PageContent;

/// Fields extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub description: String,
    pub short_description: String,
    pub images: Vec<String>,
}

/// A qualifying product page: matched model plus its extracted fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub model: String,
    pub url: String,
    pub description: String,
    pub short_description: String,
    /// Up to [`MAX_IMAGES`] unique absolute URLs, first-seen order
    pub images: Vec<String>,
}

impl ProductRecord {
    /// Builds a record from a matched model and the page's fields
    pub fn new(model: impl Into<String>, url: impl Into<String>, fields: ExtractedFields) -> Self {
        Self {
            model: model.into(),
            url: url.into(),
            description: fields.description,
            short_description: fields.short_description,
            images: fields.images,
        }
    }
}

/// Extracts description, short description and images from a page
pub fn extract_fields(page: &PageContent) -> ExtractedFields {
    ExtractedFields {
        description: extract_description(page),
        short_description: extract_short_description(page),
        images: extract_images(page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_extract_fields_full_page() {
        let html = r#"<html><head>
            <title>X100 Blender | Shop</title>
            <meta name="description" content="A powerful blender">
            </head><body>
            <h1>X100 Blender</h1>
            <img src="/img/logo.png">
            <img src="/img/x100-front.jpg">
            <img data-src="/img/x100-side.jpg">
            </body></html>"#;
        let page = PageContent::parse(
            Url::parse("https://shop.example.com/product/x100").unwrap(),
            html.to_string(),
        );

        let fields = extract_fields(&page);

        assert_eq!(fields.description, "A powerful blender");
        assert_eq!(fields.short_description, "X100 Blender");
        assert_eq!(
            fields.images,
            vec![
                "https://shop.example.com/img/x100-side.jpg",
                "https://shop.example.com/img/x100-front.jpg",
            ]
        );
    }

    #[test]
    fn test_product_record_new() {
        let fields = ExtractedFields {
            description: "Long".to_string(),
            short_description: "Short".to_string(),
            images: vec!["https://example.com/a.jpg".to_string()],
        };
        let record = ProductRecord::new("X100", "https://example.com/product/x100", fields);

        assert_eq!(record.model, "X100");
        assert_eq!(record.short_description, "Short");
        assert_eq!(record.images.len(), 1);
    }
}
