//! Candidate URL discovery
//!
//! Two independent strategies produce candidate product URLs for a site:
//! - Sitemaps at well-known paths (with one level of sitemap-index expansion)
//! - Links harvested from well-known category/listing pages
//!
//! A failing source contributes nothing; discovery itself never fails.

use crate::crawler::fetcher::{fetch_with_retry, FetchResult};
use crate::url::{has_product_marker, resolve_link, site_origin};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Sitemap locations tried on every site
pub const SITEMAP_PATHS: &[&str] = &["/sitemap.xml", "/sitemap_index.xml", "/product-sitemap.xml"];

/// Listing pages whose links are harvested
pub const CATEGORY_PATHS: &[&str] = &["/products", "/shop", "/catalog", "/categories"];

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sitemap {
    /// `<sitemapindex>`: locations of sub-sitemaps
    Index(Vec<String>),
    /// `<urlset>`: page locations
    UrlSet(Vec<String>),
}

/// Parses sitemap XML into either an index or a URL set
///
/// A document with any `<sitemap><loc>` entries is an index; otherwise the
/// `<url><loc>` entries are returned. Empty locations are dropped.
///
/// # Example
///
/// ```
/// use product_scout::crawler::{parse_sitemap, Sitemap};
///
/// let xml = "<urlset><url><loc>https://example.com/p/1</loc></url></urlset>";
/// assert_eq!(
///     parse_sitemap(xml).unwrap(),
///     Sitemap::UrlSet(vec!["https://example.com/p/1".to_string()])
/// );
/// ```
pub fn parse_sitemap(xml: &str) -> Result<Sitemap, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut sitemap_locs = Vec::new();
    let mut url_locs = Vec::new();

    loop {
        let text = match reader.read_event()? {
            Event::Start(e) => {
                path.push(e.local_name().as_ref().to_ascii_lowercase());
                continue;
            }
            Event::End(_) => {
                path.pop();
                continue;
            }
            Event::Text(t) => t.unescape()?.into_owned(),
            Event::CData(c) => String::from_utf8_lossy(&c.into_inner()).into_owned(),
            Event::Eof => break,
            _ => continue,
        };

        let loc = text.trim();
        if loc.is_empty() || path.last().map(Vec::as_slice) != Some(b"loc".as_slice()) {
            continue;
        }

        match path.iter().rev().nth(1).map(Vec::as_slice) {
            Some(b"sitemap") => sitemap_locs.push(loc.to_string()),
            Some(b"url") => url_locs.push(loc.to_string()),
            _ => {}
        }
    }

    if sitemap_locs.is_empty() {
        Ok(Sitemap::UrlSet(url_locs))
    } else {
        Ok(Sitemap::Index(sitemap_locs))
    }
}

/// Extracts product-looking links from a listing page
///
/// Every `<a href>` is resolved against `base` and kept only when it contains
/// one of the product path markers.
pub fn extract_product_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base))
        .filter(|url| has_product_marker(url))
        .collect()
}

/// Produces the candidate URL set for a site
pub struct SiteDiscoverer {
    client: Client,
    base: Url,
    max_retries: u32,
}

impl SiteDiscoverer {
    /// Creates a discoverer for the given base URL
    pub fn new(client: Client, base: Url, max_retries: u32) -> Self {
        Self {
            client,
            base,
            max_retries,
        }
    }

    /// Runs both strategies and returns their de-duplicated union
    ///
    /// Sitemap URLs come first, then category links, each in the order found.
    pub async fn discover(&self) -> Vec<String> {
        let from_sitemaps = self.discover_from_sitemaps().await;
        let from_categories = self.discover_from_categories().await;

        tracing::info!(
            "Discovery found {} sitemap URLs and {} category links",
            from_sitemaps.len(),
            from_categories.len()
        );

        let mut seen = HashSet::new();
        from_sitemaps
            .into_iter()
            .chain(from_categories)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty() && seen.insert(url.clone()))
            .collect()
    }

    /// Sitemap strategy: try well-known sitemap paths
    pub async fn discover_from_sitemaps(&self) -> Vec<String> {
        let origin = site_origin(&self.base);
        let mut urls = Vec::new();

        for path in SITEMAP_PATHS {
            let sitemap_url = format!("{}{}", origin, path);

            match self.fetch_sitemap(&sitemap_url).await {
                Some(Sitemap::UrlSet(locs)) => urls.extend(locs),
                Some(Sitemap::Index(children)) => {
                    tracing::debug!(
                        "{} is a sitemap index with {} children",
                        sitemap_url,
                        children.len()
                    );
                    for child in children {
                        let Some(child_url) = resolve_link(&child, &self.base) else {
                            continue;
                        };
                        // Sub-sitemaps are never expanded further
                        match self.fetch_sitemap(&child_url).await {
                            Some(Sitemap::UrlSet(locs)) => urls.extend(locs),
                            Some(Sitemap::Index(_)) => {
                                tracing::debug!("Ignoring nested sitemap index {}", child_url);
                            }
                            None => {}
                        }
                    }
                }
                None => {}
            }
        }

        urls
    }

    /// Category strategy: harvest product links from listing pages
    pub async fn discover_from_categories(&self) -> Vec<String> {
        let origin = site_origin(&self.base);
        let mut urls = Vec::new();

        for path in CATEGORY_PATHS {
            let page_url = format!("{}{}", origin, path);
            let Some(body) = self.fetch_body(&page_url).await else {
                continue;
            };

            let links = extract_product_links(&body, &self.base);
            tracing::debug!("{} yielded {} product links", page_url, links.len());
            urls.extend(links);
        }

        urls
    }

    /// Fetches and parses one sitemap; failures are logged and yield None
    async fn fetch_sitemap(&self, url: &str) -> Option<Sitemap> {
        let body = self.fetch_body(url).await?;

        match parse_sitemap(&body) {
            Ok(sitemap) => Some(sitemap),
            Err(e) => {
                tracing::warn!("Skipping malformed sitemap {}: {}", url, e);
                None
            }
        }
    }

    async fn fetch_body(&self, url: &str) -> Option<String> {
        match fetch_with_retry(&self.client, url, self.max_retries).await {
            FetchResult::Success { body, .. } => Some(body),
            FetchResult::HttpError { status_code } => {
                tracing::debug!("{} returned HTTP {}", url, status_code);
                None
            }
            FetchResult::NetworkError { error, .. } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                None
            }
        }
    }
}
