//! Integration tests for the crawl pipeline
//!
//! These tests use wiremock to serve a small shop and run the whole
//! discover, score, match, extract and export cycle against it.

use product_scout::config::{
    CatalogConfig, Config, CrawlerConfig, OutputConfig, ScoringConfig, SiteConfig, UserAgentConfig,
};
use product_scout::crawler::crawl;
use product_scout::output::split_line;
use product_scout::storage::{open_cache, DiscoveryCache};
use product_scout::ScoutError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing everything under `dir`
fn create_test_config(base_url: &str, dir: &Path, force: bool) -> Config {
    let models_path = dir.join("models.txt");
    if !models_path.exists() {
        std::fs::write(&models_path, "x100\n\n  Z9  \n").unwrap();
    }

    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
        },
        catalog: CatalogConfig {
            models_path: models_path.to_string_lossy().to_string(),
        },
        crawler: CrawlerConfig {
            delay_seconds: 0.0,
            force,
            ..CrawlerConfig::default()
        },
        scoring: ScoringConfig::default(),
        user_agent: UserAgentConfig {
            crawler_name: "TestScout".to_string(),
            crawler_version: "0.1".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        },
        output: OutputConfig {
            cache_path: dir.join("cache.db").to_string_lossy().to_string(),
            csv_path: dir.join("products.csv").to_string_lossy().to_string(),
            html_path: Some(dir.join("products.html").to_string_lossy().to_string()),
        },
    }
}

fn product_page(model: &str) -> String {
    format!(
        r#"<html><head>
        <title>{model} | Example Shop</title>
        <meta name="description" content="The {model} does it all | fast &amp; quiet">
        <link rel="canonical" href="/product/{model}">
        <script type="application/ld+json">{{"@type":"Product","name":"{model}"}}</script>
        </head><body>
        <h1>{model} Blender</h1>
        <h2>Technical specifications</h2>
        <p>Capacity: 1.5 L</p>
        <img src="/img/logo.png">
        <img src="/img/{model}-front.jpg">
        <img data-src="/img/{model}-side.jpg">
        </body></html>"#
    )
}

/// Mounts a shop with a sitemap index, a category listing and a few pages
async fn mount_shop(server: &MockServer) {
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <sitemap><loc>{base}/sitemap-products.xml</loc></sitemap>
            </sitemapindex>"#
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap-products.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url><loc>{base}/product/x100</loc></url>
              <url><loc>{base}/product/gone</loc></url>
              <url><loc>{base}/about-us</loc></url>
              <url><loc>{base}/product/z9</loc></url>
            </urlset>"#
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/shop"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
            <a href="/product/x100">X100</a>
            <a href="/item/q7">Q7</a>
            <a href="/contact">Contact</a>
            </body></html>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/x100"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page("X100")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/z9"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page("Z9")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/item/q7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page("Q7")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about-us"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>About</title></head><body>Hi</body></html>"),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

async fn requests_to(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}

#[tokio::test]
async fn test_full_crawl_exports_records_in_discovery_order() {
    let server = MockServer::start().await;
    mount_shop(&server).await;
    let base = server.uri();

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base, dir.path(), false);

    let report = crawl(&config).await.unwrap();

    assert!(!report.cache_hit);
    // x100, gone, about-us, z9 from the sitemap; q7 from the listing
    assert_eq!(report.candidates, 5);
    assert_eq!(report.counts.recorded, 2);
    assert_eq!(report.counts.fetch_failed, 1);
    assert_eq!(report.counts.below_threshold, 1);
    assert_eq!(report.counts.no_model, 1);

    let models: Vec<&str> = report.records.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(models, vec!["X100", "Z9"]);

    let x100 = &report.records[0];
    assert_eq!(x100.url, format!("{}/product/x100", base));
    assert_eq!(x100.description, "The X100 does it all fast & quiet");
    assert_eq!(x100.short_description, "X100 Blender");
    assert_eq!(
        x100.images,
        vec![
            format!("{}/img/X100-side.jpg", base),
            format!("{}/img/X100-front.jpg", base),
        ]
    );

    let csv = std::fs::read_to_string(dir.path().join("products.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "model|url|description|short_description|images");
    let fields = split_line(lines[1]);
    assert_eq!(fields[0], "X100");
    assert_eq!(fields[1], format!("{}/product/x100", base));

    let html = std::fs::read_to_string(dir.path().join("products.html")).unwrap();
    assert!(html.contains("<h1>Products (2)</h1>"));

    let cache = open_cache(Path::new(&config.output.cache_path)).unwrap();
    assert_eq!(cache.count().unwrap(), 5);
    let entry = cache
        .get(&format!("{}/product/x100", base))
        .unwrap()
        .unwrap();
    assert!(entry.last_score >= 20);
}

#[tokio::test]
async fn test_second_run_uses_cache() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), false);

    let first = crawl(&config).await.unwrap();
    assert_eq!(requests_to(&server, "/sitemap.xml").await, 1);

    let second = crawl(&config).await.unwrap();

    assert!(second.cache_hit);
    assert_eq!(requests_to(&server, "/sitemap.xml").await, 1);
    assert_eq!(requests_to(&server, "/shop").await, 1);
    assert_eq!(second.candidates, first.candidates);
    assert_eq!(second.records, first.records);
}

#[tokio::test]
async fn test_force_rediscovers() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), false);
    crawl(&config).await.unwrap();

    let forced = create_test_config(&server.uri(), dir.path(), true);
    let report = crawl(&forced).await.unwrap();

    assert!(!report.cache_hit);
    assert_eq!(requests_to(&server, "/sitemap.xml").await, 2);
    assert_eq!(report.records.len(), 2);
}

#[tokio::test]
async fn test_unreachable_site_produces_empty_export() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config("http://127.0.0.1:1", dir.path(), false);

    let report = crawl(&config).await.unwrap();

    assert_eq!(report.candidates, 0);
    assert!(report.records.is_empty());
    let csv = std::fs::read_to_string(dir.path().join("products.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[tokio::test]
async fn test_missing_catalog_is_fatal() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path(), false);
    config.catalog.models_path = dir.path().join("absent.txt").to_string_lossy().to_string();

    let result = crawl(&config).await;

    assert!(matches!(result, Err(ScoutError::Catalog(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_assisted_without_key_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config("http://127.0.0.1:1", dir.path(), false);
    config.scoring.mode = product_scout::config::ScoringMode::Assisted;
    config.scoring.api_key_env = "PRODUCT_SCOUT_INTEGRATION_NO_SUCH_KEY".to_string();

    let result = crawl(&config).await;

    assert!(matches!(
        result,
        Err(ScoutError::Config(product_scout::ConfigError::MissingCredential(_)))
    ));
}
