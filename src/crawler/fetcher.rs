//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch sitemaps, listings and product pages
//! - Bounded retry with backoff for transient failures
//! - Error classification

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;

/// Base delay for retry backoff; doubled on every attempt
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request hit the client timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true for failures worth retrying (5xx and timeouts)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Success { .. } => false,
            Self::HttpError { status_code } => *status_code >= 500,
            Self::NetworkError { timed_out, .. } => *timed_out,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use product_scout::config::UserAgentConfig;
/// use product_scout::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "ProductScout".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/bot".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Format: CrawlerName/Version (+ContactURL)
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    )
}

/// Fetches a URL once and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Success |
/// | Any other status | HttpError |
/// | Timeout | NetworkError (timed_out) |
/// | Connection or body error | NetworkError |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult indicating success or the type of failure
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: e.is_timeout(),
                },
            }
        }
        Err(e) => {
            // Classify error
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                    timed_out: true,
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: "Connection refused".to_string(),
                    timed_out: false,
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: false,
                }
            }
        }
    }
}

/// Fetches a URL, retrying 5xx responses and timeouts up to `max_retries` times
///
/// The delay before retry `n` is `500ms * 2^n`. Other failures return immediately.
pub async fn fetch_with_retry(client: &Client, url: &str, max_retries: u32) -> FetchResult {
    let mut attempt = 0;

    loop {
        let result = fetch_url(client, url).await;

        if !result.is_transient() || attempt >= max_retries {
            return result;
        }

        let backoff = RETRY_BASE_DELAY * 2u32.pow(attempt);
        tracing::debug!(
            "Transient failure for {} (attempt {}/{}), retrying in {:?}",
            url,
            attempt + 1,
            max_retries,
            backoff
        );
        tokio::time::sleep(backoff).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestScout".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent_format() {
        let config = create_test_config();
        assert_eq!(
            user_agent_string(&config),
            "TestScout/1.0 (+https://example.com/bot)"
        );
    }

    #[test]
    fn test_transient_classification() {
        assert!(FetchResult::HttpError { status_code: 503 }.is_transient());
        assert!(!FetchResult::HttpError { status_code: 404 }.is_transient());
        assert!(FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true
        }
        .is_transient());
        assert!(!FetchResult::NetworkError {
            error: "Connection refused".to_string(),
            timed_out: false
        }
        .is_transient());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let result = fetch_url(&client, &format!("{}/page", server.uri())).await;

        match result {
            FetchResult::Success {
                status_code, body, ..
            } => {
                assert_eq!(status_code, 200);
                assert_eq!(body, "<html></html>");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let result = fetch_url(&client, &format!("{}/missing", server.uri())).await;

        assert!(matches!(result, FetchResult::HttpError { status_code: 404 }));
        assert!(result.into_body().is_none());
    }

    #[tokio::test]
    async fn test_retry_recovers_from_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let url = format!("{}/flaky", server.uri());

        let result = fetch_with_retry(&client, &url, 1).await;
        assert_eq!(result.into_body().as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let result = fetch_with_retry(&client, &format!("{}/down", server.uri()), 0).await;
        assert!(matches!(result, FetchResult::HttpError { status_code: 500 }));
    }
}
