use serde::Deserialize;

/// Main configuration structure for Product-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the site to scan (e.g., "https://shop.example.com")
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Model catalog source
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to a text file with one model identifier per line
    #[serde(rename = "models-path")]
    pub models_path: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Pause between consecutive page fetches (seconds)
    #[serde(rename = "delay-seconds", default = "default_delay_seconds")]
    pub delay_seconds: f64,

    /// Minimum score (0-30) a page needs to qualify
    #[serde(rename = "score-threshold", default = "default_score_threshold")]
    pub score_threshold: u32,

    /// How long discovered URLs stay fresh in the cache (hours)
    #[serde(rename = "cache-ttl-hours", default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Clear the discovery cache and rediscover
    #[serde(default)]
    pub force: bool,

    /// Retries for 5xx responses and timeouts
    #[serde(rename = "max-retries", default)]
    pub max_retries: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            delay_seconds: default_delay_seconds(),
            score_threshold: default_score_threshold(),
            cache_ttl_hours: default_cache_ttl_hours(),
            force: false,
            max_retries: 0,
        }
    }
}

fn default_delay_seconds() -> f64 {
    1.0
}

fn default_score_threshold() -> u32 {
    crate::scoring::DEFAULT_THRESHOLD
}

fn default_cache_ttl_hours() -> u64 {
    24
}

/// Which page scorer to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    #[default]
    Rules,
    Assisted,
}

/// Page scoring configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: ScoringMode,

    /// Chat completions endpoint used by assisted scoring
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name sent to the endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScoringMode::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite discovery cache
    #[serde(rename = "cache-path")]
    pub cache_path: String,

    /// Path to the CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Optional path to an HTML report
    #[serde(rename = "html-path", default)]
    pub html_path: Option<String>,
}
