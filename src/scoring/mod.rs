//! Page scoring
//!
//! Every fetched page gets a score from 0 to 30; pages at or above the
//! configured threshold are candidates for model matching.
//!
//! - `RuleBased`: a fixed point table over the page markup
//! - `Assisted`: an external classifier, with the rule table as fallback

mod assisted;
mod classifier;
mod rules;

pub use assisted::{rescale, AssistedScorer, TEXT_SAMPLE_CHARS};
pub use classifier::{
    parse_score, ChatClassifier, ClassifierError, PageClassifier, MAX_CLASSIFIER_SCORE,
};
pub use rules::{rule_score, MAX_SCORE};

use crate::config::{ScoringConfig, ScoringMode};
use crate::crawler::PageContent;
use crate::{ConfigError, ConfigResult};
use reqwest::Client;

/// Default qualification threshold
pub const DEFAULT_THRESHOLD: u32 = 20;

/// How pages are scored for a run
pub enum ScoringStrategy {
    RuleBased,
    Assisted(AssistedScorer),
}

impl ScoringStrategy {
    /// Builds the strategy named by the configuration
    ///
    /// Assisted scoring reads its API key from the environment variable named
    /// in `api-key-env`; a missing or blank key is a configuration error.
    pub fn from_config(config: &ScoringConfig, client: Client) -> ConfigResult<Self> {
        match config.mode {
            ScoringMode::Rules => Ok(Self::RuleBased),
            ScoringMode::Assisted => {
                let api_key = std::env::var(&config.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| ConfigError::MissingCredential(config.api_key_env.clone()))?;

                let classifier = ChatClassifier::new(
                    client,
                    config.endpoint.clone(),
                    config.model.clone(),
                    api_key,
                );
                Ok(Self::Assisted(AssistedScorer::new(Box::new(classifier))))
            }
        }
    }

    /// Scores a page in `0..=MAX_SCORE`; never fails
    pub async fn score(&self, page: &PageContent) -> u32 {
        match self {
            Self::RuleBased => rule_score(page),
            Self::Assisted(scorer) => scorer.score(page).await,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RuleBased => "rules",
            Self::Assisted(_) => "assisted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scoring_config(mode: ScoringMode, api_key_env: &str) -> ScoringConfig {
        ScoringConfig {
            mode,
            api_key_env: api_key_env.to_string(),
            ..ScoringConfig::default()
        }
    }

    #[test]
    fn test_rules_mode() {
        let config = scoring_config(ScoringMode::Rules, "UNUSED_KEY");
        let strategy = ScoringStrategy::from_config(&config, Client::new()).unwrap();
        assert_eq!(strategy.name(), "rules");
    }

    #[test]
    fn test_assisted_requires_key() {
        let config = scoring_config(ScoringMode::Assisted, "PRODUCT_SCOUT_TEST_MISSING_KEY");
        let result = ScoringStrategy::from_config(&config, Client::new());
        assert!(matches!(result, Err(ConfigError::MissingCredential(name))
            if name == "PRODUCT_SCOUT_TEST_MISSING_KEY"));
    }

    #[test]
    fn test_assisted_with_key() {
        std::env::set_var("PRODUCT_SCOUT_TEST_PRESENT_KEY", "sk-test");
        let config = scoring_config(ScoringMode::Assisted, "PRODUCT_SCOUT_TEST_PRESENT_KEY");
        let strategy = ScoringStrategy::from_config(&config, Client::new()).unwrap();
        assert_eq!(strategy.name(), "assisted");
    }

    #[tokio::test]
    async fn test_rule_based_threshold_gate() {
        let html = r#"<html><head><title>X100</title>
            <link rel="canonical" href="https://shop.example.com/product/x100">
            <script type="application/ld+json">{"@type":"Product"}</script>
            </head><body><h1>X100</h1></body></html>"#;
        let page = PageContent::parse(
            url::Url::parse("https://shop.example.com/product/x100").unwrap(),
            html.to_string(),
        );

        let score = ScoringStrategy::RuleBased.score(&page).await;
        assert_eq!(score, 15);
        assert!(score < DEFAULT_THRESHOLD);
    }
}
