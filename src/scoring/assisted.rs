use crate::crawler::PageContent;
use crate::scoring::classifier::{PageClassifier, MAX_CLASSIFIER_SCORE};
use crate::scoring::rules::{rule_score, MAX_SCORE};

/// Characters of visible text sent to the classifier
pub const TEXT_SAMPLE_CHARS: usize = 3000;

/// Scores pages with an external classifier, falling back to the rule table
/// for any page the classifier cannot rate
pub struct AssistedScorer {
    classifier: Box<dyn PageClassifier>,
}

impl AssistedScorer {
    pub fn new(classifier: Box<dyn PageClassifier>) -> Self {
        Self { classifier }
    }

    pub async fn score(&self, page: &PageContent) -> u32 {
        let title = page.title().unwrap_or_default();
        let sample = page.text_sample(TEXT_SAMPLE_CHARS);

        match self.classifier.classify(&title, &sample).await {
            Ok(value) if value <= MAX_CLASSIFIER_SCORE => rescale(value),
            Ok(value) => {
                tracing::warn!(
                    "Classifier returned {} for {}, using rule score",
                    value,
                    page.url
                );
                rule_score(page)
            }
            Err(e) => {
                tracing::warn!("Classifier failed for {}: {}, using rule score", page.url, e);
                rule_score(page)
            }
        }
    }
}

/// Maps `0..=100` onto `0..=30`, rounding down
pub fn rescale(value: u32) -> u32 {
    value * MAX_SCORE / MAX_CLASSIFIER_SCORE
}
