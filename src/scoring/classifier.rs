//! External page classifier
//!
//! The assisted scorer asks a chat-completion endpoint how likely a page is
//! to be a single product page and expects a bare integer from 0 to 100.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest value a classifier may return
pub const MAX_CLASSIFIER_SCORE: u32 = 100;

const SYSTEM_PROMPT: &str = "You rate web pages. Given a page title and a text sample, \
answer with a single integer from 0 to 100: how likely the page is a detail page for one \
specific physical product. Answer with the number only.";

/// Errors from an external classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Classifier returned HTTP {0}")]
    Status(u16),

    #[error("Classifier reply has no score: {0:?}")]
    Malformed(String),

    #[error("Classifier score {0} is outside 0-100")]
    OutOfRange(i64),
}

/// Something that rates a page from its title and visible text
#[async_trait]
pub trait PageClassifier: Send + Sync {
    /// Returns a rating in `0..=100`
    async fn classify(&self, title: &str, sample: &str) -> Result<u32, ClassifierError>;
}

/// Classifier backed by an OpenAI-compatible chat completion endpoint
pub struct ChatClassifier {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatClassifier {
    pub fn new(client: Client, endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            model,
            api_key,
        }
    }
}

#[async_trait]
impl PageClassifier for ChatClassifier {
    async fn classify(&self, title: &str, sample: &str) -> Result<u32, ClassifierError> {
        let prompt = format!("Title: {}\n\nText:\n{}", title, sample);
        let body = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.trim())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassifierError::Status(response.status().as_u16()));
        }

        let parsed: ChatResponse = response.json().await?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        parse_score(&reply)
    }
}

/// Reads the first integer in a classifier reply
///
/// ```
/// use product_scout::scoring::parse_score;
///
/// assert_eq!(parse_score("Score: 85").unwrap(), 85);
/// assert!(parse_score("no idea").is_err());
/// assert!(parse_score("250").is_err());
/// assert!(parse_score("-20").is_err());
/// ```
pub fn parse_score(reply: &str) -> Result<u32, ClassifierError> {
    let Some(start) = reply.find(|c: char| c.is_ascii_digit()) else {
        return Err(ClassifierError::Malformed(reply.to_string()));
    };

    let digits: String = reply[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let negative = reply[..start].ends_with('-');

    // Digit runs too long for i64 are out of range as well
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };

    match u32::try_from(value) {
        Ok(score) if score <= MAX_CLASSIFIER_SCORE => Ok(score),
        _ => Err(ClassifierError::OutOfRange(value)),
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}
