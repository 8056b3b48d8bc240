//! Moderations endpoint (`/moderations`).

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;

/// Moderation input, a single text or a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ModerationInput {
    /// One text to classify.
    Single(String),
    /// Several texts classified in one call.
    Batch(Vec<String>),
}

impl From<&str> for ModerationInput {
    fn from(text: &str) -> Self {
        Self::Single(text.to_owned())
    }
}

impl From<Vec<String>> for ModerationInput {
    fn from(texts: Vec<String>) -> Self {
        Self::Batch(texts)
    }
}

/// Moderation request (JSON body).
#[derive(Debug, Clone, Serialize)]
pub struct ModerationRequest {
    /// The input text(s).
    pub input: ModerationInput,
    /// Moderation model, defaults server-side when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ModerationRequest {
    /// Creates a request from the input alone.
    #[must_use]
    pub fn new(input: impl Into<ModerationInput>) -> Self {
        Self {
            input: input.into(),
            model: None,
        }
    }
}

/// Classification for one input.
///
/// Categories are kept as maps so new server-side categories do not break
/// decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationResult {
    /// Whether any category flagged the input.
    pub flagged: bool,
    /// Per-category verdicts.
    pub categories: HashMap<String, bool>,
    /// Per-category confidence scores.
    pub category_scores: HashMap<String, f64>,
}

/// Moderations response.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationResponse {
    /// Response identifier.
    pub id: String,
    /// Model that produced the classification.
    pub model: String,
    /// One result per input, in input order.
    pub results: Vec<ModerationResult>,
}

impl Client {
    /// `POST /moderations`
    pub async fn create_moderation(
        &self,
        request: &ModerationRequest,
    ) -> Result<ModerationResponse> {
        self.execute_json(Method::POST, "/moderations", request)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn single_input_serializes_as_string() {
        let req = ModerationRequest::new("hello");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["input"], "hello");
        assert!(json.get("model").is_none());
    }

    #[test]
    fn batch_input_serializes_as_array() {
        let req = ModerationRequest::new(vec!["a".to_owned(), "b".to_owned()]);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["input"][1], "b");
    }

    #[test]
    fn deserializes_result_with_unknown_categories() {
        let json = r#"{
            "id": "modr-1",
            "model": "text-moderation-007",
            "results": [{
                "flagged": true,
                "categories": {"violence": true, "some-future-category": false},
                "category_scores": {"violence": 0.99, "some-future-category": 0.01}
            }]
        }"#;

        let response: ModerationResponse = serde_json::from_str(json).unwrap();
        let result = &response.results[0];

        assert!(result.flagged);
        assert_eq!(result.categories["violence"], true);
        assert!(result.category_scores["some-future-category"] < 0.5);
    }
}
