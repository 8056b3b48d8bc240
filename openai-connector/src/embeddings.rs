//! Embeddings endpoint (`/embeddings`).

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;

/// Embedding request (JSON body).
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest {
    /// Model identifier, e.g. `text-embedding-3-small`.
    pub model: String,
    /// Texts to embed.
    pub input: Vec<String>,
    /// `float` or `base64`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<String>,
    /// Output dimensionality, for models that support shortening.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    /// End-user identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl EmbeddingRequest {
    /// Creates a request from the model and inputs.
    #[must_use]
    pub fn new(model: impl Into<String>, input: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input,
            encoding_format: None,
            dimensions: None,
            user: None,
        }
    }
}

/// One embedding vector with its input index.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingData {
    /// The embedding vector.
    pub embedding: Vec<f32>,
    /// Index of the input this vector belongs to.
    pub index: usize,
}

/// Token accounting for an embedding call.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingUsage {
    /// Tokens consumed by the inputs.
    pub prompt_tokens: u32,
    /// Total tokens billed.
    pub total_tokens: u32,
}

/// Embeddings response.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    /// One entry per input, in input order.
    pub data: Vec<EmbeddingData>,
    /// Model that produced the vectors.
    pub model: String,
    /// Token usage, if reported.
    #[serde(default)]
    pub usage: Option<EmbeddingUsage>,
}

impl Client {
    /// `POST /embeddings`
    pub async fn create_embedding(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        self.execute_json(Method::POST, "/embeddings", request)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn serializes_minimal_request() {
        let req = EmbeddingRequest::new("text-embedding-3-small", vec!["hello".to_owned()]);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["model"], "text-embedding-3-small");
        assert_eq!(json["input"][0], "hello");
        assert!(json.get("dimensions").is_none());
    }

    #[test]
    fn serializes_dimensions_when_set() {
        let mut req = EmbeddingRequest::new("text-embedding-3-small", vec!["hello".to_owned()]);
        req.dimensions = Some(256);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["dimensions"], 256);
    }

    #[test]
    fn deserializes_response() {
        let json = r#"{
            "object": "list",
            "data": [{"object": "embedding", "embedding": [0.1, -0.2], "index": 0}],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 2, "total_tokens": 2}
        }"#;

        let response: EmbeddingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data[0].embedding.len(), 2);
        assert_eq!(response.usage.unwrap().total_tokens, 2);
    }
}
