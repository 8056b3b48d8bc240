//! Models endpoints (`/models`).

use reqwest::Method;
use serde::Deserialize;

use crate::client::Client;
use crate::error::Result;
use crate::files::DeleteResponse;

/// A model available through the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    /// Model identifier.
    pub id: String,
    /// Object type tag.
    pub object: String,
    /// Creation unix timestamp, if reported.
    #[serde(default)]
    pub created: Option<u64>,
    /// Owning organization.
    #[serde(default)]
    pub owned_by: Option<String>,
}

/// Model listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelListResponse {
    /// The available models.
    pub data: Vec<Model>,
}

impl Client {
    /// `GET /models`
    pub async fn list_models(&self) -> Result<ModelListResponse> {
        self.execute_empty(Method::GET, "/models").await
    }

    /// `GET /models/{model}`
    pub async fn retrieve_model(&self, model: &str) -> Result<Model> {
        self.execute_empty(Method::GET, &format!("/models/{model}"))
            .await
    }

    /// `DELETE /models/{model}`
    ///
    /// Only fine-tuned models owned by the caller can be deleted.
    pub async fn delete_model(&self, model: &str) -> Result<DeleteResponse> {
        self.execute_empty(Method::DELETE, &format!("/models/{model}"))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_model_record() {
        let json = r#"{"id": "gpt-3.5-turbo", "object": "model", "created": 1677610602, "owned_by": "openai"}"#;
        let model: Model = serde_json::from_str(json).unwrap();

        assert_eq!(model.id, "gpt-3.5-turbo");
        assert_eq!(model.owned_by.as_deref(), Some("openai"));
    }

    #[test]
    fn tolerates_sparse_record() {
        let json = r#"{"id": "proxy-model", "object": "model"}"#;
        let model: Model = serde_json::from_str(json).unwrap();

        assert!(model.created.is_none());
        assert!(model.owned_by.is_none());
    }

    #[test]
    fn deserializes_listing() {
        let json = r#"{"object": "list", "data": [
            {"id": "a", "object": "model"},
            {"id": "b", "object": "model"}
        ]}"#;
        let listing: ModelListResponse = serde_json::from_str(json).unwrap();

        assert_eq!(listing.data.len(), 2);
        assert_eq!(listing.data[1].id, "b");
    }
}
