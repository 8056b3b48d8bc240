//! Fine-tuning endpoints (`/fine-tunes`).

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::files::OpenAiFile;

/// Fine-tune creation request (JSON body).
#[derive(Debug, Clone, Serialize)]
pub struct CreateFineTuneRequest {
    /// ID of an uploaded training file.
    pub training_file: String,
    /// ID of an uploaded validation file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<String>,
    /// Base model to fine-tune.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Number of training epochs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<u32>,
    /// Batch size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    /// Learning rate multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate_multiplier: Option<f64>,
    /// Weight for the prompt loss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_loss_weight: Option<f64>,
    /// Compute classification metrics on the validation set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_classification_metrics: Option<bool>,
    /// Number of classes for classification tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_n_classes: Option<u32>,
    /// Positive class for binary classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_positive_class: Option<String>,
    /// F-beta scores to compute for binary classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_betas: Option<Vec<f64>>,
    /// Suffix appended to the fine-tuned model name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl CreateFineTuneRequest {
    /// Creates a request from the training file alone.
    #[must_use]
    pub fn new(training_file: impl Into<String>) -> Self {
        Self {
            training_file: training_file.into(),
            validation_file: None,
            model: None,
            n_epochs: None,
            batch_size: None,
            learning_rate_multiplier: None,
            prompt_loss_weight: None,
            compute_classification_metrics: None,
            classification_n_classes: None,
            classification_positive_class: None,
            classification_betas: None,
            suffix: None,
        }
    }
}

/// A fine-tuning job.
#[derive(Debug, Clone, Deserialize)]
pub struct FineTune {
    /// Job identifier.
    pub id: String,
    /// Object type tag.
    pub object: String,
    /// Base model being fine-tuned.
    pub model: String,
    /// Creation unix timestamp.
    pub created_at: u64,
    /// Last update unix timestamp, if reported.
    #[serde(default)]
    pub updated_at: Option<u64>,
    /// Name of the resulting model once the job succeeds.
    #[serde(default)]
    pub fine_tuned_model: Option<String>,
    /// Owning organization.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Job status, e.g. `pending`, `succeeded`, `cancelled`.
    pub status: String,
    /// Hyperparameters as reported by the API.
    #[serde(default)]
    pub hyperparams: Option<Value>,
    /// Training files attached to the job.
    #[serde(default)]
    pub training_files: Vec<OpenAiFile>,
    /// Validation files attached to the job.
    #[serde(default)]
    pub validation_files: Vec<OpenAiFile>,
    /// Result files produced by the job.
    #[serde(default)]
    pub result_files: Vec<OpenAiFile>,
    /// Job events, when the API includes them.
    #[serde(default)]
    pub events: Option<Vec<FineTuneEvent>>,
}

/// One fine-tuning job event.
#[derive(Debug, Clone, Deserialize)]
pub struct FineTuneEvent {
    /// Object type tag.
    pub object: String,
    /// Event unix timestamp.
    pub created_at: u64,
    /// Severity, e.g. `info`.
    pub level: String,
    /// Event message.
    pub message: String,
}

/// Fine-tune listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct FineTuneListResponse {
    /// The jobs.
    pub data: Vec<FineTune>,
}

/// Fine-tune event listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct FineTuneEventListResponse {
    /// The events.
    pub data: Vec<FineTuneEvent>,
}

impl Client {
    /// `POST /fine-tunes`
    pub async fn create_fine_tune(&self, request: &CreateFineTuneRequest) -> Result<FineTune> {
        self.execute_json(Method::POST, "/fine-tunes", request).await
    }

    /// `GET /fine-tunes`
    pub async fn list_fine_tunes(&self) -> Result<FineTuneListResponse> {
        self.execute_empty(Method::GET, "/fine-tunes").await
    }

    /// `GET /fine-tunes/{fine_tune_id}`
    pub async fn retrieve_fine_tune(&self, fine_tune_id: &str) -> Result<FineTune> {
        self.execute_empty(Method::GET, &format!("/fine-tunes/{fine_tune_id}"))
            .await
    }

    /// `POST /fine-tunes/{fine_tune_id}/cancel`
    pub async fn cancel_fine_tune(&self, fine_tune_id: &str) -> Result<FineTune> {
        self.execute_empty(Method::POST, &format!("/fine-tunes/{fine_tune_id}/cancel"))
            .await
    }

    /// `GET /fine-tunes/{fine_tune_id}/events`
    pub async fn list_fine_tune_events(
        &self,
        fine_tune_id: &str,
    ) -> Result<FineTuneEventListResponse> {
        self.execute_empty(Method::GET, &format!("/fine-tunes/{fine_tune_id}/events"))
            .await
    }
}
