//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types and traits for easy access.
//!
//! # Usage
//!
//! ```rust,ignore
//! use openai_connector::prelude::*;
//! ```

pub use crate::client::Client;
pub use crate::config::{AuthConfig, ConnectionConfig, ResolvedClientConfig};
pub use crate::error::{ApiFailure, Error, Result, TransportError};
pub use crate::multipart::{BodyPart, FileContent, MultipartPayload};

pub use crate::audio::{
    TranscriptionRequest, TranscriptionResponse, TranslationRequest, TranslationResponse,
};
pub use crate::chat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Role, Usage,
};
pub use crate::embeddings::{EmbeddingData, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage};
pub use crate::files::{DeleteResponse, FileListResponse, OpenAiFile, UploadFileRequest};
pub use crate::fine_tunes::{
    CreateFineTuneRequest, FineTune, FineTuneEvent, FineTuneEventListResponse,
    FineTuneListResponse,
};
pub use crate::images::{
    CreateImageRequest, ImageData, ImageEditRequest, ImageVariationRequest, ImagesResponse,
};
pub use crate::models::{Model, ModelListResponse};
pub use crate::moderations::{
    ModerationInput, ModerationRequest, ModerationResponse, ModerationResult,
};
