//! Images endpoints (`/images/generations`, `/images/edits`,
//! `/images/variations`).

use base64::{Engine as _, engine::general_purpose};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::{Result, TransportError};
use crate::multipart::{BodyPart, FileContent, MultipartPayload};

/// Image generation request (JSON body).
#[derive(Debug, Clone, Serialize)]
pub struct CreateImageRequest {
    /// Text description of the desired image.
    pub prompt: String,
    /// Number of images to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u8>,
    /// Image size, e.g. `1024x1024`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// `url` or `b64_json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    /// End-user identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl CreateImageRequest {
    /// Creates a request from the prompt alone.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            n: None,
            size: None,
            response_format: None,
            user: None,
        }
    }
}

/// Image edit request (multipart body).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEditRequest {
    /// The image to edit (PNG).
    pub image: FileContent,
    /// Optional mask whose transparent areas mark the edit region.
    pub mask: Option<FileContent>,
    /// Text description of the desired edit.
    pub prompt: String,
    /// Number of images to generate.
    pub n: Option<u8>,
    /// Image size.
    pub size: Option<String>,
    /// `url` or `b64_json`.
    pub response_format: Option<String>,
    /// End-user identifier.
    pub user: Option<String>,
}

impl ImageEditRequest {
    /// Creates a request from the base image and prompt.
    #[must_use]
    pub fn new(image: FileContent, prompt: impl Into<String>) -> Self {
        Self {
            image,
            mask: None,
            prompt: prompt.into(),
            n: None,
            size: None,
            response_format: None,
            user: None,
        }
    }
}

impl MultipartPayload for ImageEditRequest {
    fn parts(&self) -> Result<Vec<BodyPart>> {
        let mut parts = vec![BodyPart::file("image", &self.image)?];
        if let Some(mask) = &self.mask {
            parts.push(BodyPart::file("mask", mask)?);
        }
        parts.push(BodyPart::field("prompt", &self.prompt));
        if let Some(n) = self.n {
            parts.push(BodyPart::field("n", n));
        }
        if let Some(size) = &self.size {
            parts.push(BodyPart::field("size", size));
        }
        if let Some(format) = &self.response_format {
            parts.push(BodyPart::field("response_format", format));
        }
        if let Some(user) = &self.user {
            parts.push(BodyPart::field("user", user));
        }
        Ok(parts)
    }
}

/// Image variation request (multipart body).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVariationRequest {
    /// The base image to vary (PNG).
    pub image: FileContent,
    /// Number of images to generate.
    pub n: Option<u8>,
    /// Image size.
    pub size: Option<String>,
    /// `url` or `b64_json`.
    pub response_format: Option<String>,
    /// End-user identifier.
    pub user: Option<String>,
}

impl ImageVariationRequest {
    /// Creates a request from the base image.
    #[must_use]
    pub fn new(image: FileContent) -> Self {
        Self {
            image,
            n: None,
            size: None,
            response_format: None,
            user: None,
        }
    }
}

impl MultipartPayload for ImageVariationRequest {
    fn parts(&self) -> Result<Vec<BodyPart>> {
        let mut parts = vec![BodyPart::file("image", &self.image)?];
        if let Some(n) = self.n {
            parts.push(BodyPart::field("n", n));
        }
        if let Some(size) = &self.size {
            parts.push(BodyPart::field("size", size));
        }
        if let Some(format) = &self.response_format {
            parts.push(BodyPart::field("response_format", format));
        }
        if let Some(user) = &self.user {
            parts.push(BodyPart::field("user", user));
        }
        Ok(parts)
    }
}

/// One generated image, as a URL or base64 payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageData {
    /// Hosted image URL, when `response_format` is `url`.
    #[serde(default)]
    pub url: Option<String>,
    /// Base64-encoded image, when `response_format` is `b64_json`.
    #[serde(default)]
    pub b64_json: Option<String>,
}

impl ImageData {
    /// Decodes the `b64_json` payload into raw image bytes.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let encoded = self.b64_json.as_ref().ok_or_else(|| {
            TransportError::decode("image response carries no `b64_json` payload")
        })?;
        general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| TransportError::decode(format!("invalid base64 image payload: {e}")).into())
    }
}

/// Images response, shared by all three operations.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesResponse {
    /// Creation unix timestamp.
    pub created: u64,
    /// Generated images.
    pub data: Vec<ImageData>,
}

impl Client {
    /// `POST /images/generations`
    pub async fn create_image(&self, request: &CreateImageRequest) -> Result<ImagesResponse> {
        self.execute_json(Method::POST, "/images/generations", request)
            .await
    }

    /// `POST /images/edits`
    pub async fn create_image_edit(&self, request: &ImageEditRequest) -> Result<ImagesResponse> {
        self.execute_multipart("/images/edits", request).await
    }

    /// `POST /images/variations`
    pub async fn create_image_variation(
        &self,
        request: &ImageVariationRequest,
    ) -> Result<ImagesResponse> {
        self.execute_multipart("/images/variations", request).await
    }
}
