//! Files endpoints (`/files`).

use reqwest::Method;
use serde::Deserialize;

use crate::client::Client;
use crate::error::Result;
use crate::multipart::{BodyPart, FileContent, MultipartPayload};

/// File upload request (multipart body).
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFileRequest {
    /// The file to upload (JSON Lines for fine-tuning).
    pub file: FileContent,
    /// Intended purpose, e.g. `fine-tune`.
    pub purpose: String,
}

impl UploadFileRequest {
    /// Creates an upload request.
    #[must_use]
    pub fn new(file: FileContent, purpose: impl Into<String>) -> Self {
        Self {
            file,
            purpose: purpose.into(),
        }
    }
}

impl MultipartPayload for UploadFileRequest {
    fn parts(&self) -> Result<Vec<BodyPart>> {
        Ok(vec![
            BodyPart::file("file", &self.file)?,
            BodyPart::field("purpose", &self.purpose),
        ])
    }
}

/// A file stored with the API.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiFile {
    /// File identifier.
    pub id: String,
    /// Object type tag.
    pub object: String,
    /// File size in bytes.
    pub bytes: u64,
    /// Creation unix timestamp.
    pub created_at: u64,
    /// Original filename.
    pub filename: String,
    /// Declared purpose.
    pub purpose: String,
    /// Processing status, if reported.
    #[serde(default)]
    pub status: Option<String>,
    /// Status details, if reported.
    #[serde(default)]
    pub status_details: Option<String>,
}

/// File listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct FileListResponse {
    /// The stored files.
    pub data: Vec<OpenAiFile>,
}

/// Deletion acknowledgement, shared with model deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    /// Identifier of the deleted object.
    pub id: String,
    /// Object type tag.
    pub object: String,
    /// Whether deletion happened.
    pub deleted: bool,
}

impl Client {
    /// `GET /files`
    pub async fn list_files(&self) -> Result<FileListResponse> {
        self.execute_empty(Method::GET, "/files").await
    }

    /// `POST /files`
    pub async fn upload_file(&self, request: &UploadFileRequest) -> Result<OpenAiFile> {
        self.execute_multipart("/files", request).await
    }

    /// `GET /files/{file_id}`
    pub async fn retrieve_file(&self, file_id: &str) -> Result<OpenAiFile> {
        self.execute_empty(Method::GET, &format!("/files/{file_id}"))
            .await
    }

    /// `DELETE /files/{file_id}`
    pub async fn delete_file(&self, file_id: &str) -> Result<DeleteResponse> {
        self.execute_empty(Method::DELETE, &format!("/files/{file_id}"))
            .await
    }

    /// `GET /files/{file_id}/content`
    ///
    /// Returns the raw body as a string.
    pub async fn download_file(&self, file_id: &str) -> Result<String> {
        self.fetch_text(&format!("/files/{file_id}/content")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    mod upload_parts {
        use super::*;

        #[test]
        fn emits_file_then_purpose() {
            let req = UploadFileRequest::new(
                FileContent::new(b"{\"prompt\": \"p\"}\n".to_vec(), "train.jsonl"),
                "fine-tune",
            );

            let parts = req.parts().unwrap();
            assert_eq!(parts.len(), 2);
            assert_eq!(parts[0].name(), "file");
            assert_eq!(parts[1], BodyPart::field("purpose", "fine-tune"));
        }

        #[test]
        fn empty_file_fails_encoding() {
            let req =
                UploadFileRequest::new(FileContent::new(Vec::new(), "train.jsonl"), "fine-tune");
            assert!(req.parts().is_err());
        }
    }

    mod responses {
        use super::*;

        #[test]
        fn deserializes_file_record() {
            let json = r#"{
                "id": "file-abc123",
                "object": "file",
                "bytes": 140,
                "created_at": 1613779121,
                "filename": "train.jsonl",
                "purpose": "fine-tune",
                "status": "processed"
            }"#;

            let file: OpenAiFile = serde_json::from_str(json).unwrap();
            assert_eq!(file.id, "file-abc123");
            assert_eq!(file.bytes, 140);
            assert_eq!(file.status.as_deref(), Some("processed"));
        }

        #[test]
        fn deserializes_listing() {
            let json = r#"{"object": "list", "data": [
                {"id": "file-1", "object": "file", "bytes": 1, "created_at": 1,
                 "filename": "a.jsonl", "purpose": "fine-tune"}
            ]}"#;

            let listing: FileListResponse = serde_json::from_str(json).unwrap();
            assert_eq!(listing.data.len(), 1);
            assert!(listing.data[0].status.is_none());
        }

        #[test]
        fn deserializes_deletion() {
            let json = r#"{"id": "file-1", "object": "file", "deleted": true}"#;
            let ack: DeleteResponse = serde_json::from_str(json).unwrap();
            assert!(ack.deleted);
        }
    }
}
