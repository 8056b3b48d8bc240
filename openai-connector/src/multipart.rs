//! Multipart body construction for upload-style endpoints.
//!
//! Upload request types implement [`MultipartPayload`], producing their
//! fields as an ordered sequence of [`BodyPart`]s: file parts carry bytes, a
//! filename and a content type; field parts carry a name and a stringified
//! value. The order follows field declaration order and is reproducible;
//! absent optional fields emit no part at all.

use bytes::Bytes;

use crate::error::{Error, Result};

/// Generic binary content type used when nothing better is known.
const OCTET_STREAM: &str = "application/octet-stream";

/// Inline file content for an upload request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// The raw file bytes.
    pub content: Bytes,
    /// The filename sent with the part.
    pub file_name: String,
    /// Explicit content type; inferred from the filename when `None`.
    pub content_type: Option<String>,
}

impl FileContent {
    /// Creates file content from bytes and a filename.
    pub fn new(content: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            file_name: file_name.into(),
            content_type: None,
        }
    }

    /// Declares an explicit content type for the part.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The content type actually sent: declared, else inferred from the
    /// filename, else a generic binary type.
    #[must_use]
    pub fn resolved_content_type(&self) -> String {
        if let Some(declared) = &self.content_type {
            return declared.clone();
        }
        mime_guess::from_path(&self.file_name)
            .first_raw()
            .unwrap_or(OCTET_STREAM)
            .to_owned()
    }
}

/// One named entry in a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPart {
    /// A file part: content bytes, filename and content type.
    File {
        /// Part name.
        name: &'static str,
        /// File bytes.
        content: Bytes,
        /// Filename sent with the part.
        file_name: String,
        /// Content type sent with the part.
        content_type: String,
    },
    /// A scalar field part: name and stringified value.
    Field {
        /// Part name.
        name: &'static str,
        /// Stringified value.
        value: String,
    },
}

impl BodyPart {
    /// Creates a file part from inline content.
    ///
    /// Fails with [`Error::BodyEncoding`] when the content source is empty,
    /// the one failure mode of multipart construction.
    pub fn file(name: &'static str, file: &FileContent) -> Result<Self> {
        if file.content.is_empty() {
            return Err(Error::body_encoding(format!(
                "file part `{name}` has no content"
            )));
        }
        Ok(Self::File {
            name,
            content: file.content.clone(),
            file_name: file.file_name.clone(),
            content_type: file.resolved_content_type(),
        })
    }

    /// Creates a scalar field part.
    pub fn field(name: &'static str, value: impl ToString) -> Self {
        Self::Field {
            name,
            value: value.to_string(),
        }
    }

    /// The part name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::File { name, .. } | Self::Field { name, .. } => name,
        }
    }
}

/// A request value that serializes as a multipart/form-data body.
pub trait MultipartPayload {
    /// Produces the body parts in declaration order.
    ///
    /// One part per present field, none for absent optional fields;
    /// repeated calls on the same payload yield an identical sequence.
    fn parts(&self) -> Result<Vec<BodyPart>>;
}

/// Converts an ordered part sequence into the transport's multipart form.
pub(crate) fn into_form(parts: Vec<BodyPart>) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        match part {
            BodyPart::Field { name, value } => {
                form = form.text(name, value);
            }
            BodyPart::File {
                name,
                content,
                file_name,
                content_type,
            } => {
                let part = reqwest::multipart::Part::bytes(content.to_vec())
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| {
                        Error::body_encoding(format!("invalid MIME type for `{name}`: {e}"))
                    })?;
                form = form.part(name, part);
            }
        }
    }
    Ok(form)
}
