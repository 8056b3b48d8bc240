//! Audio endpoints (`/audio/transcriptions`, `/audio/translations`).

use serde::Deserialize;

use crate::client::Client;
use crate::error::Result;
use crate::multipart::{BodyPart, FileContent, MultipartPayload};

/// Audio transcription request (multipart body).
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    /// The audio file to transcribe.
    pub file: FileContent,
    /// Model identifier, e.g. `whisper-1`.
    pub model: String,
    /// Optional text to guide the model's style.
    pub prompt: Option<String>,
    /// `json`, `text`, `srt`, `verbose_json` or `vtt`.
    pub response_format: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Input language as an ISO-639-1 code.
    pub language: Option<String>,
}

impl TranscriptionRequest {
    /// Creates a request from the audio file and model.
    #[must_use]
    pub fn new(file: FileContent, model: impl Into<String>) -> Self {
        Self {
            file,
            model: model.into(),
            prompt: None,
            response_format: None,
            temperature: None,
            language: None,
        }
    }
}

impl MultipartPayload for TranscriptionRequest {
    fn parts(&self) -> Result<Vec<BodyPart>> {
        let mut parts = vec![
            BodyPart::file("file", &self.file)?,
            BodyPart::field("model", &self.model),
        ];
        if let Some(prompt) = &self.prompt {
            parts.push(BodyPart::field("prompt", prompt));
        }
        if let Some(format) = &self.response_format {
            parts.push(BodyPart::field("response_format", format));
        }
        if let Some(temperature) = self.temperature {
            parts.push(BodyPart::field("temperature", temperature));
        }
        if let Some(language) = &self.language {
            parts.push(BodyPart::field("language", language));
        }
        Ok(parts)
    }
}

/// Audio translation request (multipart body); output is always English.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// The audio file to translate.
    pub file: FileContent,
    /// Model identifier, e.g. `whisper-1`.
    pub model: String,
    /// Optional text to guide the model's style (in English).
    pub prompt: Option<String>,
    /// `json`, `text`, `srt`, `verbose_json` or `vtt`.
    pub response_format: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl TranslationRequest {
    /// Creates a request from the audio file and model.
    #[must_use]
    pub fn new(file: FileContent, model: impl Into<String>) -> Self {
        Self {
            file,
            model: model.into(),
            prompt: None,
            response_format: None,
            temperature: None,
        }
    }
}

impl MultipartPayload for TranslationRequest {
    fn parts(&self) -> Result<Vec<BodyPart>> {
        let mut parts = vec![
            BodyPart::file("file", &self.file)?,
            BodyPart::field("model", &self.model),
        ];
        if let Some(prompt) = &self.prompt {
            parts.push(BodyPart::field("prompt", prompt));
        }
        if let Some(format) = &self.response_format {
            parts.push(BodyPart::field("response_format", format));
        }
        if let Some(temperature) = self.temperature {
            parts.push(BodyPart::field("temperature", temperature));
        }
        Ok(parts)
    }
}

/// Transcription response (default `json` format).
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionResponse {
    /// The transcribed text.
    pub text: String,
}

/// Translation response (default `json` format).
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationResponse {
    /// The translated text.
    pub text: String,
}

impl Client {
    /// `POST /audio/transcriptions`
    pub async fn create_transcription(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResponse> {
        self.execute_multipart("/audio/transcriptions", request)
            .await
    }

    /// `POST /audio/translations`
    pub async fn create_translation(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse> {
        self.execute_multipart("/audio/translations", request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn wav() -> FileContent {
        FileContent::new(b"RIFF....WAVE".to_vec(), "audio.wav")
    }

    mod transcription_parts {
        use super::*;

        #[test]
        fn minimal_request_emits_file_and_model() {
            let req = TranscriptionRequest::new(wav(), "whisper-1");
            let parts = req.parts().unwrap();

            let names: Vec<_> = parts.iter().map(BodyPart::name).collect();
            assert_eq!(names, ["file", "model"]);
        }

        #[test]
        fn file_part_infers_audio_content_type() {
            let req = TranscriptionRequest::new(wav(), "whisper-1");
            let parts = req.parts().unwrap();

            match &parts[0] {
                BodyPart::File { content_type, .. } => {
                    assert!(content_type.contains("wav") || content_type.contains("wave"));
                }
                other => panic!("expected file part, got {other:?}"),
            }
        }

        #[test]
        fn full_request_keeps_declaration_order() {
            let mut req = TranscriptionRequest::new(wav(), "whisper-1");
            req.prompt = Some("Names: Ada, Grace".to_owned());
            req.response_format = Some("json".to_owned());
            req.temperature = Some(0.0);
            req.language = Some("en".to_owned());

            let names: Vec<_> = req.parts().unwrap().iter().map(BodyPart::name).collect();
            assert_eq!(
                names,
                ["file", "model", "prompt", "response_format", "temperature", "language"]
            );
        }

        #[test]
        fn parts_are_idempotent() {
            let mut req = TranscriptionRequest::new(wav(), "whisper-1");
            req.language = Some("de".to_owned());
            assert_eq!(req.parts().unwrap(), req.parts().unwrap());
        }

        #[test]
        fn empty_audio_fails_encoding() {
            let req = TranscriptionRequest::new(FileContent::new(Vec::new(), "a.wav"), "whisper-1");
            assert!(req.parts().is_err());
        }
    }

    mod translation_parts {
        use super::*;

        #[test]
        fn has_no_language_field() {
            let mut req = TranslationRequest::new(wav(), "whisper-1");
            req.prompt = Some("glossary".to_owned());

            let names: Vec<_> = req.parts().unwrap().iter().map(BodyPart::name).collect();
            assert_eq!(names, ["file", "model", "prompt"]);
        }
    }

    mod responses {
        use super::*;

        #[test]
        fn deserializes_transcription() {
            let response: TranscriptionResponse =
                serde_json::from_str(r#"{"text": "Hello world"}"#).unwrap();
            assert_eq!(response.text, "Hello world");
        }

        #[test]
        fn ignores_extra_verbose_fields() {
            let json = r#"{"text": "Hello", "language": "english", "duration": 1.5}"#;
            let response: TranscriptionResponse = serde_json::from_str(json).unwrap();
            assert_eq!(response.text, "Hello");
        }
    }
}
