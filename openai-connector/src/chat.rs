//! Chat completions endpoint (`/chat/completions`).

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction.
    System,
    /// End-user input.
    User,
    /// Model output.
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Optional author name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            name: None,
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            name: None,
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            name: None,
        }
    }
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Nucleus sampling cutoff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Number of choices to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u8>,
    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Maximum tokens in the completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Presence penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    /// Frequency penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    /// Per-token logit biases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<HashMap<String, f32>>,
    /// End-user identifier for abuse detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ChatCompletionRequest {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            top_p: None,
            n: None,
            stop: None,
            max_tokens: None,
            presence_penalty: None,
            frequency_penalty: None,
            logit_bias: None,
            user: None,
        }
    }
}

/// One generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Position of this choice in the response.
    pub index: u32,
    /// The generated message.
    pub message: ChatMessage,
    /// Why generation stopped, if reported.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token accounting for one completion.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Prompt plus completion.
    pub total_tokens: u32,
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response identifier.
    pub id: String,
    /// Object type tag.
    pub object: String,
    /// Creation unix timestamp.
    pub created: u64,
    /// Model that produced the response.
    pub model: String,
    /// Generated choices.
    pub choices: Vec<ChatChoice>,
    /// Token usage, if reported.
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl Client {
    /// `POST /chat/completions`
    pub async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.execute_json(Method::POST, "/chat/completions", request)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    mod request {
        use super::*;

        #[test]
        fn serializes_required_fields() {
            let req = ChatCompletionRequest::new("gpt-3.5-turbo", vec![ChatMessage::user("Hi")]);
            let json = serde_json::to_value(&req).unwrap();

            assert_eq!(json["model"], "gpt-3.5-turbo");
            assert_eq!(json["messages"][0]["role"], "user");
            assert_eq!(json["messages"][0]["content"], "Hi");
        }

        #[test]
        fn skips_absent_optional_fields() {
            let req = ChatCompletionRequest::new("gpt-3.5-turbo", vec![ChatMessage::user("Hi")]);
            let json = serde_json::to_string(&req).unwrap();

            assert!(!json.contains("temperature"));
            assert!(!json.contains("logit_bias"));
            assert!(!json.contains("stop"));
            assert!(!json.contains("user"));
        }

        #[test]
        fn includes_set_optional_fields() {
            let mut req = ChatCompletionRequest::new("gpt-4", vec![ChatMessage::user("Hi")]);
            req.temperature = Some(0.2);
            req.max_tokens = Some(256);
            req.stop = Some(vec!["\n".to_owned()]);

            let json = serde_json::to_value(&req).unwrap();

            assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
            assert_eq!(json["max_tokens"], 256);
            assert_eq!(json["stop"][0], "\n");
        }

        #[test]
        fn message_name_is_optional() {
            let msg = ChatMessage::user("Hi");
            let json = serde_json::to_string(&msg).unwrap();
            assert!(!json.contains("name"));
        }
    }

    mod response {
        use super::*;

        #[test]
        fn deserializes_full_response() {
            let json = r#"{
                "id": "chatcmpl-123",
                "object": "chat.completion",
                "created": 1677652288,
                "model": "gpt-3.5-turbo-0301",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Hello there!"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
            }"#;

            let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();

            assert_eq!(response.id, "chatcmpl-123");
            assert_eq!(response.choices.len(), 1);
            assert_eq!(response.choices[0].message.role, Role::Assistant);
            assert_eq!(response.choices[0].message.content, "Hello there!");
            assert_eq!(response.usage.unwrap().total_tokens, 21);
        }

        #[test]
        fn tolerates_missing_usage_and_finish_reason() {
            let json = r#"{
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "created": 1,
                "model": "gpt-4",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "x"}}]
            }"#;

            let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();

            assert!(response.usage.is_none());
            assert!(response.choices[0].finish_reason.is_none());
        }
    }
}
