//! The connector client and its generic dispatch helpers.
//!
//! One [`Client`] binds one resolved configuration to one HTTP transport.
//! Every endpoint method performs exactly one request/response exchange
//! through the shared helpers here: build path, encode body (JSON or
//! multipart), send, check status, decode. No retries, no pagination, no
//! streaming.

use std::sync::Arc;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::{ConnectionConfig, DEFAULT_BASE_URL, ResolvedClientConfig};
use crate::error::{ApiFailure, Error, Result, TransportError};
use crate::multipart::{self, MultipartPayload};

/// OpenAI API client, bound to one configured transport.
///
/// Cheap to clone; clones share the transport and its connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ResolvedClientConfig>,
    http: reqwest::Client,
    base_url: String,
}

/// OpenAI error response body.
#[derive(Debug, Clone, serde::Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// OpenAI error details.
#[derive(Debug, Clone, serde::Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
}

impl Client {
    /// Connects against the default service URL.
    ///
    /// Resolves the configuration (failing with
    /// [`Error::ConfigValidation`] on any malformed sub-config) and builds
    /// the transport once. No request is issued.
    pub fn connect(config: ConnectionConfig) -> Result<Self> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Connects against an overridden service URL.
    pub fn with_base_url(config: ConnectionConfig, base_url: impl Into<String>) -> Result<Self> {
        if config.auth.token.is_empty() {
            return Err(Error::config_validation("auth", "API token is required"));
        }
        let resolved = config.resolve()?;
        let http = resolved.build_transport()?;
        Ok(Self {
            config: Arc::new(resolved),
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// The resolved configuration backing this client.
    #[must_use]
    pub fn config(&self) -> &ResolvedClientConfig {
        &self.config
    }

    /// The service URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.config.auth.token));

        if let Some(org) = &self.config.organization {
            req = req.header("OpenAI-Organization", org);
        }

        req
    }

    /// Sends a JSON-body request and decodes the typed response.
    pub(crate) async fn execute_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.request_url(path);
        tracing::debug!(%url, "dispatching JSON request");
        let response = self.build_request(method, &url).json(body).send().await?;
        Self::read_json(response).await
    }

    /// Sends a body-less request and decodes the typed response.
    pub(crate) async fn execute_empty<R>(&self, method: Method, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.request_url(path);
        tracing::debug!(%url, "dispatching request");
        let response = self.build_request(method, &url).send().await?;
        Self::read_json(response).await
    }

    /// Encodes a multipart payload, sends it, decodes the typed response.
    pub(crate) async fn execute_multipart<P, R>(&self, path: &str, payload: &P) -> Result<R>
    where
        P: MultipartPayload,
        R: DeserializeOwned,
    {
        let url = self.request_url(path);
        let form = multipart::into_form(payload.parts()?)?;
        tracing::debug!(%url, "dispatching multipart request");
        let response = self
            .build_request(Method::POST, &url)
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetches a raw text body (file content download).
    pub(crate) async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.request_url(path);
        tracing::debug!(%url, "dispatching text request");
        let response = self.build_request(Method::GET, &url).send().await?;

        let status = response.status();
        let body = response.text().await.map_err(Error::from)?;
        if !status.is_success() {
            return Err(Self::parse_error(status.as_u16(), &body).into());
        }
        Ok(body)
    }

    async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        let status = response.status();
        let body = response.text().await.map_err(Error::from)?;

        if !status.is_success() {
            return Err(Self::parse_error(status.as_u16(), &body).into());
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(error = %e, "response body failed to decode");
            TransportError::decode(format!("{e}, response: {body}")).into()
        })
    }

    /// Parses a non-success response body against OpenAI's error shape.
    pub(crate) fn parse_error(status: u16, body: &str) -> TransportError {
        serde_json::from_str::<ErrorBody>(body).map_or_else(
            |_| TransportError::Status(ApiFailure::raw(status, body)),
            |parsed| {
                TransportError::Status(ApiFailure {
                    status,
                    message: parsed.error.message,
                    error_type: parsed.error.error_type,
                    code: parsed.error.code,
                })
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;

    fn test_client() -> Client {
        Client::connect(ConnectionConfig::new(AuthConfig::bearer("sk-test"))).unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn connect_uses_default_base_url() {
            let client = test_client();
            assert_eq!(client.base_url(), "https://api.openai.com/v1");
        }

        #[test]
        fn with_base_url_trims_trailing_slash() {
            let config = ConnectionConfig::new(AuthConfig::bearer("sk-test"));
            let client = Client::with_base_url(config, "http://localhost:8080/v1/").unwrap();
            assert_eq!(client.base_url(), "http://localhost:8080/v1");
        }

        #[test]
        fn empty_token_is_rejected() {
            let config = ConnectionConfig::new(AuthConfig::bearer(""));
            let err = Client::connect(config).unwrap_err();
            assert!(matches!(err, Error::ConfigValidation { field: "auth", .. }));
        }

        #[test]
        fn malformed_optional_config_aborts_construction() {
            let config = ConnectionConfig::new(AuthConfig::bearer("sk-test"))
                .with_proxy(serde_json::json!("not an object"));
            let err = Client::connect(config).unwrap_err();
            assert!(matches!(err, Error::ConfigValidation { field: "proxy", .. }));
        }

        #[test]
        fn resolved_config_is_readable() {
            let client = test_client();
            assert_eq!(client.config().auth.token, "sk-test");
            assert!(client.config().proxy.is_none());
        }
    }

    mod urls {
        use super::*;

        #[test]
        fn joins_path_with_single_slash() {
            let client = test_client();
            assert_eq!(
                client.request_url("/chat/completions"),
                "https://api.openai.com/v1/chat/completions"
            );
            assert_eq!(
                client.request_url("models"),
                "https://api.openai.com/v1/models"
            );
        }
    }

    mod parse_error {
        use super::*;

        #[test]
        fn parses_openai_error_body() {
            let body = r#"{"error": {"message": "Invalid API key", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
            let err = Client::parse_error(401, body);
            match err {
                TransportError::Status(failure) => {
                    assert_eq!(failure.status, 401);
                    assert_eq!(failure.message, "Invalid API key");
                    assert_eq!(failure.code.as_deref(), Some("invalid_api_key"));
                }
                other => panic!("expected status error, got {other:?}"),
            }
        }

        #[test]
        fn falls_back_to_raw_body() {
            let err = Client::parse_error(502, "Bad Gateway");
            match err {
                TransportError::Status(failure) => {
                    assert_eq!(failure.status, 502);
                    assert_eq!(failure.message, "Bad Gateway");
                    assert!(failure.code.is_none());
                }
                other => panic!("expected status error, got {other:?}"),
            }
        }

        #[test]
        fn tolerates_missing_type_and_code() {
            let body = r#"{"error": {"message": "boom"}}"#;
            let err = Client::parse_error(500, body);
            match err {
                TransportError::Status(failure) => {
                    assert_eq!(failure.message, "boom");
                    assert!(failure.error_type.is_none());
                }
                other => panic!("expected status error, got {other:?}"),
            }
        }
    }
}
