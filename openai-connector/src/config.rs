//! Connection configuration and its resolution.
//!
//! A [`ConnectionConfig`] arrives with a required credential plus a set of
//! optional sub-configurations. The optional ones are loosely typed
//! ([`serde_json::Value`]) because they typically originate from a config
//! file or another dynamic source; [`ConnectionConfig::resolve`] narrows
//! each present value against its expected shape and copies it into a fully
//! typed [`ResolvedClientConfig`]. Absent values stay absent — the transport
//! keeps its own defaults. Resolution is pure: no I/O happens until the
//! transport is built at connector construction.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Bearer-token credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthConfig {
    /// The API token sent as `Authorization: Bearer <token>`.
    pub token: String,
}

impl AuthConfig {
    /// Creates bearer-token credentials.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// HTTP protocol version requested from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum HttpVersion {
    /// HTTP/1.1 (transport default).
    #[default]
    #[serde(rename = "1.1")]
    Http11,
    /// HTTP/2, negotiated via ALPN.
    #[serde(rename = "2.0")]
    Http2,
}

/// `Forwarded`/`X-Forwarded-*` header handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Forwarded {
    /// Do not send forwarding headers.
    #[default]
    Disable,
    /// Send the standard `Forwarded` header.
    Enable,
    /// Send legacy `X-Forwarded-*` headers.
    Transition,
}

/// Connection pool policy handed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum idle connections kept per host.
    pub max_idle_per_host: usize,
    /// Seconds an idle connection may stay pooled.
    pub idle_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 32,
            idle_timeout_secs: 90,
        }
    }
}

/// Response compression policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Negotiate compression with the server (transport default).
    #[default]
    Auto,
    /// Always advertise compression support.
    Always,
    /// Never advertise compression support.
    Never,
}

/// Circuit breaker policy.
///
/// The connector performs no circuit breaking itself; the values are
/// validated and carried for transports or wrappers that do.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Failure ratio above which the circuit opens.
    pub failure_threshold: f64,
    /// Seconds of rolling window over which failures are counted.
    pub time_window_secs: u64,
    /// Seconds before a half-open probe after the circuit opens.
    pub reset_time_secs: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 0.0,
            time_window_secs: 60,
            reset_time_secs: 30,
        }
    }
}

/// Retry policy.
///
/// Pass-through configuration: the connector itself never retries, a count
/// of zero disables retrying entirely.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum retry attempts (0 = no retries).
    pub count: u32,
    /// Seconds between attempts.
    pub interval_secs: u64,
    /// Multiplier applied to the interval per attempt.
    pub backoff_factor: f64,
    /// Ceiling in seconds for the backed-off interval.
    pub max_wait_interval_secs: u64,
}

/// HTTP/1.1 specific settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Http1Settings {
    /// Connection keep-alive behavior.
    pub keep_alive: KeepAlive,
    /// Send header names in Title-Case.
    pub title_case_headers: bool,
}

/// Keep-alive choice for HTTP/1.1 connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeepAlive {
    /// Follow the peer's preference (transport default).
    #[default]
    Auto,
    /// Always keep connections alive.
    Always,
    /// Close the connection after each exchange.
    Never,
}

/// HTTP/2 specific settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Http2Settings {
    /// Speak HTTP/2 without ALPN negotiation (h2c / prior knowledge).
    pub prior_knowledge: bool,
    /// Initial stream window size in bytes.
    pub initial_window_size: Option<u32>,
    /// Interval in seconds for HTTP/2 keep-alive pings.
    pub keep_alive_interval_secs: Option<u64>,
    /// Let the transport tune the window size dynamically.
    pub adaptive_window: bool,
}

/// Response cache policy.
///
/// Validated and carried; the transport itself does not cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Whether caching is enabled at all.
    pub enabled: bool,
    /// Whether the cache is shared between users of the client.
    pub is_shared: bool,
    /// Maximum age in seconds a cached response stays fresh.
    pub max_age_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            is_shared: false,
            max_age_secs: None,
        }
    }
}

/// Response size limits.
///
/// Validated and carried; enforcement belongs to wrappers, the underlying
/// transport reads bodies in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResponseLimits {
    /// Maximum accepted status line length in bytes.
    pub max_status_line_length: Option<u32>,
    /// Maximum accepted total header size in bytes.
    pub max_header_size: Option<u32>,
    /// Maximum accepted entity body size in bytes.
    pub max_entity_body_size: Option<u64>,
}

/// TLS settings for the upstream connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecureSocket {
    /// Whether TLS is enabled for the connection.
    pub enable: bool,
    /// Skip certificate verification. Testing escape hatch only.
    pub accept_invalid_certs: bool,
}

impl Default for SecureSocket {
    fn default() -> Self {
        Self {
            enable: true,
            accept_invalid_certs: false,
        }
    }
}

/// Outbound proxy settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    /// Proxy host name or address.
    pub host: String,
    /// Proxy port.
    pub port: u16,
    /// Optional basic-auth user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional basic-auth password.
    #[serde(default)]
    pub password: Option<String>,
}

/// User-supplied connection configuration.
///
/// Consumed exactly once at connector construction. The required fields
/// carry defaults matching the transport's own; the optional sub-configs are
/// loosely typed and validated during [`resolve`](Self::resolve).
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Credentials (required).
    pub auth: AuthConfig,
    /// Optional organization id sent as `OpenAI-Organization`.
    #[serde(default)]
    pub organization: Option<String>,
    /// HTTP protocol version.
    #[serde(default)]
    pub http_version: HttpVersion,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Forwarding header policy.
    #[serde(default)]
    pub forwarded: Forwarded,
    /// Connection pool policy.
    #[serde(default)]
    pub pool: PoolConfig,
    /// Compression policy.
    #[serde(default)]
    pub compression: Compression,
    /// Circuit breaker policy (pass-through).
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerConfig,
    /// Retry policy (pass-through).
    #[serde(default)]
    pub retry: RetryConfig,
    /// Whether payload validation is requested from the transport.
    #[serde(default = "default_validation")]
    pub validation: bool,

    /// HTTP/1.1 settings, validated against [`Http1Settings`].
    #[serde(default)]
    pub http1_settings: Option<Value>,
    /// HTTP/2 settings, validated against [`Http2Settings`].
    #[serde(default)]
    pub http2_settings: Option<Value>,
    /// Cache policy, validated against [`CacheConfig`].
    #[serde(default)]
    pub cache: Option<Value>,
    /// Response size limits, validated against [`ResponseLimits`].
    #[serde(default)]
    pub response_limits: Option<Value>,
    /// TLS settings, validated against [`SecureSocket`].
    #[serde(default)]
    pub secure_socket: Option<Value>,
    /// Proxy settings, validated against [`ProxyConfig`].
    #[serde(default)]
    pub proxy: Option<Value>,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_validation() -> bool {
    true
}

impl ConnectionConfig {
    /// Creates a configuration with the given credentials and defaults
    /// everywhere else.
    #[must_use]
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            organization: None,
            http_version: HttpVersion::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            forwarded: Forwarded::default(),
            pool: PoolConfig::default(),
            compression: Compression::default(),
            circuit_breaker: CircuitBreakerConfig::default(),
            retry: RetryConfig::default(),
            validation: true,
            http1_settings: None,
            http2_settings: None,
            cache: None,
            response_limits: None,
            secure_socket: None,
            proxy: None,
        }
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads from:
    /// - `OPENAI_API_KEY` - Required API key
    /// - `OPENAI_ORGANIZATION` - Optional organization ID
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("OPENAI_API_KEY").map_err(|_| {
            Error::config_validation("auth", "OPENAI_API_KEY environment variable not set")
        })?;

        let mut config = Self::new(AuthConfig::bearer(token));
        config.organization = std::env::var("OPENAI_ORGANIZATION").ok();
        Ok(config)
    }

    /// Sets the organization ID.
    #[must_use]
    pub fn with_organization(mut self, org: impl Into<String>) -> Self {
        self.organization = Some(org.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Supplies a loosely-typed proxy sub-config.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Value) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Supplies a loosely-typed TLS sub-config.
    #[must_use]
    pub fn with_secure_socket(mut self, secure_socket: Value) -> Self {
        self.secure_socket = Some(secure_socket);
        self
    }

    /// Supplies loosely-typed HTTP/2 settings.
    #[must_use]
    pub fn with_http2_settings(mut self, settings: Value) -> Self {
        self.http2_settings = Some(settings);
        self
    }

    /// Resolves this configuration into the typed form handed to the
    /// transport.
    ///
    /// Required fields are copied unconditionally. Each present optional
    /// sub-config is checked against its expected shape; a mismatch aborts
    /// resolution with [`Error::ConfigValidation`] naming the field. Absent
    /// sub-configs stay `None`, leaving the transport at its own defaults.
    pub fn resolve(self) -> Result<ResolvedClientConfig> {
        Ok(ResolvedClientConfig {
            auth: self.auth,
            organization: self.organization,
            http_version: self.http_version,
            timeout_secs: self.timeout_secs,
            forwarded: self.forwarded,
            pool: self.pool,
            compression: self.compression,
            circuit_breaker: self.circuit_breaker,
            retry: self.retry,
            validation: self.validation,
            http1_settings: narrow("http1_settings", self.http1_settings)?,
            http2_settings: narrow("http2_settings", self.http2_settings)?,
            cache: narrow("cache", self.cache)?,
            response_limits: narrow("response_limits", self.response_limits)?,
            secure_socket: narrow("secure_socket", self.secure_socket)?,
            proxy: narrow("proxy", self.proxy)?,
        })
    }
}

/// Narrows a present loosely-typed value to its expected shape.
fn narrow<T: serde::de::DeserializeOwned>(
    field: &'static str,
    value: Option<Value>,
) -> Result<Option<T>> {
    value
        .map(|v| serde_json::from_value(v).map_err(|e| Error::config_validation(field, e.to_string())))
        .transpose()
}

/// The fully-resolved configuration handed to the HTTP transport.
///
/// Every field was either copied verbatim from the required part of
/// [`ConnectionConfig`] or shape-checked and copied from a present optional
/// part. No field is fabricated.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct ResolvedClientConfig {
    /// Credentials.
    pub auth: AuthConfig,
    /// Organization header value, if any.
    pub organization: Option<String>,
    /// HTTP protocol version.
    pub http_version: HttpVersion,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Forwarding header policy.
    pub forwarded: Forwarded,
    /// Connection pool policy.
    pub pool: PoolConfig,
    /// Compression policy.
    pub compression: Compression,
    /// Circuit breaker policy (pass-through).
    pub circuit_breaker: CircuitBreakerConfig,
    /// Retry policy (pass-through).
    pub retry: RetryConfig,
    /// Payload validation flag (pass-through).
    pub validation: bool,
    /// HTTP/1.1 settings, if supplied.
    pub http1_settings: Option<Http1Settings>,
    /// HTTP/2 settings, if supplied.
    pub http2_settings: Option<Http2Settings>,
    /// Cache policy, if supplied (pass-through).
    pub cache: Option<CacheConfig>,
    /// Response size limits, if supplied (pass-through).
    pub response_limits: Option<ResponseLimits>,
    /// TLS settings, if supplied.
    pub secure_socket: Option<SecureSocket>,
    /// Proxy settings, if supplied.
    pub proxy: Option<ProxyConfig>,
}

impl ResolvedClientConfig {
    /// Builds the underlying HTTP client from the resolved fields.
    ///
    /// The pass-through policies (retry, circuit breaker, cache, response
    /// limits, forwarded, validation) are not applied here: the transport
    /// does not own those concerns and the connector never implements them.
    pub(crate) fn build_transport(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .pool_max_idle_per_host(self.pool.max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(self.pool.idle_timeout_secs));

        if self.compression == Compression::Never {
            builder = builder.no_gzip();
        }

        if let Some(h1) = &self.http1_settings {
            if h1.title_case_headers {
                builder = builder.http1_title_case_headers();
            }
            if h1.keep_alive == KeepAlive::Never {
                builder = builder.pool_max_idle_per_host(0);
            }
        }

        if let Some(h2) = &self.http2_settings {
            if h2.prior_knowledge {
                builder = builder.http2_prior_knowledge();
            }
            if let Some(window) = h2.initial_window_size {
                builder = builder.http2_initial_stream_window_size(window);
            }
            if let Some(secs) = h2.keep_alive_interval_secs {
                builder = builder.http2_keep_alive_interval(Duration::from_secs(secs));
            }
            if h2.adaptive_window {
                builder = builder.http2_adaptive_window(true);
            }
        }

        if let Some(tls) = &self.secure_socket {
            if tls.accept_invalid_certs {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(proxy) = &self.proxy {
            let url = format!("http://{}:{}", proxy.host, proxy.port);
            let mut p = reqwest::Proxy::all(&url)
                .map_err(|e| Error::config_validation("proxy", e.to_string()))?;
            if let (Some(user), Some(pass)) = (&proxy.username, &proxy.password) {
                p = p.basic_auth(user, pass);
            }
            builder = builder.proxy(p);
        }

        builder.build().map_err(Error::from)
    }
}
