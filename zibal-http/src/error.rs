//! Error types for the gateway client.

use reqwest::StatusCode;
use zibal::ValidationError;

/// Errors that can occur while calling the gateway.
///
/// Business failures (a result code other than `100`) only surface here as
/// [`ClientError::InvalidResult`] when the client raises on them; otherwise
/// they are returned as [`zibal::proto::Outcome::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A request or response failed schema validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request never produced an HTTP response.
    #[error("transport error: {context}: {source}")]
    Transport {
        /// Human-readable context (e.g. `"POST /verify"`).
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The gateway answered with a non-2xx status.
    #[error("unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body, as far as it could be read.
        body: String,
    },

    /// The response body is not valid JSON.
    #[error("failed to decode response body: {context}: {source}")]
    Decode {
        /// Human-readable context.
        context: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The gateway rejected the call with a non-success result code.
    #[error("transaction failed with result {code}: {meaning}")]
    InvalidResult {
        /// The raw result code.
        code: i64,
        /// Description from [`zibal::codes::RESULT_CODES`].
        meaning: String,
    },

    /// A configured URL could not be used.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The client configuration is incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while assembling a [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("environment variable `{0}` is not set")]
    MissingEnv(&'static str),

    /// An environment variable holds an unusable value.
    #[error("environment variable `{name}` has invalid value `{value}`")]
    InvalidEnv {
        /// The variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}
