//! Client configuration.
//!
//! [`ClientConfig`] follows the usual builder shape: start from
//! [`ClientConfig::new`] (or [`ClientConfig::sandbox`] /
//! [`ClientConfig::from_env`]) and refine with the `with_*` setters. The
//! resulting value is consumed by [`ZibalClient::new`](crate::ZibalClient::new);
//! the client itself is immutable.

use std::time::Duration;

use tracing::Dispatch;

use crate::constants::{
    BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_START_URL, MERCHANT_ENV, RAISE_ON_INVALID_RESULT_ENV,
};
use crate::error::ConfigError;

/// Configuration for [`ZibalClient`](crate::ZibalClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Merchant id issued by the gateway.
    pub merchant: String,

    /// API base URL; `request`, `verify` and `inquiry` are joined onto it.
    pub base_url: String,

    /// Payment page base URL used by
    /// [`ZibalClient::payment_url`](crate::ZibalClient::payment_url).
    pub start_url: String,

    /// Whether a non-success result code on verify/inquiry is an error
    /// (`true`, the default) or a [`zibal::proto::Outcome::Failed`] value.
    pub raise_on_invalid_result: bool,

    /// Per-request timeout. `None` keeps the HTTP library default.
    pub timeout: Option<Duration>,

    /// Optional pre-configured blocking reqwest client.
    pub http_client: Option<reqwest::blocking::Client>,

    /// Optional tracing dispatcher receiving the client's log records instead
    /// of the global one.
    pub dispatch: Option<Dispatch>,
}

impl ClientConfig {
    /// Creates a production config for `merchant`.
    #[must_use]
    pub fn new(merchant: impl Into<String>) -> Self {
        Self {
            merchant: merchant.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            start_url: DEFAULT_START_URL.to_owned(),
            raise_on_invalid_result: true,
            timeout: None,
            http_client: None,
            dispatch: None,
        }
    }

    /// Creates a config using the gateway's sandbox merchant.
    #[must_use]
    pub fn sandbox() -> Self {
        Self::new(zibal::SANDBOX_MERCHANT)
    }

    /// Loads the config from the process environment.
    ///
    /// Reads `ZIBAL_MERCHANT` (required), `ZIBAL_BASE_URL` and
    /// `ZIBAL_RAISE_ON_INVALID_RESULT` (`true`/`false`/`1`/`0`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the merchant is missing or the policy flag
    /// is not a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let merchant = read(MERCHANT_ENV).ok_or(ConfigError::MissingEnv(MERCHANT_ENV))?;
        let mut config = Self::new(merchant.trim());

        if let Some(base_url) = read(BASE_URL_ENV) {
            config.base_url = base_url.trim().to_owned();
        }
        if let Some(raw) = read(RAISE_ON_INVALID_RESULT_ENV) {
            config.raise_on_invalid_result = parse_bool(&raw).ok_or(ConfigError::InvalidEnv {
                name: RAISE_ON_INVALID_RESULT_ENV,
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the payment page base URL.
    #[must_use]
    pub fn with_start_url(mut self, start_url: impl Into<String>) -> Self {
        self.start_url = start_url.into();
        self
    }

    /// Sets the result-code policy for verify/inquiry.
    #[must_use]
    pub const fn with_raise_on_invalid_result(mut self, raise: bool) -> Self {
        self.raise_on_invalid_result = raise;
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a pre-configured blocking reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Routes the client's log records to `dispatch`.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("merchant", &self.merchant)
            .field("base_url", &self.base_url)
            .field("start_url", &self.start_url)
            .field("raise_on_invalid_result", &self.raise_on_invalid_result)
            .field("timeout", &self.timeout)
            .field("has_http_client", &self.http_client.is_some())
            .field("has_dispatch", &self.dispatch.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("merchant-id");
        assert_eq!(config.merchant, "merchant-id");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.start_url, DEFAULT_START_URL);
        assert!(config.raise_on_invalid_result);
        assert!(config.timeout.is_none());
        assert_eq!(ClientConfig::sandbox().merchant, "zibal");
    }

    #[test]
    fn test_builder_setters() {
        let config = ClientConfig::new("m")
            .with_base_url("http://localhost:9000/v1")
            .with_raise_on_invalid_result(false)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert!(!config.raise_on_invalid_result);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert!(format!("{config:?}").contains("has_http_client: false"));
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ZIBAL_MERCHANT", " abc123 "),
            ("ZIBAL_BASE_URL", "http://127.0.0.1:8080/"),
            ("ZIBAL_RAISE_ON_INVALID_RESULT", "False"),
        ]))
        .unwrap();
        assert_eq!(config.merchant, "abc123");
        assert_eq!(config.base_url, "http://127.0.0.1:8080/");
        assert!(!config.raise_on_invalid_result);
    }

    #[test]
    fn test_from_lookup_errors() {
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingEnv("ZIBAL_MERCHANT")
        );
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[("ZIBAL_MERCHANT", "  ")])).unwrap_err(),
            ConfigError::MissingEnv("ZIBAL_MERCHANT")
        );
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[
                ("ZIBAL_MERCHANT", "abc"),
                ("ZIBAL_RAISE_ON_INVALID_RESULT", "maybe"),
            ]))
            .unwrap_err(),
            ConfigError::InvalidEnv {
                name: "ZIBAL_RAISE_ON_INVALID_RESULT",
                value: "maybe".to_owned(),
            }
        );
    }
}
