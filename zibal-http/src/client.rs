//! Blocking client for the gateway's `request`, `verify` and `inquiry`
//! endpoints.
//!
//! Every operation performs exactly one `POST` with a camelCase JSON body and
//! parses the reply through [`zibal::proto`]. There are no retries.
//!
//! ## Result policy
//!
//! `verify` and `inquiry` inspect the reply's result code before parsing the
//! full model. A non-success code becomes [`ClientError::InvalidResult`] when
//! the client raises on invalid results, or [`Outcome::Failed`] otherwise.
//! `request` is not gated: its reply is always parsed as a
//! [`RequireResponse`], whatever the result code.
//!
//! ## Logging
//!
//! Each successful exchange (2xx status, JSON body) emits one `INFO` record:
//!
//! ```text
//! A successful HTTP request has been made to: {url} with data: {body}
//! ```
//!
//! where `body` is the exact JSON text that was sent. Records go to the
//! dispatcher set with [`ClientConfig::with_dispatch`], or the global one.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use tracing::Dispatch;
use url::Url;
use zibal::proto::{
    InquiryRequest, InquiryResponse, NewTransaction, Outcome, RequireResponse, VerifyRequest,
    VerifyResponse, WireMode, WireRequest, WireResponse, peek_result,
};

use crate::config::ClientConfig;
use crate::constants::{INQUIRY_PATH, REQUEST_PATH, VERIFY_PATH};
use crate::error::ClientError;

/// Client for one merchant on one gateway environment.
///
/// # Example
///
/// ```no_run
/// use zibal::proto::{NewTransaction, Outcome};
/// use zibal_http::{ClientConfig, ZibalClient};
///
/// # fn main() -> Result<(), zibal_http::ClientError> {
/// let client = ZibalClient::new(ClientConfig::sandbox())?;
///
/// let started = client.request_transaction(
///     NewTransaction::new(25_000, "https://shop.example/callback").with_order_id("ZBL-7799"),
/// )?;
/// let redirect_to = client.payment_url(started.track_id)?;
///
/// // ... after the payer returns to the callback URL:
/// match client.verify_transaction(started.track_id)? {
///     Outcome::Success(verified) => println!("paid {} Rials", verified.amount),
///     Outcome::Failed(detail) => println!("not paid: {}", detail.result_meaning),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ZibalClient {
    merchant: String,
    base_url: Url,
    request_url: Url,
    verify_url: Url,
    inquiry_url: Url,
    start_url: Url,
    raise_on_invalid_result: bool,
    timeout: Option<Duration>,
    client: reqwest::blocking::Client,
    dispatch: Option<Dispatch>,
}

impl ZibalClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UrlParse`] if the base or start URL is invalid,
    /// and [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = normalize_base(&config.base_url, "Failed to parse base url")?;
        let start_url = normalize_base(&config.start_url, "Failed to parse start url")?;
        let request_url = join(&base_url, REQUEST_PATH, "Failed to construct request URL")?;
        let verify_url = join(&base_url, VERIFY_PATH, "Failed to construct verify URL")?;
        let inquiry_url = join(&base_url, INQUIRY_PATH, "Failed to construct inquiry URL")?;

        let client = match config.http_client {
            Some(client) => client,
            None => reqwest::blocking::Client::builder()
                .build()
                .map_err(|source| ClientError::Transport {
                    context: "Failed to build HTTP client",
                    source,
                })?,
        };

        Ok(Self {
            merchant: config.merchant,
            base_url,
            request_url,
            verify_url,
            inquiry_url,
            start_url,
            raise_on_invalid_result: config.raise_on_invalid_result,
            timeout: config.timeout,
            client,
            dispatch: config.dispatch,
        })
    }

    /// Builds a production client using the sandbox merchant.
    ///
    /// # Errors
    ///
    /// See [`ZibalClient::new`].
    pub fn sandbox() -> Result<Self, ClientError> {
        Self::new(ClientConfig::sandbox())
    }

    /// Returns the merchant id injected into every request.
    #[must_use]
    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    /// Returns the normalized API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the `request` endpoint URL.
    #[must_use]
    pub const fn request_url(&self) -> &Url {
        &self.request_url
    }

    /// Returns the `verify` endpoint URL.
    #[must_use]
    pub const fn verify_url(&self) -> &Url {
        &self.verify_url
    }

    /// Returns the `inquiry` endpoint URL.
    #[must_use]
    pub const fn inquiry_url(&self) -> &Url {
        &self.inquiry_url
    }

    /// Returns whether non-success result codes are raised as errors.
    #[must_use]
    pub const fn raise_on_invalid_result(&self) -> bool {
        self.raise_on_invalid_result
    }

    /// Registers a new transaction and returns its track id.
    ///
    /// The result-code policy is not applied here; a parsed reply is returned
    /// whatever its result.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the transaction is invalid or
    /// the reply does not match [`RequireResponse`], and the transport,
    /// status and decode errors described on [`ClientError`].
    pub fn request_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<RequireResponse, ClientError> {
        self.scoped(|| {
            #[cfg(feature = "telemetry")]
            let _span = tracing::info_span!("zibal.client.request", url = %self.request_url).entered();
            let request = transaction.into_request(self.merchant.as_str())?;
            let body = request.to_wire_format(WireMode::ExcludeUnset)?;
            let reply = self.post_json(&self.request_url, "POST /request", &body)?;
            Ok(RequireResponse::from_wire_format(reply)?)
        })
    }

    /// Verifies a paid transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidResult`] for a non-success result when
    /// raising is enabled, [`ClientError::Validation`] for a malformed reply,
    /// and the transport, status and decode errors described on
    /// [`ClientError`].
    pub fn verify_transaction(&self, track_id: i64) -> Result<Outcome<VerifyResponse>, ClientError> {
        self.scoped(|| {
            #[cfg(feature = "telemetry")]
            let _span = tracing::info_span!("zibal.client.verify", track_id).entered();
            let body = VerifyRequest::new(self.merchant.as_str(), track_id)
                .to_wire_format(WireMode::ExcludeUnset)?;
            let reply = self.post_json(&self.verify_url, "POST /verify", &body)?;
            self.apply_result_policy(reply)
        })
    }

    /// Reads the current state of a transaction.
    ///
    /// # Errors
    ///
    /// Same as [`ZibalClient::verify_transaction`].
    pub fn inquiry_transaction(
        &self,
        track_id: i64,
    ) -> Result<Outcome<InquiryResponse>, ClientError> {
        self.scoped(|| {
            #[cfg(feature = "telemetry")]
            let _span = tracing::info_span!("zibal.client.inquiry", track_id).entered();
            let body = InquiryRequest::new(self.merchant.as_str(), track_id)
                .to_wire_format(WireMode::ExcludeUnset)?;
            let reply = self.post_json(&self.inquiry_url, "POST /inquiry", &body)?;
            self.apply_result_policy(reply)
        })
    }

    /// Returns the payment page the payer must be redirected to.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UrlParse`] if the URL cannot be formed.
    pub fn payment_url(&self, track_id: i64) -> Result<Url, ClientError> {
        join(
            &self.start_url,
            &track_id.to_string(),
            "Failed to construct payment URL",
        )
    }

    fn apply_result_policy<T: WireResponse>(&self, reply: Value) -> Result<Outcome<T>, ClientError> {
        let result = peek_result(&reply)?;
        if result.is_success() {
            return Ok(Outcome::Success(T::from_wire_format(reply)?));
        }
        if self.raise_on_invalid_result {
            Err(ClientError::InvalidResult {
                code: result.code(),
                meaning: result.meaning().to_owned(),
            })
        } else {
            Ok(Outcome::Failed(result.into()))
        }
    }

    /// Sends `body` to `url` and returns the decoded JSON reply.
    ///
    /// `context` is a human-readable identifier used in tracing and error
    /// messages (e.g. `"POST /verify"`).
    fn post_json(&self, url: &Url, context: &'static str, body: &Value) -> Result<Value, ClientError> {
        let payload = body.to_string();
        let result = self.exchange(url, context, payload.clone());
        if result.is_ok() {
            tracing::info!("A successful HTTP request has been made to: {url} with data: {payload}");
        }
        record_result(&result);
        result
    }

    fn exchange(&self, url: &Url, context: &'static str, payload: String) -> Result<Value, ClientError> {
        let mut req = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(payload);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let response = req
            .send()
            .map_err(|source| ClientError::Transport { context, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::HttpStatus {
                context,
                status,
                body,
            });
        }

        let text = response
            .text()
            .map_err(|source| ClientError::Transport { context, source })?;
        serde_json::from_str(&text).map_err(|source| ClientError::Decode { context, source })
    }

    /// Runs `f` with the injected dispatcher as the default, if there is one.
    fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

impl std::fmt::Debug for ZibalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZibalClient")
            .field("merchant", &self.merchant)
            .field("base_url", &self.base_url.as_str())
            .field("start_url", &self.start_url.as_str())
            .field("raise_on_invalid_result", &self.raise_on_invalid_result)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Parses `raw` as a base URL ending in exactly one `/`, so that endpoint
/// paths join beneath it.
fn normalize_base(raw: &str, context: &'static str) -> Result<Url, ClientError> {
    let mut normalized = raw.trim().trim_end_matches('/').to_owned();
    normalized.push('/');
    Url::parse(&normalized).map_err(|source| ClientError::UrlParse { context, source })
}

fn join(base: &Url, path: &str, context: &'static str) -> Result<Url, ClientError> {
    base.join(path)
        .map_err(|source| ClientError::UrlParse { context, source })
}

/// Logs a failed exchange on the current span.
#[cfg(feature = "telemetry")]
fn record_result<R>(result: &Result<R, ClientError>) {
    if let Err(err) = result {
        tracing::error!(error = %err, "Request to gateway failed");
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn record_result<R>(_result: &Result<R, ClientError>) {}
