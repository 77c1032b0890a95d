//! Parameters the gateway appends to the merchant's callback URL.
//!
//! After the payer finishes (or abandons) the payment page, the gateway
//! redirects them with a `GET` to the `callbackUrl` given in
//! [`RequireRequest`](crate::proto::RequireRequest), adding
//! `success`, `trackId`, `orderId` and `status` to the query string.
//! A merchant server typically parses these and then calls `verify`.

use std::borrow::Cow;

use url::Url;
use url::form_urlencoded;

use crate::codes::{STATUS_CODES, StatusCode};
use crate::error::ValidationError;
use crate::proto::check_code;

/// Parsed callback query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    /// `true` if the gateway reported a successful payment (`success=1`).
    pub success: bool,
    /// Track id of the transaction.
    pub track_id: i64,
    /// Merchant-side order id, if one was supplied when requesting.
    pub order_id: Option<String>,
    /// Transaction status.
    pub status: StatusCode,
}

impl CallbackParams {
    /// Parses a raw query string, with or without the leading `?`.
    ///
    /// Unrecognized parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParam`] if `success`, `trackId` or
    /// `status` is missing or malformed, and [`ValidationError::UnknownCode`]
    /// for an undocumented status.
    pub fn from_query(query: &str) -> Result<Self, ValidationError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    /// Parses the query string of a full callback URL.
    ///
    /// # Errors
    ///
    /// See [`CallbackParams::from_query`].
    pub fn from_url(url: &Url) -> Result<Self, ValidationError> {
        Self::from_pairs(url.query_pairs())
    }

    fn from_pairs<'a, I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    {
        let mut success = None;
        let mut track_id = None;
        let mut order_id = None;
        let mut status = None;

        for (key, value) in pairs {
            match key.as_ref() {
                "success" => success = Some(parse_flag(&value)?),
                "trackId" => track_id = Some(parse_int("trackId", &value)?),
                "orderId" => order_id = Some(value.into_owned()),
                "status" => status = Some(parse_int("status", &value)?),
                _ => {}
            }
        }

        let status = status.ok_or_else(|| missing("status"))?;
        check_code("status", status, &STATUS_CODES)?;

        Ok(Self {
            success: success.ok_or_else(|| missing("success"))?,
            track_id: track_id.ok_or_else(|| missing("trackId"))?,
            order_id: order_id.filter(|id| !id.is_empty()),
            status: StatusCode::new(status),
        })
    }

    /// Description of [`CallbackParams::status`].
    #[must_use]
    pub fn status_meaning(&self) -> &'static str {
        self.status.meaning()
    }
}

fn missing(param: &'static str) -> ValidationError {
    ValidationError::InvalidParam {
        param,
        reason: "missing".to_owned(),
    }
}

fn parse_flag(value: &str) -> Result<bool, ValidationError> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(ValidationError::InvalidParam {
            param: "success",
            reason: format!("expected 0 or 1, got `{other}`"),
        }),
    }
}

fn parse_int(param: &'static str, value: &str) -> Result<i64, ValidationError> {
    value
        .parse::<i64>()
        .map_err(|e| ValidationError::InvalidParam {
            param,
            reason: format!("`{value}`: {e}"),
        })
}
