//! Wire schema for the gateway's `request`, `verify` and `inquiry` endpoints.
//!
//! Models in this module use `snake_case` field names. Conversion to and from
//! the gateway's camelCase JSON happens on the untyped [`serde_json::Value`]
//! tree through [`crate::case`]:
//!
//! - Requests ([`WireRequest`]) serialize to a snake map, optionally drop
//!   unset fields, then rename keys to camelCase.
//! - Responses ([`WireResponse`]) rename keys to snake_case, inject the
//!   derived `*_meaning` fields from [`crate::codes`], deserialize, and finally
//!   run the model's own [`WireResponse::validate`].
//!
//! # Key Types
//!
//! - [`NewTransaction`] / [`RequireRequest`] - Start a payment
//! - [`VerifyRequest`] / [`InquiryRequest`] - Follow up on a track id
//! - [`RequireResponse`], [`VerifyResponse`], [`InquiryResponse`] - Parsed replies
//! - [`FailedResultDetail`] / [`Outcome`] - Business failures returned as values

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::case::{keys_to_camel, keys_to_snake};
use crate::codes::{CodeTable, ResultCode};
use crate::error::ValidationError;

pub mod request;
pub mod response;

pub use request::{InquiryRequest, NewTransaction, RequireRequest, VerifyRequest};
pub use response::{InquiryResponse, RequireResponse, VerifyResponse};

/// How unset optional fields are rendered by [`WireRequest::to_wire_format`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireMode {
    /// Omit fields that were never set. Fields set to an empty value stay.
    #[default]
    ExcludeUnset,
    /// Emit unset fields as `null`.
    IncludeUnset,
}

/// A request body that can be rendered in the gateway's wire format.
pub trait WireRequest: Serialize {
    /// Serializes the request to a camelCase JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Malformed`] if the model cannot be
    /// represented as JSON.
    fn to_wire_format(&self, mode: WireMode) -> Result<Value, ValidationError> {
        let value = serde_json::to_value(self)?;
        let value = match (mode, value) {
            (WireMode::ExcludeUnset, Value::Object(fields)) => Value::Object(
                fields
                    .into_iter()
                    .filter(|(_, field)| !field.is_null())
                    .collect(),
            ),
            (_, value) => value,
        };
        Ok(keys_to_camel(value))
    }
}

/// A `*_meaning` field derived from a code field by table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedMeaning {
    /// The snake_case name of the code field (e.g. `status`).
    pub code_field: &'static str,
    /// The snake_case name of the injected field (e.g. `status_meaning`).
    pub meaning_field: &'static str,
    /// Table used for the lookup.
    pub table: &'static CodeTable,
}

/// A response model parsed from the gateway's wire format.
pub trait WireResponse: DeserializeOwned {
    /// Fields injected before deserialization.
    const DERIVED: &'static [DerivedMeaning] = &[];

    /// Checks constraints serde cannot express (code membership and the like).
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Parses a camelCase wire payload into the model.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the payload is not an object, is missing
    /// required fields, has fields of the wrong type, or fails
    /// [`WireResponse::validate`].
    fn from_wire_format(wire: Value) -> Result<Self, ValidationError> {
        let mut fields = match keys_to_snake(wire) {
            Value::Object(fields) => fields,
            other => {
                return Err(ValidationError::NotAnObject {
                    found: json_type(&other),
                });
            }
        };
        enrich(&mut fields, Self::DERIVED);
        let model: Self = serde_json::from_value(Value::Object(fields))?;
        model.validate()?;
        Ok(model)
    }
}

/// Writes every derived meaning into `fields`, replacing any value already
/// present. A missing or non-integer code yields the table fallback; the
/// missing code itself is reported later by deserialization.
fn enrich(fields: &mut Map<String, Value>, derived: &[DerivedMeaning]) {
    for item in derived {
        let meaning = fields
            .get(item.code_field)
            .and_then(Value::as_i64)
            .map_or(item.table.fallback, |code| item.table.meaning(code));
        fields.insert(
            item.meaning_field.to_owned(),
            Value::String(meaning.to_owned()),
        );
    }
}

/// Fails with [`ValidationError::UnknownCode`] unless `table` lists `code`.
pub(crate) fn check_code(
    field: &'static str,
    code: i64,
    table: &CodeTable,
) -> Result<(), ValidationError> {
    if table.contains(code) {
        Ok(())
    } else {
        Err(ValidationError::UnknownCode {
            field,
            kind: table.kind,
            code,
        })
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads the `result` code of a raw wire reply without parsing the rest.
///
/// Failure replies only carry `result` and `message`, so the code has to be
/// inspected before deciding which model the payload should become.
///
/// # Errors
///
/// Returns [`ValidationError`] if the payload is not an object or has no
/// integer `result` field.
pub fn peek_result(wire: &Value) -> Result<ResultCode, ValidationError> {
    let fields = wire.as_object().ok_or(ValidationError::NotAnObject {
        found: json_type(wire),
    })?;
    match fields.get("result") {
        Some(value) => value.as_i64().map(ResultCode::new).ok_or_else(|| {
            ValidationError::Malformed(format!("`result` must be an integer, got {value}"))
        }),
        None => Err(ValidationError::Malformed(
            "missing field `result`".to_owned(),
        )),
    }
}

/// Result code and meaning of a call the gateway rejected.
///
/// Returned in place of the full response when the client is configured not
/// to raise on business failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedResultDetail {
    /// The raw result code.
    pub result_code: i64,
    /// Description from [`crate::codes::RESULT_CODES`].
    pub result_meaning: String,
}

impl From<ResultCode> for FailedResultDetail {
    fn from(result: ResultCode) -> Self {
        Self {
            result_code: result.code(),
            result_meaning: result.meaning().to_owned(),
        }
    }
}

/// Either a parsed response or the detail of a business failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The gateway answered with result `100`.
    Success(T),
    /// The gateway answered with any other result code.
    Failed(FailedResultDetail),
}

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the response, discarding a failure.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(response) => Some(response),
            Self::Failed(_) => None,
        }
    }

    /// Returns the failure detail, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&FailedResultDetail> {
        match self {
            Self::Success(_) => None,
            Self::Failed(detail) => Some(detail),
        }
    }

    /// Maps the success value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Success(response) => Outcome::Success(f(response)),
            Self::Failed(detail) => Outcome::Failed(detail),
        }
    }
}
