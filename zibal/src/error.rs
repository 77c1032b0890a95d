//! Validation errors raised by the schema layer.

/// A request or response failed schema validation.
///
/// Each variant names the offending field and the constraint it broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// A numeric field is not above its exclusive lower bound.
    #[error("`{field}` must be greater than {bound}, got {value}")]
    BelowMinimum {
        /// The field name.
        field: &'static str,
        /// The exclusive lower bound.
        bound: i64,
        /// The rejected value.
        value: i64,
    },

    /// A numeric field is not below its exclusive upper bound.
    #[error("`{field}` must be less than {bound}, got {value}")]
    AboveMaximum {
        /// The field name.
        field: &'static str,
        /// The exclusive upper bound.
        bound: i64,
        /// The rejected value.
        value: i64,
    },

    /// A URL field does not hold an absolute `http`/`https` URL.
    #[error("`{field}` is not a valid http(s) URL: {reason}")]
    InvalidUrl {
        /// The field name.
        field: &'static str,
        /// Why the URL was rejected.
        reason: String,
    },

    /// A code field holds a value absent from its code table.
    #[error("`{field}` has unrecognized {kind} code {code}")]
    UnknownCode {
        /// The field name.
        field: &'static str,
        /// The code family (`result`, `status`, `wage`).
        kind: &'static str,
        /// The rejected code.
        code: i64,
    },

    /// A callback query parameter is missing or unparsable.
    #[error("callback parameter `{param}`: {reason}")]
    InvalidParam {
        /// The wire name of the parameter.
        param: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// The payload is not a JSON object.
    #[error("expected a JSON object, got {found}")]
    NotAnObject {
        /// The JSON type that was found instead.
        found: &'static str,
    },

    /// The payload is missing required fields or has the wrong shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ValidationError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}
