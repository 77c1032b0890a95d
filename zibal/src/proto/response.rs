//! Replies returned by the gateway.
//!
//! Use [`WireResponse::from_wire_format`] to build these from the raw JSON
//! body; it performs the key renaming, meaning enrichment and validation.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use super::{DerivedMeaning, WireResponse, check_code};
use crate::codes::{RESULT_CODES, ResultCode, STATUS_CODES, StatusCode, WAGE_CODES, WageCode};
use crate::error::ValidationError;

const STATUS_MEANING: DerivedMeaning = DerivedMeaning {
    code_field: "status",
    meaning_field: "status_meaning",
    table: &STATUS_CODES,
};

const WAGE_MEANING: DerivedMeaning = DerivedMeaning {
    code_field: "wage",
    meaning_field: "wage_meaning",
    table: &WAGE_CODES,
};

/// Reply to `POST /request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequireResponse {
    /// Handle used by later verify/inquiry calls.
    pub track_id: i64,
    /// Outcome of the call.
    pub result: ResultCode,
    /// Direct payment link, when the gateway provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_link: Option<String>,
    /// Gateway message.
    pub message: String,
}

impl WireResponse for RequireResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        check_code("result", self.result.code(), &RESULT_CODES)
    }
}

/// Reply to `POST /verify`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// ISO-8601 payment time, as sent by the gateway.
    pub paid_at: String,
    /// Masked card number of the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// Transaction status.
    pub status: StatusCode,
    /// Description of `status`.
    pub status_meaning: String,
    /// Paid amount in Rials.
    pub amount: i64,
    /// Bank reference number, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_number: Option<i64>,
    /// Description given when the transaction was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Merchant-side order id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Outcome of the call.
    pub result: ResultCode,
    /// Gateway message.
    pub message: String,
    /// Settlement split information.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "multiplexing_infos")]
    pub multiplexing_info: Vec<String>,
}

impl WireResponse for VerifyResponse {
    const DERIVED: &'static [DerivedMeaning] = &[STATUS_MEANING];

    fn validate(&self) -> Result<(), ValidationError> {
        check_code("status", self.status.code(), &STATUS_CODES)?;
        check_code("result", self.result.code(), &RESULT_CODES)
    }
}

/// Reply to `POST /inquiry`.
///
/// Carries everything [`VerifyResponse`] does plus creation/verification
/// times and fee details.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryResponse {
    /// ISO-8601 creation time.
    pub created_at: String,
    /// ISO-8601 payment time.
    pub paid_at: String,
    /// ISO-8601 verification time.
    pub verified_at: String,
    /// Masked card number of the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// Transaction status.
    pub status: StatusCode,
    /// Description of `status`.
    pub status_meaning: String,
    /// Paid amount in Rials.
    pub amount: i64,
    /// Bank reference number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_number: Option<i64>,
    /// Description given when the transaction was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Merchant-side order id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Who paid the gateway fee.
    pub wage: WageCode,
    /// Description of `wage`.
    pub wage_meaning: String,
    /// Fee charged by the Shaparak switch, in Rials.
    pub shaparak_fee: i64,
    /// Outcome of the call.
    pub result: ResultCode,
    /// Gateway message.
    pub message: String,
    /// Settlement split information.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "multiplexing_infos")]
    pub multiplexing_info: Vec<String>,
}

impl WireResponse for InquiryResponse {
    const DERIVED: &'static [DerivedMeaning] = &[STATUS_MEANING, WAGE_MEANING];

    fn validate(&self) -> Result<(), ValidationError> {
        check_code("status", self.status.code(), &STATUS_CODES)?;
        check_code("wage", self.wage.code(), &WAGE_CODES)?;
        check_code("result", self.result.code(), &RESULT_CODES)
    }
}
