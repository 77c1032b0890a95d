//! Request bodies sent to the gateway.

use serde::Serialize;
use url::Url;

use super::WireRequest;
use crate::error::ValidationError;

/// Exclusive lower bound for a transaction amount, in Rials.
pub const MIN_AMOUNT: i64 = 1_500;

/// Exclusive upper bound for a transaction amount, in Rials.
pub const MAX_AMOUNT: i64 = 2_000_000_000;

/// Parameters of a new payment, before the merchant is attached.
///
/// This is the input to [`NewTransaction::into_request`], which validates
/// everything at once and produces an immutable [`RequireRequest`].
///
/// # Example
///
/// ```rust
/// use zibal::proto::NewTransaction;
///
/// let request = NewTransaction::new(25_000, "https://shop.example/callback")
///     .with_order_id("ZBL-7799")
///     .with_description("Two books")
///     .into_request("zibal")
///     .unwrap();
/// assert_eq!(request.amount(), 25_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    amount: i64,
    callback_url: String,
    description: Option<String>,
    order_id: Option<String>,
    mobile: Option<String>,
    allowed_cards: Option<Vec<String>>,
    ledger_id: Option<String>,
    national_code: Option<String>,
}

impl NewTransaction {
    /// Starts a transaction for `amount` Rials that returns the payer to
    /// `callback_url`.
    #[must_use]
    pub fn new(amount: i64, callback_url: impl Into<String>) -> Self {
        Self {
            amount,
            callback_url: callback_url.into(),
            description: None,
            order_id: None,
            mobile: None,
            allowed_cards: None,
            ledger_id: None,
            national_code: None,
        }
    }

    /// Sets a free-text description shown in the merchant panel.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the merchant-side order identifier.
    #[must_use]
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Sets the payer's mobile number, used to prefill saved cards.
    #[must_use]
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Restricts payment to the given card numbers.
    #[must_use]
    pub fn with_allowed_cards<I, S>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_cards = Some(cards.into_iter().map(Into::into).collect());
        self
    }

    /// Settles the payment into the given ledger.
    #[must_use]
    pub fn with_ledger_id(mut self, ledger_id: impl Into<String>) -> Self {
        self.ledger_id = Some(ledger_id.into());
        self
    }

    /// Requires the paying card to belong to this national code.
    #[must_use]
    pub fn with_national_code(mut self, national_code: impl Into<String>) -> Self {
        self.national_code = Some(national_code.into());
        self
    }

    /// Attaches the merchant and validates every field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BelowMinimum`] / [`ValidationError::AboveMaximum`]
    /// when the amount is outside `(1500, 2_000_000_000)`, and
    /// [`ValidationError::InvalidUrl`] when the callback URL is not an
    /// absolute `http`/`https` URL.
    pub fn into_request(self, merchant: impl Into<String>) -> Result<RequireRequest, ValidationError> {
        let amount = check_amount(self.amount)?;
        let callback_url = parse_callback_url(&self.callback_url)?;
        Ok(RequireRequest {
            merchant: merchant.into(),
            amount,
            callback_url,
            description: self.description,
            order_id: self.order_id,
            mobile: self.mobile,
            allowed_cards: self.allowed_cards,
            ledger_id: self.ledger_id,
            national_code: self.national_code,
        })
    }
}

fn check_amount(amount: i64) -> Result<i64, ValidationError> {
    if amount <= MIN_AMOUNT {
        return Err(ValidationError::BelowMinimum {
            field: "amount",
            bound: MIN_AMOUNT,
            value: amount,
        });
    }
    if amount >= MAX_AMOUNT {
        return Err(ValidationError::AboveMaximum {
            field: "amount",
            bound: MAX_AMOUNT,
            value: amount,
        });
    }
    Ok(amount)
}

fn parse_callback_url(raw: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl {
        field: "callback_url",
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ValidationError::InvalidUrl {
            field: "callback_url",
            reason: format!("scheme `{other}` is not http or https"),
        }),
    }
}

/// Body of `POST /request`: starts a payment and obtains a track id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequireRequest {
    merchant: String,
    amount: i64,
    callback_url: Url,
    description: Option<String>,
    order_id: Option<String>,
    mobile: Option<String>,
    allowed_cards: Option<Vec<String>>,
    ledger_id: Option<String>,
    national_code: Option<String>,
}

impl RequireRequest {
    /// Builds a request with no optional fields.
    ///
    /// # Errors
    ///
    /// See [`NewTransaction::into_request`].
    pub fn new(
        merchant: impl Into<String>,
        amount: i64,
        callback_url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        NewTransaction::new(amount, callback_url).into_request(merchant)
    }

    /// Merchant identifier.
    #[must_use]
    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    /// Amount in Rials.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Normalized callback URL.
    #[must_use]
    pub const fn callback_url(&self) -> &Url {
        &self.callback_url
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Merchant-side order id.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// Payer mobile number.
    #[must_use]
    pub fn mobile(&self) -> Option<&str> {
        self.mobile.as_deref()
    }

    /// Card numbers the payer may use.
    #[must_use]
    pub fn allowed_cards(&self) -> Option<&[String]> {
        self.allowed_cards.as_deref()
    }

    /// Target ledger.
    #[must_use]
    pub fn ledger_id(&self) -> Option<&str> {
        self.ledger_id.as_deref()
    }

    /// Required card-holder national code.
    #[must_use]
    pub fn national_code(&self) -> Option<&str> {
        self.national_code.as_deref()
    }
}

impl WireRequest for RequireRequest {}

/// Body of `POST /verify`: confirms a paid transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyRequest {
    merchant: String,
    track_id: i64,
}

impl VerifyRequest {
    /// Creates a verify request for `track_id`.
    #[must_use]
    pub fn new(merchant: impl Into<String>, track_id: i64) -> Self {
        Self {
            merchant: merchant.into(),
            track_id,
        }
    }

    /// Merchant identifier.
    #[must_use]
    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    /// Track id returned by `POST /request`.
    #[must_use]
    pub const fn track_id(&self) -> i64 {
        self.track_id
    }
}

impl WireRequest for VerifyRequest {}

/// Body of `POST /inquiry`: reads the current state of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryRequest {
    merchant: String,
    track_id: i64,
}

impl InquiryRequest {
    /// Creates an inquiry request for `track_id`.
    #[must_use]
    pub fn new(merchant: impl Into<String>, track_id: i64) -> Self {
        Self {
            merchant: merchant.into(),
            track_id,
        }
    }

    /// Merchant identifier.
    #[must_use]
    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    /// Track id returned by `POST /request`.
    #[must_use]
    pub const fn track_id(&self) -> i64 {
        self.track_id
    }
}

impl WireRequest for InquiryRequest {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::WireMode;
    use serde_json::json;

    #[test]
    fn test_require_request_wire_format() {
        let request = RequireRequest::new("zibal", 20_000, "https://somecallbackurl.com").unwrap();
        let wire = request.to_wire_format(WireMode::ExcludeUnset).unwrap();
        assert_eq!(
            wire,
            json!({
                "merchant": "zibal",
                "amount": 20000,
                "callbackUrl": "https://somecallbackurl.com/",
            })
        );
        assert_eq!(
            serde_json::to_string(&wire).unwrap(),
            r#"{"merchant":"zibal","amount":20000,"callbackUrl":"https://somecallbackurl.com/"}"#
        );
    }

    #[test]
    fn test_require_request_optional_fields() {
        let request = NewTransaction::new(25_000, "http://localhost:8000/")
            .with_order_id("ZBL-7799")
            .with_allowed_cards(["6037991234567890"])
            .with_national_code("")
            .into_request("zibal")
            .unwrap();
        let wire = request.to_wire_format(WireMode::ExcludeUnset).unwrap();
        assert_eq!(
            wire,
            json!({
                "merchant": "zibal",
                "amount": 25000,
                "callbackUrl": "http://localhost:8000/",
                "orderId": "ZBL-7799",
                "allowedCards": ["6037991234567890"],
                "nationalCode": "",
            })
        );
    }

    #[test]
    fn test_include_unset_emits_nulls() {
        let request = RequireRequest::new("zibal", 20_000, "https://somecallbackurl.com").unwrap();
        let wire = request.to_wire_format(WireMode::IncludeUnset).unwrap();
        assert_eq!(wire["description"], serde_json::Value::Null);
        assert_eq!(wire["ledgerId"], serde_json::Value::Null);
        assert_eq!(wire.as_object().map(serde_json::Map::len), Some(9));
    }

    #[test]
    fn test_amount_bounds_are_exclusive() {
        for amount in [1_501, 25_000, 1_999_999_999] {
            assert!(RequireRequest::new("zibal", amount, "https://a.example").is_ok());
        }
        for amount in [i64::MIN, -1, 0, 1_500] {
            assert_eq!(
                RequireRequest::new("zibal", amount, "https://a.example"),
                Err(ValidationError::BelowMinimum {
                    field: "amount",
                    bound: 1_500,
                    value: amount,
                })
            );
        }
        for amount in [2_000_000_000, i64::MAX] {
            assert_eq!(
                RequireRequest::new("zibal", amount, "https://a.example"),
                Err(ValidationError::AboveMaximum {
                    field: "amount",
                    bound: 2_000_000_000,
                    value: amount,
                })
            );
        }
    }

    #[test]
    fn test_amount_error_names_bound() {
        let err = RequireRequest::new("zibal", 100, "https://a.example").unwrap_err();
        assert!(err.to_string().contains("greater than 1500"));
        let err = RequireRequest::new("zibal", 3_000_000_000, "https://a.example").unwrap_err();
        assert!(err.to_string().contains("less than 2000000000"));
    }

    #[test]
    fn test_callback_url_must_be_http() {
        assert!(matches!(
            RequireRequest::new("zibal", 20_000, "not a url"),
            Err(ValidationError::InvalidUrl { field: "callback_url", .. })
        ));
        assert!(matches!(
            RequireRequest::new("zibal", 20_000, "ftp://files.example/cb"),
            Err(ValidationError::InvalidUrl { field: "callback_url", .. })
        ));
    }

    #[test]
    fn test_verify_and_inquiry_wire_format() {
        let verify = VerifyRequest::new("zibal", 12_345);
        assert_eq!(
            verify.to_wire_format(WireMode::ExcludeUnset).unwrap(),
            json!({"merchant": "zibal", "trackId": 12345})
        );
        let inquiry = InquiryRequest::new("zibal", 3_714_061_657);
        assert_eq!(
            inquiry.to_wire_format(WireMode::IncludeUnset).unwrap(),
            json!({"merchant": "zibal", "trackId": 3_714_061_657_i64})
        );
    }
}
