//! Endpoint and environment constants for the Zibal gateway.

/// Production API base URL. Endpoint paths are joined onto it.
pub const DEFAULT_BASE_URL: &str = "https://gateway.zibal.ir/v1/";

/// Production payment page; the payer is redirected to `{start}{trackId}`.
pub const DEFAULT_START_URL: &str = "https://gateway.zibal.ir/start/";

/// Path of the transaction request endpoint.
pub const REQUEST_PATH: &str = "request";

/// Path of the verification endpoint.
pub const VERIFY_PATH: &str = "verify";

/// Path of the inquiry endpoint.
pub const INQUIRY_PATH: &str = "inquiry";

/// Environment variable holding the merchant id.
pub const MERCHANT_ENV: &str = "ZIBAL_MERCHANT";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "ZIBAL_BASE_URL";

/// Environment variable overriding the raise-on-invalid-result policy.
pub const RAISE_ON_INVALID_RESULT_ENV: &str = "ZIBAL_RAISE_ON_INVALID_RESULT";
