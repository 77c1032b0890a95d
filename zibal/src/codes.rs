//! Static code tables for gateway result, status and wage codes.
//!
//! Every response from the gateway carries integer codes whose meaning is
//! only documented out of band. The tables here map each code to an English
//! description. A lookup never fails: codes missing from a table resolve to
//! the table's fallback string (for example `"Unknown status"`).
//!
//! The typed wrappers [`ResultCode`], [`StatusCode`] and [`WageCode`]
//! serialize as bare integers and know which table describes them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A static mapping from integer codes to their descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeTable {
    /// Short name of the code family (e.g. `"status"`), used in errors.
    pub kind: &'static str,
    /// Known `(code, meaning)` pairs.
    pub entries: &'static [(i64, &'static str)],
    /// Returned by [`CodeTable::meaning`] for codes not in `entries`.
    pub fallback: &'static str,
}

impl CodeTable {
    /// Returns the description of `code`, or the table fallback when the code
    /// is unknown.
    #[must_use]
    pub fn meaning(&self, code: i64) -> &'static str {
        self.entries
            .iter()
            .find(|(known, _)| *known == code)
            .map_or(self.fallback, |&(_, meaning)| meaning)
    }

    /// Returns `true` if `code` is listed in this table.
    #[must_use]
    pub fn contains(&self, code: i64) -> bool {
        self.entries.iter().any(|(known, _)| *known == code)
    }

    /// Iterates over the known codes in table order.
    pub fn codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }
}

/// The result code for a successful call.
pub const RESULT_SUCCESS: i64 = 100;

/// Outcome of a request, verify or inquiry call.
pub const RESULT_CODES: CodeTable = CodeTable {
    kind: "result",
    entries: &[
        (100, "Success"),
        (102, "Merchant not found"),
        (103, "Merchant is inactive"),
        (104, "Merchant is invalid"),
        (105, "Amount must be greater than 1,000 Rials"),
        (106, "Invalid callbackUrl (must start with http or https)"),
        (113, "Amount exceeds the transaction limit"),
        (201, "Transaction has already been verified"),
        (202, "Order has not been paid or the payment was unsuccessful"),
        (203, "Invalid trackId"),
    ],
    fallback: "Unknown result",
};

/// Lifecycle state of a transaction.
pub const STATUS_CODES: CodeTable = CodeTable {
    kind: "status",
    entries: &[
        (-1, "Pending payment"),
        (-2, "Internal error"),
        (1, "Paid and verified"),
        (2, "Paid but not verified"),
        (3, "Canceled by the user"),
        (4, "Invalid card number"),
        (5, "Insufficient account balance"),
        (6, "Wrong password"),
        (7, "Too many requests"),
        (8, "Daily internet payment count exceeded"),
        (9, "Daily internet payment amount exceeded"),
        (10, "Invalid card issuer"),
        (11, "Switch error"),
        (12, "Card is not accessible"),
    ],
    fallback: "Unknown status",
};

/// Which party bears the transaction fee.
pub const WAGE_CODES: CodeTable = CodeTable {
    kind: "wage",
    entries: &[
        (0, "Fee deducted from the transaction amount"),
        (1, "Fee deducted from the merchant wallet"),
        (2, "Fee paid by the customer"),
    ],
    fallback: "Unknown wage",
};

macro_rules! code_type {
    ($(#[$meta:meta])* $name:ident, $table:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw code.
            #[must_use]
            pub const fn new(code: i64) -> Self {
                Self(code)
            }

            /// Returns the raw integer code.
            #[must_use]
            pub const fn code(self) -> i64 {
                self.0
            }

            /// The table describing this code family.
            #[must_use]
            pub fn table() -> &'static CodeTable {
                &$table
            }

            /// Human-readable description, or the family fallback.
            #[must_use]
            pub fn meaning(self) -> &'static str {
                Self::table().meaning(self.0)
            }

            /// Returns `true` if the code is documented.
            #[must_use]
            pub fn is_known(self) -> bool {
                Self::table().contains(self.0)
            }
        }

        impl From<i64> for $name {
            fn from(code: i64) -> Self {
                Self(code)
            }
        }

        impl From<$name> for i64 {
            fn from(code: $name) -> Self {
                code.0
            }
        }

        impl PartialEq<i64> for $name {
            fn eq(&self, other: &i64) -> bool {
                self.0 == *other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

code_type!(
    /// A gateway result code (see [`RESULT_CODES`]).
    ResultCode,
    RESULT_CODES
);

code_type!(
    /// A transaction status code (see [`STATUS_CODES`]).
    StatusCode,
    STATUS_CODES
);

code_type!(
    /// A fee-bearer code (see [`WAGE_CODES`]).
    WageCode,
    WAGE_CODES
);

impl ResultCode {
    /// Result code `100`.
    pub const SUCCESS: Self = Self(RESULT_SUCCESS);

    /// Returns `true` for result code `100`.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == RESULT_SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_resolve() {
        assert_eq!(RESULT_CODES.meaning(100), "Success");
        assert_eq!(STATUS_CODES.meaning(1), "Paid and verified");
        assert_eq!(STATUS_CODES.meaning(-1), "Pending payment");
        assert_eq!(WAGE_CODES.meaning(2), "Fee paid by the customer");
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        assert_eq!(STATUS_CODES.meaning(9999), "Unknown status");
        assert_eq!(WAGE_CODES.meaning(-5), "Unknown wage");
        assert_eq!(RESULT_CODES.meaning(0), "Unknown result");
    }

    #[test]
    fn test_every_entry_is_reachable() {
        for table in [&RESULT_CODES, &STATUS_CODES, &WAGE_CODES] {
            for (code, meaning) in table.entries {
                assert!(table.contains(*code));
                assert_eq!(table.meaning(*code), *meaning);
                assert_ne!(table.meaning(*code), table.fallback);
            }
        }
    }

    #[test]
    fn test_code_tables_have_no_duplicates() {
        for table in [&RESULT_CODES, &STATUS_CODES, &WAGE_CODES] {
            let codes: Vec<i64> = table.codes().collect();
            let mut deduped = codes.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(codes.len(), deduped.len(), "duplicate in {}", table.kind);
        }
    }

    #[test]
    fn test_typed_codes() {
        assert!(ResultCode::new(100).is_success());
        assert!(!ResultCode::new(202).is_success());
        assert_eq!(
            ResultCode::new(202).meaning(),
            "Order has not been paid or the payment was unsuccessful"
        );
        assert!(StatusCode::new(12).is_known());
        assert!(!StatusCode::new(13).is_known());
        assert_eq!(StatusCode::new(13).meaning(), "Unknown status");
        assert_eq!(WageCode::from(0).code(), 0);
        assert_eq!(ResultCode::SUCCESS, 100);
    }

    #[test]
    fn test_codes_serialize_as_integers() {
        let status: StatusCode = serde_json::from_str("-2").unwrap();
        assert_eq!(status, StatusCode::new(-2));
        assert_eq!(serde_json::to_string(&WageCode::new(1)).unwrap(), "1");
    }
}
