//! Key-case conversion between the client (`snake_case`) and the wire
//! (`camelCase`).
//!
//! The gateway speaks camelCase JSON while the models in [`crate::proto`]
//! use Rust field names. Rather than pinning every model to a serde
//! `rename_all`, the schema layer renames keys on the generic
//! [`serde_json::Value`] tree with [`keys_to_snake`] / [`keys_to_camel`], so
//! the transform can be tested on its own and applied to any payload.
//!
//! # Example
//!
//! ```rust
//! use zibal::case::{to_camel_case, to_snake_case};
//!
//! assert_eq!(to_camel_case("callback_url"), "callbackUrl");
//! assert_eq!(to_snake_case("callbackUrl"), "callback_url");
//! ```

use serde_json::{Map, Value};

/// Converts a `snake_case` identifier to `camelCase`.
///
/// The first token is lower-cased, every following token gets its first
/// letter upper-cased. Empty tokens (repeated underscores) are dropped.
#[must_use]
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut tokens = key.split('_');
    if let Some(first) = tokens.next() {
        out.push_str(&first.to_lowercase());
    }
    for token in tokens {
        let mut chars = token.chars();
        if let Some(head) = chars.next() {
            out.extend(head.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Converts a `camelCase` identifier to `snake_case`.
///
/// An underscore is inserted before every uppercase letter except a leading
/// one, then the whole string is lower-cased. Already-snake input is
/// returned unchanged.
#[must_use]
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Renames every object key in `value` with `rename`, recursing into nested
/// objects and arrays. Scalars are returned untouched.
#[must_use]
pub fn rename_keys<F>(value: Value, rename: &F) -> Value
where
    F: Fn(&str) -> String,
{
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (rename(&key), rename_keys(inner, rename)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|inner| rename_keys(inner, rename))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Renames all keys of a client-side payload to their wire (`camelCase`) form.
#[must_use]
pub fn keys_to_camel(value: Value) -> Value {
    rename_keys(value, &to_camel_case)
}

/// Renames all keys of a wire payload to their client-side (`snake_case`) form.
#[must_use]
pub fn keys_to_snake(value: Value) -> Value {
    rename_keys(value, &to_snake_case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_camel_case("word"), "word");
        assert_eq!(to_camel_case("some_string"), "someString");
        assert_eq!(
            to_camel_case("some_snakes_are_lurking_nearby"),
            "someSnakesAreLurkingNearby"
        );
        assert_eq!(to_camel_case("double__underscore"), "doubleUnderscore");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case(""), "");
        assert_eq!(to_snake_case("word"), "word");
        assert_eq!(to_snake_case("someString"), "some_string");
        assert_eq!(
            to_snake_case("thereAreTooManyCamelsHere"),
            "there_are_too_many_camels_here"
        );
        assert_eq!(to_snake_case("Leading"), "leading");
    }

    #[test]
    fn test_snake_input_is_left_alone() {
        assert_eq!(to_snake_case("already_snake_case"), "already_snake_case");
    }

    #[test]
    fn test_case_round_trips() {
        for snake in ["track_id", "shaparak_fee", "multiplexing_info", "amount"] {
            assert_eq!(to_snake_case(&to_camel_case(snake)), snake);
        }
        for camel in ["trackId", "paidAt", "nationalCode", "message"] {
            assert_eq!(to_camel_case(&to_snake_case(camel)), camel);
        }
    }

    #[test]
    fn test_keys_to_camel_flat() {
        let snake = json!({"first_key": 1, "second_key": 2, "third_key": 3});
        assert_eq!(
            keys_to_camel(snake),
            json!({"firstKey": 1, "secondKey": 2, "thirdKey": 3})
        );
    }

    #[test]
    fn test_keys_to_snake_flat() {
        let camel = json!({"firstKey": 1, "secondKey": 2, "thirdKey": 3});
        assert_eq!(
            keys_to_snake(camel),
            json!({"first_key": 1, "second_key": 2, "third_key": 3})
        );
    }

    #[test]
    fn test_keys_renamed_recursively_but_values_kept() {
        let camel = json!({
            "outerKey": {"innerKey": "someValue"},
            "listOfMaps": [{"itemKey": 1}, "plainString"],
            "camelValue": "stayCamel",
        });
        assert_eq!(
            keys_to_snake(camel),
            json!({
                "outer_key": {"inner_key": "someValue"},
                "list_of_maps": [{"item_key": 1}, "plainString"],
                "camel_value": "stayCamel",
            })
        );
    }

    #[test]
    fn test_scalar_untouched() {
        assert_eq!(keys_to_camel(json!("some_value")), json!("some_value"));
        assert_eq!(keys_to_snake(json!(42)), json!(42));
    }
}
