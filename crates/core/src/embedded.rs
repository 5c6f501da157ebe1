//! Serde helpers for collections that may arrive as serialized JSON text.
//!
//! Older clients send `variants` and `items` as a string holding a JSON array
//! (`"[{\"id\":\"ghee-250g\", ...}]"`) instead of the array itself. These
//! helpers accept both shapes so the value is parsed once, at the edge, into
//! its typed form.
//!
//! ```
//! use frosteva_core::embedded;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Body {
//!     #[serde(deserialize_with = "embedded::deserialize")]
//!     tags: Vec<String>,
//! }
//!
//! let inline: Body = serde_json::from_str(r#"{"tags": ["a", "b"]}"#).unwrap();
//! let text: Body = serde_json::from_str(r#"{"tags": "[\"a\", \"b\"]"}"#).unwrap();
//! assert_eq!(inline.tags, text.tags);
//! ```

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `T` from either its JSON form or a string containing it.
///
/// # Errors
///
/// Returns a deserializer error if neither shape parses as `T`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    from_value(value).map_err(D::Error::custom)
}

/// Like [`deserialize`], for optional fields. `null` maps to `None`.
///
/// Pair with `#[serde(default)]` so a missing field is also `None`.
///
/// # Errors
///
/// Returns a deserializer error if the value is present but does not parse as `T`.
pub fn deserialize_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => from_value(value).map(Some).map_err(D::Error::custom),
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    match value {
        Value::String(text) => serde_json::from_str(&text),
        other => serde_json::from_value(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_option")]
        numbers: Option<Vec<u32>>,
    }

    #[test]
    fn test_inline_array() {
        let holder: Holder = serde_json::from_str(r#"{"numbers": [1, 2]}"#).unwrap();
        assert_eq!(holder.numbers, Some(vec![1, 2]));
    }

    #[test]
    fn test_embedded_text() {
        let holder: Holder = serde_json::from_str(r#"{"numbers": "[3, 4]"}"#).unwrap();
        assert_eq!(holder.numbers, Some(vec![3, 4]));
    }

    #[test]
    fn test_missing_and_null() {
        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.numbers, None);
        let null: Holder = serde_json::from_str(r#"{"numbers": null}"#).unwrap();
        assert_eq!(null.numbers, None);
    }

    #[test]
    fn test_malformed_text_is_an_error() {
        assert!(serde_json::from_str::<Holder>(r#"{"numbers": "[1,"}"#).is_err());
    }
}
