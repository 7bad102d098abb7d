//! JSON Canonicalization Scheme (RFC 8785).
//!
//! Uses `serde_jcs`, which guarantees:
//!
//! - Lexicographic key ordering at every nesting level
//! - No insignificant whitespace
//! - UTF-8 encoding
//! - IEEE 754 number normalization (1.0 → 1)

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize to a JCS canonical JSON string.
///
/// # Example
///
/// ```
/// use sealcheck_evidence::crypto::jcs;
/// use serde_json::json;
///
/// let value = json!({"z": 1, "a": {"c": 2, "b": 3}});
/// let s = jcs::to_string(&value).unwrap();
/// assert_eq!(s, r#"{"a":{"b":3,"c":2},"z":1}"#);
/// ```
pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    serde_jcs::to_string(value).context("failed to serialize canonical json string")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_jcs_nested_ordering() {
        let input = json!({
            "outer": {"z": 1, "a": 2},
            "first": true
        });
        assert_eq!(
            to_string(&input).unwrap(),
            r#"{"first":true,"outer":{"a":2,"z":1}}"#
        );
    }

    #[test]
    fn test_jcs_array_order_preserved() {
        let input = json!({"events": [3, 1, 2], "actor": null});
        assert_eq!(
            to_string(&input).unwrap(),
            r#"{"actor":null,"events":[3,1,2]}"#
        );
    }

    #[test]
    fn test_jcs_float_normalization() {
        let input = json!({"b": 1.5, "a": 1.0});
        assert_eq!(to_string(&input).unwrap(), r#"{"a":1,"b":1.5}"#);
    }

    #[test]
    fn test_jcs_keeps_unicode_literal() {
        let input = json!({"who": "Zoë"});
        assert_eq!(to_string(&input).unwrap(), r#"{"who":"Zoë"}"#);
    }
}
