//! Canonical payload serialization for chain hashing.
//!
//! The canonical string is hashed, so both schemes are bit-exact and never
//! delegate formatting decisions to library defaults:
//!
//! - [`CanonScheme::Jcs`]: RFC 8785 (see [`crate::crypto::jcs`]).
//! - [`CanonScheme::PySortKeys`]: the output of Python's
//!   `json.dumps(value, sort_keys=True)` with default separators and
//!   `ensure_ascii`, which is what the reference bundle generator hashes.
//!   A [`Value`] cannot tell the literal `-0` from `-0.0`; both arrive as a
//!   negative-zero float and are written `-0.0`. Chain lines parsed with
//!   [`ChainRecord::from_json`](crate::chain::ChainRecord::from_json) read an
//!   integer `-0` as `0`, matching `json.loads`.

use crate::crypto::jcs;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt::Write as _;
use std::str::FromStr;

/// Canonicalization scheme applied to chain payloads before hashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonScheme {
    /// Sorted keys, no whitespace, RFC 8785 numbers and strings.
    #[default]
    Jcs,
    /// Sorted keys, `", "` and `": "` separators, ASCII-only output.
    PySortKeys,
}

impl CanonScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonScheme::Jcs => "jcs",
            CanonScheme::PySortKeys => "py-sort-keys",
        }
    }

    /// Serialize `value` to this scheme's canonical string.
    pub fn canonicalize(&self, value: &Value) -> Result<String> {
        match self {
            CanonScheme::Jcs => jcs::to_string(value),
            CanonScheme::PySortKeys => {
                let mut out = String::new();
                write_py_value(&mut out, value);
                Ok(out)
            }
        }
    }
}

impl std::fmt::Display for CanonScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jcs" => Ok(CanonScheme::Jcs),
            "py-sort-keys" => Ok(CanonScheme::PySortKeys),
            other => Err(format!(
                "unknown canonicalization scheme '{}' (expected 'jcs' or 'py-sort-keys')",
                other
            )),
        }
    }
}

fn write_py_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_py_number(out, n),
        Value::String(s) => write_py_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_py_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            // str ordering is code point ordering, same as Python's sorted().
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_py_string(out, key);
                out.push_str(": ");
                write_py_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_py_number(out: &mut String, n: &Number) {
    if let Some(i) = n.as_i64() {
        let _ = write!(out, "{}", i);
    } else if let Some(u) = n.as_u64() {
        let _ = write!(out, "{}", u);
    } else if let Some(f) = n.as_f64() {
        out.push_str(&py_float_repr(f));
    }
}

/// Python `repr(float)`: shortest round-trip digits, scientific notation
/// when the decimal exponent is below -4 or at least 16.
fn py_float_repr(f: f64) -> String {
    // `{:e}` yields the shortest round-trip digits, e.g. "-1.25e-7".
    let sci = format!("{:e}", f);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => ("-", m),
        None => ("", mantissa),
    };

    if !(-4..16).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let body = if exp >= 0 {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}.0", digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    } else {
        format!("0.{}{}", "0".repeat((-exp - 1) as usize), digits)
    };
    format!("{}{}", sign, body)
}

fn write_py_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('"');
}
