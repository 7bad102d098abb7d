use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// One line of the audit chain log.
///
/// All four keys are required; `payload` may be any JSON value including
/// `null`. Unknown keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainRecord {
    /// Sequence index (not covered by the hash)
    pub i: u64,
    /// Claimed head of the previous record
    pub prev: String,
    /// Claimed `sha256(prev + canonical(payload))`
    pub head: String,
    pub payload: Value,
}

impl ChainRecord {
    /// Parse one log line.
    ///
    /// Integer `-0` literals are read as `0`, the way `json.loads` reads them;
    /// `serde_json` would otherwise produce the float `-0.0`, which the
    /// py-sort-keys form writes differently.
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(&integer_negative_zero_as_zero(line))
    }
}

fn integer_negative_zero_as_zero(line: &str) -> Cow<'_, str> {
    if !line.contains("-0") {
        return Cow::Borrowed(line);
    }

    let bytes = line.as_bytes();
    let mut signs = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for (idx, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'-' if bytes.get(idx + 1) == Some(&b'0')
                && !matches!(bytes.get(idx + 2), Some(b'.' | b'e' | b'E' | b'0'..=b'9')) =>
            {
                signs.push(idx)
            }
            _ => {}
        }
    }
    if signs.is_empty() {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut start = 0;
    for idx in signs {
        out.push_str(&line[start..idx]);
        start = idx + 1;
    }
    out.push_str(&line[start..]);
    Cow::Owned(out)
}
