//! Verification options: file names, read sizes, resource limits.
//!
//! Defaults match the bundle layout produced by the evidence generator.
//! Partial overrides come from a JSON config file and from CLI flags.

use crate::crypto::canon::CanonScheme;
use serde::Deserialize;

pub const DEFAULT_MANIFEST_NAME: &str = "manifest.json";
pub const DEFAULT_CHAIN_LOG_NAME: &str = "audit_chain.jsonl";

/// Options for a single verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    pub manifest_name: String,
    pub chain_log_name: String,
    /// Read size used when streaming files through the hasher.
    pub chunk_size: usize,
    pub max_manifest_bytes: u64,
    pub max_line_bytes: usize,
    pub max_records: usize,
    pub canon: CanonScheme,
    /// Treat an absent chain log as a failure instead of a warning.
    pub require_chain: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            manifest_name: DEFAULT_MANIFEST_NAME.into(),
            chain_log_name: DEFAULT_CHAIN_LOG_NAME.into(),
            chunk_size: 1024 * 1024,               // 1 MiB
            max_manifest_bytes: 10 * 1024 * 1024, // 10 MiB
            max_line_bytes: 1024 * 1024,           // 1 MiB
            max_records: 1_000_000,
            canon: CanonScheme::default(),
            require_chain: false,
        }
    }
}

/// Partial overrides for `VerifyOptions`. Used for CLI/config JSON parsing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyOptionsOverrides {
    pub manifest_name: Option<String>,
    pub chain_log_name: Option<String>,
    pub chunk_size: Option<usize>,
    pub max_manifest_bytes: Option<u64>,
    pub max_line_bytes: Option<usize>,
    pub max_records: Option<usize>,
    pub canon: Option<CanonScheme>,
    pub require_chain: Option<bool>,
}

impl VerifyOptionsOverrides {
    /// Layer `other` on top of `self`; `Some` values in `other` win.
    pub fn merge(self, other: VerifyOptionsOverrides) -> Self {
        Self {
            manifest_name: other.manifest_name.or(self.manifest_name),
            chain_log_name: other.chain_log_name.or(self.chain_log_name),
            chunk_size: other.chunk_size.or(self.chunk_size),
            max_manifest_bytes: other.max_manifest_bytes.or(self.max_manifest_bytes),
            max_line_bytes: other.max_line_bytes.or(self.max_line_bytes),
            max_records: other.max_records.or(self.max_records),
            canon: other.canon.or(self.canon),
            require_chain: other.require_chain.or(self.require_chain),
        }
    }
}

impl VerifyOptions {
    /// Apply overrides onto these defaults. Only `Some` values override.
    ///
    /// A zero chunk size would never make progress, so it is clamped to one byte.
    pub fn apply(self, overrides: VerifyOptionsOverrides) -> Self {
        Self {
            manifest_name: overrides.manifest_name.unwrap_or(self.manifest_name),
            chain_log_name: overrides.chain_log_name.unwrap_or(self.chain_log_name),
            chunk_size: overrides.chunk_size.unwrap_or(self.chunk_size).max(1),
            max_manifest_bytes: overrides
                .max_manifest_bytes
                .unwrap_or(self.max_manifest_bytes),
            max_line_bytes: overrides.max_line_bytes.unwrap_or(self.max_line_bytes),
            max_records: overrides.max_records.unwrap_or(self.max_records),
            canon: overrides.canon.unwrap_or(self.canon),
            require_chain: overrides.require_chain.unwrap_or(self.require_chain),
        }
    }
}
