//! Bundle manifest: expected file digests and the expected chain head.

use crate::crypto::digest::normalize_digest;
use crate::error::{ErrorCode, VerifyError, VerifyResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parsed `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Bundle identifier
    pub bundle: String,
    /// Relative path -> expected SHA-256 (hex), checked in listed order
    #[serde(default)]
    pub files: Map<String, Value>,
    /// Expected head of the audit chain, if the producer recorded one
    #[serde(default)]
    pub chain_head: Option<String>,
}

impl Manifest {
    /// Parse manifest bytes.
    pub fn from_slice(bytes: &[u8]) -> VerifyResult<Self> {
        let manifest: Self = serde_json::from_slice(bytes).map_err(|e| {
            VerifyError::new(ErrorCode::ManifestInvalid, format!("invalid manifest: {}", e))
                .with_source(e)
        })?;
        for (path, digest) in &manifest.files {
            expected_digest(path, digest)?;
        }
        Ok(manifest)
    }

    /// Declared chain head in bare lowercase hex; `null` and `""` mean undeclared.
    pub fn expected_chain_head(&self) -> Option<String> {
        self.chain_head
            .as_deref()
            .map(normalize_digest)
            .filter(|h| !h.is_empty())
    }
}

/// The digest string a `files` entry declares.
pub(crate) fn expected_digest<'a>(path: &str, digest: &'a Value) -> VerifyResult<&'a str> {
    digest.as_str().ok_or_else(|| {
        VerifyError::new(
            ErrorCode::ManifestInvalid,
            format!("invalid manifest: digest for {} is not a string", path),
        )
    })
}

/// Manifest together with the digest of the exact bytes it was parsed from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: Manifest,
    pub sha256: String,
}

/// Read and parse the manifest at `path`, refusing files over `max_bytes`.
///
/// The caller has already established that `path` exists.
pub fn load_manifest(path: &Path, max_bytes: u64) -> VerifyResult<LoadedManifest> {
    let file = File::open(path).map_err(|e| {
        VerifyError::from(e).with_context(format!("cannot open {}", path.display()))
    })?;

    let mut bytes = Vec::new();
    file.take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| {
            VerifyError::from(e).with_context(format!("cannot read {}", path.display()))
        })?;

    if bytes.len() as u64 > max_bytes {
        return Err(VerifyError::new(
            ErrorCode::LimitManifestBytes,
            format!(
                "manifest {} exceeds limit of {} bytes",
                path.display(),
                max_bytes
            ),
        ));
    }

    let manifest = Manifest::from_slice(&bytes)?;
    let sha256 = crate::crypto::sha256_hex(&bytes);
    tracing::debug!(
        bundle = %manifest.bundle,
        files = manifest.files.len(),
        manifest_sha256 = %sha256,
        "manifest loaded"
    );

    Ok(LoadedManifest { manifest, sha256 })
}
