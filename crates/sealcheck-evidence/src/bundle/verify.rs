//! Bundle directory verification: manifest, file digests, then the audit chain.
//!
//! Fail-fast: the first failed check ends the run and is the only failure
//! reported.

use crate::bundle::files::check_files;
use crate::bundle::manifest::load_manifest;
use crate::chain::{check_chain_head, open_chain_log, ChainVerifier};
use crate::error::{ErrorCode, VerifyError, VerifyResult};
use crate::options::VerifyOptions;
use std::path::Path;

/// Outcome of a successful chain verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary {
    pub records: usize,
    pub head: String,
}

/// Everything a successful run established about the bundle.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub bundle: String,
    /// SHA-256 of the manifest file bytes
    pub manifest_sha256: String,
    pub files_verified: usize,
    /// `None` when the chain log was absent and the step was skipped
    pub chain: Option<ChainSummary>,
    pub warnings: Vec<String>,
}

/// Verify the bundle in `bundle_dir`.
pub fn verify_bundle_dir(bundle_dir: &Path, opts: &VerifyOptions) -> VerifyResult<VerifyReport> {
    let manifest_path = bundle_dir.join(&opts.manifest_name);
    if !manifest_path.is_file() {
        return Err(VerifyError::new(
            ErrorCode::BundleNotFound,
            format!("missing {}", manifest_path.display()),
        ));
    }

    let loaded = load_manifest(&manifest_path, opts.max_manifest_bytes)?;
    let manifest = &loaded.manifest;

    let files_verified = check_files(bundle_dir, manifest, opts.chunk_size)?;
    tracing::info!(bundle = %manifest.bundle, files = files_verified, "file digests verified");

    let mut warnings = Vec::new();
    let chain_path = bundle_dir.join(&opts.chain_log_name);
    let chain = if chain_path.exists() {
        let mut verifier = ChainVerifier::new(opts.canon);
        for record in open_chain_log(&chain_path, opts.max_line_bytes, opts.max_records)? {
            verifier.push(&record?)?;
        }
        let records = verifier.records();
        let head = verifier.finish();

        if let Some(expected) = manifest.expected_chain_head() {
            check_chain_head(&expected, &head)?;
        }
        tracing::info!(records, head = %head, canon = %opts.canon, "audit chain verified");
        Some(ChainSummary { records, head })
    } else if opts.require_chain {
        return Err(VerifyError::new(
            ErrorCode::ChainLogMissing,
            format!("{} not found and chain verification is required", opts.chain_log_name),
        ));
    } else {
        let warning = match manifest.expected_chain_head() {
            Some(declared) => format!(
                "{} not found; skipping chain verification (declared chain_head {} is unverified)",
                opts.chain_log_name, declared
            ),
            None => format!(
                "{} not found; skipping chain verification",
                opts.chain_log_name
            ),
        };
        tracing::warn!("{}", warning);
        warnings.push(warning);
        None
    };

    Ok(VerifyReport {
        bundle: manifest.bundle.clone(),
        manifest_sha256: loaded.sha256,
        files_verified,
        chain,
        warnings,
    })
}
