//! File integrity check: every manifest entry must exist and hash to its declared digest.

use crate::bundle::manifest::{expected_digest, Manifest};
use crate::crypto::digest::{normalize_digest, sha256_file};
use crate::error::{ErrorCode, VerifyError, VerifyResult};
use std::path::{Component, Path, PathBuf};

/// Resolve a manifest path against the bundle directory.
///
/// Paths must stay inside the bundle: absolute paths and `..` are rejected
/// before the filesystem is touched.
pub fn resolve_entry(bundle_dir: &Path, rel: &str) -> VerifyResult<PathBuf> {
    let path = Path::new(rel);
    if rel.is_empty() {
        return Err(VerifyError::new(
            ErrorCode::ManifestInvalid,
            "invalid manifest: empty file path",
        ));
    }

    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(VerifyError::new(
                    ErrorCode::SecurityPathTraversal,
                    format!("path escapes bundle directory: {}", rel),
                ))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(VerifyError::new(
                    ErrorCode::SecurityAbsolutePath,
                    format!("absolute path in manifest: {}", rel),
                ))
            }
        }
    }

    Ok(bundle_dir.join(path))
}

/// Check one manifest entry.
pub fn check_file(
    bundle_dir: &Path,
    rel: &str,
    expected: &str,
    chunk_size: usize,
) -> VerifyResult<()> {
    let path = resolve_entry(bundle_dir, rel)?;

    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            return Err(VerifyError::new(
                ErrorCode::FileMissing,
                format!("missing file {} (not a regular file)", rel),
            ))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(VerifyError::new(
                ErrorCode::FileMissing,
                format!("missing file {}", rel),
            ))
        }
        Err(e) => return Err(VerifyError::from(e).with_context(format!("cannot stat {}", rel))),
    }

    let actual = sha256_file(&path, chunk_size)
        .map_err(|e| VerifyError::from(e).with_context(format!("cannot read {}", rel)))?;

    if actual != normalize_digest(expected) {
        return Err(VerifyError::new(
            ErrorCode::HashMismatch,
            format!(
                "sha256 mismatch {}\n expected: {}\n got: {}",
                rel, expected, actual
            ),
        ));
    }

    tracing::debug!(path = %rel, sha256 = %actual, "file verified");
    Ok(())
}

/// Check every manifest entry in listed order, stopping at the first failure.
///
/// Returns the number of files verified.
pub fn check_files(
    bundle_dir: &Path,
    manifest: &Manifest,
    chunk_size: usize,
) -> VerifyResult<usize> {
    for (rel, digest) in &manifest.files {
        check_file(bundle_dir, rel, expected_digest(rel, digest)?, chunk_size)?;
    }
    Ok(manifest.files.len())
}
