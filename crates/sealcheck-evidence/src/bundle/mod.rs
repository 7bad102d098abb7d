//! Evidence bundle directory format and verification.
//!
//! A bundle is a directory containing:
//! - `manifest.json`: bundle name, expected file digests, optional chain head
//! - `audit_chain.jsonl`: optional hash-chained audit log
//! - the files listed in the manifest, at their relative paths

pub mod files;
pub mod manifest;
pub mod verify;

// Re-exports for convenience
pub use files::{check_file, check_files, resolve_entry};
pub use manifest::{load_manifest, LoadedManifest, Manifest};
pub use verify::{verify_bundle_dir, ChainSummary, VerifyReport};
