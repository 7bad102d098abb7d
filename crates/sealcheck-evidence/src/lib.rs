pub mod bundle;
pub mod chain;
pub mod crypto;
pub mod error;
pub mod options;
pub mod report;

// Convenience re-exports
pub use bundle::{verify_bundle_dir, ChainSummary, LoadedManifest, Manifest, VerifyReport};
pub use chain::{compute_head, verify_chain, ChainRecord, ChainRecords, ChainVerifier};
pub use crypto::{CanonScheme, SENTINEL_DIGEST};
pub use error::{ErrorClass, ErrorCode, VerifyError, VerifyResult};
pub use options::{VerifyOptions, VerifyOptionsOverrides};
pub use report::{run_verification, Status, VerificationResult, EXIT_FAIL, EXIT_PASS};
