pub mod canon;
pub mod digest;
pub mod jcs;

pub use canon::CanonScheme;
pub use digest::{normalize_digest, sha256_file, sha256_hex, sha256_reader, SENTINEL_DIGEST};
