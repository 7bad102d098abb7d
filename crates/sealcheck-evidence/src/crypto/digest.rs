//! Streaming SHA-256 digests, encoded as lowercase hex.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Predecessor of the first chain record: the zero value of the digest space.
pub const SENTINEL_DIGEST: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// SHA-256 of an in-memory buffer.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 of everything `reader` yields, read `chunk_size` bytes at a time.
pub fn sha256_reader<R: Read>(mut reader: R, chunk_size: usize) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size.max(1)];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(hex::encode(hasher.finalize()))
}

/// SHA-256 of a file, streamed so memory use does not grow with file size.
pub fn sha256_file(path: &Path, chunk_size: usize) -> std::io::Result<String> {
    let file = File::open(path)?;
    sha256_reader(file, chunk_size)
}

/// Bare lowercase hex form of a manifest digest (`sha256:` prefix optional).
pub fn normalize_digest(digest: &str) -> String {
    let digest = digest.trim();
    let bare = digest.strip_prefix("sha256:").unwrap_or(digest);
    bare.to_ascii_lowercase()
}
