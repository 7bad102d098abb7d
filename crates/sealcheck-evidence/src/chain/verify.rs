//! Hash-chain recomputation.
//!
//! Each head is `sha256(prev_head + canonical(payload))` in lowercase hex,
//! starting from [`SENTINEL_DIGEST`]. Heads are recomputed from payloads
//! alone; stored `prev`/`head` values are only ever compared, never trusted.
//! Changing any payload, any stored digest, or the record order breaks the
//! chain at that record, and comparing the final head against the manifest
//! catches records dropped from the tail.

use crate::chain::record::ChainRecord;
use crate::crypto::canon::CanonScheme;
use crate::crypto::digest::{normalize_digest, sha256_hex, SENTINEL_DIGEST};
use crate::error::{ErrorCode, VerifyError, VerifyResult};
use serde_json::Value;

/// Head of the record that follows `prev` and carries `payload`.
pub fn compute_head(prev: &str, payload: &Value, canon: CanonScheme) -> VerifyResult<String> {
    let canonical = canon.canonicalize(payload).map_err(|e| {
        VerifyError::new(
            ErrorCode::ChainRecordInvalid,
            format!("cannot canonicalize payload: {}", e),
        )
        .with_source(e)
    })?;

    let mut material = String::with_capacity(prev.len() + canonical.len());
    material.push_str(prev);
    material.push_str(&canonical);
    Ok(sha256_hex(material.as_bytes()))
}

/// Incremental chain verifier; feed records in log order.
#[derive(Debug, Clone)]
pub struct ChainVerifier {
    canon: CanonScheme,
    running_prev: String,
    last_index: Option<u64>,
    records: usize,
}

impl ChainVerifier {
    pub fn new(canon: CanonScheme) -> Self {
        Self {
            canon,
            running_prev: SENTINEL_DIGEST.to_string(),
            last_index: None,
            records: 0,
        }
    }

    /// Verify the next record and advance the running head.
    pub fn push(&mut self, record: &ChainRecord) -> VerifyResult<()> {
        let expected_head = compute_head(&self.running_prev, &record.payload, self.canon)?;

        if record.prev != self.running_prev {
            return Err(VerifyError::new(
                ErrorCode::ChainPrevMismatch,
                format!(
                    "chain prev mismatch at i={}: expected {}, got {}",
                    record.i, self.running_prev, record.prev
                ),
            ));
        }

        if record.head != expected_head {
            return Err(VerifyError::new(
                ErrorCode::ChainHeadMismatch,
                format!(
                    "chain head mismatch at i={}: expected {}, got {}",
                    record.i, expected_head, record.head
                ),
            ));
        }

        // `i` is outside the hashed material; hold it to strict ordering.
        if let Some(last) = self.last_index {
            if record.i <= last {
                return Err(VerifyError::new(
                    ErrorCode::ChainIndexOrder,
                    format!(
                        "chain index out of order: i={} follows i={}",
                        record.i, last
                    ),
                ));
            }
        }

        tracing::trace!(i = record.i, head = %expected_head, "chain record verified");
        self.last_index = Some(record.i);
        self.running_prev = expected_head;
        self.records += 1;
        Ok(())
    }

    pub fn records(&self) -> usize {
        self.records
    }

    /// Finish the chain, returning the computed head.
    pub fn finish(self) -> String {
        self.running_prev
    }
}

/// Verify a complete chain and return its computed head.
pub fn verify_chain<'a, I>(records: I, canon: CanonScheme) -> VerifyResult<String>
where
    I: IntoIterator<Item = &'a ChainRecord>,
{
    let mut verifier = ChainVerifier::new(canon);
    for record in records {
        verifier.push(record)?;
    }
    Ok(verifier.finish())
}

/// Compare the computed chain head against the manifest's declared head.
pub fn check_chain_head(expected: &str, computed: &str) -> VerifyResult<()> {
    if normalize_digest(expected) != computed {
        return Err(VerifyError::new(
            ErrorCode::ChainHeadTotalMismatch,
            format!(
                "chain_head mismatch\n expected: {}\n got: {}",
                expected, computed
            ),
        ));
    }
    Ok(())
}
