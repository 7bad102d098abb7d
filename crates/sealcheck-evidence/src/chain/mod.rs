//! Append-only audit chain: `audit_chain.jsonl`.
//!
//! - [`reader`]: parse the log with [`ChainRecords`]
//! - [`verify`]: recompute and cross-check heads with [`ChainVerifier`]

pub mod reader;
pub mod record;
pub mod verify;

pub use reader::{load_chain_log, open_chain_log, ChainRecords};
pub use record::ChainRecord;
pub use verify::{check_chain_head, compute_head, verify_chain, ChainVerifier};
