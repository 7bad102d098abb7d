//! Final PASS/FAIL result of a run and its human-readable rendering.

use crate::bundle::{verify_bundle_dir, VerifyReport};
use crate::error::{ErrorClass, ErrorCode, VerifyError};
use crate::options::VerifyOptions;
use serde::Serialize;
use std::path::Path;

pub const EXIT_PASS: i32 = 0;
pub const EXIT_FAIL: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

/// Result of one verification run.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<ErrorClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub bundle: Option<String>,
    pub manifest_sha256: Option<String>,
    pub chain_head: Option<String>,
    pub chain_records: Option<usize>,
    pub files_verified: usize,
    pub warnings: Vec<String>,
}

impl From<VerifyReport> for VerificationResult {
    fn from(report: VerifyReport) -> Self {
        Self {
            status: Status::Pass,
            code: None,
            class: None,
            message: None,
            bundle: Some(report.bundle),
            manifest_sha256: Some(report.manifest_sha256),
            chain_head: report.chain.as_ref().map(|c| c.head.clone()),
            chain_records: report.chain.as_ref().map(|c| c.records),
            files_verified: report.files_verified,
            warnings: report.warnings,
        }
    }
}

impl From<VerifyError> for VerificationResult {
    fn from(err: VerifyError) -> Self {
        Self::failure(err.code, err.message)
    }
}

impl VerificationResult {
    /// A failure that did not come from the verifier itself (e.g. an unreadable config).
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            code: Some(code),
            class: Some(code.class()),
            message: Some(message.into()),
            bundle: None,
            manifest_sha256: None,
            chain_head: None,
            chain_records: None,
            files_verified: 0,
            warnings: Vec::new(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == Status::Pass
    }

    pub fn exit_code(&self) -> i32 {
        match self.status {
            Status::Pass => EXIT_PASS,
            Status::Fail => EXIT_FAIL,
        }
    }

    /// Line-oriented report: `WARN:` lines, then `FAIL: <reason>` or the `PASS` block.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for warning in &self.warnings {
            out.push_str(&format!("WARN: {}\n", warning));
        }
        match self.status {
            Status::Fail => {
                let message = self.message.as_deref().unwrap_or("verification failed");
                out.push_str(&format!("FAIL: {}\n", message));
            }
            Status::Pass => {
                out.push_str("PASS\n");
                if let Some(bundle) = &self.bundle {
                    out.push_str(&format!("bundle: {}\n", bundle));
                }
                if let Some(digest) = &self.manifest_sha256 {
                    out.push_str(&format!("manifest_sha256: {}\n", digest));
                }
                if let Some(head) = &self.chain_head {
                    out.push_str(&format!("chain_head: {}\n", head));
                }
            }
        }
        out
    }
}

/// Verify `bundle_dir` and fold the outcome into a [`VerificationResult`].
pub fn run_verification(bundle_dir: &Path, opts: &VerifyOptions) -> VerificationResult {
    match verify_bundle_dir(bundle_dir, opts) {
        Ok(report) => report.into(),
        Err(err) => {
            tracing::debug!(code = %err.code, class = %err.class, "verification failed");
            err.into()
        }
    }
}
