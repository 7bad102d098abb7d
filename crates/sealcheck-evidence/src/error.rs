//! Typed verification errors with stable codes.

use serde::Serialize;

/// Verification error classification.
///
/// `Integrity` failures mean the bundle content disagrees with what it
/// claims; every other class means the bundle could not be checked at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorClass {
    Integrity,
    Contract,
    Security,
    Limits,
    Io,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Stable error codes for verification failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BundleNotFound,
    FileMissing,
    HashMismatch,
    ChainPrevMismatch,
    ChainHeadMismatch,
    ChainHeadTotalMismatch,
    ChainIndexOrder,
    ChainLogMissing,
    ManifestInvalid,
    ChainRecordInvalid,
    SecurityPathTraversal,
    SecurityAbsolutePath,
    LimitManifestBytes,
    LimitLineBytes,
    LimitRecords,
    ConfigInvalid,
    Io,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BundleNotFound => "BUNDLE_NOT_FOUND",
            ErrorCode::FileMissing => "FILE_MISSING",
            ErrorCode::HashMismatch => "HASH_MISMATCH",
            ErrorCode::ChainPrevMismatch => "CHAIN_PREV_MISMATCH",
            ErrorCode::ChainHeadMismatch => "CHAIN_HEAD_MISMATCH",
            ErrorCode::ChainHeadTotalMismatch => "CHAIN_HEAD_TOTAL_MISMATCH",
            ErrorCode::ChainIndexOrder => "CHAIN_INDEX_ORDER",
            ErrorCode::ChainLogMissing => "CHAIN_LOG_MISSING",
            ErrorCode::ManifestInvalid => "MANIFEST_INVALID",
            ErrorCode::ChainRecordInvalid => "CHAIN_RECORD_INVALID",
            ErrorCode::SecurityPathTraversal => "SECURITY_PATH_TRAVERSAL",
            ErrorCode::SecurityAbsolutePath => "SECURITY_ABSOLUTE_PATH",
            ErrorCode::LimitManifestBytes => "LIMIT_MANIFEST_BYTES",
            ErrorCode::LimitLineBytes => "LIMIT_LINE_BYTES",
            ErrorCode::LimitRecords => "LIMIT_RECORDS",
            ErrorCode::ConfigInvalid => "CONFIG_INVALID",
            ErrorCode::Io => "IO",
        }
    }

    /// The class every code belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            ErrorCode::HashMismatch
            | ErrorCode::ChainPrevMismatch
            | ErrorCode::ChainHeadMismatch
            | ErrorCode::ChainHeadTotalMismatch
            | ErrorCode::ChainIndexOrder => ErrorClass::Integrity,
            ErrorCode::BundleNotFound
            | ErrorCode::FileMissing
            | ErrorCode::ChainLogMissing
            | ErrorCode::ManifestInvalid
            | ErrorCode::ChainRecordInvalid
            | ErrorCode::ConfigInvalid => ErrorClass::Contract,
            ErrorCode::SecurityPathTraversal | ErrorCode::SecurityAbsolutePath => {
                ErrorClass::Security
            }
            ErrorCode::LimitManifestBytes | ErrorCode::LimitLineBytes | ErrorCode::LimitRecords => {
                ErrorClass::Limits
            }
            ErrorCode::Io => ErrorClass::Io,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed verification error with stable code.
///
/// `message` is the human-readable reason printed after `FAIL:`; it already
/// names the path, record index or digests involved.
#[derive(Debug, thiserror::Error)]
#[error("{class}: {message} ({code})")]
pub struct VerifyError {
    pub class: ErrorClass,
    pub code: ErrorCode,
    pub message: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

pub type VerifyResult<T> = Result<T, VerifyError>;

impl VerifyError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            class: code.class(),
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.message = format!("{}: {}", context.into(), self.message);
        self
    }

    pub fn class(&self) -> ErrorClass {
        self.class
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Mismatch of bundle content, as opposed to unreadable or malformed input.
    pub fn is_integrity(&self) -> bool {
        self.class == ErrorClass::Integrity
    }
}

impl From<std::io::Error> for VerifyError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorCode::Io, err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_to_classes() {
        assert_eq!(ErrorCode::HashMismatch.class(), ErrorClass::Integrity);
        assert_eq!(ErrorCode::ManifestInvalid.class(), ErrorClass::Contract);
        assert_eq!(ErrorCode::ChainRecordInvalid.class(), ErrorClass::Contract);
        assert_eq!(
            ErrorCode::SecurityPathTraversal.class(),
            ErrorClass::Security
        );
        assert_eq!(ErrorCode::LimitLineBytes.class(), ErrorClass::Limits);
    }

    #[test]
    fn test_code_serializes_as_stable_string() {
        let json = serde_json::to_string(&ErrorCode::ChainHeadTotalMismatch).unwrap();
        assert_eq!(json, r#""CHAIN_HEAD_TOTAL_MISMATCH""#);
        assert_eq!(
            ErrorCode::ChainHeadTotalMismatch.to_string(),
            "CHAIN_HEAD_TOTAL_MISMATCH"
        );
    }

    #[test]
    fn test_io_error_is_io_class() {
        let err = VerifyError::from(std::io::Error::other("disk on fire"));
        assert_eq!(err.code(), ErrorCode::Io);
        assert_eq!(err.class(), ErrorClass::Io);
        assert!(!err.is_integrity());
    }

    #[test]
    fn test_display_includes_class_and_code() {
        let err = VerifyError::new(ErrorCode::FileMissing, "missing file a.txt");
        assert_eq!(err.to_string(), "Contract: missing file a.txt (FILE_MISSING)");
    }
}
