//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use sealcheck_evidence::{CanonScheme, VerifyOptionsOverrides};

#[derive(Parser, Debug)]
#[command(
    name = "sealcheck",
    version,
    about = "Verify an evidence bundle offline: manifest digests and the hash-chained audit log"
)]
pub struct Cli {
    /// Bundle directory (contains manifest.json)
    #[arg(value_name = "BUNDLE_DIR", required_unless_present = "bundle_flag")]
    pub bundle: Option<PathBuf>,

    /// Bundle directory, as a flag
    #[arg(long = "bundle", value_name = "DIR", conflicts_with = "bundle")]
    pub bundle_flag: Option<PathBuf>,

    /// JSON file with option overrides (chunk_size, canon, max_line_bytes, ...)
    #[arg(long, env = "SEALCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Payload canonicalization used when recomputing chain heads
    #[arg(long, env = "SEALCHECK_CANON")]
    pub canon: Option<CanonScheme>,

    /// Fail when the audit chain log is absent instead of warning
    #[arg(long, env = "SEALCHECK_REQUIRE_CHAIN")]
    pub require_chain: bool,

    /// Read size in bytes when hashing files
    #[arg(long, env = "SEALCHECK_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log verbosity on stderr (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn bundle_dir(&self) -> PathBuf {
        self.bundle
            .clone()
            .or_else(|| self.bundle_flag.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Overrides given on the command line (or their environment variables).
    pub fn overrides(&self) -> VerifyOptionsOverrides {
        VerifyOptionsOverrides {
            chunk_size: self.chunk_size,
            canon: self.canon,
            require_chain: self.require_chain.then_some(true),
            ..Default::default()
        }
    }
}
