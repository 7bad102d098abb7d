use super::args::{Cli, OutputFormat};
use anyhow::{Context, Result};
use sealcheck_evidence::{
    run_verification, ErrorCode, VerificationResult, VerifyOptions, VerifyOptionsOverrides,
};
use std::path::Path;

/// Resolve options: defaults, then the config file, then flags and env.
pub fn resolve_options(cli: &Cli) -> Result<VerifyOptions> {
    let file = match &cli.config {
        Some(path) => load_config(path)?,
        None => VerifyOptionsOverrides::default(),
    };
    Ok(VerifyOptions::default().apply(file.merge(cli.overrides())))
}

fn load_config(path: &Path) -> Result<VerifyOptionsOverrides> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

pub fn run(cli: Cli) -> Result<i32> {
    let opts = match resolve_options(&cli) {
        Ok(opts) => opts,
        Err(e) => {
            tracing::debug!(error = ?e, "option resolution failed");
            let result =
                VerificationResult::failure(ErrorCode::ConfigInvalid, format!("{:#}", e));
            emit(&result, cli.format)?;
            return Ok(result.exit_code());
        }
    };

    let bundle_dir = cli.bundle_dir();
    tracing::info!(bundle_dir = %bundle_dir.display(), canon = %opts.canon, "verifying bundle");

    let result = run_verification(&bundle_dir, &opts);
    emit(&result, cli.format)?;
    Ok(result.exit_code())
}

fn emit(result: &VerificationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", result.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
    }
    Ok(())
}
