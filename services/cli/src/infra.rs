use clap::Args;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use trial_match::config::AppConfig;
use trial_match::error::AppError;
use trial_match::invocation::InvocationResponse;
use trial_match::telemetry;

#[derive(Args, Debug, Default)]
pub(crate) struct InputArgs {
    /// JSON request file. Reads stdin when omitted.
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OutputArgs {
    /// Pretty-print the JSON envelope
    #[arg(long)]
    pub(crate) pretty: bool,
}

/// Loads environment configuration, applies a `--config` override, and starts tracing.
pub(crate) fn bootstrap(scoring_override: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = scoring_override {
        config = config.with_scoring_file(path)?;
    }

    telemetry::init(&config.telemetry)?;
    tracing::debug!(
        environment = ?config.environment,
        scoring = ?config.scoring_source,
        "configuration loaded"
    );

    Ok(config)
}

pub(crate) fn read_input(args: &InputArgs) -> Result<String, AppError> {
    match &args.input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Writes the success envelope for `payload` to stdout.
pub(crate) fn emit<T: Serialize>(payload: T, output: &OutputArgs) -> Result<(), AppError> {
    let envelope = InvocationResponse::success(payload);
    let body = if output.pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{body}")?;
    Ok(())
}
