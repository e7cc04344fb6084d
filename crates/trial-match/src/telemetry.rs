//! Tracing setup for the command line. Logs go to stderr; stdout carries only the JSON
//! envelope.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Targets a bare level applies to. Everything else stays at `warn`.
const MATCHER_TARGETS: [&str; 2] = ["trial_match", "trial_match_cli"];

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directives}'")]
    InvalidFilter {
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error("unable to install tracing subscriber: {0}")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

fn configured_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = scoped_directives(log_level);
    EnvFilter::try_new(&directives)
        .map_err(|source| TelemetryError::InvalidFilter { directives, source })
}

/// Expands a bare level such as `debug` into per-target directives. Full filter strings
/// pass through untouched.
fn scoped_directives(log_level: &str) -> String {
    let level = log_level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    MATCHER_TARGETS
        .iter()
        .fold(String::from("warn"), |mut directives, target| {
            directives.push_str(&format!(",{target}={level}"));
            directives
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_matcher_targets() {
        assert_eq!(
            scoped_directives(" debug "),
            "warn,trial_match=debug,trial_match_cli=debug"
        );
    }

    #[test]
    fn full_filter_strings_pass_through() {
        assert_eq!(
            scoped_directives("trial_match=trace,csv=info"),
            "trial_match=trace,csv=info"
        );
        assert!(configured_filter("trial_match=trace,csv=info").is_ok());
    }

    #[test]
    fn unknown_level_is_rejected_with_its_directives() {
        match configured_filter("chatty") {
            Err(TelemetryError::InvalidFilter { directives, .. }) => {
                assert_eq!(directives, "warn,trial_match=chatty,trial_match_cli=chatty");
            }
            other => panic!("expected invalid filter, got {other:?}"),
        }
    }
}
