mod scoring;

pub use scoring::{
    BurdenModel, EligibilityPenalties, ExplainabilitySettings, ExplanationThresholds, FactorBand,
    FactorWeights, LikelihoodThresholds, ScoringConfig, TravelTable,
};

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub scoring_source: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("TRIAL_MATCH_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("TRIAL_MATCH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let scoring_source = env::var("TRIAL_MATCH_SCORING_CONFIG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let scoring = match &scoring_source {
            Some(path) => load_scoring_file(path)?,
            None => ScoringConfig::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring,
            scoring_source,
        })
    }

    /// Replaces the scoring rubric with the contents of `path`.
    pub fn with_scoring_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        self.scoring = load_scoring_file(path)?;
        self.scoring_source = Some(path.to_path_buf());
        Ok(self)
    }
}

fn load_scoring_file(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ScoringFile {
        path: path.to_path_buf(),
        source,
    })?;
    let scoring = ScoringConfig::from_json(&raw).map_err(|source| ConfigError::ScoringFormat {
        path: path.to_path_buf(),
        source,
    })?;

    if !scoring.weights.validate() {
        return Err(ConfigError::WeightSum {
            sum: scoring.weights.sum(),
        });
    }

    Ok(scoring)
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    ScoringFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    WeightSum {
        sum: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ScoringFile { path, .. } => {
                write!(f, "unable to read scoring config {}", path.display())
            }
            ConfigError::ScoringFormat { path, source } => {
                write!(f, "invalid scoring config {}: {}", path.display(), source)
            }
            ConfigError::WeightSum { sum } => {
                write!(f, "factor weights must sum to 1.0 (got {sum:.4})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ScoringFile { source, .. } => Some(source),
            ConfigError::ScoringFormat { source, .. } => Some(source),
            ConfigError::WeightSum { .. } => None,
        }
    }
}
