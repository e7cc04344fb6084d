//! Invocation boundary: request and response envelopes around the matcher and the
//! explainability engine.

use crate::config::ScoringConfig;
use crate::domain::{MatchResult, Patient, Trial};
use crate::error::AppError;
use crate::explainability::{ExplainabilityEngine, ExplainabilitySummary};
use crate::matching::{MatchOverview, TrialMatcher};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input for ranking (and for the combined analysis).
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub patient: Patient,
    pub trials: Vec<Trial>,
}

pub type AnalyzeRequest = MatchRequest;

/// Input for explainability: a previously produced match list and its patient.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplainRequest {
    pub matches: Vec<MatchResult>,
    pub patient: Patient,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchPayload {
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainPayload {
    pub explainability: ExplainabilitySummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzePayload {
    pub matches: Vec<MatchResult>,
    pub explainability: ExplainabilitySummary,
    pub overview: MatchOverview,
}

/// `{"success": true, ...payload}` or `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> InvocationResponse<T> {
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(error.to_string()),
        }
    }
}

/// Composes the matcher and the explainability engine over one scoring rubric.
pub struct TrialMatchService {
    matcher: TrialMatcher,
    explainer: ExplainabilityEngine,
}

impl TrialMatchService {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            matcher: TrialMatcher::new(config.clone()),
            explainer: ExplainabilityEngine::new(config),
        }
    }

    pub fn match_trials(&self, request: &MatchRequest) -> Result<MatchPayload, AppError> {
        let matches = self.matcher.rank(&request.patient, &request.trials)?;
        Ok(MatchPayload { matches })
    }

    pub fn explain(&self, request: &ExplainRequest) -> ExplainPayload {
        ExplainPayload {
            explainability: self.explainer.summarize(&request.matches, &request.patient),
        }
    }

    /// Ranks, explains, and rolls up in one pass. `min_score` only affects the overview.
    pub fn analyze(
        &self,
        request: &AnalyzeRequest,
        min_score: f64,
    ) -> Result<AnalyzePayload, AppError> {
        let matches = self.matcher.rank(&request.patient, &request.trials)?;
        let explainability = self.explainer.summarize(&matches, &request.patient);
        let overview = MatchOverview::from_matches(&matches, min_score);

        Ok(AnalyzePayload {
            matches,
            explainability,
            overview,
        })
    }

    pub fn handle_match(&self, raw: &str) -> Result<MatchPayload, AppError> {
        let request: MatchRequest = serde_json::from_str(raw)?;
        self.match_trials(&request)
    }

    pub fn handle_explain(&self, raw: &str) -> Result<ExplainPayload, AppError> {
        let request: ExplainRequest = serde_json::from_str(raw)?;
        Ok(self.explain(&request))
    }

    pub fn handle_analyze(&self, raw: &str, min_score: f64) -> Result<AnalyzePayload, AppError> {
        let request: AnalyzeRequest = serde_json::from_str(raw)?;
        self.analyze(&request, min_score)
    }
}

impl Default for TrialMatchService {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
