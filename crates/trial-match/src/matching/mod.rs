//! Multi-factor scoring of candidate trials against one patient.
//!
//! Four independent factor scorers feed a fixed weighted sum. The matcher ranks every
//! trial it is given; threshold filtering belongs to the caller.

mod explanation;
pub mod factors;
mod location;
mod overview;

#[cfg(test)]
mod tests;

pub use location::{LocationCompatibility, RegionHeuristic};
pub use overview::MatchOverview;
pub(crate) use overview::best_match;

use crate::config::{LikelihoodThresholds, ScoringConfig};
use crate::domain::{
    round_to, CompletionLikelihood, FactorKind, MatchResult, Patient, Trial, TrialId,
};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Raw factor scores for one patient/trial pair, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    pub biomarker: f64,
    pub location: f64,
    pub burden: f64,
    pub eligibility: f64,
}

impl FactorScores {
    pub fn get(&self, kind: FactorKind) -> f64 {
        match kind {
            FactorKind::Biomarker => self.biomarker,
            FactorKind::Location => self.location,
            FactorKind::Burden => self.burden,
            FactorKind::Eligibility => self.eligibility,
        }
    }
}

impl CompletionLikelihood {
    /// Buckets an overall score on the 0-1 scale.
    pub fn from_overall(overall: f64, thresholds: &LikelihoodThresholds) -> Self {
        if overall >= thresholds.high {
            CompletionLikelihood::High
        } else if overall >= thresholds.medium {
            CompletionLikelihood::Medium
        } else {
            CompletionLikelihood::Low
        }
    }
}

/// Stateless matcher that applies a scoring rubric to patient/trial pairs.
pub struct TrialMatcher<L = RegionHeuristic> {
    config: ScoringConfig,
    location: L,
}

impl TrialMatcher<RegionHeuristic> {
    pub fn new(config: ScoringConfig) -> Self {
        let location = RegionHeuristic::new(config.travel.clone());
        Self { config, location }
    }
}

impl Default for TrialMatcher<RegionHeuristic> {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl<L> TrialMatcher<L>
where
    L: LocationCompatibility,
{
    /// Builds a matcher that delegates location scoring to `location`.
    pub fn with_location(config: ScoringConfig, location: L) -> Self {
        Self { config, location }
    }

    /// Scores every trial and returns the results ranked by match score, highest first.
    /// Equal scores keep their input order.
    pub fn rank(
        &self,
        patient: &Patient,
        trials: &[Trial],
    ) -> Result<Vec<MatchResult>, MatchError> {
        let mut matches = trials
            .iter()
            .map(|trial| self.assess(patient, trial))
            .collect::<Result<Vec<_>, _>>()?;

        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        });

        info!(
            trials = trials.len(),
            top_score = matches.first().map(|m| m.match_score),
            "ranked candidate trials"
        );

        Ok(matches)
    }

    /// Scores a single trial.
    pub fn assess(&self, patient: &Patient, trial: &Trial) -> Result<MatchResult, MatchError> {
        let scores = self.factor_scores(patient, trial)?;
        let overall = self.overall_score(&scores);
        let completion_likelihood =
            CompletionLikelihood::from_overall(overall, &self.config.likelihood);
        let explanation_factors = explanation::explain(
            &scores,
            &self.config.weights,
            &self.config.explanation,
        );

        debug!(
            trial = %trial.id,
            biomarker = scores.biomarker,
            location = scores.location,
            burden = scores.burden,
            eligibility = scores.eligibility,
            overall,
            "scored trial"
        );

        Ok(MatchResult {
            trial_id: trial.id.clone(),
            match_score: round_to(overall * 100.0, 1),
            biomarker_score: round_to(scores.biomarker * 100.0, 1),
            location_score: round_to(scores.location * 100.0, 1),
            burden_score: round_to(scores.burden * 100.0, 1),
            completion_likelihood,
            explanation_factors,
        })
    }

    pub fn factor_scores(
        &self,
        patient: &Patient,
        trial: &Trial,
    ) -> Result<FactorScores, MatchError> {
        let age = patient.age.ok_or(MatchError::MissingPatientField("age"))?;
        if !trial.inclusion_criteria.age_range.is_well_formed() {
            return Err(MatchError::InvalidAgeRange {
                trial: trial.id.clone(),
                min: trial.inclusion_criteria.age_range.min,
                max: trial.inclusion_criteria.age_range.max,
            });
        }

        let biomarker = factors::biomarker_score(
            patient.biomarkers.values(),
            &trial.inclusion_criteria.biomarkers,
        );
        let location = self.location.score(
            patient.location(),
            &trial.location,
            patient.travel_willingness(),
        );
        let burden = factors::burden_score(
            age,
            patient.cancer_stage(),
            patient.previous_treatments.len(),
            trial.treatment_burden.as_deref(),
            &self.config.burden,
        );
        let eligibility = factors::eligibility_score(age, patient, trial, &self.config.eligibility);

        Ok(FactorScores {
            biomarker,
            location,
            burden,
            eligibility,
        })
    }

    /// Weighted sum of the factor scores on the 0-1 scale.
    pub fn overall_score(&self, scores: &FactorScores) -> f64 {
        let weights = &self.config.weights;
        scores.biomarker * weights.biomarker
            + scores.location * weights.location
            + scores.burden * weights.burden
            + scores.eligibility * weights.eligibility
    }
}

/// Structural problems that prevent a trial from being scored.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("patient record is missing required field '{0}'")]
    MissingPatientField(&'static str),
    #[error("trial {trial} has an invalid age range ({min} > {max})")]
    InvalidAgeRange { trial: TrialId, min: u32, max: u32 },
}
