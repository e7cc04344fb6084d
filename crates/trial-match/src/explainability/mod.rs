//! Aggregate explanations over a ranked match list.

mod confidence;
mod importance;
mod narrative;

pub use confidence::ConfidenceMetrics;

use crate::config::ScoringConfig;
use crate::domain::{MatchResult, Patient};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Features reported in the importance map, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Biomarkers,
    Location,
    Burden,
    Age,
    Treatments,
}

/// Summary statistics and narrative for one patient's match list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainabilitySummary {
    pub feature_importance: IndexMap<Feature, f64>,
    pub confidence_metrics: ConfidenceMetrics,
    pub model_summary: String,
}

/// Stateless aggregator sharing the matcher's scoring rubric.
pub struct ExplainabilityEngine {
    config: ScoringConfig,
}

impl ExplainabilityEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn summarize(&self, matches: &[MatchResult], patient: &Patient) -> ExplainabilitySummary {
        let settings = &self.config.explainability;

        let summary = ExplainabilitySummary {
            feature_importance: importance::feature_importance(
                matches,
                &self.config.weights,
                settings,
            ),
            confidence_metrics: confidence::confidence_metrics(matches, patient, settings),
            model_summary: narrative::model_summary(matches, patient, settings),
        };

        info!(
            matches = matches.len(),
            confidence = summary.confidence_metrics.overall_confidence,
            "summarized match explainability"
        );

        summary
    }
}

impl Default for ExplainabilityEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletionLikelihood, ExplanationFactors, TrialId};
    use indexmap::IndexMap;

    fn scored(
        id: &str,
        match_score: f64,
        biomarker: f64,
        location: f64,
        burden: f64,
    ) -> MatchResult {
        MatchResult {
            trial_id: TrialId::from(id),
            match_score,
            biomarker_score: biomarker,
            location_score: location,
            burden_score: burden,
            completion_likelihood: CompletionLikelihood::Medium,
            explanation_factors: ExplanationFactors::default(),
        }
    }

    fn ranked() -> Vec<MatchResult> {
        vec![
            scored("B", 74.4, 100.0, 40.0, 57.6),
            scored("A", 63.2, 33.3, 100.0, 46.1),
            scored("C", 51.1, 50.0, 40.0, 30.0),
        ]
    }

    fn patient() -> Patient {
        let mut biomarkers = IndexMap::new();
        biomarkers.insert("a".to_string(), "EGFR".to_string());
        biomarkers.insert("b".to_string(), "KRAS".to_string());
        Patient {
            age: Some(45),
            primary_diagnosis: Some("Lung Cancer".to_string()),
            cancer_stage: Some("Stage III".to_string()),
            location: Some("Boston, MA".to_string()),
            travel_willingness: Some("Within 50 miles".to_string()),
            biomarkers,
            previous_treatments: Vec::new(),
        }
    }

    #[test]
    fn feature_importance_averages_weighted_scores() {
        let summary = ExplainabilityEngine::default().summarize(&ranked(), &patient());

        let features: Vec<(Feature, f64)> = summary
            .feature_importance
            .iter()
            .map(|(feature, value)| (*feature, *value))
            .collect();
        assert_eq!(
            features,
            vec![
                (Feature::Biomarkers, 0.214),
                (Feature::Location, 0.15),
                (Feature::Burden, 0.111),
                (Feature::Age, 0.15),
                (Feature::Treatments, -0.08),
            ]
        );
    }

    #[test]
    fn confidence_metrics_reflect_scores_and_record_quality() {
        let summary = ExplainabilityEngine::default().summarize(&ranked(), &patient());

        assert_eq!(
            summary.confidence_metrics,
            ConfidenceMetrics {
                overall_confidence: 0.629,
                data_quality: 1.0,
                prediction_stability: 0.909,
            }
        );
    }

    #[test]
    fn data_quality_drops_a_fifth_per_missing_field() {
        let patient = Patient {
            location: None,
            ..patient()
        };
        let summary = ExplainabilityEngine::default().summarize(&ranked(), &patient);
        assert_eq!(summary.confidence_metrics.data_quality, 0.8);
    }

    #[test]
    fn prediction_stability_is_floored() {
        let matches = vec![
            scored("high", 100.0, 100.0, 100.0, 100.0),
            scored("low", 0.0, 0.0, 0.0, 0.0),
        ];
        let summary = ExplainabilityEngine::default().summarize(&matches, &patient());
        assert_eq!(summary.confidence_metrics.prediction_stability, 0.5);
        assert_eq!(summary.confidence_metrics.overall_confidence, 0.5);
    }

    #[test]
    fn empty_match_list_degrades_to_defaults() {
        let summary = ExplainabilityEngine::default().summarize(&[], &patient());

        assert!(summary.feature_importance.is_empty());
        assert_eq!(summary.confidence_metrics, ConfidenceMetrics::default());
        assert_eq!(
            summary.model_summary,
            "No suitable trials found for this patient profile."
        );
    }

    #[test]
    fn narrative_lists_biomarkers_in_supplied_order() {
        let summary = ExplainabilityEngine::default().summarize(&ranked(), &patient());
        assert_eq!(
            summary.model_summary,
            "The matching algorithm identified this patient as a good candidate for clinical \
             trials based on Lung Cancer diagnosis and EGFR, KRAS biomarker profile."
        );
    }

    #[test]
    fn narrative_recommends_top_trial_for_strong_matches() {
        let patient = Patient {
            biomarkers: IndexMap::new(),
            ..patient()
        };
        let matches = vec![scored("A", 86.0, 100.0, 100.0, 70.0)];

        let summary = ExplainabilityEngine::default().summarize(&matches, &patient);

        assert_eq!(
            summary.model_summary,
            "The matching algorithm identified this patient as an excellent candidate for \
             clinical trials based on Lung Cancer diagnosis. The model recommends prioritizing \
             the top-ranked trial due to high compatibility scores."
        );
    }

    #[test]
    fn narrative_bands_follow_best_score() {
        let engine = ExplainabilityEngine::default();
        let patient = Patient {
            primary_diagnosis: None,
            biomarkers: IndexMap::new(),
            ..patient()
        };

        let moderate = engine.summarize(&[scored("A", 50.0, 0.0, 0.0, 0.0)], &patient);
        assert_eq!(
            moderate.model_summary,
            "The matching algorithm identified this patient as a moderate candidate for \
             clinical trials based on cancer diagnosis."
        );

        let limited = engine.summarize(&[scored("A", 49.9, 0.0, 0.0, 0.0)], &patient);
        assert!(limited.model_summary.contains("having limited trial options"));

        let good_with_recommendation =
            engine.summarize(&[scored("A", 80.0, 0.0, 0.0, 0.0)], &patient);
        assert!(good_with_recommendation
            .model_summary
            .contains("a good candidate for clinical trials"));
        assert!(good_with_recommendation
            .model_summary
            .ends_with("due to high compatibility scores."));
    }

    #[test]
    fn importance_rounds_half_thousandths_from_the_stored_value() {
        let matches = vec![scored("A", 40.0, 0.0, 0.0, 3.0)];
        let summary = ExplainabilityEngine::default().summarize(&matches, &patient());

        assert_eq!(summary.feature_importance[&Feature::Burden], 0.007);
        assert_eq!(summary.feature_importance[&Feature::Biomarkers], 0.0);
    }

    #[test]
    fn summary_serializes_with_snake_case_keys() {
        let summary = ExplainabilityEngine::default().summarize(&ranked(), &patient());
        let value = serde_json::to_value(&summary).expect("serialize");

        assert_eq!(value["feature_importance"]["treatments"], -0.08);
        assert_eq!(value["confidence_metrics"]["data_quality"], 1.0);
        assert!(value["model_summary"].is_string());
    }
}
