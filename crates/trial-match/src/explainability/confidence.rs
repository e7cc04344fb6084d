use crate::config::ExplainabilitySettings;
use crate::domain::{round_to, MatchResult, Patient};
use serde::{Deserialize, Serialize};

/// Model confidence indicators, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceMetrics {
    pub overall_confidence: f64,
    pub data_quality: f64,
    pub prediction_stability: f64,
}

const QUALITY_FIELD_WEIGHT: f64 = 0.2;

pub(crate) fn confidence_metrics(
    matches: &[MatchResult],
    patient: &Patient,
    settings: &ExplainabilitySettings,
) -> ConfidenceMetrics {
    if matches.is_empty() {
        return ConfidenceMetrics::default();
    }

    let scores: Vec<f64> = matches.iter().map(|m| m.match_score).collect();
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;

    let overall_confidence = (mean / 100.0).min(1.0);
    let data_quality = patient.completed_quality_fields() as f64 * QUALITY_FIELD_WEIGHT;
    let prediction_stability = (1.0 - variance(&scores, mean) / settings.stability_variance_divisor)
        .max(settings.stability_floor);

    ConfidenceMetrics {
        overall_confidence: round_to(overall_confidence, 3),
        data_quality: round_to(data_quality, 3),
        prediction_stability: round_to(prediction_stability, 3),
    }
}

/// Population variance.
fn variance(values: &[f64], mean: f64) -> f64 {
    values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64
}
