use crate::config::{ExplanationThresholds, FactorBand, FactorWeights};
use crate::domain::{round_to, ExplanationFactor, ExplanationFactors, FactorKind};

use super::FactorScores;

/// Classifies each factor as positive, negative, or neither, in evaluation order.
pub(crate) fn explain(
    scores: &FactorScores,
    weights: &FactorWeights,
    thresholds: &ExplanationThresholds,
) -> ExplanationFactors {
    let mut factors = ExplanationFactors::default();

    for kind in FactorKind::ordered() {
        let score = scores.get(kind);
        let weight = weight_for(kind, weights);
        let band = band_for(kind, thresholds);

        if score >= band.positive {
            factors.positive.push(ExplanationFactor {
                factor: kind,
                impact: round_to(score * weight, 3),
                description: describe(kind, true, score),
            });
        } else if score < band.negative {
            factors.negative.push(ExplanationFactor {
                factor: kind,
                impact: round_to((1.0 - score) * weight, 3),
                description: describe(kind, false, score),
            });
        }
    }

    factors
}

fn weight_for(kind: FactorKind, weights: &FactorWeights) -> f64 {
    match kind {
        FactorKind::Biomarker => weights.biomarker,
        FactorKind::Location => weights.location,
        FactorKind::Burden => weights.burden,
        FactorKind::Eligibility => weights.eligibility,
    }
}

fn band_for(kind: FactorKind, thresholds: &ExplanationThresholds) -> FactorBand {
    match kind {
        FactorKind::Biomarker => thresholds.biomarker,
        FactorKind::Location => thresholds.location,
        FactorKind::Burden => thresholds.burden,
        FactorKind::Eligibility => thresholds.eligibility,
    }
}

fn describe(kind: FactorKind, positive: bool, score: f64) -> String {
    let headline = match (kind, positive) {
        (FactorKind::Biomarker, true) => "Excellent biomarker compatibility",
        (FactorKind::Biomarker, false) => "Limited biomarker compatibility",
        (FactorKind::Location, true) => "Favorable location match",
        (FactorKind::Location, false) => "Location may require significant travel",
        (FactorKind::Burden, true) => "Manageable treatment burden",
        (FactorKind::Burden, false) => "High treatment burden may be challenging",
        (FactorKind::Eligibility, true) => "Meets all eligibility criteria",
        (FactorKind::Eligibility, false) => "Some eligibility concerns",
    };

    format!("{headline} ({:.0}%)", score * 100.0)
}
