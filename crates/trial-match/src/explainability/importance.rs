use crate::config::{ExplainabilitySettings, FactorWeights};
use crate::domain::{round_to, MatchResult};
use indexmap::IndexMap;

use super::Feature;

/// Average weighted contribution of each scored factor, plus the fixed age and treatment
/// entries. Empty input yields an empty map.
pub(crate) fn feature_importance(
    matches: &[MatchResult],
    weights: &FactorWeights,
    settings: &ExplainabilitySettings,
) -> IndexMap<Feature, f64> {
    let mut importance = IndexMap::new();
    if matches.is_empty() {
        return importance;
    }

    importance.insert(
        Feature::Biomarkers,
        weighted_average(matches, |m| m.biomarker_score, weights.biomarker),
    );
    importance.insert(
        Feature::Location,
        weighted_average(matches, |m| m.location_score, weights.location),
    );
    importance.insert(
        Feature::Burden,
        weighted_average(matches, |m| m.burden_score, weights.burden),
    );
    // TODO: derive these from dedicated age and treatment-history scorers once the matcher
    // emits them.
    importance.insert(Feature::Age, round_to(settings.age_importance, 3));
    importance.insert(
        Feature::Treatments,
        round_to(settings.treatments_importance, 3),
    );

    importance
}

fn weighted_average<F>(matches: &[MatchResult], score: F, weight: f64) -> f64
where
    F: Fn(&MatchResult) -> f64,
{
    let total: f64 = matches
        .iter()
        .map(|candidate| score(candidate) / 100.0 * weight)
        .sum();
    round_to(total / matches.len() as f64, 3)
}
