use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every weight, threshold, and lookup table the matcher and the explainability
/// aggregator consult. `Default` reproduces the production rubric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: FactorWeights,
    pub likelihood: LikelihoodThresholds,
    pub explanation: ExplanationThresholds,
    pub burden: BurdenModel,
    pub eligibility: EligibilityPenalties,
    pub travel: TravelTable,
    pub explainability: ExplainabilitySettings,
}

impl ScoringConfig {
    /// Loads a JSON document; fields it omits keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Weights for the overall score. They must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    pub biomarker: f64,
    pub location: f64,
    pub burden: f64,
    pub eligibility: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            biomarker: 0.35,
            location: 0.25,
            burden: 0.25,
            eligibility: 0.15,
        }
    }
}

impl FactorWeights {
    pub fn sum(&self) -> f64 {
        self.biomarker + self.location + self.burden + self.eligibility
    }

    pub fn validate(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }
}

/// Lower bounds, on the 0-1 scale, for the High and Medium completion buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikelihoodThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for LikelihoodThresholds {
    fn default() -> Self {
        Self {
            high: 0.8,
            medium: 0.6,
        }
    }
}

/// A factor is positive at or above `positive` and negative strictly below `negative`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorBand {
    pub positive: f64,
    pub negative: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationThresholds {
    pub biomarker: FactorBand,
    pub location: FactorBand,
    pub burden: FactorBand,
    pub eligibility: FactorBand,
}

impl Default for ExplanationThresholds {
    fn default() -> Self {
        Self {
            biomarker: FactorBand {
                positive: 0.8,
                negative: 0.5,
            },
            location: FactorBand {
                positive: 0.7,
                negative: 0.4,
            },
            burden: FactorBand {
                positive: 0.7,
                negative: 0.5,
            },
            eligibility: FactorBand {
                positive: 0.8,
                negative: 0.6,
            },
        }
    }
}

/// Multiplicative treatment-burden tolerance model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurdenModel {
    pub base_tolerance: f64,
    /// Ages strictly above this are scaled by `senior_factor`.
    pub senior_age: u32,
    pub senior_factor: f64,
    /// Ages strictly below this are scaled by `young_factor`.
    pub young_age: u32,
    pub young_factor: f64,
    pub stage_factors: BTreeMap<String, f64>,
    pub default_stage_factor: f64,
    /// More previous treatments than this scales tolerance by `treatment_history_factor`.
    pub treatment_history_limit: usize,
    pub treatment_history_factor: f64,
    pub trial_burden_factors: BTreeMap<String, f64>,
    pub default_trial_burden_factor: f64,
}

impl Default for BurdenModel {
    fn default() -> Self {
        Self {
            base_tolerance: 0.8,
            senior_age: 70,
            senior_factor: 0.8,
            young_age: 40,
            young_factor: 1.1,
            stage_factors: table(&[
                ("Stage I", 1.0),
                ("Stage II", 0.9),
                ("Stage III", 0.8),
                ("Stage IV", 0.7),
            ]),
            default_stage_factor: 0.8,
            treatment_history_limit: 2,
            treatment_history_factor: 0.9,
            trial_burden_factors: table(&[("Low", 1.0), ("Medium", 0.8), ("High", 0.6)]),
            default_trial_burden_factor: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityPenalties {
    pub age_outside_range: f64,
    pub cancer_type_mismatch: f64,
    pub stage_mismatch: f64,
}

impl Default for EligibilityPenalties {
    fn default() -> Self {
        Self {
            age_outside_range: 0.3,
            cancer_type_mismatch: 0.2,
            stage_mismatch: 0.7,
        }
    }
}

/// Fallback location scores keyed by the patient's travel willingness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelTable {
    pub willingness: BTreeMap<String, f64>,
    pub default_score: f64,
}

impl Default for TravelTable {
    fn default() -> Self {
        Self {
            willingness: table(&[
                ("Within 25 miles", 0.2),
                ("Within 50 miles", 0.4),
                ("Within 100 miles", 0.6),
                ("Willing to travel anywhere", 0.8),
            ]),
            default_score: 0.3,
        }
    }
}

impl TravelTable {
    pub fn score_for(&self, willingness: Option<&str>) -> f64 {
        willingness
            .and_then(|value| self.willingness.get(value))
            .copied()
            .unwrap_or(self.default_score)
    }
}

/// Constants consumed by the explainability aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainabilitySettings {
    /// Reported as-is; no dedicated age scorer exists yet.
    pub age_importance: f64,
    /// Reported as-is; no dedicated treatment-history scorer exists yet.
    pub treatments_importance: f64,
    pub stability_variance_divisor: f64,
    pub stability_floor: f64,
    pub excellent_candidate: f64,
    pub good_candidate: f64,
    pub moderate_candidate: f64,
    pub recommendation_threshold: f64,
}

impl Default for ExplainabilitySettings {
    fn default() -> Self {
        Self {
            age_importance: 0.15,
            treatments_importance: -0.08,
            stability_variance_divisor: 1000.0,
            stability_floor: 0.5,
            excellent_candidate: 85.0,
            good_candidate: 70.0,
            moderate_candidate: 50.0,
            recommendation_threshold: 80.0,
        }
    }
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), *value))
        .collect()
}
