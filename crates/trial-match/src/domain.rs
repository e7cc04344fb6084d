use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Patient profile supplied by the caller.
///
/// Every field is optional on the wire. Absent values take the neutral default of the
/// scorer that reads them, except `age`, which matching refuses to guess.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub primary_diagnosis: Option<String>,
    #[serde(default)]
    pub cancer_stage: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub travel_willingness: Option<String>,
    /// Marker name to observed value. Only the values are compared against trials.
    #[serde(default)]
    pub biomarkers: IndexMap<String, String>,
    #[serde(default)]
    pub previous_treatments: Vec<String>,
}

impl Patient {
    pub fn primary_diagnosis(&self) -> &str {
        self.primary_diagnosis.as_deref().unwrap_or_default()
    }

    pub fn cancer_stage(&self) -> &str {
        self.cancer_stage.as_deref().unwrap_or_default()
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }

    pub fn travel_willingness(&self) -> Option<&str> {
        self.travel_willingness.as_deref()
    }

    /// Number of the five record-quality fields that are present and non-empty.
    pub fn completed_quality_fields(&self) -> usize {
        [
            self.age.is_some_and(|age| age > 0),
            !self.primary_diagnosis().is_empty(),
            !self.cancer_stage().is_empty(),
            !self.location().is_empty(),
            !self.biomarkers.is_empty(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// Trial identifier, echoed back in whichever JSON form the caller used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrialId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TrialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialId::Number(id) => write!(f, "{id}"),
            TrialId::Text(id) => f.write_str(id),
        }
    }
}

impl From<&str> for TrialId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for TrialId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Candidate trial with its inclusion rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
    pub id: TrialId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub treatment_burden: Option<String>,
    pub inclusion_criteria: InclusionCriteria,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Trial {
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", name, self.id),
            None => self.id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionCriteria {
    pub age_range: AgeRange,
    #[serde(default)]
    pub cancer_types: Vec<String>,
    #[serde(default)]
    pub stages: Vec<String>,
    #[serde(default)]
    pub biomarkers: Vec<String>,
}

/// Inclusive age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }

    pub fn is_well_formed(&self) -> bool {
        self.min <= self.max
    }
}

/// Qualitative bucket derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionLikelihood {
    High,
    Medium,
    Low,
}

impl CompletionLikelihood {
    pub const fn label(self) -> &'static str {
        match self {
            CompletionLikelihood::High => "High",
            CompletionLikelihood::Medium => "Medium",
            CompletionLikelihood::Low => "Low",
        }
    }
}

/// The four scored dimensions, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactorKind {
    #[serde(rename = "Biomarker Match")]
    Biomarker,
    #[serde(rename = "Location")]
    Location,
    #[serde(rename = "Treatment Burden")]
    Burden,
    #[serde(rename = "Eligibility")]
    Eligibility,
}

impl FactorKind {
    pub const fn ordered() -> [FactorKind; 4] {
        [
            FactorKind::Biomarker,
            FactorKind::Location,
            FactorKind::Burden,
            FactorKind::Eligibility,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            FactorKind::Biomarker => "Biomarker Match",
            FactorKind::Location => "Location",
            FactorKind::Burden => "Treatment Burden",
            FactorKind::Eligibility => "Eligibility",
        }
    }
}

/// Labeled contribution used to justify a match score to a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationFactor {
    pub factor: FactorKind,
    pub impact: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplanationFactors {
    pub positive: Vec<ExplanationFactor>,
    pub negative: Vec<ExplanationFactor>,
}

/// Scored outcome for one patient/trial pair. Scores are on the 0-100 display scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub trial_id: TrialId,
    pub match_score: f64,
    pub biomarker_score: f64,
    pub location_score: f64,
    pub burden_score: f64,
    pub completion_likelihood: CompletionLikelihood,
    #[serde(default)]
    pub explanation_factors: ExplanationFactors,
}

/// Rounds the exact binary value to `places` decimals, ties to even.
///
/// Goes through the decimal formatter rather than scaling, so `37.15` (stored as
/// 37.1499...) stays at 37.1.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
