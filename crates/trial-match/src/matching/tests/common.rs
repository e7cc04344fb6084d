use indexmap::IndexMap;

use crate::config::ScoringConfig;
use crate::domain::{AgeRange, InclusionCriteria, Patient, Trial, TrialId};
use crate::matching::TrialMatcher;

pub(super) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn patient() -> Patient {
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
        previous_treatments: strings(&["Chemotherapy", "Radiation", "Surgery"]),
    }
}

pub(super) fn trial(id: &str, location: &str, burden: &str, biomarkers: &[&str]) -> Trial {
    Trial {
        id: TrialId::from(id),
        name: Some(format!("Trial {id}")),
        sponsor: None,
        phase: Some("Phase II".to_string()),
        description: None,
        location: location.to_string(),
        treatment_burden: Some(burden.to_string()),
        inclusion_criteria: InclusionCriteria {
            age_range: AgeRange { min: 18, max: 75 },
            cancer_types: strings(&["Lung Cancer"]),
            stages: strings(&["Stage III", "Stage IV"]),
            biomarkers: strings(biomarkers),
        },
        is_active: true,
    }
}

pub(super) fn matcher() -> TrialMatcher {
    TrialMatcher::new(ScoringConfig::default())
}
