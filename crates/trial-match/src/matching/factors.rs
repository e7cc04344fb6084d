use crate::domain::{Patient, Trial};
use crate::config::{BurdenModel, EligibilityPenalties};
use std::collections::HashSet;

/// Score returned when a trial names no required biomarkers.
pub const NEUTRAL_BIOMARKER_SCORE: f64 = 0.5;

/// Fraction of the trial's required markers found among the patient's marker values.
pub fn biomarker_score<'a, P, T>(patient_markers: P, required_markers: T) -> f64
where
    P: IntoIterator<Item = &'a String>,
    T: IntoIterator<Item = &'a String>,
{
    let required: HashSet<&str> = required_markers.into_iter().map(String::as_str).collect();
    if required.is_empty() {
        return NEUTRAL_BIOMARKER_SCORE;
    }

    let observed: HashSet<&str> = patient_markers.into_iter().map(String::as_str).collect();
    let overlap = observed.intersection(&required).count();

    (overlap as f64 / required.len() as f64).min(1.0)
}

/// Tolerance for the trial's treatment burden. Intermediate products may exceed 1.0; the
/// result never does.
pub fn burden_score(
    age: u32,
    cancer_stage: &str,
    previous_treatments: usize,
    trial_burden: Option<&str>,
    model: &BurdenModel,
) -> f64 {
    let mut tolerance = model.base_tolerance;

    if age > model.senior_age {
        tolerance *= model.senior_factor;
    } else if age < model.young_age {
        tolerance *= model.young_factor;
    }

    tolerance *= model
        .stage_factors
        .get(cancer_stage)
        .copied()
        .unwrap_or(model.default_stage_factor);

    if previous_treatments > model.treatment_history_limit {
        tolerance *= model.treatment_history_factor;
    }

    let trial_factor = trial_burden
        .and_then(|burden| model.trial_burden_factors.get(burden))
        .copied()
        .unwrap_or(model.default_trial_burden_factor);

    (tolerance * trial_factor).min(1.0)
}

/// Basic inclusion check. Each failed criterion applies its own multiplicative penalty.
pub fn eligibility_score(
    age: u32,
    patient: &Patient,
    trial: &Trial,
    penalties: &EligibilityPenalties,
) -> f64 {
    let criteria = &trial.inclusion_criteria;
    let mut score = 1.0;

    if !criteria.age_range.contains(age) {
        score *= penalties.age_outside_range;
    }

    if !criteria
        .cancer_types
        .iter()
        .any(|kind| kind == patient.primary_diagnosis())
    {
        score *= penalties.cancer_type_mismatch;
    }

    if !criteria
        .stages
        .iter()
        .any(|stage| stage == patient.cancer_stage())
    {
        score *= penalties.stage_mismatch;
    }

    score
}
