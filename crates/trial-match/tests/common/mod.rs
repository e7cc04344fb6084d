#![allow(dead_code)]

use serde_json::{json, Value};

pub fn patient_json() -> Value {
    json!({
        "age": 45,
        "primaryDiagnosis": "Lung Cancer",
        "cancerStage": "Stage III",
        "location": "Boston, MA",
        "travelWillingness": "Within 50 miles",
        "biomarkers": { "egfr": "EGFR", "kras": "KRAS" },
        "previousTreatments": ["Chemotherapy", "Radiation", "Surgery"]
    })
}

pub fn trial_json(id: Value, location: &str, burden: &str, biomarkers: &[&str]) -> Value {
    json!({
        "id": id,
        "name": "Lung Study",
        "location": location,
        "treatmentBurden": burden,
        "inclusionCriteria": {
            "ageRange": { "min": 18, "max": 75 },
            "cancerTypes": ["Lung Cancer"],
            "stages": ["Stage III", "Stage IV"],
            "biomarkers": biomarkers
        }
    })
}

/// Three-trial request whose ranking is B (74.4), A (63.2), C (51.1).
pub fn scenario_request() -> Value {
    json!({
        "patient": patient_json(),
        "trials": [
            trial_json(json!("A"), "Cambridge, MA", "Medium", &["EGFR", "ALK", "ROS1"]),
            trial_json(json!("B"), "Houston, TX", "Low", &["EGFR"]),
            trial_json(json!("C"), "Seattle, WA", "High", &[]),
        ]
    })
}
