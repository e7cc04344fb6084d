mod common;

use serde_json::{json, Value};
use trial_match::invocation::{InvocationResponse, TrialMatchService};

#[test]
fn match_output_feeds_explainability() {
    let service = TrialMatchService::default();
    let matched = service
        .handle_match(&common::scenario_request().to_string())
        .expect("match succeeds");

    let explain_request = json!({
        "matches": serde_json::to_value(&matched.matches).expect("serialize matches"),
        "patient": common::patient_json()
    });
    let payload = service
        .handle_explain(&explain_request.to_string())
        .expect("explain succeeds");
    let value = serde_json::to_value(InvocationResponse::success(payload)).expect("serialize");

    assert_eq!(value["success"], true);
    let explainability = &value["explainability"];
    assert_eq!(
        explainability["feature_importance"],
        json!({
            "biomarkers": 0.214,
            "location": 0.15,
            "burden": 0.115,
            "age": 0.15,
            "treatments": -0.08
        })
    );
    let keys: Vec<&String> = explainability["feature_importance"]
        .as_object()
        .expect("importance object")
        .keys()
        .collect();
    assert_eq!(keys.len(), 5);
    assert_eq!(
        explainability["confidence_metrics"],
        json!({
            "overall_confidence": 0.629,
            "data_quality": 1.0,
            "prediction_stability": 0.909
        })
    );
    assert_eq!(
        explainability["model_summary"],
        "The matching algorithm identified this patient as a good candidate for clinical \
         trials based on Lung Cancer diagnosis and EGFR, KRAS biomarker profile."
    );
}

#[test]
fn explain_accepts_matches_without_explanation_factors() {
    let request = json!({
        "matches": [{
            "trialId": 12,
            "matchScore": 90.0,
            "biomarkerScore": 100.0,
            "locationScore": 100.0,
            "burdenScore": 60.0,
            "completionLikelihood": "High"
        }],
        "patient": { "age": 50, "primaryDiagnosis": "Melanoma" }
    });

    let payload = TrialMatchService::default()
        .handle_explain(&request.to_string())
        .expect("explain succeeds");

    assert_eq!(payload.explainability.confidence_metrics.data_quality, 0.4);
    assert!(payload
        .explainability
        .model_summary
        .starts_with("The matching algorithm identified this patient as an excellent candidate"));
}

#[test]
fn analyze_combines_ranking_explainability_and_overview() {
    let payload = TrialMatchService::default()
        .handle_analyze(&common::scenario_request().to_string(), 60.0)
        .expect("analyze succeeds");
    let value = serde_json::to_value(InvocationResponse::success(payload)).expect("serialize");

    assert_eq!(value["matches"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        value["overview"],
        json!({ "eligibleTrials": 2, "averageMatchScore": 62.9, "bestMatch": "B" })
    );
    assert_eq!(
        value["explainability"]["confidence_metrics"]["overall_confidence"],
        0.629
    );
}

#[test]
fn explain_with_no_matches_reports_defaults() {
    let request = json!({ "matches": [], "patient": common::patient_json() });
    let payload = TrialMatchService::default()
        .handle_explain(&request.to_string())
        .expect("explain succeeds");
    let value: Value = serde_json::to_value(&payload).expect("serialize");

    assert_eq!(value["explainability"]["feature_importance"], json!({}));
    assert_eq!(
        value["explainability"]["model_summary"],
        "No suitable trials found for this patient profile."
    );
}
