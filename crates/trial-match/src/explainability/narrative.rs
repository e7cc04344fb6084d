use crate::config::ExplainabilitySettings;
use crate::domain::{MatchResult, Patient};
use crate::matching::best_match;

pub(crate) const NO_MATCHES_SUMMARY: &str = "No suitable trials found for this patient profile.";

const RECOMMENDATION: &str =
    " The model recommends prioritizing the top-ranked trial due to high compatibility scores.";

pub(crate) fn model_summary(
    matches: &[MatchResult],
    patient: &Patient,
    settings: &ExplainabilitySettings,
) -> String {
    let Some(best) = best_match(matches) else {
        return NO_MATCHES_SUMMARY.to_string();
    };

    let mut summary = String::from("The matching algorithm identified this patient as ");
    summary.push_str(candidate_band(best.match_score, settings));

    let diagnosis = patient.primary_diagnosis.as_deref().unwrap_or("cancer");
    if patient.biomarkers.is_empty() {
        summary.push_str(&format!(" based on {diagnosis} diagnosis."));
    } else {
        let markers = patient
            .biomarkers
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        summary.push_str(&format!(
            " based on {diagnosis} diagnosis and {markers} biomarker profile."
        ));
    }

    if best.match_score >= settings.recommendation_threshold {
        summary.push_str(RECOMMENDATION);
    }

    summary
}

fn candidate_band(score: f64, settings: &ExplainabilitySettings) -> &'static str {
    if score >= settings.excellent_candidate {
        "an excellent candidate for clinical trials"
    } else if score >= settings.good_candidate {
        "a good candidate for clinical trials"
    } else if score >= settings.moderate_candidate {
        "a moderate candidate for clinical trials"
    } else {
        "having limited trial options"
    }
}
