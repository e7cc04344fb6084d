use clap::Args;
use indexmap::IndexMap;
use std::path::PathBuf;
use trial_match::domain::{AgeRange, InclusionCriteria, MatchResult, Patient, Trial, TrialId};
use trial_match::error::AppError;
use trial_match::import::TrialCsvImporter;
use trial_match::invocation::{AnalyzeRequest, TrialMatchService};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional trial CSV export to match against instead of the built-in trials.
    #[arg(long)]
    pub(crate) trials_csv: Option<PathBuf>,
    /// Number of ranked trials to print.
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
    /// Overview eligibility threshold (0-100).
    #[arg(long, default_value_t = 60.0)]
    pub(crate) min_score: f64,
}

pub(crate) fn run_demo(service: &TrialMatchService, args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        trials_csv,
        top,
        min_score,
    } = args;

    let (trials, source) = match trials_csv {
        Some(path) => {
            let trials = TrialCsvImporter::from_path(&path)?;
            (trials, format!("imported from {}", path.display()))
        }
        None => (demo_trials(), "built-in catalog".to_string()),
    };

    let request = AnalyzeRequest {
        patient: demo_patient(),
        trials,
    };
    let analysis = service.analyze(&request, min_score)?;

    println!("Clinical trial matching demo");
    render_patient(&request.patient);
    println!("\nTrials evaluated: {} ({source})", request.trials.len());
    println!(
        "- {} at or above {:.0} | average score {:.1} | best match {}",
        analysis.overview.eligible_trials,
        min_score,
        analysis.overview.average_match_score,
        analysis
            .overview
            .best_match
            .as_ref()
            .map(TrialId::to_string)
            .unwrap_or_else(|| "none".to_string())
    );

    println!("\nRanked trials (top {})", top.min(analysis.matches.len()));
    for (rank, candidate) in analysis.matches.iter().take(top).enumerate() {
        render_match(rank + 1, candidate, &request.trials);
    }

    let explainability = &analysis.explainability;
    println!("\nFeature importance");
    for (feature, value) in &explainability.feature_importance {
        println!("  - {:?}: {:+.3}", feature, value);
    }
    let confidence = &explainability.confidence_metrics;
    println!(
        "Confidence {:.0}% | data quality {:.0}% | stability {:.0}%",
        confidence.overall_confidence * 100.0,
        confidence.data_quality * 100.0,
        confidence.prediction_stability * 100.0
    );
    println!("\n{}", explainability.model_summary);

    Ok(())
}

fn render_patient(patient: &Patient) {
    println!(
        "Patient: {} yrs | {} ({}) | {}",
        patient
            .age
            .map(|age| age.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        patient.primary_diagnosis(),
        patient.cancer_stage(),
        patient.location()
    );
    let markers: Vec<&str> = patient.biomarkers.values().map(String::as_str).collect();
    println!(
        "  Biomarkers: {} | prior treatments: {} | travel: {}",
        if markers.is_empty() {
            "none".to_string()
        } else {
            markers.join(", ")
        },
        patient.previous_treatments.len(),
        patient.travel_willingness().unwrap_or("unspecified")
    );
}

fn render_match(rank: usize, candidate: &MatchResult, trials: &[Trial]) {
    let label = trials
        .iter()
        .find(|trial| trial.id == candidate.trial_id)
        .map(Trial::label)
        .unwrap_or_else(|| candidate.trial_id.to_string());

    println!(
        "{rank}. {label} -> {:.1} ({} completion likelihood)",
        candidate.match_score,
        candidate.completion_likelihood.label()
    );
    println!(
        "   biomarker {:.1} | location {:.1} | burden {:.1}",
        candidate.biomarker_score, candidate.location_score, candidate.burden_score
    );
    for factor in &candidate.explanation_factors.positive {
        println!(
            "   + {}: {} [{:.3}]",
            factor.factor.label(),
            factor.description,
            factor.impact
        );
    }
    for factor in &candidate.explanation_factors.negative {
        println!(
            "   - {}: {} [{:.3}]",
            factor.factor.label(),
            factor.description,
            factor.impact
        );
    }
}

fn demo_patient() -> Patient {
    let mut biomarkers = IndexMap::new();
    biomarkers.insert("egfr".to_string(), "EGFR".to_string());
    biomarkers.insert("pdl1".to_string(), "PD-L1".to_string());

    Patient {
        age: Some(58),
        primary_diagnosis: Some("Lung Cancer".to_string()),
        cancer_stage: Some("Stage III".to_string()),
        location: Some("Boston, MA".to_string()),
        travel_willingness: Some("Within 100 miles".to_string()),
        biomarkers,
        previous_treatments: vec!["Chemotherapy".to_string(), "Radiation".to_string()],
    }
}

fn demo_trials() -> Vec<Trial> {
    vec![
        demo_trial(
            "NCT-LUNG-014",
            "Targeted EGFR Inhibitor Study",
            "Cambridge, MA",
            "Medium",
            &["Lung Cancer"],
            &["Stage III", "Stage IV"],
            &["EGFR"],
        ),
        demo_trial(
            "NCT-IMMUNO-221",
            "Checkpoint Combination Trial",
            "Houston, TX",
            "High",
            &["Lung Cancer", "Melanoma"],
            &["Stage III", "Stage IV"],
            &["PD-L1", "TMB-High"],
        ),
        demo_trial(
            "NCT-BREAST-087",
            "HER2 Adjuvant Study",
            "Providence, RI",
            "Low",
            &["Breast Cancer"],
            &["Stage I", "Stage II"],
            &["HER2"],
        ),
        demo_trial(
            "NCT-PAN-302",
            "Pan-Tumor Observational Registry",
            "Multiple Sites",
            "Low",
            &["Lung Cancer", "Colorectal Cancer", "Breast Cancer"],
            &["Stage II", "Stage III", "Stage IV"],
            &[],
        ),
    ]
}

fn demo_trial(
    id: &str,
    name: &str,
    location: &str,
    burden: &str,
    cancer_types: &[&str],
    stages: &[&str],
    biomarkers: &[&str],
) -> Trial {
    Trial {
        id: TrialId::from(id),
        name: Some(name.to_string()),
        sponsor: None,
        phase: None,
        description: None,
        location: location.to_string(),
        treatment_burden: Some(burden.to_string()),
        inclusion_criteria: InclusionCriteria {
            age_range: AgeRange { min: 18, max: 75 },
            cancer_types: strings(cancer_types),
            stages: strings(stages),
            biomarkers: strings(biomarkers),
        },
        is_active: true,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
