use crate::demo::{run_demo, DemoArgs};
use crate::infra::{bootstrap, emit, read_input, InputArgs, OutputArgs};
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;
use trial_match::domain::TrialId;
use trial_match::error::AppError;
use trial_match::import::TrialCsvImporter;
use trial_match::invocation::{MatchPayload, MatchRequest, TrialMatchService};

#[derive(Parser, Debug)]
#[command(
    name = "trial-match",
    about = "Rank clinical trials for a patient profile and explain the ranking",
    version
)]
struct Cli {
    /// Scoring rubric JSON file (overrides TRIAL_MATCH_SCORING_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score and rank trials for a patient ({patient, trials} on input)
    Match(MatchArgs),
    /// Summarize a ranked match list ({matches, patient} on input)
    Explain(ExplainArgs),
    /// Rank, explain, and summarize in one envelope ({patient, trials} on input)
    Analyze(AnalyzeArgs),
    /// Convert a trial spreadsheet export into trial JSON
    ImportTrials(ImportTrialsArgs),
    /// Run a built-in patient against built-in trials and print a readable report
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Drop matches scoring below this value (0-100) after ranking
    #[arg(long)]
    min_score: Option<f64>,
    /// Drop matches for trials flagged inactive after ranking
    #[arg(long)]
    active_only: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Score (0-100) at which a trial counts as eligible in the overview
    #[arg(long, default_value_t = 60.0)]
    min_score: f64,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ImportTrialsArgs {
    /// Trial CSV export
    #[arg(long)]
    csv: PathBuf,
    #[command(flatten)]
    output: OutputArgs,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = bootstrap(cli.config.as_deref())?;
    let service = TrialMatchService::new(config.scoring);

    match cli.command {
        Command::Match(args) => run_match(&service, args),
        Command::Explain(args) => {
            let raw = read_input(&args.input)?;
            emit(service.handle_explain(&raw)?, &args.output)
        }
        Command::Analyze(args) => {
            let raw = read_input(&args.input)?;
            emit(service.handle_analyze(&raw, args.min_score)?, &args.output)
        }
        Command::ImportTrials(args) => {
            let trials = TrialCsvImporter::from_path(&args.csv)?;
            emit(serde_json::json!({ "trials": trials }), &args.output)
        }
        Command::Demo(args) => run_demo(&service, args),
    }
}

fn run_match(service: &TrialMatchService, args: MatchArgs) -> Result<(), AppError> {
    let raw = read_input(&args.input)?;
    let request: MatchRequest = serde_json::from_str(&raw)?;
    let mut payload = service.match_trials(&request)?;

    let ranked = payload.matches.len();
    retain_requested(&mut payload, &request, args.min_score, args.active_only);
    if payload.matches.len() != ranked {
        info!(
            ranked,
            kept = payload.matches.len(),
            "filtered ranked matches"
        );
    }

    emit(payload, &args.output)
}

fn retain_requested(
    payload: &mut MatchPayload,
    request: &MatchRequest,
    min_score: Option<f64>,
    active_only: bool,
) {
    let inactive: HashSet<&TrialId> = if active_only {
        request
            .trials
            .iter()
            .filter(|trial| !trial.is_active)
            .map(|trial| &trial.id)
            .collect()
    } else {
        HashSet::new()
    };

    payload.matches.retain(|candidate| {
        min_score.map_or(true, |floor| candidate.match_score >= floor)
            && !inactive.contains(&candidate.trial_id)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MatchRequest {
        serde_json::from_value(serde_json::json!({
            "patient": {
                "age": 45,
                "primaryDiagnosis": "Lung Cancer",
                "cancerStage": "Stage III",
                "location": "Boston, MA",
                "biomarkers": { "egfr": "EGFR" }
            },
            "trials": [
                {
                    "id": "open",
                    "location": "Boston, MA",
                    "treatmentBurden": "Low",
                    "inclusionCriteria": {
                        "ageRange": { "min": 18, "max": 75 },
                        "cancerTypes": ["Lung Cancer"],
                        "stages": ["Stage III"],
                        "biomarkers": ["EGFR"]
                    }
                },
                {
                    "id": "closed",
                    "location": "Seattle, WA",
                    "treatmentBurden": "High",
                    "isActive": false,
                    "inclusionCriteria": {
                        "ageRange": { "min": 18, "max": 75 },
                        "cancerTypes": ["Breast Cancer"],
                        "stages": ["Stage I"],
                        "biomarkers": ["HER2"]
                    }
                }
            ]
        }))
        .expect("valid request")
    }

    #[test]
    fn filters_apply_after_ranking() {
        let request = request();
        let service = TrialMatchService::default();

        let mut payload = service.match_trials(&request).expect("ranked");
        assert_eq!(payload.matches.len(), 2);

        retain_requested(&mut payload, &request, None, true);
        let ids: Vec<String> = payload
            .matches
            .iter()
            .map(|candidate| candidate.trial_id.to_string())
            .collect();
        assert_eq!(ids, vec!["open"]);
    }

    #[test]
    fn min_score_keeps_scores_at_the_floor() {
        let request = request();
        let service = TrialMatchService::default();
        let mut payload = service.match_trials(&request).expect("ranked");
        let top = payload.matches[0].match_score;

        retain_requested(&mut payload, &request, Some(top), false);
        assert_eq!(payload.matches.len(), 1);
        assert_eq!(payload.matches[0].match_score, top);
    }

    #[test]
    fn cli_accepts_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "trial-match",
            "match",
            "--min-score",
            "60",
            "--active-only",
            "--config",
            "rubric.json",
        ])
        .expect("arguments parse");

        assert_eq!(cli.config, Some(PathBuf::from("rubric.json")));
        match cli.command {
            Command::Match(args) => {
                assert_eq!(args.min_score, Some(60.0));
                assert!(args.active_only);
                assert!(!args.output.pretty);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
