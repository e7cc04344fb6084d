use crate::domain::{round_to, MatchResult, TrialId};
use serde::{Deserialize, Serialize};

/// Patient-level roll-up of a ranked match list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOverview {
    pub eligible_trials: usize,
    pub average_match_score: f64,
    pub best_match: Option<TrialId>,
}

impl MatchOverview {
    /// `eligible_trials` counts matches scoring at least `min_score` on the 0-100 scale.
    pub fn from_matches(matches: &[MatchResult], min_score: f64) -> Self {
        let eligible_trials = matches
            .iter()
            .filter(|candidate| candidate.match_score >= min_score)
            .count();

        let average_match_score = if matches.is_empty() {
            0.0
        } else {
            let total: f64 = matches.iter().map(|candidate| candidate.match_score).sum();
            round_to(total / matches.len() as f64, 1)
        };

        Self {
            eligible_trials,
            average_match_score,
            best_match: best_match(matches).map(|candidate| candidate.trial_id.clone()),
        }
    }
}

/// First match holding the highest score.
pub(crate) fn best_match(matches: &[MatchResult]) -> Option<&MatchResult> {
    matches.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.match_score <= current.match_score => Some(current),
        _ => Some(candidate),
    })
}
