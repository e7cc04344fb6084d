use crate::config::TravelTable;

/// Scores how reachable a trial site is for a patient, in [0, 1].
pub trait LocationCompatibility {
    fn score(
        &self,
        patient_location: &str,
        trial_location: &str,
        travel_willingness: Option<&str>,
    ) -> f64;
}

/// Compares the trailing "region" token of two `City, State` strings.
///
/// A shared region scores 1.0; anything else falls back to the travel table. No distances
/// are computed. Two blank locations share the empty region and score 1.0.
#[derive(Debug, Clone, Default)]
pub struct RegionHeuristic {
    travel: TravelTable,
}

impl RegionHeuristic {
    pub fn new(travel: TravelTable) -> Self {
        Self { travel }
    }
}

impl LocationCompatibility for RegionHeuristic {
    fn score(
        &self,
        patient_location: &str,
        trial_location: &str,
        travel_willingness: Option<&str>,
    ) -> f64 {
        if region_token(patient_location).to_lowercase()
            == region_token(trial_location).to_lowercase()
        {
            return 1.0;
        }

        self.travel.score_for(travel_willingness)
    }
}

/// Text after the last comma, trimmed; the whole string when there is no comma.
pub(crate) fn region_token(location: &str) -> &str {
    match location.rsplit_once(',') {
        Some((_, region)) => region.trim(),
        None => location,
    }
}
