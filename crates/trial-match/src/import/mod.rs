//! Bulk trial intake from spreadsheet exports.

mod parser;

use crate::domain::{AgeRange, InclusionCriteria, Trial, TrialId};
use parser::{split_list, TrialRow};
use std::io::Read;
use std::path::Path;
use tracing::info;

const DEFAULT_STAGES: &str = "Stage I,Stage II,Stage III";
const DEFAULT_MIN_AGE: u32 = 18;
const DEFAULT_MAX_AGE: u32 = 80;
const DEFAULT_LOCATION: &str = "Multiple Sites";
const DEFAULT_TREATMENT_BURDEN: &str = "Medium";
const UNTITLED_TRIAL: &str = "Untitled Trial";

#[derive(Debug, thiserror::Error)]
pub enum TrialImportError {
    #[error("failed to read trial export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid trial CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: '{value}' is not a valid {column}")]
    InvalidAge {
        row: usize,
        column: &'static str,
        value: String,
    },
}

pub struct TrialCsvImporter;

impl TrialCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Trial>, TrialImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Trial>, TrialImportError> {
        let trials = parser::parse_rows(reader)?
            .into_iter()
            .enumerate()
            .map(|(index, row)| trial_from_row(index + 1, row))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = trials.len(), "imported trials from csv");
        Ok(trials)
    }
}

fn trial_from_row(row_number: usize, row: TrialRow) -> Result<Trial, TrialImportError> {
    let id = match row.id {
        Some(raw) => match raw.parse::<i64>() {
            Ok(number) => TrialId::Number(number),
            Err(_) => TrialId::Text(raw),
        },
        None => TrialId::Number(row_number as i64),
    };

    let age_range = AgeRange {
        min: parse_age(row_number, "minAge", row.min_age, DEFAULT_MIN_AGE)?,
        max: parse_age(row_number, "maxAge", row.max_age, DEFAULT_MAX_AGE)?,
    };

    let is_active = row
        .is_active
        .map(|value| !value.eq_ignore_ascii_case("false"))
        .unwrap_or(true);

    Ok(Trial {
        id,
        name: Some(row.name.unwrap_or_else(|| UNTITLED_TRIAL.to_string())),
        sponsor: row.sponsor,
        phase: row.phase,
        description: row.description,
        location: row
            .location
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        treatment_burden: Some(
            row.treatment_burden
                .unwrap_or_else(|| DEFAULT_TREATMENT_BURDEN.to_string()),
        ),
        inclusion_criteria: InclusionCriteria {
            age_range,
            cancer_types: split_list(&row.cancer_types),
            stages: split_list(row.stages.as_deref().unwrap_or(DEFAULT_STAGES)),
            biomarkers: split_list(&row.biomarkers),
        },
        is_active,
    })
}

fn parse_age(
    row: usize,
    column: &'static str,
    value: Option<String>,
    default: u32,
) -> Result<u32, TrialImportError> {
    match value {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| TrialImportError::InvalidAge {
                row,
                column,
                value: raw,
            }),
        None => Ok(default),
    }
}
