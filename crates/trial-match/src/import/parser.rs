use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Raw trial row. Headers may use either the camelCase or the spreadsheet spelling.
#[derive(Debug, Deserialize)]
pub(crate) struct TrialRow {
    #[serde(
        alias = "Trial ID",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) id: Option<String>,
    #[serde(
        alias = "Trial Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) name: Option<String>,
    #[serde(alias = "Sponsor", default, deserialize_with = "empty_string_as_none")]
    pub(crate) sponsor: Option<String>,
    #[serde(alias = "Phase", default, deserialize_with = "empty_string_as_none")]
    pub(crate) phase: Option<String>,
    #[serde(alias = "Location", default, deserialize_with = "empty_string_as_none")]
    pub(crate) location: Option<String>,
    #[serde(
        alias = "Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) description: Option<String>,
    #[serde(alias = "Biomarkers", default)]
    pub(crate) biomarkers: String,
    #[serde(rename = "cancerTypes", alias = "Cancer Types", default)]
    pub(crate) cancer_types: String,
    #[serde(alias = "Stages", default, deserialize_with = "empty_string_as_none")]
    pub(crate) stages: Option<String>,
    #[serde(
        rename = "minAge",
        alias = "Min Age",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) min_age: Option<String>,
    #[serde(
        rename = "maxAge",
        alias = "Max Age",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) max_age: Option<String>,
    #[serde(
        rename = "treatmentBurden",
        alias = "Treatment Burden",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) treatment_burden: Option<String>,
    #[serde(
        rename = "isActive",
        alias = "Is Active",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) is_active: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<TrialRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<TrialRow>().collect()
}

/// Comma separated cell into trimmed, non-empty entries.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
