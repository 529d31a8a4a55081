use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{ApplicationId, CandidateId, CandidateRecord};

/// Error enumeration for roster import failures.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Parse an intake roster CSV export into candidate records.
///
/// Expected columns: `Full Name`, `Email`, plus optional `Application`,
/// `Total Score`, `Active`, `PIC`, and `Created At`. Candidate ids are
/// assigned positionally; the intake export carries none.
pub fn candidates_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<CandidateRecord>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = row?;
        records.push(row.into_record(index));
    }

    Ok(records)
}

pub fn candidates_from_path(
    path: impl AsRef<Path>,
) -> Result<Vec<CandidateRecord>, RosterImportError> {
    let file = std::fs::File::open(path)?;
    candidates_from_reader(file)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Full Name")]
    full_name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Application", default, deserialize_with = "empty_string_as_none")]
    application: Option<String>,
    #[serde(rename = "Total Score", default, deserialize_with = "empty_string_as_none")]
    total_score: Option<String>,
    #[serde(rename = "Active", default, deserialize_with = "empty_string_as_none")]
    active: Option<String>,
    #[serde(rename = "PIC", default, deserialize_with = "empty_string_as_none")]
    pic: Option<String>,
    #[serde(rename = "Created At", default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl RosterRow {
    fn into_record(self, index: usize) -> CandidateRecord {
        let created_at = self
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now);

        CandidateRecord {
            id: CandidateId(format!("cand-{:04}", index + 1)),
            full_name: self.full_name,
            email: self.email,
            is_active: self.active.as_deref().map(parse_flag).unwrap_or(false),
            is_pic: self.pic.as_deref().map(parse_flag).unwrap_or(false),
            application_ref: self.application.map(ApplicationId),
            case_study_ref: None,
            interview_ref: None,
            active_case_studies: None,
            active_interviews: None,
            total_score: self.total_score.as_deref().and_then(parse_score),
            created_at,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

fn parse_score(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
