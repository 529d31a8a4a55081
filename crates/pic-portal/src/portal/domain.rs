use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidate (prospect) records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for intake applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Store-assigned row identifier for a persisted deliberation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelibRowId(pub u64);

/// One row of the membership roster as the intake system records it.
///
/// Rows cover prospects, active members, and PICs alike; only rows with both
/// flags unset are eligible for review listing. This core never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub full_name: String,
    pub email: String,
    pub is_active: bool,
    pub is_pic: bool,
    pub application_ref: Option<ApplicationId>,
    pub case_study_ref: Option<String>,
    pub interview_ref: Option<String>,
    pub active_case_studies: Option<String>,
    pub active_interviews: Option<String>,
    pub total_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl CandidateRecord {
    /// A candidate appears on the review roster only while it is neither an
    /// active member nor a PIC.
    pub fn is_reviewable(&self) -> bool {
        !self.is_active && !self.is_pic
    }

    pub fn card_view(&self) -> CandidateCardView {
        CandidateCardView {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            application_ref: self.application_ref.clone(),
            active_case_studies: self.active_case_studies.clone(),
            active_interviews: self.active_interviews.clone(),
            total_score: self.total_score,
        }
    }
}

/// Intake application payload. The intake system owns the shape; this core
/// treats the body as opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub prospect_id: CandidateId,
    pub payload: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}

/// Case-study write-up attached to a prospect. Zero or more per candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudySubmission {
    pub id: String,
    pub prospect: CandidateId,
    pub reviewer: String,
    pub notes: String,
    pub score: Option<i32>,
    pub submitted_at: DateTime<Utc>,
}

/// Interview notes attached to a prospect. Zero or more per candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: String,
    pub prospect_id: CandidateId,
    pub interviewer: String,
    pub notes: String,
    pub score: Option<i32>,
    pub conducted_at: DateTime<Utc>,
}

/// One row of the persisted deliberation list. The set of rows is the
/// deliberation set; the storage layer enforces no uniqueness on
/// `prospect_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub id: DelibRowId,
    pub prospect_id: CandidateId,
}

/// Interest-form submission from someone not yet in the candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestSubmission {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub responses: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}

/// Membership flags looked up for the signed-in caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipFlags {
    pub is_active: bool,
    pub is_pic: bool,
}

/// Opaque identity of the signed-in caller, as the backing store reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub member_id: CandidateId,
}

/// Per-request authorization flags derived from the caller's membership row.
/// Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthorizationContext {
    pub is_pic: bool,
    pub is_active: bool,
}

impl AuthorizationContext {
    /// The fail-closed default used whenever identity resolution comes up
    /// empty.
    pub const fn denied() -> Self {
        Self {
            is_pic: false,
            is_active: false,
        }
    }

    /// Tagged form of the PIC gate so callers can distinguish "no data" from
    /// "no permission" before collapsing to an empty listing.
    pub const fn review_access(&self) -> ReviewAccess {
        if self.is_pic {
            ReviewAccess::Granted
        } else {
            ReviewAccess::Denied
        }
    }
}

/// Outcome of gating a roster operation on the caller's PIC flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAccess {
    Granted,
    Denied,
}

/// Roster ordering selected by the reviewer. Not persisted; session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    ByName,
    ByScore,
}

impl SortMode {
    pub const fn label(self) -> &'static str {
        match self {
            SortMode::ByName => "name",
            SortMode::ByScore => "score",
        }
    }
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::ByName
    }
}

/// Card-sized projection of a candidate row for the roster grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateCardView {
    pub id: CandidateId,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_ref: Option<ApplicationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_case_studies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_interviews: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<i32>,
}

/// Slim contact projection used by the interview scheduling roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewProspect {
    pub id: CandidateId,
    pub full_name: String,
    pub email: String,
}

impl InterviewProspect {
    pub fn from_record(record: &CandidateRecord) -> Self {
        Self {
            id: record.id.clone(),
            full_name: record.full_name.clone(),
            email: record.email.clone(),
        }
    }
}

/// A prospect's application bundled with its review artifacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDetail {
    pub application: ApplicationRecord,
    pub case_studies: Vec<CaseStudySubmission>,
    pub interviews: Vec<InterviewRecord>,
}
