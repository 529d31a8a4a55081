use async_trait::async_trait;

use super::domain::{
    ApplicationId, ApplicationRecord, CallerIdentity, CandidateId, CandidateRecord,
    CaseStudySubmission, DelibRowId, InterestSubmission, InterviewRecord, MembershipFlags,
    SelectionEntry,
};

/// Storage abstraction over the record store backing the portal.
///
/// Every operation is a suspension point; implementations may be remote.
/// Read methods report raw outcomes — degrading failures to empty or `None`
/// is the calling component's policy, not the store's.
#[async_trait]
pub trait PortalStore: Send + Sync {
    /// Identity of the signed-in caller, if any.
    async fn current_caller(&self) -> Result<Option<CallerIdentity>, StoreError>;

    /// Membership flags for one roster row.
    async fn membership_flags(&self, id: &CandidateId)
        -> Result<Option<MembershipFlags>, StoreError>;

    /// Every membership row, eligible or not, in storage order.
    async fn list_candidates(&self) -> Result<Vec<CandidateRecord>, StoreError>;

    /// Rows whose id appears in `ids`, in storage order. Unknown ids are
    /// skipped.
    async fn candidates_by_ids(
        &self,
        ids: &[CandidateId],
    ) -> Result<Vec<CandidateRecord>, StoreError>;

    async fn application(&self, id: &ApplicationId)
        -> Result<Option<ApplicationRecord>, StoreError>;

    async fn case_studies_for(
        &self,
        prospect: &CandidateId,
    ) -> Result<Vec<CaseStudySubmission>, StoreError>;

    async fn interviews_for(
        &self,
        prospect: &CandidateId,
    ) -> Result<Vec<InterviewRecord>, StoreError>;

    async fn interest_submissions(&self) -> Result<Vec<InterestSubmission>, StoreError>;

    /// Every persisted deliberation row.
    async fn delib_rows(&self) -> Result<Vec<SelectionEntry>, StoreError>;

    /// Delete the rows with the given row ids. Unknown ids are ignored.
    async fn delete_delib_rows(&self, row_ids: &[DelibRowId]) -> Result<(), StoreError>;

    /// Insert one deliberation row per prospect id, assigning fresh row ids.
    async fn insert_delib_rows(&self, prospect_ids: &[CandidateId]) -> Result<(), StoreError>;
}

/// Error enumeration for record-store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}
