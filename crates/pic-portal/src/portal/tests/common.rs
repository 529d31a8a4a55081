use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::portal::domain::{
    ApplicationId, ApplicationRecord, AuthorizationContext, CallerIdentity, CandidateId,
    CandidateRecord, CaseStudySubmission, DelibRowId, InterestSubmission, InterviewRecord,
    MembershipFlags, SelectionEntry,
};
use crate::portal::memory::MemoryPortalStore;
use crate::portal::store::{PortalStore, StoreError};

pub(super) fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn candidate(id: &str, full_name: &str, total_score: Option<i32>) -> CandidateRecord {
    CandidateRecord {
        id: CandidateId(id.to_string()),
        full_name: full_name.to_string(),
        email: format!("{id}@example.edu"),
        is_active: false,
        is_pic: false,
        application_ref: Some(ApplicationId(format!("app-{id}"))),
        case_study_ref: None,
        interview_ref: None,
        active_case_studies: None,
        active_interviews: None,
        total_score,
        created_at: fixed_timestamp(),
    }
}

pub(super) fn active_member(id: &str, full_name: &str) -> CandidateRecord {
    CandidateRecord {
        is_active: true,
        application_ref: None,
        ..candidate(id, full_name, None)
    }
}

pub(super) fn pic_member(id: &str, full_name: &str) -> CandidateRecord {
    CandidateRecord {
        is_pic: true,
        application_ref: None,
        ..candidate(id, full_name, None)
    }
}

/// Store with two prospects, one active member, and one PIC. No caller is
/// signed in until a `sign_in_*` helper runs.
pub(super) fn seeded_store() -> Arc<MemoryPortalStore> {
    let store = Arc::new(MemoryPortalStore::new());
    store.seed_candidates([
        candidate("zed", "Zed Ruiz", Some(10)),
        candidate("ann", "Ann Chi", Some(90)),
        active_member("tia", "Tia Okafor"),
        pic_member("pic", "Pat Ibarra"),
    ]);
    store
}

pub(super) fn sign_in(store: &MemoryPortalStore, member: &str) {
    store.set_caller(Some(CallerIdentity {
        member_id: CandidateId(member.to_string()),
    }));
}

pub(super) fn pic_context() -> AuthorizationContext {
    AuthorizationContext {
        is_pic: true,
        is_active: true,
    }
}

pub(super) fn active_context() -> AuthorizationContext {
    AuthorizationContext {
        is_pic: false,
        is_active: true,
    }
}

pub(super) fn sample_application(id: &str, prospect: &str) -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId(id.to_string()),
        prospect_id: CandidateId(prospect.to_string()),
        payload: json!({ "why": "I build things", "year": "sophomore" }),
        submitted_at: fixed_timestamp(),
    }
}

pub(super) fn sample_case_study(id: &str, prospect: &str) -> CaseStudySubmission {
    CaseStudySubmission {
        id: id.to_string(),
        prospect: CandidateId(prospect.to_string()),
        reviewer: "Pat Ibarra".to_string(),
        notes: "Strong market sizing".to_string(),
        score: Some(8),
        submitted_at: fixed_timestamp(),
    }
}

pub(super) fn sample_interview(id: &str, prospect: &str) -> InterviewRecord {
    InterviewRecord {
        id: id.to_string(),
        prospect_id: CandidateId(prospect.to_string()),
        interviewer: "Tia Okafor".to_string(),
        notes: "Composed under pressure".to_string(),
        score: Some(9),
        conducted_at: fixed_timestamp(),
    }
}

pub(super) fn sample_interest(id: &str, full_name: &str, at: DateTime<Utc>) -> InterestSubmission {
    InterestSubmission {
        id: id.to_string(),
        full_name: full_name.to_string(),
        email: format!("{id}@example.edu"),
        responses: json!({ "major": "Economics" }),
        submitted_at: at,
    }
}

pub(super) fn ids(records: &[CandidateRecord]) -> Vec<&str> {
    records.iter().map(|record| record.id.0.as_str()).collect()
}

pub(super) fn names(records: &[CandidateRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.full_name.as_str())
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("record store offline".to_string())
}

/// Store double where every operation fails.
pub(super) struct UnavailableStore;

#[async_trait]
impl PortalStore for UnavailableStore {
    async fn current_caller(&self) -> Result<Option<CallerIdentity>, StoreError> {
        Err(unavailable())
    }

    async fn membership_flags(
        &self,
        _id: &CandidateId,
    ) -> Result<Option<MembershipFlags>, StoreError> {
        Err(unavailable())
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        Err(unavailable())
    }

    async fn candidates_by_ids(
        &self,
        _ids: &[CandidateId],
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        Err(unavailable())
    }

    async fn application(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        Err(unavailable())
    }

    async fn case_studies_for(
        &self,
        _prospect: &CandidateId,
    ) -> Result<Vec<CaseStudySubmission>, StoreError> {
        Err(unavailable())
    }

    async fn interviews_for(
        &self,
        _prospect: &CandidateId,
    ) -> Result<Vec<InterviewRecord>, StoreError> {
        Err(unavailable())
    }

    async fn interest_submissions(&self) -> Result<Vec<InterestSubmission>, StoreError> {
        Err(unavailable())
    }

    async fn delib_rows(&self) -> Result<Vec<SelectionEntry>, StoreError> {
        Err(unavailable())
    }

    async fn delete_delib_rows(&self, _row_ids: &[DelibRowId]) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn insert_delib_rows(&self, _prospect_ids: &[CandidateId]) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

/// Which operation group the flaky store should fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FailurePoint {
    DelibRead,
    DelibDelete,
    DelibInsert,
    Artifacts,
}

/// Store double that behaves like the in-memory store except for one failing
/// operation group.
pub(super) struct FlakyStore {
    pub(super) inner: MemoryPortalStore,
    failure: FailurePoint,
}

impl FlakyStore {
    pub(super) fn failing_on(failure: FailurePoint) -> Self {
        Self {
            inner: MemoryPortalStore::new(),
            failure,
        }
    }
}

#[async_trait]
impl PortalStore for FlakyStore {
    async fn current_caller(&self) -> Result<Option<CallerIdentity>, StoreError> {
        self.inner.current_caller().await
    }

    async fn membership_flags(
        &self,
        id: &CandidateId,
    ) -> Result<Option<MembershipFlags>, StoreError> {
        self.inner.membership_flags(id).await
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        self.inner.list_candidates().await
    }

    async fn candidates_by_ids(
        &self,
        ids: &[CandidateId],
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        self.inner.candidates_by_ids(ids).await
    }

    async fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        self.inner.application(id).await
    }

    async fn case_studies_for(
        &self,
        prospect: &CandidateId,
    ) -> Result<Vec<CaseStudySubmission>, StoreError> {
        if self.failure == FailurePoint::Artifacts {
            return Err(unavailable());
        }
        self.inner.case_studies_for(prospect).await
    }

    async fn interviews_for(
        &self,
        prospect: &CandidateId,
    ) -> Result<Vec<InterviewRecord>, StoreError> {
        if self.failure == FailurePoint::Artifacts {
            return Err(unavailable());
        }
        self.inner.interviews_for(prospect).await
    }

    async fn interest_submissions(&self) -> Result<Vec<InterestSubmission>, StoreError> {
        self.inner.interest_submissions().await
    }

    async fn delib_rows(&self) -> Result<Vec<SelectionEntry>, StoreError> {
        if self.failure == FailurePoint::DelibRead {
            return Err(unavailable());
        }
        self.inner.delib_rows().await
    }

    async fn delete_delib_rows(&self, row_ids: &[DelibRowId]) -> Result<(), StoreError> {
        if self.failure == FailurePoint::DelibDelete {
            return Err(unavailable());
        }
        self.inner.delete_delib_rows(row_ids).await
    }

    async fn insert_delib_rows(&self, prospect_ids: &[CandidateId]) -> Result<(), StoreError> {
        if self.failure == FailurePoint::DelibInsert {
            return Err(unavailable());
        }
        self.inner.insert_delib_rows(prospect_ids).await
    }
}

/// Store double counting application reads, so tests can prove that blank
/// ids never reach the backing store.
pub(super) struct CountingDetailStore {
    pub(super) inner: MemoryPortalStore,
    pub(super) application_reads: AtomicUsize,
}

impl CountingDetailStore {
    pub(super) fn new() -> Self {
        Self {
            inner: MemoryPortalStore::new(),
            application_reads: AtomicUsize::new(0),
        }
    }

    pub(super) fn reads(&self) -> usize {
        self.application_reads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PortalStore for CountingDetailStore {
    async fn current_caller(&self) -> Result<Option<CallerIdentity>, StoreError> {
        self.inner.current_caller().await
    }

    async fn membership_flags(
        &self,
        id: &CandidateId,
    ) -> Result<Option<MembershipFlags>, StoreError> {
        self.inner.membership_flags(id).await
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        self.inner.list_candidates().await
    }

    async fn candidates_by_ids(
        &self,
        ids: &[CandidateId],
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        self.inner.candidates_by_ids(ids).await
    }

    async fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        self.application_reads.fetch_add(1, Ordering::Relaxed);
        self.inner.application(id).await
    }

    async fn case_studies_for(
        &self,
        prospect: &CandidateId,
    ) -> Result<Vec<CaseStudySubmission>, StoreError> {
        self.inner.case_studies_for(prospect).await
    }

    async fn interviews_for(
        &self,
        prospect: &CandidateId,
    ) -> Result<Vec<InterviewRecord>, StoreError> {
        self.inner.interviews_for(prospect).await
    }

    async fn interest_submissions(&self) -> Result<Vec<InterestSubmission>, StoreError> {
        self.inner.interest_submissions().await
    }

    async fn delib_rows(&self) -> Result<Vec<SelectionEntry>, StoreError> {
        self.inner.delib_rows().await
    }

    async fn delete_delib_rows(&self, row_ids: &[DelibRowId]) -> Result<(), StoreError> {
        self.inner.delete_delib_rows(row_ids).await
    }

    async fn insert_delib_rows(&self, prospect_ids: &[CandidateId]) -> Result<(), StoreError> {
        self.inner.insert_delib_rows(prospect_ids).await
    }
}
