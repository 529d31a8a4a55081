use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::domain::{
    ApplicationId, ApplicationRecord, CallerIdentity, CandidateId, CandidateRecord,
    CaseStudySubmission, DelibRowId, InterestSubmission, InterviewRecord, MembershipFlags,
    SelectionEntry,
};
use super::store::{PortalStore, StoreError};

/// In-memory backing store for a single review session.
///
/// The whole candidate pool fits in memory for this tool, so this is the
/// production store, seeded at startup from the intake export, as well as
/// the fixture store the tests build on.
#[derive(Default)]
pub struct MemoryPortalStore {
    inner: Mutex<Collections>,
    delib_sequence: AtomicU64,
}

#[derive(Default)]
struct Collections {
    caller: Option<CallerIdentity>,
    candidates: Vec<CandidateRecord>,
    applications: HashMap<ApplicationId, ApplicationRecord>,
    case_studies: Vec<CaseStudySubmission>,
    interviews: Vec<InterviewRecord>,
    interests: Vec<InterestSubmission>,
    delibs: Vec<SelectionEntry>,
}

impl MemoryPortalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record which member is signed in; `None` signs the caller out.
    pub fn set_caller(&self, caller: Option<CallerIdentity>) {
        self.lock().caller = caller;
    }

    pub fn seed_candidates(&self, records: impl IntoIterator<Item = CandidateRecord>) {
        self.lock().candidates.extend(records);
    }

    pub fn seed_application(&self, record: ApplicationRecord) {
        self.lock().applications.insert(record.id.clone(), record);
    }

    pub fn seed_case_studies(&self, records: impl IntoIterator<Item = CaseStudySubmission>) {
        self.lock().case_studies.extend(records);
    }

    pub fn seed_interviews(&self, records: impl IntoIterator<Item = InterviewRecord>) {
        self.lock().interviews.extend(records);
    }

    pub fn seed_interests(&self, records: impl IntoIterator<Item = InterestSubmission>) {
        self.lock().interests.extend(records);
    }

    /// Insert deliberation rows directly, bypassing the synchronizer. Used to
    /// stage pre-existing (possibly duplicated) state.
    pub fn seed_delib_rows(&self, prospect_ids: impl IntoIterator<Item = CandidateId>) {
        let mut guard = self.lock();
        for prospect_id in prospect_ids {
            let id = DelibRowId(self.delib_sequence.fetch_add(1, Ordering::Relaxed));
            guard.delibs.push(SelectionEntry { id, prospect_id });
        }
    }

    /// Snapshot of the stored deliberation rows, for assertions and reports.
    pub fn delib_snapshot(&self) -> Vec<SelectionEntry> {
        self.lock().delibs.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Collections> {
        self.inner.lock().expect("store mutex poisoned")
    }
}

#[async_trait]
impl PortalStore for MemoryPortalStore {
    async fn current_caller(&self) -> Result<Option<CallerIdentity>, StoreError> {
        Ok(self.lock().caller.clone())
    }

    async fn membership_flags(
        &self,
        id: &CandidateId,
    ) -> Result<Option<MembershipFlags>, StoreError> {
        let guard = self.lock();
        Ok(guard
            .candidates
            .iter()
            .find(|record| &record.id == id)
            .map(|record| MembershipFlags {
                is_active: record.is_active,
                is_pic: record.is_pic,
            }))
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        Ok(self.lock().candidates.clone())
    }

    async fn candidates_by_ids(
        &self,
        ids: &[CandidateId],
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        let guard = self.lock();
        Ok(guard
            .candidates
            .iter()
            .filter(|record| ids.contains(&record.id))
            .cloned()
            .collect())
    }

    async fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        Ok(self.lock().applications.get(id).cloned())
    }

    async fn case_studies_for(
        &self,
        prospect: &CandidateId,
    ) -> Result<Vec<CaseStudySubmission>, StoreError> {
        let guard = self.lock();
        Ok(guard
            .case_studies
            .iter()
            .filter(|record| &record.prospect == prospect)
            .cloned()
            .collect())
    }

    async fn interviews_for(
        &self,
        prospect: &CandidateId,
    ) -> Result<Vec<InterviewRecord>, StoreError> {
        let guard = self.lock();
        Ok(guard
            .interviews
            .iter()
            .filter(|record| &record.prospect_id == prospect)
            .cloned()
            .collect())
    }

    async fn interest_submissions(&self) -> Result<Vec<InterestSubmission>, StoreError> {
        Ok(self.lock().interests.clone())
    }

    async fn delib_rows(&self) -> Result<Vec<SelectionEntry>, StoreError> {
        Ok(self.lock().delibs.clone())
    }

    async fn delete_delib_rows(&self, row_ids: &[DelibRowId]) -> Result<(), StoreError> {
        self.lock()
            .delibs
            .retain(|entry| !row_ids.contains(&entry.id));
        Ok(())
    }

    async fn insert_delib_rows(&self, prospect_ids: &[CandidateId]) -> Result<(), StoreError> {
        let mut guard = self.lock();
        for prospect_id in prospect_ids {
            let id = DelibRowId(self.delib_sequence.fetch_add(1, Ordering::Relaxed));
            guard.delibs.push(SelectionEntry {
                id,
                prospect_id: prospect_id.clone(),
            });
        }
        Ok(())
    }
}
