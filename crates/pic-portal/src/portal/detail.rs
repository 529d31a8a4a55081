use std::sync::Arc;

use tracing::warn;

use super::domain::{
    ApplicationDetail, ApplicationId, ApplicationRecord, CandidateId, CaseStudySubmission,
    InterviewRecord,
};
use super::store::PortalStore;

/// On-demand loader for a prospect's application and review artifacts.
///
/// Pure read path: every failure degrades to `None` or an empty list with a
/// log entry, never an error to the caller.
pub struct DetailLoader<S> {
    store: Arc<S>,
}

impl<S> DetailLoader<S>
where
    S: PortalStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetch one application. A blank id short-circuits to `None` without a
    /// backing call.
    pub async fn application(&self, id: &ApplicationId) -> Option<ApplicationRecord> {
        if id.0.trim().is_empty() {
            warn!("application lookup requested without an application id");
            return None;
        }

        match self.store.application(id).await {
            Ok(record) => record,
            Err(err) => {
                warn!(application = %id.0, error = %err, "application lookup failed");
                None
            }
        }
    }

    /// Case studies attached to one prospect; empty when the id is blank, the
    /// prospect has none, or the read fails.
    pub async fn case_studies(&self, prospect: &CandidateId) -> Vec<CaseStudySubmission> {
        if prospect.0.trim().is_empty() {
            warn!("case study lookup requested without a prospect id");
            return Vec::new();
        }

        match self.store.case_studies_for(prospect).await {
            Ok(records) => records,
            Err(err) => {
                warn!(prospect = %prospect.0, error = %err, "case study lookup failed");
                Vec::new()
            }
        }
    }

    /// Interview records attached to one prospect; same degradation policy as
    /// [`DetailLoader::case_studies`].
    pub async fn interviews(&self, prospect: &CandidateId) -> Vec<InterviewRecord> {
        if prospect.0.trim().is_empty() {
            warn!("interview lookup requested without a prospect id");
            return Vec::new();
        }

        match self.store.interviews_for(prospect).await {
            Ok(records) => records,
            Err(err) => {
                warn!(prospect = %prospect.0, error = %err, "interview lookup failed");
                Vec::new()
            }
        }
    }

    /// Assemble the full dossier for a popup view. `None` only when the
    /// application itself cannot be read; each artifact list degrades to
    /// empty independently.
    pub async fn load(
        &self,
        application_id: &ApplicationId,
        prospect: &CandidateId,
    ) -> Option<ApplicationDetail> {
        let application = self.application(application_id).await?;
        let case_studies = self.case_studies(prospect).await;
        let interviews = self.interviews(prospect).await;

        Some(ApplicationDetail {
            application,
            case_studies,
            interviews,
        })
    }
}
