//! Role-gated candidate review and deliberation-set synchronization.
//!
//! The portal core is five collaborators over one record store: the access
//! gate resolves the caller's flags, the roster service assembles the gated
//! candidate listings, the detail loader fetches per-prospect dossiers, the
//! selection set accumulates the reviewer's working shortlist, and the
//! synchronizer commits it with replace-all semantics.

pub mod access;
pub mod delibs;
pub mod detail;
pub mod domain;
pub mod memory;
pub mod roster;
pub mod router;
pub mod seed;
pub mod selection;
pub mod store;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use access::AccessGate;
pub use delibs::{DelibsSynchronizer, SyncError};
pub use detail::DetailLoader;
pub use domain::{
    ApplicationDetail, ApplicationId, ApplicationRecord, AuthorizationContext, CallerIdentity,
    CandidateCardView, CandidateId, CandidateRecord, CaseStudySubmission, DelibRowId,
    InterestSubmission, InterviewProspect, InterviewRecord, MembershipFlags, ReviewAccess,
    SelectionEntry, SortMode,
};
pub use memory::MemoryPortalStore;
pub use roster::{filter_by_name, order, toggle_sort, RosterService};
pub use router::portal_router;
pub use seed::{candidates_from_path, candidates_from_reader, RosterImportError};
pub use selection::{ReviewSession, SelectionSet};
pub use store::{PortalStore, StoreError};

/// The wired-up portal: the five core components over one shared store,
/// plus the explicit per-session review state.
pub struct ReviewPortal<S> {
    gate: AccessGate<S>,
    roster: RosterService<S>,
    details: DetailLoader<S>,
    delibs: DelibsSynchronizer<S>,
    session: Mutex<ReviewSession>,
    store: Arc<S>,
}

impl<S> ReviewPortal<S>
where
    S: PortalStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            gate: AccessGate::new(store.clone()),
            roster: RosterService::new(store.clone()),
            details: DetailLoader::new(store.clone()),
            delibs: DelibsSynchronizer::new(store.clone()),
            session: Mutex::new(ReviewSession::new()),
            store,
        }
    }

    pub fn gate(&self) -> &AccessGate<S> {
        &self.gate
    }

    pub fn roster(&self) -> &RosterService<S> {
        &self.roster
    }

    pub fn details(&self) -> &DetailLoader<S> {
        &self.details
    }

    pub fn delibs(&self) -> &DelibsSynchronizer<S> {
        &self.delibs
    }

    pub fn session(&self) -> &Mutex<ReviewSession> {
        &self.session
    }

    /// Look up one candidate row by id.
    pub async fn candidate(&self, id: &CandidateId) -> Option<CandidateRecord> {
        match self.store.candidates_by_ids(std::slice::from_ref(id)).await {
            Ok(mut records) => records.pop(),
            Err(err) => {
                tracing::warn!(candidate = %id.0, error = %err, "candidate lookup failed");
                None
            }
        }
    }
}
