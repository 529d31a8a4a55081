use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{
    AuthorizationContext, CandidateRecord, InterestSubmission, InterviewProspect, ReviewAccess,
    SortMode,
};
use super::store::PortalStore;

/// Assembles the gated, filtered, ordered candidate listings a reviewer
/// works from.
///
/// Authorization failures are silent-empty across every listing: a non-PIC
/// caller sees the same empty roster a PIC would see over an empty pool.
pub struct RosterService<S> {
    store: Arc<S>,
}

impl<S> RosterService<S>
where
    S: PortalStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Candidates eligible for review, ascending by name.
    pub async fn reviewable(&self, ctx: &AuthorizationContext) -> Vec<CandidateRecord> {
        if let ReviewAccess::Denied = ctx.review_access() {
            debug!("roster requested without PIC access; returning empty listing");
            return Vec::new();
        }

        let mut eligible = match self.store.list_candidates().await {
            Ok(records) => records
                .into_iter()
                .filter(CandidateRecord::is_reviewable)
                .collect::<Vec<_>>(),
            Err(err) => {
                warn!(error = %err, "candidate listing failed; returning empty roster");
                return Vec::new();
            }
        };

        sort_by_name(&mut eligible);
        eligible
    }

    /// Contact roster for interview scheduling. Gated on active standing,
    /// which (per the access conflation) admits PICs as well.
    pub async fn interview_prospects(&self, ctx: &AuthorizationContext) -> Vec<InterviewProspect> {
        if !ctx.is_active {
            debug!("interview roster requested without active standing");
            return Vec::new();
        }

        match self.store.list_candidates().await {
            Ok(records) => {
                let mut eligible = records
                    .into_iter()
                    .filter(CandidateRecord::is_reviewable)
                    .collect::<Vec<_>>();
                sort_by_name(&mut eligible);
                eligible.iter().map(InterviewProspect::from_record).collect()
            }
            Err(err) => {
                warn!(error = %err, "interview prospect listing failed");
                Vec::new()
            }
        }
    }

    /// Interest-form inbox, oldest first. PIC-gated like the main roster.
    pub async fn interest_submissions(
        &self,
        ctx: &AuthorizationContext,
    ) -> Vec<InterestSubmission> {
        if let ReviewAccess::Denied = ctx.review_access() {
            debug!("interest inbox requested without PIC access");
            return Vec::new();
        }

        match self.store.interest_submissions().await {
            Ok(mut submissions) => {
                submissions.sort_by_key(|submission| submission.submitted_at);
                submissions
            }
            Err(err) => {
                warn!(error = %err, "interest submission listing failed");
                Vec::new()
            }
        }
    }
}

/// Arrange `list` in the order `mode` calls for. Pure; sorts are stable, so
/// ties keep their prior relative order.
pub fn order(mut list: Vec<CandidateRecord>, mode: SortMode) -> Vec<CandidateRecord> {
    match mode {
        SortMode::ByName => sort_by_name(&mut list),
        SortMode::ByScore => {
            // Missing scores rank as zero rather than dropping the row.
            list.sort_by_key(|record| std::cmp::Reverse(record.total_score.unwrap_or(0)));
        }
    }
    list
}

/// Flip the sort mode and rearrange the listing accordingly. An involution
/// on mode: toggling twice restores the original ordering rule.
pub fn toggle_sort(list: Vec<CandidateRecord>, mode: SortMode) -> (Vec<CandidateRecord>, SortMode) {
    let next = match mode {
        SortMode::ByName => SortMode::ByScore,
        SortMode::ByScore => SortMode::ByName,
    };
    (order(list, next), next)
}

/// Retain candidates whose name contains `query`, case-insensitively. The
/// empty query retains everything. Filtering never reorders.
pub fn filter_by_name(list: &[CandidateRecord], query: &str) -> Vec<CandidateRecord> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return list.to_vec();
    }

    list.iter()
        .filter(|record| record.full_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

fn sort_by_name(list: &mut [CandidateRecord]) {
    list.sort_by_key(|record| record.full_name.to_lowercase());
}
