use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    ApplicationDetail, AuthorizationContext, CandidateCardView, CandidateId, InterestSubmission,
    InterviewProspect, ReviewAccess, SortMode,
};
use super::roster::{filter_by_name, order, toggle_sort};
use super::store::PortalStore;
use super::{ReviewPortal, SyncError};

/// Router builder exposing the portal's review workflow over HTTP.
pub fn portal_router<S>(portal: Arc<ReviewPortal<S>>) -> Router
where
    S: PortalStore + 'static,
{
    Router::new()
        .route("/api/v1/portal/access", get(access_handler::<S>))
        .route("/api/v1/portal/roster", get(roster_handler::<S>))
        .route("/api/v1/portal/roster/sort", post(sort_handler::<S>))
        .route(
            "/api/v1/portal/selection/toggle",
            post(selection_toggle_handler::<S>),
        )
        .route("/api/v1/portal/selection", get(selection_handler::<S>))
        .route(
            "/api/v1/portal/delibs",
            get(delibs_roster_handler::<S>).post(delibs_submit_handler::<S>),
        )
        .route(
            "/api/v1/portal/prospects/:prospect_id/detail",
            get(detail_handler::<S>),
        )
        .route(
            "/api/v1/portal/interviews/prospects",
            get(interview_prospects_handler::<S>),
        )
        .route("/api/v1/portal/interests", get(interests_handler::<S>))
        .with_state(portal)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterQuery {
    query: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterResponse {
    pub(crate) authorized: bool,
    pub(crate) sort: SortMode,
    pub(crate) roster: Vec<CandidateCardView>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelectionToggleRequest {
    pub(crate) prospect_id: CandidateId,
}

#[derive(Debug, Serialize)]
pub(crate) struct SelectionResponse {
    pub(crate) selected: Vec<CandidateId>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DossierResponse {
    pub(crate) prospect: CandidateCardView,
    pub(crate) detail: Option<ApplicationDetail>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InterviewProspectsResponse {
    pub(crate) prospects: Vec<InterviewProspect>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InterestsResponse {
    pub(crate) submissions: Vec<InterestSubmission>,
}

pub(crate) async fn access_handler<S>(
    State(portal): State<Arc<ReviewPortal<S>>>,
) -> axum::Json<AuthorizationContext>
where
    S: PortalStore + 'static,
{
    axum::Json(portal.gate().resolve().await)
}

pub(crate) async fn roster_handler<S>(
    State(portal): State<Arc<ReviewPortal<S>>>,
    Query(params): Query<RosterQuery>,
) -> axum::Json<RosterResponse>
where
    S: PortalStore + 'static,
{
    let ctx = portal.gate().resolve().await;
    let listing = portal.roster().reviewable(&ctx).await;

    let mut session = portal.session().lock().await;
    if let Some(query) = params.query {
        session.query = query;
    }
    let ordered = order(listing, session.sort);
    let filtered = filter_by_name(&ordered, &session.query);

    axum::Json(RosterResponse {
        authorized: matches!(ctx.review_access(), ReviewAccess::Granted),
        sort: session.sort,
        roster: filtered.iter().map(|record| record.card_view()).collect(),
    })
}

pub(crate) async fn sort_handler<S>(
    State(portal): State<Arc<ReviewPortal<S>>>,
) -> axum::Json<RosterResponse>
where
    S: PortalStore + 'static,
{
    let ctx = portal.gate().resolve().await;
    let listing = portal.roster().reviewable(&ctx).await;

    let mut session = portal.session().lock().await;
    let (toggled, next) = toggle_sort(listing, session.sort);
    session.sort = next;
    let filtered = filter_by_name(&toggled, &session.query);

    axum::Json(RosterResponse {
        authorized: matches!(ctx.review_access(), ReviewAccess::Granted),
        sort: next,
        roster: filtered.iter().map(|record| record.card_view()).collect(),
    })
}

pub(crate) async fn selection_toggle_handler<S>(
    State(portal): State<Arc<ReviewPortal<S>>>,
    axum::Json(request): axum::Json<SelectionToggleRequest>,
) -> Response
where
    S: PortalStore + 'static,
{
    let ctx = portal.gate().resolve().await;
    if let ReviewAccess::Denied = ctx.review_access() {
        return not_on_pic();
    }

    let mut session = portal.session().lock().await;
    session.selection.toggle(request.prospect_id);
    let response = SelectionResponse {
        selected: session.selection.snapshot(),
    };
    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn selection_handler<S>(
    State(portal): State<Arc<ReviewPortal<S>>>,
) -> axum::Json<SelectionResponse>
where
    S: PortalStore + 'static,
{
    let session = portal.session().lock().await;
    axum::Json(SelectionResponse {
        selected: session.selection.snapshot(),
    })
}

pub(crate) async fn delibs_submit_handler<S>(State(portal): State<Arc<ReviewPortal<S>>>) -> Response
where
    S: PortalStore + 'static,
{
    let ctx = portal.gate().resolve().await;
    if let ReviewAccess::Denied = ctx.review_access() {
        return not_on_pic();
    }

    let mut session = portal.session().lock().await;
    match portal.delibs().submit(&session.selection).await {
        Ok(()) => {
            let submitted = session.selection.len();
            session.selection.clear();
            let payload = json!({ "status": "submitted", "count": submitted });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        // Submission failed: the selection stays in the session so the
        // reviewer can resubmit the same set.
        Err(err) => {
            let phase = match err {
                SyncError::ReadOrDeleteFailed(_) => "read_or_delete",
                SyncError::InsertFailed(_) => "insert",
            };
            let payload = json!({ "error": err.to_string(), "phase": phase });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn delibs_roster_handler<S>(
    State(portal): State<Arc<ReviewPortal<S>>>,
) -> axum::Json<Vec<CandidateCardView>>
where
    S: PortalStore + 'static,
{
    let roster = portal.delibs().roster().await;
    axum::Json(roster.iter().map(|record| record.card_view()).collect())
}

pub(crate) async fn detail_handler<S>(
    State(portal): State<Arc<ReviewPortal<S>>>,
    Path(prospect_id): Path<String>,
) -> Response
where
    S: PortalStore + 'static,
{
    let id = CandidateId(prospect_id);
    let Some(record) = portal.candidate(&id).await else {
        let payload = json!({ "error": "unknown prospect" });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    let detail = match &record.application_ref {
        Some(application_ref) => portal.details().load(application_ref, &record.id).await,
        None => None,
    };

    let response = DossierResponse {
        prospect: record.card_view(),
        detail,
    };
    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn interview_prospects_handler<S>(
    State(portal): State<Arc<ReviewPortal<S>>>,
) -> axum::Json<InterviewProspectsResponse>
where
    S: PortalStore + 'static,
{
    let ctx = portal.gate().resolve().await;
    axum::Json(InterviewProspectsResponse {
        prospects: portal.roster().interview_prospects(&ctx).await,
    })
}

pub(crate) async fn interests_handler<S>(
    State(portal): State<Arc<ReviewPortal<S>>>,
) -> axum::Json<InterestsResponse>
where
    S: PortalStore + 'static,
{
    let ctx = portal.gate().resolve().await;
    axum::Json(InterestsResponse {
        submissions: portal.roster().interest_submissions(&ctx).await,
    })
}

fn not_on_pic() -> Response {
    let payload = json!({ "error": "not on PIC" });
    (StatusCode::FORBIDDEN, axum::Json(payload)).into_response()
}
