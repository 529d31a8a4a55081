use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use pic_portal::config::PortalConfig;
use pic_portal::error::AppError;
use pic_portal::portal::{
    candidates_from_path, ApplicationId, ApplicationRecord, CallerIdentity, CandidateId,
    CandidateRecord, CaseStudySubmission, InterviewRecord, MemoryPortalStore,
};
use serde_json::json;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the session store from configuration: CSV-seeded when an export is
/// configured, the built-in sample pool otherwise.
pub(crate) fn store_from_config(config: &PortalConfig) -> Result<Arc<MemoryPortalStore>, AppError> {
    let store = match &config.roster_csv {
        Some(path) => {
            let records = candidates_from_path(path)?;
            info!(count = records.len(), path = %path.display(), "seeded roster from export");
            let store = Arc::new(MemoryPortalStore::new());
            store.seed_candidates(records);
            store
        }
        None => sample_store(),
    };

    if let Some(reviewer) = &config.reviewer {
        store.set_caller(Some(CallerIdentity {
            member_id: CandidateId(reviewer.clone()),
        }));
    }

    Ok(store)
}

/// Sample candidate pool used by `demo` and by `serve` when no export is
/// configured.
pub(crate) fn sample_store() -> Arc<MemoryPortalStore> {
    let now = Utc::now();
    let store = Arc::new(MemoryPortalStore::new());

    store.seed_candidates([
        prospect("zed", "Zed Ruiz", Some(10), now),
        prospect("ann", "Ann Chi", Some(90), now),
        prospect("mia", "Mia Song", None, now),
        CandidateRecord {
            is_pic: true,
            application_ref: None,
            ..prospect("pat", "Pat Ibarra", None, now)
        },
        CandidateRecord {
            is_active: true,
            application_ref: None,
            ..prospect("tia", "Tia Okafor", None, now)
        },
    ]);

    store.seed_application(ApplicationRecord {
        id: ApplicationId("app-ann".to_string()),
        prospect_id: CandidateId("ann".to_string()),
        payload: json!({
            "essay": "I want to learn how the chapter runs diligence.",
            "year": "sophomore",
        }),
        submitted_at: now,
    });
    store.seed_case_studies([CaseStudySubmission {
        id: "cs-ann-1".to_string(),
        prospect: CandidateId("ann".to_string()),
        reviewer: "Pat Ibarra".to_string(),
        notes: "Clear market sizing, strong close".to_string(),
        score: Some(8),
        submitted_at: now,
    }]);
    store.seed_interviews([InterviewRecord {
        id: "iv-ann-1".to_string(),
        prospect_id: CandidateId("ann".to_string()),
        interviewer: "Tia Okafor".to_string(),
        notes: "Composed under pressure".to_string(),
        score: Some(9),
        conducted_at: now,
    }]);

    store
}

fn prospect(
    id: &str,
    full_name: &str,
    total_score: Option<i32>,
    created_at: DateTime<Utc>,
) -> CandidateRecord {
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
        created_at,
    }
}
