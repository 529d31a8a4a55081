use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pic_portal::config::AppConfig;
use pic_portal::error::AppError;
use pic_portal::portal::ReviewPortal;
use pic_portal::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{store_from_config, AppState};
use crate::routes::with_portal_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(roster_csv) = args.roster_csv.take() {
        config.portal.roster_csv = Some(roster_csv);
    }
    if let Some(reviewer) = args.reviewer.take() {
        config.portal.reviewer = Some(reviewer);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = store_from_config(&config.portal)?;
    let portal = Arc::new(ReviewPortal::new(store));

    let app = with_portal_routes(portal)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "PIC review portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
