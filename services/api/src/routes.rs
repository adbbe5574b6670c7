use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use study_advisor::workflows::advising::{
    advising_router, AdvisingSessionService, SessionRepository,
};

pub(crate) fn with_advising_routes<R>(service: Arc<AdvisingSessionService<R>>) -> axum::Router
where
    R: SessionRepository + 'static,
{
    let catalog = service.machine().catalog();
    let summary = json!({
        "countries": catalog.countries().iter().map(|country| &country.name).collect::<Vec<_>>(),
        "programs": catalog.programs().iter().map(|program| &program.name).collect::<Vec<_>>(),
        "countries_source": catalog.countries_source().to_string(),
        "programs_source": catalog.programs_source().to_string(),
    });

    advising_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/catalog",
            axum::routing::get(move || {
                let summary = summary.clone();
                async move { Json(summary) }
            }),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
