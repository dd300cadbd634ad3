//! # rwh-api — Axum API Service for Rainwater-Harvesting Compliance
//!
//! HTTP surface over the rwh-reg compliance engine: run checks, render
//! reports, and manage owner-scoped compliance records.
//!
//! ## API Surface
//!
//! | Route                       | Module                  | Purpose                     |
//! |-----------------------------|-------------------------|-----------------------------|
//! | `POST /compliance/check`    | [`routes::compliance`]  | Run a compliance check      |
//! | `POST /compliance/report`   | [`routes::compliance`]  | Render a markdown report    |
//! | `GET /compliance`           | [`routes::compliance`]  | List the caller's records   |
//! | `GET /compliance/{id}`      | [`routes::compliance`]  | Fetch one record            |
//! | `DELETE /compliance/{id}`   | [`routes::compliance`]  | Remove one record           |
//! | `GET /openapi.json`         | [`openapi`]             | OpenAPI spec                |
//! | `GET /health/*`, `/metrics` | this module             | Probes and Prometheus scrape|
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! Health probes, `/metrics`, and `/openapi.json` are unauthenticated; the
//! record endpoints identify the caller via the `x-owner-id` header.

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::collections::HashMap;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Check if metrics are enabled via the `RWH_METRICS_ENABLED` env var.
/// Defaults to `true` when the variable is absent or set to anything other
/// than `"false"`.
fn metrics_enabled() -> bool {
    std::env::var("RWH_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) and `/metrics` are mounted outside the API
/// router so they remain accessible without an owner header.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = metrics_enabled();

    // Body size limit: 2 MiB. Inline verdicts are the largest payloads and
    // stay far below this.
    let mut api = Router::new()
        .merge(routes::compliance::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    // Only register the metrics middleware when metrics are enabled.
    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(metrics.clone()));
    }

    let api = api.layer(TraceLayer::new_for_http()).with_state(state.clone());

    // Health probes stay unauthenticated so orchestrators can reach them.
    let mut unauthenticated = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    // Mount /metrics when metrics are enabled (unauthenticated, like health probes).
    if metrics_on {
        unauthenticated = unauthenticated
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(axum::Extension(metrics));
    }

    let unauthenticated = unauthenticated.with_state(state);

    Router::new().merge(unauthenticated).merge(api)
}

/// GET /metrics — Prometheus metrics scrape endpoint.
///
/// Updates the record gauges from current `AppState` on each scrape (pull
/// model), then gathers and encodes all metrics in Prometheus text
/// exposition format.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    // -- Update domain gauges from AppState --

    let mut by_status: HashMap<&'static str, usize> = HashMap::new();
    for entry in state.records.iter() {
        *by_status.entry(entry.value().status.as_str()).or_default() += 1;
    }
    // Reset all status labels, then set current values.
    metrics.compliance_records().reset();
    for (status, count) in &by_status {
        metrics
            .compliance_records()
            .with_label_values(&[status])
            .set(*count as f64);
    }
    metrics
        .compliance_records_total()
        .set(state.records.len() as f64);

    // -- Gather and encode --
    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the application is ready to serve traffic.
///
/// Checks:
/// - The in-memory record store is accessible.
/// - Database connection is healthy (when configured).
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    // Verify the record store is accessible.
    let _ = state.records.len();

    // Verify database connection (when configured).
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}
