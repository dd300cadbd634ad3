//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Adds the `x-owner-id` header security scheme to the OpenAPI spec.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "owner_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "x-owner-id",
                    "Owner UUID identifying the caller. Records are only visible to the owner \
                     who created them.",
                ))),
            );
        }
    }
}

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "RWH Compliance API",
        version = "0.3.2",
        description = "Rainwater-harvesting compliance engine.\n\nProvides:\n- **Compliance checks** of system parameters against region-scoped regulations (Delhi, Maharashtra, Karnataka, Tamil Nadu, plus nationwide rules)\n- **Markdown reports** with per-rule details and remediation guidance for failing rules\n- **Owner-scoped compliance records** with optional Postgres persistence\n\nAuthentication: owner UUID via the `x-owner-id` header. Health probes (`/health/*`), `/metrics`, and `/openapi.json` are unauthenticated.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    security(
        ("owner_id" = [])
    ),
    paths(
        crate::routes::compliance::check_compliance,
        crate::routes::compliance::generate_report,
        crate::routes::compliance::list_records,
        crate::routes::compliance::get_record,
        crate::routes::compliance::delete_record,
    ),
    components(
        schemas(
            crate::state::ComplianceRecord,
            crate::error::ErrorBody,
            crate::routes::compliance::CheckComplianceRequest,
            crate::routes::compliance::CheckComplianceResponse,
            crate::routes::compliance::ReportRequest,
            crate::routes::compliance::ReportResponse,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "compliance", description = "Compliance checks, markdown reports, and the owner-scoped record store"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
