//! # Compliance API
//!
//! The `/compliance/*` surface:
//!
//! - `POST /compliance/check` — run a compliance check; persists a record
//!   when the caller supplies an `assessmentId`.
//! - `POST /compliance/report` — render a markdown report from an inline
//!   verdict or a stored record (`complianceId`).
//! - `GET /compliance` — list the caller's records, newest first.
//! - `GET /compliance/{id}` / `DELETE /compliance/{id}` — fetch or remove
//!   a single record.
//!
//! All endpoints identify the caller via the `x-owner-id` header; records
//! are only visible to the owner who created them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use rwh_core::{ComplianceVerdict, InputError, RuleOutcome, SystemParameters, SystemSpecs};
use rwh_reg::{render_report, summarize};

use crate::auth::OwnerId;
use crate::db;
use crate::error::{AppError, ErrorBody};
use crate::extractors::Json;
use crate::state::{AppState, ComplianceRecord};

/// Request body for `POST /compliance/check`.
///
/// Mirrors the system parameter intake: every field except `location` is
/// optional, and `location` is validated rather than required by the
/// deserializer so its absence yields the published "location is required"
/// message instead of a parse error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckComplianceRequest {
    /// Location the system will be installed in.
    #[serde(default)]
    pub location: Option<String>,
    /// Caller-side assessment reference; presence triggers persistence.
    #[serde(default)]
    pub assessment_id: Option<String>,
    /// Roof catchment area in m².
    #[serde(default)]
    pub roof_area: Option<f64>,
    /// Measured infiltration rate in mm/hr.
    #[serde(default)]
    pub infiltration_rate: Option<f64>,
    /// Estimated annual recharge potential in litres.
    #[serde(default)]
    pub recharge_potential: Option<f64>,
    /// Physical system description (recharge pit, storage, filtration).
    #[serde(default)]
    #[schema(value_type = Object)]
    pub system_specs: SystemSpecs,
}

/// Response body for `POST /compliance/check`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckComplianceResponse {
    /// Location the check was run for.
    pub region: String,
    /// Whether every evaluated rule passed.
    pub is_compliant: bool,
    /// Per-rule outcomes in catalogue order.
    #[schema(value_type = Vec<Object>)]
    pub results: Vec<RuleOutcome>,
    /// One-line outcome summary.
    pub summary: String,
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
    /// Remediation lines for the failing rules, in result order.
    pub recommendations: Vec<String>,
    /// Full markdown report for the verdict.
    pub detailed_report: String,
    /// Persisted record id, present when an `assessmentId` was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<Uuid>,
}

/// Request body for `POST /compliance/report`.
///
/// Either `complianceId` referencing a stored record, or an inline verdict
/// (`region` and `results` required; `isCompliant` and `summary` derived
/// when absent).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Stored record to render.
    #[serde(default)]
    pub compliance_id: Option<Uuid>,
    /// Region of an inline verdict.
    #[serde(default)]
    pub region: Option<String>,
    /// Overall flag of an inline verdict; derived from `results` if absent.
    #[serde(default)]
    pub is_compliant: Option<bool>,
    /// Per-rule outcomes of an inline verdict.
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub results: Option<Vec<RuleOutcome>>,
    /// Summary of an inline verdict; derived from `results` if absent.
    #[serde(default)]
    pub summary: Option<String>,
    /// Check timestamp of an inline verdict; defaults to now.
    #[serde(default)]
    pub checked_at: Option<DateTime<Utc>>,
}

/// Response body for `POST /compliance/report`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    /// Rendered markdown report.
    pub report: String,
}

/// Build the compliance router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/compliance/check", post(check_compliance))
        .route("/compliance/report", post(generate_report))
        .route("/compliance", get(list_records))
        .route("/compliance/:id", get(get_record).delete(delete_record))
}

/// Remediation lines for the failing rules, in result order.
fn failing_recommendations(verdict: &ComplianceVerdict, state: &AppState) -> Vec<String> {
    verdict
        .results
        .iter()
        .filter(|r| !r.compliant)
        .map(|r| state.catalog().remediation_for(&r.rule_id).to_string())
        .collect()
}

/// POST /compliance/check — Run a compliance check.
#[utoipa::path(
    post,
    path = "/compliance/check",
    request_body = CheckComplianceRequest,
    responses(
        (status = 200, description = "Compliance verdict with report and recommendations", body = CheckComplianceResponse),
        (status = 400, description = "Missing location or malformed body", body = ErrorBody),
        (status = 401, description = "Missing or malformed x-owner-id header", body = ErrorBody),
    ),
    security(("owner_id" = [])),
    tag = "compliance"
)]
pub async fn check_compliance(
    State(state): State<AppState>,
    owner: OwnerId,
    Json(req): Json<CheckComplianceRequest>,
) -> Result<Json<CheckComplianceResponse>, AppError> {
    let params = SystemParameters {
        location: req.location.unwrap_or_default(),
        roof_area: req.roof_area,
        infiltration_rate: req.infiltration_rate,
        recharge_potential: req.recharge_potential,
        system_specs: req.system_specs,
    };

    let verdict = state.checker.check(&params)?;
    let recommendations = failing_recommendations(&verdict, &state);
    let detailed_report = render_report(&verdict, state.catalog());

    // Persist only when the caller ties the check to an assessment.
    let record_id = match req.assessment_id.as_deref().map(str::trim) {
        Some(assessment) if !assessment.is_empty() => {
            let now = Utc::now();
            let record = ComplianceRecord {
                id: Uuid::new_v4(),
                owner_id: owner.0,
                assessment_id: Some(assessment.to_string()),
                location: verdict.region.clone(),
                status: verdict.status(),
                is_compliant: verdict.is_compliant,
                summary: verdict.summary.clone(),
                regulations: verdict.results.clone(),
                recommendations: recommendations.clone(),
                created_at: now,
                updated_at: now,
            };
            if let Some(pool) = &state.db_pool {
                if let Err(e) = db::compliance_records::insert(pool, &record).await {
                    tracing::warn!(
                        record_id = %record.id,
                        error = %e,
                        "failed to mirror compliance record to database"
                    );
                }
            }
            let id = record.id;
            state.records.insert(id, record);
            tracing::info!(record_id = %id, owner_id = %owner, "compliance record stored");
            Some(id)
        }
        _ => None,
    };

    Ok(Json(CheckComplianceResponse {
        region: verdict.region,
        is_compliant: verdict.is_compliant,
        results: verdict.results,
        summary: verdict.summary,
        checked_at: verdict.checked_at,
        recommendations,
        detailed_report,
        record_id,
    }))
}

/// POST /compliance/report — Render a markdown compliance report.
#[utoipa::path(
    post,
    path = "/compliance/report",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Rendered markdown report", body = ReportResponse),
        (status = 400, description = "Inline verdict missing results or region", body = ErrorBody),
        (status = 403, description = "Record belongs to another owner", body = ErrorBody),
        (status = 404, description = "Referenced record not found", body = ErrorBody),
    ),
    security(("owner_id" = [])),
    tag = "compliance"
)]
pub async fn generate_report(
    State(state): State<AppState>,
    owner: OwnerId,
    Json(req): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let verdict = match req.compliance_id {
        Some(id) => {
            let record = state
                .records
                .get(&id)
                .map(|entry| entry.value().clone())
                .ok_or_else(|| AppError::not_found(format!("compliance record {id} not found")))?;
            if record.owner_id != owner.0 {
                return Err(AppError::Forbidden("record belongs to another owner".to_string()));
            }
            ComplianceVerdict {
                region: record.location,
                is_compliant: record.is_compliant,
                results: record.regulations,
                summary: record.summary,
                checked_at: record.created_at,
            }
        }
        None => {
            let results = req.results.ok_or(InputError::MissingResults)?;
            let region = match req.region.as_deref().map(str::trim) {
                Some(region) if !region.is_empty() => region.to_string(),
                _ => return Err(InputError::MissingRegion.into()),
            };
            let is_compliant = req
                .is_compliant
                .unwrap_or_else(|| results.iter().all(|r| r.compliant));
            let summary = req.summary.unwrap_or_else(|| summarize(&results));
            ComplianceVerdict {
                region,
                is_compliant,
                results,
                summary,
                checked_at: req.checked_at.unwrap_or_else(Utc::now),
            }
        }
    };

    let report = render_report(&verdict, state.catalog());
    Ok(Json(ReportResponse { report }))
}

/// GET /compliance — List the caller's compliance records, newest first.
#[utoipa::path(
    get,
    path = "/compliance",
    responses(
        (status = 200, description = "The caller's compliance records", body = Vec<ComplianceRecord>),
        (status = 401, description = "Missing or malformed x-owner-id header", body = ErrorBody),
    ),
    security(("owner_id" = [])),
    tag = "compliance"
)]
pub async fn list_records(
    State(state): State<AppState>,
    owner: OwnerId,
) -> Result<Json<Vec<ComplianceRecord>>, AppError> {
    let mut records: Vec<ComplianceRecord> = state
        .records
        .iter()
        .filter(|entry| entry.value().owner_id == owner.0)
        .map(|entry| entry.value().clone())
        .collect();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(records))
}

/// GET /compliance/{id} — Fetch one compliance record.
#[utoipa::path(
    get,
    path = "/compliance/{id}",
    params(("id" = Uuid, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "The compliance record", body = ComplianceRecord),
        (status = 403, description = "Record belongs to another owner", body = ErrorBody),
        (status = 404, description = "No record with this id", body = ErrorBody),
    ),
    security(("owner_id" = [])),
    tag = "compliance"
)]
pub async fn get_record(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(id): Path<Uuid>,
) -> Result<Json<ComplianceRecord>, AppError> {
    let record = state
        .records
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::not_found(format!("compliance record {id} not found")))?;
    if record.owner_id != owner.0 {
        return Err(AppError::Forbidden("record belongs to another owner".to_string()));
    }
    Ok(Json(record))
}

/// DELETE /compliance/{id} — Remove one compliance record.
#[utoipa::path(
    delete,
    path = "/compliance/{id}",
    params(("id" = Uuid, Path, description = "Record identifier")),
    responses(
        (status = 204, description = "Record removed"),
        (status = 403, description = "Record belongs to another owner", body = ErrorBody),
        (status = 404, description = "No record with this id", body = ErrorBody),
    ),
    security(("owner_id" = [])),
    tag = "compliance"
)]
pub async fn delete_record(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let owned = state
        .records
        .get(&id)
        .map(|entry| entry.value().owner_id == owner.0)
        .ok_or_else(|| AppError::not_found(format!("compliance record {id} not found")))?;
    if !owned {
        return Err(AppError::Forbidden("record belongs to another owner".to_string()));
    }

    state.records.remove(&id);
    if let Some(pool) = &state.db_pool {
        if let Err(e) = db::compliance_records::delete(pool, id).await {
            tracing::warn!(record_id = %id, error = %e, "failed to delete compliance record from database");
        }
    }
    tracing::info!(record_id = %id, owner_id = %owner, "compliance record deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::auth::OWNER_ID_HEADER;

    fn test_app() -> Router {
        router().with_state(AppState::new())
    }

    fn post_json(uri: &str, owner: Uuid, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header(OWNER_ID_HEADER, owner.to_string())
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn compliant_delhi_body() -> serde_json::Value {
        serde_json::json!({
            "location": "New Delhi",
            "roofArea": 150.0,
            "infiltrationRate": 12.0,
            "systemSpecs": {
                "rechargePit": { "depth": 1.5, "diameter": 1.0 },
                "filtrationSystem": true
            }
        })
    }

    #[tokio::test]
    async fn check_returns_verdict_for_compliant_design() {
        let app = test_app();
        let resp = app
            .oneshot(post_json("/compliance/check", Uuid::new_v4(), compliant_delhi_body()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["region"], "New Delhi");
        assert_eq!(body["isCompliant"], true);
        assert_eq!(body["results"].as_array().unwrap().len(), 5);
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
        assert!(body["detailedReport"]
            .as_str()
            .unwrap()
            .starts_with("# Rainwater Harvesting Compliance Report"));
        assert!(body.get("recordId").is_none(), "no assessmentId, no record");
    }

    #[tokio::test]
    async fn check_missing_location_is_400_with_published_message() {
        let app = test_app();
        let resp = app
            .oneshot(post_json(
                "/compliance/check",
                Uuid::new_v4(),
                serde_json::json!({ "roofArea": 150.0 }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(body["error"], "location is required");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn check_without_owner_header_is_401() {
        let app = test_app();
        let req = Request::builder()
            .method("POST")
            .uri("/compliance/check")
            .header("content-type", "application/json")
            .body(Body::from(compliant_delhi_body().to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn check_with_assessment_id_persists_record() {
        let state = AppState::new();
        let app = router().with_state(state.clone());
        let owner = Uuid::new_v4();

        let mut body = compliant_delhi_body();
        body["assessmentId"] = serde_json::json!("ASSESS-7");
        let resp = app.oneshot(post_json("/compliance/check", owner, body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        let record_id: Uuid = serde_json::from_value(body["recordId"].clone()).unwrap();
        let record = state.records.get(&record_id).unwrap().value().clone();
        assert_eq!(record.owner_id, owner);
        assert_eq!(record.assessment_id.as_deref(), Some("ASSESS-7"));
        assert_eq!(record.status.as_str(), "Compliant");
        assert_eq!(record.regulations.len(), 5);
        assert!(record.recommendations.is_empty());
    }

    #[tokio::test]
    async fn failing_check_carries_recommendations() {
        let app = test_app();
        let mut body = compliant_delhi_body();
        body["systemSpecs"]["rechargePit"]["depth"] = serde_json::json!(1.0);
        let resp = app
            .oneshot(post_json("/compliance/check", Uuid::new_v4(), body))
            .await
            .unwrap();

        let body = body_json(resp).await;
        assert_eq!(body["isCompliant"], false);
        let recommendations = body["recommendations"].as_array().unwrap();
        assert_eq!(recommendations.len(), 1);
        assert_eq!(
            recommendations[0],
            "Increase the depth of your recharge pit to at least 1.5m to comply with CGWB guidelines."
        );
    }

    #[tokio::test]
    async fn report_inline_requires_results() {
        let app = test_app();
        let resp = app
            .oneshot(post_json(
                "/compliance/report",
                Uuid::new_v4(),
                serde_json::json!({ "region": "Delhi" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "compliance results are required");
    }

    #[tokio::test]
    async fn report_inline_requires_region() {
        let app = test_app();
        let resp = app
            .oneshot(post_json(
                "/compliance/report",
                Uuid::new_v4(),
                serde_json::json!({ "results": [] }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "region is required");
    }

    #[tokio::test]
    async fn report_inline_derives_flag_and_summary() {
        let app = test_app();
        let resp = app
            .oneshot(post_json(
                "/compliance/report",
                Uuid::new_v4(),
                serde_json::json!({
                    "region": "Chennai, Tamil Nadu",
                    "results": [{
                        "ruleId": "TNPCB-2018-4.2",
                        "text": "t",
                        "source": "s",
                        "compliant": true,
                        "details": "d"
                    }]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let report = body["report"].as_str().unwrap();
        assert!(report.contains("## Region: Chennai, Tamil Nadu"));
        assert!(report.contains("## Overall Status: ✅ Compliant"));
        assert!(report.contains("1 requirements checked and passed"));
    }

    #[tokio::test]
    async fn get_unknown_record_is_404() {
        let app = test_app();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri(format!("/compliance/{}", Uuid::new_v4()))
                    .header(OWNER_ID_HEADER, Uuid::new_v4().to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_caller() {
        let state = AppState::new();
        let owner_a = Uuid::new_v4();
        let owner_b = Uuid::new_v4();

        for owner in [owner_a, owner_a, owner_b] {
            let mut body = compliant_delhi_body();
            body["assessmentId"] = serde_json::json!("A-1");
            let app = router().with_state(state.clone());
            app.oneshot(post_json("/compliance/check", owner, body)).await.unwrap();
        }

        let app = router().with_state(state.clone());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/compliance")
                    .header(OWNER_ID_HEADER, owner_a.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[test]
    fn router_builds() {
        let _r = router();
    }
}
