//! # Application State
//!
//! Shared state for the API: the immutable regulation catalogue wrapped in
//! a [`ComplianceChecker`], the in-memory compliance record store, and the
//! optional Postgres pool.
//!
//! The record store is a `DashMap` and is always authoritative for reads.
//! When a pool is configured, records are mirrored to Postgres on write and
//! loaded back into the map at startup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use rwh_core::{ComplianceStatus, RuleOutcome};
use rwh_reg::{ComplianceChecker, RegulationCatalog};

/// A persisted compliance check, scoped to the owner who ran it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    /// Record identifier.
    pub id: Uuid,
    /// Owner who ran the check; reads are scoped to this owner.
    pub owner_id: Uuid,
    /// Caller-supplied assessment reference that triggered persistence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<String>,
    /// Location the check was run for.
    pub location: String,
    /// Aggregate status derived from the results.
    #[schema(value_type = String, example = "Compliant")]
    pub status: ComplianceStatus,
    /// Whether every evaluated rule passed.
    pub is_compliant: bool,
    /// One-line outcome summary.
    pub summary: String,
    /// Per-rule outcomes in catalogue order.
    #[schema(value_type = Vec<Object>)]
    pub regulations: Vec<RuleOutcome>,
    /// Remediation lines for the failing rules, in result order.
    pub recommendations: Vec<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

/// Shared application state, cheap to clone into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Compliance checker over the immutable catalogue.
    pub checker: ComplianceChecker,
    /// In-memory record store, keyed by record id.
    pub records: Arc<DashMap<Uuid, ComplianceRecord>>,
    /// Optional Postgres mirror.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// State over the built-in catalogue with no database.
    pub fn new() -> Self {
        Self::with_parts(Arc::new(RegulationCatalog::builtin()), None)
    }

    /// State over an explicit catalogue and optional pool.
    pub fn with_parts(catalog: Arc<RegulationCatalog>, db_pool: Option<PgPool>) -> Self {
        Self {
            checker: ComplianceChecker::new(catalog),
            records: Arc::new(DashMap::new()),
            db_pool,
        }
    }

    /// The catalogue behind the checker.
    pub fn catalog(&self) -> &RegulationCatalog {
        self.checker.catalog()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
