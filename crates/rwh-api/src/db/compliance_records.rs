//! # Compliance Record Persistence
//!
//! CRUD over the `compliance_records` table. Per-rule outcomes and
//! remediation lines are stored as JSONB. Rows that fail to decode are
//! skipped with a warning rather than failing the whole load, so one bad
//! row cannot take the API down at startup.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use rwh_core::{ComplianceStatus, RuleOutcome};

use crate::state::ComplianceRecord;

/// Insert a compliance record.
pub async fn insert(pool: &PgPool, record: &ComplianceRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO compliance_records
         (id, owner_id, assessment_id, location, status, is_compliant, summary,
          regulations, recommendations, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(record.id)
    .bind(record.owner_id)
    .bind(&record.assessment_id)
    .bind(&record.location)
    .bind(record.status.as_str())
    .bind(record.is_compliant)
    .bind(&record.summary)
    .bind(serde_json::to_value(&record.regulations).unwrap_or(serde_json::Value::Null))
    .bind(serde_json::to_value(&record.recommendations).unwrap_or(serde_json::Value::Null))
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Fetch a record by id.
pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ComplianceRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, ComplianceRecordRow>(
        "SELECT id, owner_id, assessment_id, location, status, is_compliant, summary,
                regulations, recommendations, created_at, updated_at
         FROM compliance_records WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.and_then(ComplianceRecordRow::into_record))
}

/// List an owner's records, newest first.
pub async fn list_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<ComplianceRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ComplianceRecordRow>(
        "SELECT id, owner_id, assessment_id, location, status, is_compliant, summary,
                regulations, recommendations, created_at, updated_at
         FROM compliance_records WHERE owner_id = $1
         ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .filter_map(ComplianceRecordRow::into_record)
        .collect())
}

/// Delete a record. Returns `true` if a row was removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM compliance_records WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Load every record, oldest first, for rehydrating the in-memory store.
pub async fn load_all(pool: &PgPool) -> Result<Vec<ComplianceRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ComplianceRecordRow>(
        "SELECT id, owner_id, assessment_id, location, status, is_compliant, summary,
                regulations, recommendations, created_at, updated_at
         FROM compliance_records ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .filter_map(ComplianceRecordRow::into_record)
        .collect())
}

/// Raw database row; JSONB columns decoded in [`Self::into_record`].
#[derive(sqlx::FromRow)]
struct ComplianceRecordRow {
    id: Uuid,
    owner_id: Uuid,
    assessment_id: Option<String>,
    location: String,
    status: String,
    is_compliant: bool,
    summary: String,
    regulations: serde_json::Value,
    recommendations: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ComplianceRecordRow {
    /// Decode the JSONB columns. Returns `None` (with a warning) when a
    /// column does not decode, so callers can skip the row.
    fn into_record(self) -> Option<ComplianceRecord> {
        let regulations: Vec<RuleOutcome> = match serde_json::from_value(self.regulations) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    record_id = %self.id,
                    error = %e,
                    "skipping record with undecodable regulations column"
                );
                return None;
            }
        };
        let recommendations: Vec<String> = match serde_json::from_value(self.recommendations) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    record_id = %self.id,
                    error = %e,
                    "skipping record with undecodable recommendations column"
                );
                return None;
            }
        };
        Some(ComplianceRecord {
            id: self.id,
            owner_id: self.owner_id,
            assessment_id: self.assessment_id,
            location: self.location,
            status: parse_status(&self.status),
            is_compliant: self.is_compliant,
            summary: self.summary,
            regulations,
            recommendations,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Parse a stored status string, defaulting to `Pending` for unknown
/// values so schema drift degrades gracefully.
fn parse_status(s: &str) -> ComplianceStatus {
    ComplianceStatus::all()
        .iter()
        .copied()
        .find(|status| status.as_str() == s)
        .unwrap_or_else(|| {
            tracing::warn!(status = s, "unknown compliance status in database, defaulting to Pending");
            ComplianceStatus::Pending
        })
}
