//! # Rule Outcomes and Verdicts
//!
//! The output side of a compliance check: per-regulation [`RuleOutcome`]s,
//! the aggregated [`ComplianceVerdict`], and the [`ComplianceStatus`] used
//! on persisted records.
//!
//! ## Content digest
//!
//! A verdict exposes a SHA-256 digest over a canonical JSON view that
//! excludes the timestamp, so two checks of the same design against the same
//! catalogue produce the same digest regardless of when they ran.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Domain-separation prefix for verdict digests.
const DIGEST_PREFIX: &[u8] = b"rwh-verdict-v1\0";

/// The result of evaluating one regulation against a design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOutcome {
    /// Stable citation id, e.g. "CGWB-2020-3.2".
    pub rule_id: String,
    /// The regulation text as published.
    pub text: String,
    /// Citation of the issuing document.
    pub source: String,
    /// Whether the design satisfies this regulation.
    pub compliant: bool,
    /// Human-readable explanation of the outcome.
    pub details: String,
}

/// The aggregated result of a compliance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceVerdict {
    /// The queried location, echoed back as given.
    pub region: String,
    /// Conjunction of all outcomes. An empty result set is vacuously
    /// compliant.
    pub is_compliant: bool,
    /// Per-regulation outcomes in catalogue order.
    pub results: Vec<RuleOutcome>,
    /// One-paragraph summary suitable for direct display.
    pub summary: String,
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
}

/// Timestamp-free projection of a verdict used for digest computation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DigestView<'a> {
    region: &'a str,
    is_compliant: bool,
    results: &'a [RuleOutcome],
    summary: &'a str,
}

impl ComplianceVerdict {
    /// Hex-encoded SHA-256 digest of the verdict content.
    ///
    /// Covers region, outcomes, compliance flag, and summary; excludes
    /// `checked_at` so repeated checks over identical inputs compare equal.
    pub fn digest(&self) -> String {
        let view = DigestView {
            region: &self.region,
            is_compliant: self.is_compliant,
            results: &self.results,
            summary: &self.summary,
        };
        // SAFETY: the view contains only strings and booleans, which
        // serde_json serializes infallibly.
        let bytes = serde_json::to_vec(&view)
            .expect("BUG: verdict digest view failed to serialize");

        let mut hasher = Sha256::new();
        hasher.update(DIGEST_PREFIX);
        hasher.update(&bytes);
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    /// The record status this verdict derives to.
    pub fn status(&self) -> ComplianceStatus {
        ComplianceStatus::from_results(&self.results)
    }

    /// Number of compliant outcomes.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.compliant).count()
    }

    /// Number of non-compliant outcomes.
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.passed_count()
    }
}

/// Status of a persisted compliance record.
///
/// Serialized and displayed with the exact strings the record documents
/// carry: "Compliant", "Non-Compliant", "Partially Compliant", "Pending".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
    #[serde(rename = "Partially Compliant")]
    PartiallyCompliant,
    /// Awaiting evaluation. Never produced by a completed check.
    Pending,
}

impl ComplianceStatus {
    /// All record statuses.
    pub fn all() -> &'static [ComplianceStatus] {
        &[
            Self::Compliant,
            Self::NonCompliant,
            Self::PartiallyCompliant,
            Self::Pending,
        ]
    }

    /// The canonical display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::NonCompliant => "Non-Compliant",
            Self::PartiallyCompliant => "Partially Compliant",
            Self::Pending => "Pending",
        }
    }

    /// Derive a status from a set of rule outcomes.
    ///
    /// Empty or all-compliant derives `Compliant` (an empty set is vacuously
    /// satisfied), none compliant derives `Non-Compliant`, and a mix derives
    /// `Partially Compliant`. `Pending` is never derived.
    pub fn from_results(results: &[RuleOutcome]) -> Self {
        let passed = results.iter().filter(|r| r.compliant).count();
        if passed == results.len() {
            Self::Compliant
        } else if passed == 0 {
            Self::NonCompliant
        } else {
            Self::PartiallyCompliant
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
