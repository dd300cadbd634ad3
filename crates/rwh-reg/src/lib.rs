//! # rwh-reg — Regulation Catalogue & Evaluation Engine
//!
//! Selects the rainwater-harvesting regulations applicable to a location,
//! evaluates each one as a typed predicate over the submitted design, and
//! aggregates the outcomes into a [`ComplianceVerdict`]
//! with a rendered markdown report.
//!
//! ## Evaluation Model
//!
//! Every regulation carries a [`RuleCheck`] descriptor with its thresholds
//! as data, so catalogue content and evaluation logic stay separate:
//!
//! ```text
//! check(params) : RuleCheck × SystemParameters → pass | fail | unevaluable
//! ```
//!
//! Missing numeric inputs fail the thresholds that need them; only
//! non-finite numbers are unevaluable, and those fold into a non-compliant
//! outcome at the aggregation seam rather than propagating.
//!
//! ## Region Scoping
//!
//! A regulation applies when its scope is `ALL` or when the queried
//! location contains the scope name case-insensitively. Locations matching
//! no regional scope receive only the `ALL`-scoped regulations — there is
//! no fallback to any default region.
//!
//! [`ComplianceVerdict`]: rwh_core::ComplianceVerdict

pub mod catalog;
pub mod checker;
pub mod error;
pub mod report;
pub mod rule;

// Re-export primary types.
pub use catalog::{RegionScope, Regulation, RegulationCatalog};
pub use checker::{evaluate_regulation, summarize, ComplianceChecker, UNEVALUATED_DETAILS};
pub use error::{CatalogError, EvalError};
pub use report::render_report;
pub use rule::{CheckOutcome, RuleCheck};
