//! # Rule Checks — Typed Threshold Predicates
//!
//! Every regulation carries a [`RuleCheck`] describing WHAT it requires,
//! with thresholds as data. Evaluation is a pure function from a check and
//! a set of [`SystemParameters`] to a pass/fail outcome.
//!
//! ## Missing vs unusable inputs
//!
//! A missing numeric input fails the threshold that needs it (a design with
//! no declared pit depth cannot meet a depth minimum), and a missing roof
//! area means an area-based exemption does not engage. Only non-finite
//! numbers (NaN, infinity) are evaluation errors; those are folded into
//! non-compliant outcomes by the checker layer.

use rwh_core::SystemParameters;
use serde::{Deserialize, Serialize};

use crate::error::EvalError;

// ---------------------------------------------------------------------------
// CheckOutcome
// ---------------------------------------------------------------------------

/// Result of evaluating a single check: pass or fail with an explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Whether the design satisfies the check.
    pub compliant: bool,
    /// Human-readable explanation, fixed per rule family.
    pub details: String,
}

impl CheckOutcome {
    fn pass(details: impl Into<String>) -> Self {
        Self {
            compliant: true,
            details: details.into(),
        }
    }

    fn fail(details: impl Into<String>) -> Self {
        Self {
            compliant: false,
            details: details.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// RuleCheck
// ---------------------------------------------------------------------------

/// A typed predicate over system parameters, with thresholds as data.
///
/// Serialized with a `type` tag so catalogue files stay declarative:
///
/// ```yaml
/// check:
///   type: min_pit_depth_above_area
///   area_threshold_m2: 100
///   min_depth_m: 1.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleCheck {
    /// Designs over the roof-area threshold need a pit at least this deep.
    /// Smaller roofs are exempt.
    MinPitDepthAboveArea {
        area_threshold_m2: f64,
        min_depth_m: f64,
    },
    /// The recharge pit must be at least this wide.
    MinPitDiameter { min_diameter_m: f64 },
    /// Designs over the roof-area threshold need at least this much storage
    /// (declared capacity, or the pit's cylinder volume when undeclared).
    MinStorageAboveArea {
        area_threshold_m2: f64,
        min_capacity_l: f64,
    },
    /// The design must include a filtration system.
    RequiresFiltration,
    /// Designs over the roof-area threshold must harvest at all: a recharge
    /// pit present and a positive infiltration rate.
    MandatoryAboveArea { area_threshold_m2: f64 },
    /// The site's infiltration rate must meet a minimum.
    MinInfiltrationRate { min_mm_per_hr: f64 },
    /// The design's annual recharge potential must meet a minimum.
    MinRechargePotential { min_litres_per_year: f64 },
}

impl RuleCheck {
    /// Evaluate this check against a design.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::NonFiniteValue`] when a numeric input the check
    /// depends on is NaN or infinite.
    pub fn evaluate(&self, params: &SystemParameters) -> Result<CheckOutcome, EvalError> {
        let specs = &params.system_specs;
        match *self {
            Self::MinPitDepthAboveArea {
                area_threshold_m2,
                min_depth_m,
            } => {
                let roof = finite("roofArea", params.roof_area)?;
                if roof.is_some_and(|a| a <= area_threshold_m2) {
                    return Ok(CheckOutcome::pass("Meets all requirements"));
                }
                let depth = finite("depth", specs.pit_depth())?;
                if depth.is_some_and(|d| d >= min_depth_m) {
                    Ok(CheckOutcome::pass("Meets all requirements"))
                } else {
                    Ok(CheckOutcome::fail(format!(
                        "Recharge pit depth must be at least {}m for roof areas greater than {}m²",
                        fmt_metres(min_depth_m),
                        area_threshold_m2,
                    )))
                }
            }

            Self::MinPitDiameter { min_diameter_m } => {
                let diameter = finite("diameter", specs.pit_diameter())?;
                if diameter.is_some_and(|d| d >= min_diameter_m) {
                    Ok(CheckOutcome::pass("Meets minimum diameter requirement"))
                } else {
                    Ok(CheckOutcome::fail(format!(
                        "Recharge pit diameter must be at least {}m",
                        fmt_metres(min_diameter_m),
                    )))
                }
            }

            Self::MinStorageAboveArea {
                area_threshold_m2,
                min_capacity_l,
            } => {
                let roof = finite("roofArea", params.roof_area)?;
                if roof.is_some_and(|a| a <= area_threshold_m2) {
                    return Ok(CheckOutcome::pass("Meets storage capacity requirements"));
                }
                let storage = finite("storageCapacity", specs.effective_storage_litres())?;
                if storage.is_some_and(|s| s >= min_capacity_l) {
                    Ok(CheckOutcome::pass("Meets storage capacity requirements"))
                } else {
                    Ok(CheckOutcome::fail(format!(
                        "Storage capacity must be at least {}L for buildings with roof area >{}m²",
                        min_capacity_l, area_threshold_m2,
                    )))
                }
            }

            Self::RequiresFiltration => {
                if specs.has_filtration() {
                    Ok(CheckOutcome::pass("Includes filtration system"))
                } else {
                    Ok(CheckOutcome::fail(
                        "A filtration system is recommended for all rainwater harvesting installations",
                    ))
                }
            }

            Self::MandatoryAboveArea { area_threshold_m2 } => {
                let roof = finite("roofArea", params.roof_area)?;
                if roof.is_some_and(|a| a <= area_threshold_m2) {
                    return Ok(CheckOutcome::pass("Meets mandatory harvesting requirements"));
                }
                let rate = finite("infiltrationRate", params.infiltration_rate)?;
                let harvesting = specs.recharge_pit.is_some() && rate.is_some_and(|r| r > 0.0);
                if harvesting {
                    Ok(CheckOutcome::pass("Meets mandatory harvesting requirements"))
                } else {
                    Ok(CheckOutcome::fail(format!(
                        "Rainwater harvesting system is mandatory for buildings with roof area >{}m²",
                        area_threshold_m2,
                    )))
                }
            }

            Self::MinInfiltrationRate { min_mm_per_hr } => {
                let rate = finite("infiltrationRate", params.infiltration_rate)?;
                if rate.is_some_and(|r| r >= min_mm_per_hr) {
                    Ok(CheckOutcome::pass("Meets minimum infiltration requirement"))
                } else {
                    Ok(CheckOutcome::fail(format!(
                        "Infiltration rate below the minimum requirement of {}mm/hr",
                        min_mm_per_hr,
                    )))
                }
            }

            Self::MinRechargePotential {
                min_litres_per_year,
            } => {
                let potential = finite("rechargePotential", params.recharge_potential)?;
                if potential.is_some_and(|p| p >= min_litres_per_year) {
                    Ok(CheckOutcome::pass(
                        "Meets minimum recharge potential requirement",
                    ))
                } else {
                    Ok(CheckOutcome::fail(format!(
                        "Recharge potential below the minimum requirement of {} liters/year",
                        min_litres_per_year,
                    )))
                }
            }
        }
    }

    /// The numeric thresholds this check carries, for catalogue validation.
    pub fn thresholds(&self) -> Vec<f64> {
        match *self {
            Self::MinPitDepthAboveArea {
                area_threshold_m2,
                min_depth_m,
            } => vec![area_threshold_m2, min_depth_m],
            Self::MinPitDiameter { min_diameter_m } => vec![min_diameter_m],
            Self::MinStorageAboveArea {
                area_threshold_m2,
                min_capacity_l,
            } => vec![area_threshold_m2, min_capacity_l],
            Self::RequiresFiltration => vec![],
            Self::MandatoryAboveArea { area_threshold_m2 } => vec![area_threshold_m2],
            Self::MinInfiltrationRate { min_mm_per_hr } => vec![min_mm_per_hr],
            Self::MinRechargePotential {
                min_litres_per_year,
            } => vec![min_litres_per_year],
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject NaN and infinities, passing absent values through.
fn finite(field: &'static str, value: Option<f64>) -> Result<Option<f64>, EvalError> {
    match value {
        Some(v) if !v.is_finite() => Err(EvalError::NonFiniteValue { field }),
        other => Ok(other),
    }
}

/// Format a length in metres the way the published texts do: whole-number
/// values keep one decimal ("1.0m", "1.5m"), everything else prints as-is.
fn fmt_metres(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}
