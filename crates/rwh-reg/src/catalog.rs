//! # Regulation Catalogue
//!
//! The immutable collection of rainwater-harvesting regulations the engine
//! evaluates against. Built once (from the built-in content modules or a
//! YAML override file), validated on construction, then shared read-only.
//!
//! ## Scoping
//!
//! Each regulation carries a [`RegionScope`]: either a region name matched
//! case-insensitively as a substring of the queried location, or the `ALL`
//! sentinel for nationwide rules. A location matching no regional scope
//! receives only the `ALL`-scoped regulations; there is no fallback to any
//! default region's rules.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use rwh_core::InputError;

use crate::error::{CatalogError, CatalogResult};
use crate::rule::RuleCheck;

pub mod delhi;
pub mod karnataka;
pub mod maharashtra;
pub mod national;
pub mod tamil_nadu;

/// Remediation guidance for rules with no entry of their own.
const GENERIC_REMEDIATION: &str =
    "Review the specific requirements and adjust your system design accordingly.";

// ---------------------------------------------------------------------------
// RegionScope
// ---------------------------------------------------------------------------

/// Where a regulation applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionScope {
    /// Nationwide; applies to every location.
    All,
    /// Applies when the queried location contains this name
    /// (case-insensitive substring match).
    Region(String),
}

impl RegionScope {
    /// Parse a scope from its string form.
    ///
    /// Trims whitespace; the literal `ALL` (any case) is the nationwide
    /// sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyRegionScope`] for empty or
    /// whitespace-only input.
    pub fn new(value: impl Into<String>) -> CatalogResult<Self> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(CatalogError::EmptyRegionScope);
        }
        if trimmed.eq_ignore_ascii_case("ALL") {
            Ok(Self::All)
        } else {
            Ok(Self::Region(trimmed))
        }
    }

    /// Whether this scope applies to a location.
    pub fn matches(&self, location: &str) -> bool {
        match self {
            Self::All => true,
            Self::Region(name) => location.to_lowercase().contains(&name.to_lowercase()),
        }
    }

    /// The canonical string form ("ALL" or the region name).
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "ALL",
            Self::Region(name) => name,
        }
    }
}

impl std::fmt::Display for RegionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for RegionScope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RegionScope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Regulation
// ---------------------------------------------------------------------------

/// One regulation: published text, scope, the check it imposes, and the
/// remediation shown when the check fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regulation {
    /// Stable citation id, e.g. "CGWB-2020-3.2".
    pub id: String,
    /// Where the regulation applies.
    pub region_scope: RegionScope,
    /// The regulation text as published.
    pub text: String,
    /// Citation of the issuing document and section.
    pub source: String,
    /// The threshold predicate this regulation imposes.
    pub check: RuleCheck,
    /// Actionable guidance when the check fails. Empty falls back to the
    /// generic remediation text.
    #[serde(default)]
    pub remediation: String,
}

// ---------------------------------------------------------------------------
// RegulationCatalog
// ---------------------------------------------------------------------------

/// Top-level shape of a catalogue override file.
#[derive(Deserialize)]
struct CatalogFile {
    regulations: Vec<Regulation>,
}

/// An immutable, validated collection of regulations.
///
/// Construct once at startup and share by reference (the checker wraps it
/// in an `Arc`). Lookup preserves insertion order.
#[derive(Debug, Clone)]
pub struct RegulationCatalog {
    regulations: Vec<Regulation>,
}

impl RegulationCatalog {
    /// The built-in catalogue: Delhi, Maharashtra, Karnataka, and Tamil Nadu
    /// regulations, with the nationwide rules last.
    pub fn builtin() -> Self {
        let mut regulations = delhi::regulations();
        regulations.extend(maharashtra::regulations());
        regulations.extend(karnataka::regulations());
        regulations.extend(tamil_nadu::regulations());
        regulations.extend(national::regulations());
        Self { regulations }
    }

    /// Build a catalogue from explicit regulations, validating them.
    pub fn from_regulations(regulations: Vec<Regulation>) -> CatalogResult<Self> {
        validate(&regulations)?;
        Ok(Self { regulations })
    }

    /// Load a catalogue from a YAML document:
    ///
    /// ```yaml
    /// regulations:
    ///   - id: CITY-2024-1
    ///     region_scope: Pune
    ///     text: ...
    ///     source: ...
    ///     check:
    ///       type: min_pit_diameter
    ///       min_diameter_m: 0.9
    ///     remediation: ...
    /// ```
    pub fn from_yaml_str(yaml: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_regulations(file.regulations)
    }

    /// Re-run validation over the held regulations.
    pub fn validate(&self) -> CatalogResult<()> {
        validate(&self.regulations)
    }

    /// All regulations in insertion order.
    pub fn regulations(&self) -> &[Regulation] {
        &self.regulations
    }

    /// Number of regulations.
    pub fn len(&self) -> usize {
        self.regulations.len()
    }

    /// Whether the catalogue holds no regulations.
    pub fn is_empty(&self) -> bool {
        self.regulations.is_empty()
    }

    /// Look up a regulation by id.
    pub fn get(&self, rule_id: &str) -> Option<&Regulation> {
        self.regulations.iter().find(|r| r.id == rule_id)
    }

    /// The regulations applicable to a location, in insertion order.
    ///
    /// A location matching no regional scope receives only the `ALL`-scoped
    /// regulations.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingLocation`] for empty or whitespace-only
    /// locations.
    pub fn regulations_for_location(&self, location: &str) -> Result<Vec<&Regulation>, InputError> {
        if location.trim().is_empty() {
            return Err(InputError::MissingLocation);
        }
        Ok(self
            .regulations
            .iter()
            .filter(|r| r.region_scope.matches(location))
            .collect())
    }

    /// Remediation guidance for a rule id, falling back to generic text for
    /// unknown ids or regulations without their own guidance.
    pub fn remediation_for(&self, rule_id: &str) -> &str {
        match self.get(rule_id) {
            Some(reg) if !reg.remediation.trim().is_empty() => &reg.remediation,
            _ => GENERIC_REMEDIATION,
        }
    }
}

impl Default for RegulationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(regulations: &[Regulation]) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for reg in regulations {
        if !seen.insert(reg.id.as_str()) {
            return Err(CatalogError::DuplicateRuleId { id: reg.id.clone() });
        }
        for (field, value) in [("id", &reg.id), ("text", &reg.text), ("source", &reg.source)] {
            if value.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    id: reg.id.clone(),
                    field,
                });
            }
        }
        if let RegionScope::Region(name) = &reg.region_scope {
            if name.trim().is_empty() {
                return Err(CatalogError::EmptyRegionScope);
            }
        }
        if reg.check.thresholds().iter().any(|t| !t.is_finite()) {
            return Err(CatalogError::NonFiniteThreshold { id: reg.id.clone() });
        }
    }
    Ok(())
}
