//! # System Parameters
//!
//! The input shape for a compliance check: one rooftop rainwater-harvesting
//! design as described by the submitting assessor.
//!
//! ## Wire format
//!
//! Serialized camelCase to match the assessment intake documents
//! (`roofArea`, `systemSpecs.rechargePit`, ...). Every numeric field is
//! optional on the wire; rule evaluation decides what a missing value means
//! (an absent threshold input fails the rule, it does not error).

use serde::{Deserialize, Serialize};

/// One rainwater-harvesting design submitted for compliance checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemParameters {
    /// Free-text locality, e.g. "New Delhi" or "Chennai, Tamil Nadu".
    /// Regulation selection matches region scopes against this string.
    pub location: String,

    /// Roof catchment area in square metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_area: Option<f64>,

    /// Soil infiltration rate at the recharge site, in mm/hr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infiltration_rate: Option<f64>,

    /// Estimated annual recharge potential, in liters/year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recharge_potential: Option<f64>,

    /// Physical system design.
    #[serde(default)]
    pub system_specs: SystemSpecs,
}

impl SystemParameters {
    /// A design with only a location set. Useful as a starting point for
    /// builders and tests.
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            roof_area: None,
            infiltration_rate: None,
            recharge_potential: None,
            system_specs: SystemSpecs::default(),
        }
    }

    /// Whether the location field carries anything usable.
    pub fn has_location(&self) -> bool {
        !self.location.trim().is_empty()
    }
}

/// Physical design of the harvesting system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSpecs {
    /// Recharge pit geometry, if the design includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recharge_pit: Option<RechargePit>,

    /// Declared storage capacity in litres. When absent, capacity may be
    /// derived from the pit geometry (see [`effective_storage_litres`]).
    ///
    /// [`effective_storage_litres`]: SystemSpecs::effective_storage_litres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_capacity: Option<f64>,

    /// Filtration system: a boolean flag or a textual descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtration_system: Option<FiltrationSpec>,
}

impl SystemSpecs {
    /// Storage capacity in litres as the evaluator sees it.
    ///
    /// Prefers the declared `storage_capacity`. When that is absent but the
    /// pit has both depth and diameter, the pit's cylinder volume stands in:
    /// `depth × π × (diameter/2)² × 1000`. Returns `None` when neither is
    /// derivable.
    pub fn effective_storage_litres(&self) -> Option<f64> {
        if let Some(declared) = self.storage_capacity {
            return Some(declared);
        }
        let pit = self.recharge_pit.as_ref()?;
        let depth = pit.depth?;
        let diameter = pit.diameter?;
        let radius = diameter / 2.0;
        Some(depth * std::f64::consts::PI * radius * radius * 1000.0)
    }

    /// Pit depth in metres, if a pit with a depth is present.
    pub fn pit_depth(&self) -> Option<f64> {
        self.recharge_pit.as_ref().and_then(|p| p.depth)
    }

    /// Pit diameter in metres, if a pit with a diameter is present.
    pub fn pit_diameter(&self) -> Option<f64> {
        self.recharge_pit.as_ref().and_then(|p| p.diameter)
    }

    /// Whether the design includes a filtration system.
    ///
    /// Truthy means boolean `true` or a non-blank descriptor string.
    pub fn has_filtration(&self) -> bool {
        self.filtration_system
            .as_ref()
            .is_some_and(FiltrationSpec::is_present)
    }
}

/// Recharge pit geometry in metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargePit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
}

/// A filtration system declaration.
///
/// Intake documents carry this either as a boolean flag
/// (`"filtrationSystem": true`) or as a free-text descriptor
/// (`"filtrationSystem": "sand filter"`). Both shapes deserialize here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FiltrationSpec {
    /// Plain boolean flag.
    Installed(bool),
    /// Descriptor of the fitted filtration, e.g. "first-flush diverter".
    Described(String),
}

impl FiltrationSpec {
    /// Whether this declaration counts as a filtration system being present.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Installed(flag) => *flag,
            Self::Described(text) => !text.trim().is_empty(),
        }
    }
}
