//! Nationwide regulations applied to every location regardless of region.

use super::*;

/// The `ALL`-scoped regulations, appended after every regional module.
pub fn regulations() -> Vec<Regulation> {
    vec![Regulation {
        id: "MoHUA-2021-7.3".to_string(),
        region_scope: RegionScope::All,
        text: "Ministry of Housing and Urban Affairs recommends a filtration system for all \
               rainwater harvesting systems"
            .to_string(),
        source: "MoHUA Urban Rainwater Harvesting Guidelines 2021, Section 7.3".to_string(),
        check: RuleCheck::RequiresFiltration,
        remediation: "Add a filtration system to your design. Simple options include mesh \
                      filters, sand filters, or first-flush diverters."
            .to_string(),
    }]
}
