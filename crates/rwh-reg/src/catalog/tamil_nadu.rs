//! Tamil Nadu regulations: mandatory rainwater harvesting above the roof
//! area threshold set by the state pollution control board.

use super::*;

/// The Tamil Nadu-scoped regulations.
pub fn regulations() -> Vec<Regulation> {
    vec![Regulation {
        id: "TNPCB-2018-4.2".to_string(),
        region_scope: RegionScope::Region("Tamil Nadu".to_string()),
        text: "Tamil Nadu Pollution Control Board mandates rainwater harvesting for all \
               buildings with roof area >60m²"
            .to_string(),
        source: "TNPCB Guidelines 2018, Section 4.2".to_string(),
        check: RuleCheck::MandatoryAboveArea {
            area_threshold_m2: 60.0,
        },
        remediation: "Implement a basic rainwater harvesting system with at least one recharge \
                      pit to comply with mandatory requirements."
            .to_string(),
    }]
}
