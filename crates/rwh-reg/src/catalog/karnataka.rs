//! Karnataka regulations: the annual recharge requirement under the state
//! rainwater harvesting act.

use super::*;

/// The Karnataka-scoped regulations.
pub fn regulations() -> Vec<Regulation> {
    vec![Regulation {
        id: "KA-RWH-2009-3A".to_string(),
        region_scope: RegionScope::Region("Karnataka".to_string()),
        text: "State authority requires all buildings to harvest minimum 20 liters per sq.m \
               of roof area annually"
            .to_string(),
        source: "Karnataka Rainwater Harvesting Act, 2009, Rule 3(a)".to_string(),
        check: RuleCheck::MinRechargePotential {
            min_litres_per_year: 20000.0,
        },
        remediation: "Increase your annual recharge potential to at least 20,000 liters by \
                      expanding the catchment area or adding recharge structures."
            .to_string(),
    }]
}
