//! Maharashtra regulations: the Bureau of Indian Standards infiltration
//! requirement as adopted by the state.

use super::*;

/// The Maharashtra-scoped regulations.
pub fn regulations() -> Vec<Regulation> {
    vec![Regulation {
        id: "BIS-16182-4.3".to_string(),
        region_scope: RegionScope::Region("Maharashtra".to_string()),
        text: "Bureau of Indian Standards requires minimum infiltration rate of 15mm/hr for \
               effective groundwater recharge"
            .to_string(),
        source: "BIS Code 16182:2014, Section 4.3".to_string(),
        check: RuleCheck::MinInfiltrationRate { min_mm_per_hr: 15.0 },
        remediation: "Improve the infiltration rate at your recharge site to at least 15mm/hr \
                      as required by BIS Code 16182:2014."
            .to_string(),
    }]
}
