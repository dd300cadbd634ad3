//! Delhi (NCT) regulations: Central Ground Water Board guidelines and the
//! New Delhi Municipal Council storage requirement.

use super::*;

/// The Delhi-scoped regulations, in evaluation order.
pub fn regulations() -> Vec<Regulation> {
    vec![
        Regulation {
            id: "CGWB-2020-3.2".to_string(),
            region_scope: RegionScope::Region("Delhi".to_string()),
            text: "Central Ground Water Board mandates a minimum 1.5m deep recharge structure \
                   for all buildings with roof area >100m²"
                .to_string(),
            source: "CGWB Guidelines 2020, Section 3.2".to_string(),
            check: RuleCheck::MinPitDepthAboveArea {
                area_threshold_m2: 100.0,
                min_depth_m: 1.5,
            },
            remediation: "Increase the depth of your recharge pit to at least 1.5m to comply \
                          with CGWB guidelines."
                .to_string(),
        },
        Regulation {
            id: "CGWB-2020-4.1".to_string(),
            region_scope: RegionScope::Region("Delhi".to_string()),
            text: "Recharge pits must have a minimum diameter of 1m for effective groundwater \
                   recharge"
                .to_string(),
            source: "CGWB Guidelines 2020, Section 4.1".to_string(),
            check: RuleCheck::MinPitDiameter { min_diameter_m: 1.0 },
            remediation: "Increase the diameter of your recharge pit to at least 1.0m for \
                          effective groundwater recharge."
                .to_string(),
        },
        Regulation {
            id: "NDMC-RWH-2019-5".to_string(),
            region_scope: RegionScope::Region("Delhi".to_string()),
            text: "New Delhi Municipal Council requires all buildings with roof area >200m² to \
                   have a storage capacity of at least 2000L"
                .to_string(),
            source: "NDMC Rainwater Harvesting Guidelines 2019, Section 5".to_string(),
            check: RuleCheck::MinStorageAboveArea {
                area_threshold_m2: 200.0,
                min_capacity_l: 2000.0,
            },
            remediation: "Increase your storage capacity to at least 2000L or consider adding \
                          additional storage tanks."
                .to_string(),
        },
        Regulation {
            id: "CGWB-2020-5.1".to_string(),
            region_scope: RegionScope::Region("Delhi".to_string()),
            text: "Central Ground Water Board requires a minimum infiltration rate of 10mm/hr \
                   at recharge structures"
                .to_string(),
            source: "CGWB Guidelines 2020, Section 5.1".to_string(),
            check: RuleCheck::MinInfiltrationRate { min_mm_per_hr: 10.0 },
            remediation: "Improve the infiltration rate at your recharge site to at least \
                          10mm/hr, for example by deepening the pit or adding a gravel filter \
                          bed."
                .to_string(),
        },
    ]
}
