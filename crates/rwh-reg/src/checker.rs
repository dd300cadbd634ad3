//! # Compliance Checker
//!
//! Ties the catalogue and the rule evaluator together: select the
//! regulations applicable to the queried location, evaluate each against
//! the submitted parameters, and aggregate the outcomes into a
//! [`ComplianceVerdict`].
//!
//! Evaluation failures never abort a check. A rule whose inputs cannot be
//! evaluated (non-finite numerics) is folded into a non-compliant outcome
//! with [`UNEVALUATED_DETAILS`], and the check carries on with the
//! remaining rules.

use std::sync::Arc;

use chrono::Utc;

use rwh_core::{ComplianceVerdict, InputError, RuleOutcome, SystemParameters};

use crate::catalog::{Regulation, RegulationCatalog};

/// Details recorded when a rule could not be evaluated.
pub const UNEVALUATED_DETAILS: &str = "Unable to evaluate rule due to missing data";

/// Evaluate one regulation against the submitted parameters.
///
/// Infallible by contract: an evaluation error is logged and folded into a
/// non-compliant outcome rather than propagated.
pub fn evaluate_regulation(reg: &Regulation, params: &SystemParameters) -> RuleOutcome {
    let (compliant, details) = match reg.check.evaluate(params) {
        Ok(outcome) => (outcome.compliant, outcome.details),
        Err(err) => {
            tracing::warn!(
                rule_id = %reg.id,
                error = %err,
                "rule evaluation failed; recording as non-compliant"
            );
            (false, UNEVALUATED_DETAILS.to_string())
        }
    };
    RuleOutcome {
        rule_id: reg.id.clone(),
        text: reg.text.clone(),
        source: reg.source.clone(),
        compliant,
        details,
    }
}

/// One-line summary of a result set.
///
/// An empty result set reads as compliant: no applicable regulation was
/// violated.
pub fn summarize(results: &[RuleOutcome]) -> String {
    let total = results.len();
    let failed = results.iter().filter(|r| !r.compliant).count();
    if failed == 0 {
        format!(
            "Your rainwater harvesting system design is compliant with all applicable \
             regulations. {total} requirements checked and passed."
        )
    } else {
        format!(
            "Your rainwater harvesting system design does not meet {failed} out of {total} \
             regulatory requirements. Please review the details and make necessary adjustments."
        )
    }
}

/// Runs compliance checks against a shared, immutable catalogue.
#[derive(Debug, Clone)]
pub struct ComplianceChecker {
    catalog: Arc<RegulationCatalog>,
}

impl ComplianceChecker {
    /// Build a checker over an existing catalogue.
    pub fn new(catalog: Arc<RegulationCatalog>) -> Self {
        Self { catalog }
    }

    /// Build a checker over the built-in catalogue.
    pub fn with_builtin() -> Self {
        Self::new(Arc::new(RegulationCatalog::builtin()))
    }

    /// The catalogue this checker evaluates against.
    pub fn catalog(&self) -> &RegulationCatalog {
        &self.catalog
    }

    /// Run a full compliance check.
    ///
    /// Selects the applicable regulations for `params.location`, evaluates
    /// each in catalogue order, and aggregates: the verdict is compliant
    /// only when every evaluated rule is.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingLocation`] when the location is empty
    /// or whitespace-only. Rule evaluation itself never errors.
    pub fn check(&self, params: &SystemParameters) -> Result<ComplianceVerdict, InputError> {
        let applicable = self.catalog.regulations_for_location(&params.location)?;
        let results: Vec<RuleOutcome> = applicable
            .iter()
            .map(|reg| evaluate_regulation(reg, params))
            .collect();
        let is_compliant = results.iter().all(|r| r.compliant);
        let summary = summarize(&results);
        Ok(ComplianceVerdict {
            region: params.location.clone(),
            is_compliant,
            results,
            summary,
            checked_at: Utc::now(),
        })
    }
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rwh_core::{ComplianceStatus, FiltrationSpec, RechargePit, SystemSpecs};

    /// A Delhi installation that satisfies every applicable rule: 150m²
    /// roof, 1.5m deep and 1.0m wide recharge pit, filtration installed,
    /// 12mm/hr infiltration.
    fn compliant_delhi_params() -> SystemParameters {
        SystemParameters {
            location: "New Delhi".to_string(),
            roof_area: Some(150.0),
            infiltration_rate: Some(12.0),
            recharge_potential: None,
            system_specs: SystemSpecs {
                recharge_pit: Some(RechargePit {
                    depth: Some(1.5),
                    diameter: Some(1.0),
                }),
                storage_capacity: None,
                filtration_system: Some(FiltrationSpec::Installed(true)),
            },
        }
    }

    #[test]
    fn compliant_delhi_design_passes_every_rule() {
        let checker = ComplianceChecker::with_builtin();
        let verdict = checker.check(&compliant_delhi_params()).unwrap();

        assert!(verdict.is_compliant);
        assert_eq!(verdict.region, "New Delhi");
        assert_eq!(verdict.results.len(), 5);
        assert!(verdict.results.iter().all(|r| r.compliant));
        assert_eq!(
            verdict.summary,
            "Your rainwater harvesting system design is compliant with all applicable \
             regulations. 5 requirements checked and passed."
        );
        assert_eq!(verdict.status(), ComplianceStatus::Compliant);
    }

    #[test]
    fn shallow_pit_fails_only_the_depth_rule() {
        let mut params = compliant_delhi_params();
        params.system_specs.recharge_pit = Some(RechargePit {
            depth: Some(1.0),
            diameter: Some(1.0),
        });

        let checker = ComplianceChecker::with_builtin();
        let verdict = checker.check(&params).unwrap();

        assert!(!verdict.is_compliant);
        let failing: Vec<&RuleOutcome> =
            verdict.results.iter().filter(|r| !r.compliant).collect();
        assert_eq!(failing.len(), 1);
        assert_eq!(failing[0].rule_id, "CGWB-2020-3.2");
        assert_eq!(
            failing[0].details,
            "Recharge pit depth must be at least 1.5m for roof areas greater than 100m²"
        );
        assert_eq!(
            verdict.summary,
            "Your rainwater harvesting system design does not meet 1 out of 5 regulatory \
             requirements. Please review the details and make necessary adjustments."
        );
    }

    #[test]
    fn unmatched_location_evaluates_only_nationwide_rules() {
        let mut params = compliant_delhi_params();
        params.location = "Unknown Region".to_string();

        let checker = ComplianceChecker::with_builtin();
        let verdict = checker.check(&params).unwrap();

        assert_eq!(verdict.results.len(), 1);
        assert_eq!(verdict.results[0].rule_id, "MoHUA-2021-7.3");
        assert!(verdict.is_compliant);
    }

    #[test]
    fn missing_location_is_rejected() {
        let checker = ComplianceChecker::with_builtin();
        let mut params = compliant_delhi_params();
        params.location = "   ".to_string();
        assert_eq!(
            checker.check(&params).unwrap_err(),
            InputError::MissingLocation
        );
    }

    #[test]
    fn identical_checks_yield_identical_results_and_digests() {
        let checker = ComplianceChecker::with_builtin();
        let params = compliant_delhi_params();

        let first = checker.check(&params).unwrap();
        let second = checker.check(&params).unwrap();

        assert_eq!(first.results, second.results);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.digest(), second.digest());
    }

    #[test]
    fn non_finite_input_folds_into_unevaluated_outcome() {
        let mut params = compliant_delhi_params();
        params.infiltration_rate = Some(f64::NAN);

        let checker = ComplianceChecker::with_builtin();
        let verdict = checker.check(&params).unwrap();

        let infiltration = verdict
            .results
            .iter()
            .find(|r| r.rule_id == "CGWB-2020-5.1")
            .unwrap();
        assert!(!infiltration.compliant);
        assert_eq!(infiltration.details, UNEVALUATED_DETAILS);
        assert!(!verdict.is_compliant);
    }

    #[test]
    fn evaluate_regulation_carries_citation_fields() {
        let catalog = RegulationCatalog::builtin();
        let reg = catalog.get("MoHUA-2021-7.3").unwrap();
        let outcome = evaluate_regulation(reg, &compliant_delhi_params());
        assert_eq!(outcome.rule_id, reg.id);
        assert_eq!(outcome.text, reg.text);
        assert_eq!(outcome.source, reg.source);
        assert!(outcome.compliant);
    }

    #[test]
    fn summarize_empty_set_reads_compliant() {
        assert_eq!(
            summarize(&[]),
            "Your rainwater harvesting system design is compliant with all applicable \
             regulations. 0 requirements checked and passed."
        );
    }

    #[test]
    fn missing_numerics_fail_thresholds_without_erroring() {
        let params = SystemParameters {
            location: "New Delhi".to_string(),
            roof_area: Some(150.0),
            infiltration_rate: None,
            recharge_potential: None,
            system_specs: SystemSpecs::default(),
        };

        let checker = ComplianceChecker::with_builtin();
        let verdict = checker.check(&params).unwrap();

        assert!(!verdict.is_compliant);
        // Absent inputs fail their thresholds with the published details,
        // not the unevaluated marker.
        assert!(verdict
            .results
            .iter()
            .all(|r| r.details != UNEVALUATED_DETAILS));
    }
}
