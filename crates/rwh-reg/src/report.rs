//! # Report Renderer
//!
//! Renders a [`ComplianceVerdict`] as a sectioned markdown document:
//! summary, region, overall status, one detail section per evaluated rule,
//! and a closing section. Failing rules get exactly one recommendation
//! line, sourced from the catalogue's remediation text; compliant reports
//! carry none.
//!
//! Rendering is infallible. Whether a verdict is complete enough to render
//! is the caller's concern, enforced where untyped input enters the system.

use rwh_core::ComplianceVerdict;

use crate::catalog::RegulationCatalog;

/// Render a verdict as markdown.
pub fn render_report(verdict: &ComplianceVerdict, catalog: &RegulationCatalog) -> String {
    let mut out = String::new();

    out.push_str("# Rainwater Harvesting Compliance Report\n\n");
    out.push_str("## Summary\n");
    out.push_str(&verdict.summary);
    out.push_str("\n\n");
    out.push_str(&format!("## Region: {}\n\n", verdict.region));

    let overall = if verdict.is_compliant {
        "✅ Compliant"
    } else {
        "❌ Non-Compliant"
    };
    out.push_str(&format!("## Overall Status: {overall}\n\n"));

    out.push_str("## Detailed Results\n\n");
    for result in &verdict.results {
        let marker = if result.compliant { "✅" } else { "❌" };
        let status = if result.compliant {
            "Compliant"
        } else {
            "Non-Compliant"
        };
        out.push_str(&format!("### {marker} {}\n\n", result.rule_id));
        out.push_str(&format!("**Regulation:** {}\n\n", result.text));
        out.push_str(&format!("**Source:** {}\n\n", result.source));
        out.push_str(&format!("**Status:** {status}\n\n"));
        out.push_str(&format!("**Details:** {}\n\n", result.details));
        if !result.compliant {
            out.push_str(&format!(
                "**Recommendation:** {}\n\n",
                catalog.remediation_for(&result.rule_id)
            ));
        }
    }

    if verdict.is_compliant {
        out.push_str(
            "## Conclusion\n\nYour rainwater harvesting system design meets all applicable \
             regulatory requirements. You may proceed with implementation.\n",
        );
    } else {
        out.push_str(
            "## Next Steps\n\nPlease address the non-compliant aspects of your design before \
             proceeding with implementation. Once you've made the necessary adjustments, you \
             can run another compliance check to verify that all requirements are met.\n",
        );
    }

    out
}
