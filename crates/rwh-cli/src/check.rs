//! # Check Subcommand
//!
//! Runs a compliance check for a system design file against the regulation
//! catalogue and prints the verdict. Exits non-zero when the design is
//! non-compliant, so the command can gate CI pipelines and build scripts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use rwh_core::SystemParameters;
use rwh_reg::{render_report, ComplianceChecker};

use crate::{load_catalog, read_input_file};

/// Arguments for the `rwh check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the system design file (.json, .yaml, or .yml).
    pub params: PathBuf,

    /// Print the full markdown report instead of the summary.
    #[arg(long)]
    pub report: bool,

    /// Print the verdict as JSON instead of the summary.
    #[arg(long, conflicts_with = "report")]
    pub json: bool,
}

/// Execute the check subcommand.
///
/// Returns exit code 0 when the design is compliant and 1 when any
/// applicable rule fails.
pub fn run_check(args: &CheckArgs, catalog_path: Option<&Path>) -> Result<u8> {
    let catalog = Arc::new(load_catalog(catalog_path)?);
    let checker = ComplianceChecker::new(catalog.clone());

    let params: SystemParameters = read_input_file(&args.params)?;
    let verdict = checker.check(&params)?;

    if args.report {
        println!("{}", render_report(&verdict, &catalog));
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        println!("Compliance check: {}", verdict.region);
        println!("  Status: {}", verdict.status());
        println!(
            "  Rules: {} passed, {} failed",
            verdict.passed_count(),
            verdict.failed_count()
        );
        println!(
            "  Checked: {}",
            verdict
                .checked_at
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        );
        println!("  Digest: {}", verdict.digest());

        for outcome in verdict.results.iter().filter(|r| !r.compliant) {
            println!();
            println!("  [FAIL] {} ({})", outcome.rule_id, outcome.source);
            println!("    {}", outcome.details);
            println!("    Fix: {}", catalog.remediation_for(&outcome.rule_id));
        }

        println!();
        println!("{}", verdict.summary);
    }

    Ok(if verdict.is_compliant { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_params(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn compliant_delhi_json() -> &'static str {
        r#"{
            "location": "New Delhi",
            "roofArea": 150.0,
            "infiltrationRate": 12.0,
            "systemSpecs": {
                "rechargePit": { "depth": 1.5, "diameter": 1.0 },
                "filtrationSystem": true
            }
        }"#
    }

    #[test]
    fn check_compliant_design_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let params = write_params(dir.path(), "design.json", compliant_delhi_json());

        let args = CheckArgs {
            params,
            report: false,
            json: false,
        };
        assert_eq!(run_check(&args, None).unwrap(), 0);
    }

    #[test]
    fn check_non_compliant_design_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let params = write_params(
            dir.path(),
            "design.json",
            r#"{
                "location": "New Delhi",
                "roofArea": 150.0,
                "infiltrationRate": 12.0,
                "systemSpecs": {
                    "rechargePit": { "depth": 1.0, "diameter": 1.0 },
                    "filtrationSystem": true
                }
            }"#,
        );

        let args = CheckArgs {
            params,
            report: false,
            json: false,
        };
        assert_eq!(run_check(&args, None).unwrap(), 1);
    }

    #[test]
    fn check_reads_yaml_design() {
        let dir = tempfile::tempdir().unwrap();
        let params = write_params(
            dir.path(),
            "design.yaml",
            "location: Unknown Region\n\
             systemSpecs:\n\
             \x20 filtrationSystem: true\n",
        );

        let args = CheckArgs {
            params,
            report: false,
            json: false,
        };
        // Only the nationwide filtration rule applies, and it passes.
        assert_eq!(run_check(&args, None).unwrap(), 0);
    }

    #[test]
    fn check_json_output_exits_with_verdict_code() {
        let dir = tempfile::tempdir().unwrap();
        let params = write_params(dir.path(), "design.json", compliant_delhi_json());

        let args = CheckArgs {
            params,
            report: false,
            json: true,
        };
        assert_eq!(run_check(&args, None).unwrap(), 0);
    }

    #[test]
    fn check_report_output_exits_with_verdict_code() {
        let dir = tempfile::tempdir().unwrap();
        let params = write_params(
            dir.path(),
            "design.json",
            r#"{"location": "Unknown Region"}"#,
        );

        let args = CheckArgs {
            params,
            report: true,
            json: false,
        };
        // No filtration system, so the nationwide rule fails.
        assert_eq!(run_check(&args, None).unwrap(), 1);
    }

    #[test]
    fn check_missing_params_file_errors() {
        let args = CheckArgs {
            params: PathBuf::from("/nonexistent/design.json"),
            report: false,
            json: false,
        };
        assert!(run_check(&args, None).is_err());
    }

    #[test]
    fn check_blank_location_errors() {
        let dir = tempfile::tempdir().unwrap();
        let params = write_params(dir.path(), "design.json", r#"{"location": "  "}"#);

        let args = CheckArgs {
            params,
            report: false,
            json: false,
        };
        let result = run_check(&args, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("location is required"));
    }

    #[test]
    fn check_with_custom_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = write_params(
            dir.path(),
            "catalog.yaml",
            "regulations:\n\
             \x20 - id: CUSTOM-1\n\
             \x20   region_scope: ALL\n\
             \x20   text: Every system requires filtration\n\
             \x20   source: Custom Bylaw 1\n\
             \x20   check:\n\
             \x20     type: requires_filtration\n",
        );
        let params = write_params(
            dir.path(),
            "design.json",
            r#"{"location": "Anywhere", "systemSpecs": {"filtrationSystem": true}}"#,
        );

        let args = CheckArgs {
            params,
            report: false,
            json: false,
        };
        assert_eq!(run_check(&args, Some(&catalog_path)).unwrap(), 0);
    }
}
