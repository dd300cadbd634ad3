//! # Report Subcommand
//!
//! Renders the markdown compliance report from a saved verdict file, as
//! produced by `rwh check --json`. Remediation guidance for failing rules
//! is looked up in the catalogue at render time.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use rwh_core::ComplianceVerdict;
use rwh_reg::render_report;

use crate::{load_catalog, read_input_file};

/// Arguments for the `rwh report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Path to the verdict file (.json, .yaml, or .yml).
    pub verdict: PathBuf,

    /// Write the report to a file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute the report subcommand.
pub fn run_report(args: &ReportArgs, catalog_path: Option<&Path>) -> Result<u8> {
    let catalog = load_catalog(catalog_path)?;
    let verdict: ComplianceVerdict = read_input_file(&args.verdict)?;
    let report = render_report(&verdict, &catalog);

    match &args.out {
        Some(out) => {
            std::fs::write(out, &report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            println!("OK: wrote report to {}", out.display());
        }
        None => println!("{report}"),
    }

    Ok(0)
}
