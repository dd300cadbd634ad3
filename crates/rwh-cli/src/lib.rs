//! # rwh-cli — CLI Tool for the RWH Compliance Stack
//!
//! Provides the `rwh` command-line interface for running compliance checks
//! offline, without the HTTP service.
//!
//! ## Subcommands
//!
//! - `rwh check` — Evaluate a system design file against the catalogue.
//! - `rwh regulations` — List the catalogue, optionally filtered by location.
//! - `rwh report` — Render a markdown report from a saved verdict.
//!
//! System parameters and verdicts are read from JSON or YAML files; the
//! format is chosen by file extension. A custom regulation catalogue can be
//! supplied with the global `--catalog` flag, otherwise the built-in
//! catalogue is used.
//!
//! ```bash
//! rwh check design.json
//! rwh check design.yaml --report
//! rwh regulations --location "New Delhi"
//! rwh report verdict.json --out report.md
//! ```

pub mod check;
pub mod regulations;
pub mod report;

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

use rwh_reg::RegulationCatalog;

/// Load the regulation catalogue, either from a YAML file or the built-in set.
pub fn load_catalog(path: Option<&Path>) -> Result<RegulationCatalog> {
    match path {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalogue file: {}", path.display()))?;
            RegulationCatalog::from_yaml_str(&yaml)
                .with_context(|| format!("invalid catalogue file: {}", path.display()))
        }
        None => Ok(RegulationCatalog::builtin()),
    }
}

/// Deserialize a JSON or YAML file, chosen by extension.
pub fn read_input_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display())),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display())),
        _ => bail!(
            "unsupported input file extension for {} (expected .json, .yaml, or .yml)",
            path.display()
        ),
    }
}
