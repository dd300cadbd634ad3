//! # Regulations Subcommand
//!
//! Lists the regulation catalogue, either in full or filtered down to the
//! rules that apply at a given location.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use rwh_reg::Regulation;

use crate::load_catalog;

/// Arguments for the `rwh regulations` subcommand.
#[derive(Args, Debug)]
pub struct RegulationsArgs {
    /// Only show regulations that apply at this location.
    #[arg(long)]
    pub location: Option<String>,

    /// Print the regulations as JSON instead of the listing.
    #[arg(long)]
    pub json: bool,
}

/// Execute the regulations subcommand.
pub fn run_regulations(args: &RegulationsArgs, catalog_path: Option<&Path>) -> Result<u8> {
    let catalog = load_catalog(catalog_path)?;

    let regulations: Vec<&Regulation> = match &args.location {
        Some(location) => catalog.regulations_for_location(location)?,
        None => catalog.regulations().iter().collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&regulations)?);
        return Ok(0);
    }

    match &args.location {
        Some(location) => println!(
            "Regulations applying at {location:?} ({}):",
            regulations.len()
        ),
        None => println!("Regulations ({}):", regulations.len()),
    }
    for regulation in &regulations {
        println!("  {} [{}]", regulation.id, regulation.region_scope);
        println!("    {}", regulation.text);
        println!("    Source: {}", regulation.source);
    }

    Ok(0)
}
