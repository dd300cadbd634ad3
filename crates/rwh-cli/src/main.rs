//! # rwh CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rwh_cli::check::{run_check, CheckArgs};
use rwh_cli::regulations::{run_regulations, RegulationsArgs};
use rwh_cli::report::{run_report, ReportArgs};

/// Rainwater harvesting compliance toolchain.
///
/// Checks system designs against regional harvesting regulations, lists
/// the regulation catalogue, and renders markdown compliance reports.
#[derive(Parser, Debug)]
#[command(name = "rwh", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML regulation catalogue overriding the built-in set.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a system design file for regulatory compliance.
    Check(CheckArgs),

    /// List the regulation catalogue, optionally filtered by location.
    Regulations(RegulationsArgs),

    /// Render a markdown report from a saved verdict file.
    Report(ReportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let catalog_path = cli.catalog.as_deref();

    let result = match cli.command {
        Commands::Check(args) => run_check(&args, catalog_path),
        Commands::Regulations(args) => run_regulations(&args, catalog_path),
        Commands::Report(args) => run_report(&args, catalog_path),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_check_basic() {
        let cli = Cli::try_parse_from(["rwh", "check", "design.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(_)));
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.params, PathBuf::from("design.json"));
            assert!(!args.report);
            assert!(!args.json);
        }
    }

    #[test]
    fn cli_parse_check_with_report() {
        let cli = Cli::try_parse_from(["rwh", "check", "design.json", "--report"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert!(args.report);
        }
    }

    #[test]
    fn cli_parse_check_with_json() {
        let cli = Cli::try_parse_from(["rwh", "check", "design.yaml", "--json"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert!(args.json);
        }
    }

    #[test]
    fn cli_parse_check_report_and_json_conflict() {
        let result = Cli::try_parse_from(["rwh", "check", "design.json", "--report", "--json"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_regulations_basic() {
        let cli = Cli::try_parse_from(["rwh", "regulations"]).unwrap();
        assert!(matches!(cli.command, Commands::Regulations(_)));
        if let Commands::Regulations(args) = cli.command {
            assert!(args.location.is_none());
            assert!(!args.json);
        }
    }

    #[test]
    fn cli_parse_regulations_with_location() {
        let cli =
            Cli::try_parse_from(["rwh", "regulations", "--location", "New Delhi"]).unwrap();
        if let Commands::Regulations(args) = cli.command {
            assert_eq!(args.location, Some("New Delhi".to_string()));
        }
    }

    #[test]
    fn cli_parse_report_basic() {
        let cli = Cli::try_parse_from(["rwh", "report", "verdict.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Report(_)));
        if let Commands::Report(args) = cli.command {
            assert_eq!(args.verdict, PathBuf::from("verdict.json"));
            assert!(args.out.is_none());
        }
    }

    #[test]
    fn cli_parse_report_with_out() {
        let cli =
            Cli::try_parse_from(["rwh", "report", "verdict.json", "--out", "report.md"]).unwrap();
        if let Commands::Report(args) = cli.command {
            assert_eq!(args.out, Some(PathBuf::from("report.md")));
        }
    }

    #[test]
    fn cli_parse_catalog_option() {
        let cli = Cli::try_parse_from([
            "rwh",
            "--catalog",
            "custom.yaml",
            "regulations",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["rwh", "regulations"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli1 = Cli::try_parse_from(["rwh", "-v", "regulations"]).unwrap();
        assert_eq!(cli1.verbose, 1);

        let cli2 = Cli::try_parse_from(["rwh", "-vv", "regulations"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["rwh", "-vvv", "regulations"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        let result = Cli::try_parse_from(["rwh"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        let result = Cli::try_parse_from(["rwh", "nonexistent"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_debug_impl() {
        let cli = Cli::try_parse_from(["rwh", "regulations"]).unwrap();
        let debug = format!("{cli:?}");
        assert!(debug.contains("Cli"));
    }
}
