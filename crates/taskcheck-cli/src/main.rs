//! # taskcheck CLI entry point
//!
//! Parses command-line arguments, loads the configuration and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskcheck_cli::check::{run_check, CheckArgs};
use taskcheck_cli::config::CheckConfig;

/// Checks task-description files: metadata block, age ladder,
/// contributors, support files and required sections.
#[derive(Parser, Debug)]
#[command(name = "taskcheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: taskcheck.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate task files and report diagnostics.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr; stdout carries the reports.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("taskcheck {} starting", env!("CARGO_PKG_VERSION"));

    let result = CheckConfig::load(cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|config| match &cli.command {
            Commands::Check(args) => run_check(args, &config),
        });

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
    use taskcheck_cli::check::OutputFormat;

    #[test]
    fn cli_parse_check_single_file() {
        let cli = Cli::try_parse_from(["taskcheck", "check", "2024-CH-07.task.md"]).unwrap();
        let Commands::Check(args) = cli.command;
        assert_eq!(args.paths, vec![PathBuf::from("2024-CH-07.task.md")]);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.strict);
        assert!(args.max_suggestions.is_none());
    }

    #[test]
    fn cli_parse_check_with_all_options() {
        let cli = Cli::try_parse_from([
            "taskcheck",
            "check",
            "a.task.md",
            "b.task.md",
            "--format",
            "json",
            "--strict",
            "--max-suggestions",
            "5",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command;
        assert_eq!(args.paths.len(), 2);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.strict);
        assert_eq!(args.max_suggestions, Some(5));
    }

    #[test]
    fn cli_parse_check_requires_a_file() {
        assert!(Cli::try_parse_from(["taskcheck", "check"]).is_err());
    }

    #[test]
    fn cli_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["taskcheck", "check", "a.task.md", "--format", "xml"]).is_err());
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["taskcheck", "check", "a.task.md"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["taskcheck", "-vv", "check", "a.task.md"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["taskcheck", "check", "a.task.md", "-vvv"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_config_option() {
        let cli = Cli::try_parse_from(["taskcheck", "--config", "ci.yaml", "check", "a.task.md"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci.yaml")));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["taskcheck"]).is_err());
    }
}
