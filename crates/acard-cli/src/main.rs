//! # acard CLI entry point
//!
//! Parses command-line arguments, resolves validation options and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use acard_cli::contract::{run_contract, ContractArgs};
use acard_cli::export::{run_export_schema, ExportSchemaArgs};
use acard_cli::format::{run_fmt, FmtArgs};
use acard_cli::options::load_options;
use acard_cli::validate::{run_validate, ValidateArgs};

/// Adaptive Card 1.0 toolchain.
///
/// Validates cards with path-annotated defect reports, reformats them
/// between JSON and YAML, and exposes the field contracts of every tag.
#[derive(Parser, Debug)]
#[command(name = "acard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a validation options file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate card files and report every defect.
    Validate(ValidateArgs),

    /// Re-encode a card canonically, or check that it already is.
    Fmt(FmtArgs),

    /// List tags, or print the field contract of one tag.
    Contract(ContractArgs),

    /// Print the registry as a JSON Schema.
    #[command(name = "export-schema")]
    ExportSchema(ExportSchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("acard CLI starting");

    let result = load_options(cli.config.as_deref()).and_then(|options| match &cli.command {
        Commands::Validate(args) => run_validate(args, options),
        Commands::Fmt(args) => run_fmt(args, options),
        Commands::Contract(args) => run_contract(args),
        Commands::ExportSchema(args) => run_export_schema(args, options),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acard_cli::validate::KindArg;

    #[test]
    fn cli_parse_validate_files() {
        let cli = Cli::try_parse_from(["acard", "validate", "a.json", "b.yaml"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(
                args.files,
                vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]
            );
            assert_eq!(args.kind, KindArg::Card);
            assert!(!args.policy.reject_unknown_fields);
            assert!(args.policy.max_depth.is_none());
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_requires_files() {
        assert!(Cli::try_parse_from(["acard", "validate"]).is_err());
    }

    #[test]
    fn cli_parse_validate_policy_flags() {
        let cli = Cli::try_parse_from([
            "acard",
            "validate",
            "--kind",
            "showable-card",
            "--reject-unknown-fields",
            "--unique-input-ids",
            "--max-depth",
            "8",
            "card.json",
        ])
        .unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.kind, KindArg::ShowableCard);
            assert!(args.policy.reject_unknown_fields);
            assert!(args.policy.unique_input_ids);
            assert_eq!(args.policy.max_depth, Some(8));
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_zero_depth_fails() {
        let result = Cli::try_parse_from(["acard", "validate", "--max-depth", "0", "card.json"]);
        assert!(result.is_err());
        let cli =
            Cli::try_parse_from(["acard", "validate", "--max-depth", "1", "card.json"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.policy.max_depth, Some(1));
        }
    }

    #[test]
    fn cli_parse_fmt() {
        let cli = Cli::try_parse_from(["acard", "fmt", "card.json", "--to", "yaml", "--check"])
            .unwrap();
        if let Commands::Fmt(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("card.json"));
            assert_eq!(args.to, Some(acard_cli::format::FormatArg::Yaml));
            assert!(args.check);
        } else {
            panic!("expected fmt");
        }
    }

    #[test]
    fn cli_parse_contract_optional_tag() {
        let cli = Cli::try_parse_from(["acard", "contract"]).unwrap();
        assert!(matches!(cli.command, Commands::Contract(ContractArgs { tag: None })));
        let cli = Cli::try_parse_from(["acard", "contract", "Input.Text"]).unwrap();
        if let Commands::Contract(args) = cli.command {
            assert_eq!(args.tag.as_deref(), Some("Input.Text"));
        }
    }

    #[test]
    fn cli_parse_export_schema() {
        let cli = Cli::try_parse_from(["acard", "export-schema", "--reject-unknown-fields"])
            .unwrap();
        if let Commands::ExportSchema(args) = cli.command {
            assert!(args.reject_unknown_fields);
            assert!(args.out.is_none());
        } else {
            panic!("expected export-schema");
        }
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "acard",
            "contract",
            "-vv",
            "--config",
            "acard.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("acard.yaml")));
    }

    #[test]
    fn cli_parse_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["acard", "lint"]).is_err());
    }
}
