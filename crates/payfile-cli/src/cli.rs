use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(
    name = "payfile",
    about = "Payment file event store: replay command scripts and inspect journeys",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format; overrides the config file.
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a JSON command script to a fresh store and show the result
    Run(RunArgs),
    /// Run the built-in end-to-end scenario
    Demo,
    /// Apply a script and report out-of-order workflow steps per journey
    Audit(AuditArgs),
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
    /// Show state and timeline of a single correlation group.
    #[arg(long)]
    pub correlation: Option<String>,
}

#[derive(Args)]
pub struct AuditArgs {
    pub script: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "payfile",
            "run",
            "script.json",
            "--correlation",
            "0190a5c4-0000-7000-8000-000000000000",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.script, PathBuf::from("script.json"));
                assert!(args.correlation.is_some());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn demo_takes_no_arguments() {
        let cli = Cli::try_parse_from(["payfile", "demo"]).unwrap();
        assert!(matches!(cli.command, Command::Demo));
        assert!(cli.format.is_none());
        assert!(cli.config.is_none());
    }
}
