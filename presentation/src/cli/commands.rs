//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a run trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Final state changes and a per-round timeline
    Summary,
    /// Every round with proposals, conflicts and consensus
    Full,
    /// The complete trace as JSON
    Json,
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Multi-evaluator consensus simulation")]
#[command(long_about = r#"
Roundtable runs a round-based simulation in which independent evaluators
propose changes to a shared business state. Each round the proposals are
merged by weighted consensus, conflicting evaluators are down-weighted,
and the merged changes are applied with optional volatility-scaled noise.

The same seed and configuration always reproduce the same trace.

Configuration files are loaded from (in priority order):
1. ROUNDTABLE_* environment variables (e.g. ROUNDTABLE_SIMULATION__SEED=7)
2. --config <path>         Explicit config file
3. ./roundtable.toml       Project-level config
4. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable
  roundtable -r 10 -s "Aggressive Expansion" --seed 7
  roundtable --deterministic -o json > trace.json
"#)]
pub struct Cli {
    /// Number of rounds to simulate (overrides config)
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<usize>,

    /// Scenario label recorded in the trace (overrides config)
    #[arg(short, long, value_name = "NAME")]
    pub scenario: Option<String>,

    /// Random seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the per-round noise
    #[arg(long)]
    pub deterministic: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["roundtable"]);
        assert_eq!(cli.output, OutputFormat::Summary);
        assert!(cli.rounds.is_none());
        assert!(!cli.deterministic);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "roundtable",
            "-r",
            "10",
            "-s",
            "Downturn",
            "--seed",
            "7",
            "--deterministic",
            "-o",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.rounds, Some(10));
        assert_eq!(cli.scenario.as_deref(), Some("Downturn"));
        assert_eq!(cli.seed, Some(7));
        assert!(cli.deterministic);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }
}
