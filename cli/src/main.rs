//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use roundtable_application::RoundObserver;
use roundtable_domain::RunTrace;
use roundtable_infrastructure::{
    BusinessKpis, ConfigIssue, ConfigLoader, FileConfig, Severity, roi_series,
};
use roundtable_presentation::{
    Cli, ConsoleFormatter, KeyFigure, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    // Load configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    apply_overrides(&mut config, &cli);

    let issues = config.validate();
    report_issues(&issues);
    if issues.iter().any(ConfigIssue::is_error) {
        bail!("Invalid configuration; see the errors above.");
    }

    info!(
        "Starting roundtable: '{}' for {} rounds",
        config.simulation.scenario, config.simulation.rounds
    );

    // === Dependency Injection ===
    // Store, evaluators and resolver are built from the configuration
    let mut simulation = config.build_simulation()?;

    let sim = &config.simulation;
    let trace = if cli.quiet {
        simulation.run(sim.rounds, sim.scenario.clone(), sim.stochastic)?
    } else {
        let observer: Box<dyn RoundObserver> = if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        simulation.run_with_observer(
            sim.rounds,
            sim.scenario.clone(),
            sim.stochastic,
            observer.as_ref(),
        )?
    };

    // Output results
    let output = match cli.output {
        OutputFormat::Summary => ConsoleFormatter::format_summary(&trace, &key_figures(&trace)),
        OutputFormat::Full => {
            let mut figures = key_figures(&trace);
            figures.extend(
                roi_series(&trace)
                    .into_iter()
                    .enumerate()
                    .map(|(round, roi)| KeyFigure::ratio(format!("ROI after round {round}"), roi)),
            );
            ConsoleFormatter::format(&trace, &figures)
        }
        OutputFormat::Json => ConsoleFormatter::format_json(&trace)?,
    };

    println!("{}", output);

    Ok(())
}

/// CLI flags take precedence over every configuration source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(rounds) = cli.rounds {
        config.simulation.rounds = rounds;
    }
    if let Some(scenario) = &cli.scenario {
        config.simulation.scenario = scenario.clone();
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }
    if cli.deterministic {
        config.simulation.stochastic = false;
    }
}

/// Business KPIs of the final state, in display order
fn key_figures(trace: &RunTrace) -> Vec<KeyFigure> {
    let kpis = BusinessKpis::from_trace(trace);
    vec![
        KeyFigure::amount("Final revenue", kpis.revenue_final),
        KeyFigure::percent("Revenue change", kpis.revenue_change_pct),
        KeyFigure::amount("Final profit", kpis.profit_final),
        KeyFigure::percent("Profit margin", kpis.profit_margin),
        KeyFigure::ratio("ROI", kpis.roi),
        KeyFigure::ratio("Cost ratio", kpis.cost_ratio),
        KeyFigure::ratio("Risk score", kpis.risk_score_final),
        KeyFigure::change("Risk change", kpis.risk_score_change),
        KeyFigure::percent("Churn", kpis.churn_final),
        KeyFigure::percent("Growth rate", kpis.growth_rate_final),
        KeyFigure::percent("Consensus confidence", kpis.consensus_confidence),
        KeyFigure::count("Rounds", kpis.total_rounds),
    ]
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => eprintln!("error: {}", issue.message),
        }
    }
}
