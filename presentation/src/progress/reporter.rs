//! Progress reporting for simulation runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use roundtable_application::RoundObserver;
use roundtable_domain::{RoundRecord, RunTrace};
use std::sync::Mutex;

/// Reports progress during a run with a progress bar on stderr
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn round_message(record: &RoundRecord) -> String {
        let conflicts = record.outcome.conflicts.len();
        let status = if conflicts == 0 {
            "v".green()
        } else {
            "!".yellow()
        };
        format!(
            "{} round {} confidence {:.1}%, {} conflict(s)",
            status,
            record.round,
            record.outcome.confidence_index * 100.0,
            conflicts
        )
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundObserver for ProgressReporter {
    fn on_run_start(&self, n_rounds: usize, scenario: &str) {
        let pb = ProgressBar::new(n_rounds as u64);
        pb.set_style(Self::round_style());
        pb.set_prefix(scenario.to_string());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_round_complete(&self, record: &RoundRecord) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.set_message(Self::round_message(record));
                pb.inc(1);
            }
        }
    }

    fn on_run_complete(&self, trace: &RunTrace) {
        if let Some(pb) = self.bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.finish_with_message(format!(
                "{} ({} rounds)",
                "Simulation complete!".green(),
                trace.n_rounds()
            ));
        }
    }
}

/// Simple text-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl RoundObserver for SimpleProgress {
    fn on_run_start(&self, n_rounds: usize, scenario: &str) {
        eprintln!("{} {} ({} rounds)", "->".cyan(), scenario.bold(), n_rounds);
    }

    fn on_round_complete(&self, record: &RoundRecord) {
        eprintln!("  {}", ProgressReporter::round_message(record));
    }

    fn on_run_complete(&self, _trace: &RunTrace) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ConsensusOutcome, StateVector};

    fn record() -> RoundRecord {
        let state = StateVector::from_values([("revenue", 1.0)]);
        RoundRecord {
            round: 3,
            proposals: Vec::new(),
            outcome: ConsensusOutcome::neutral(),
            state_before: state.clone(),
            state_after: state,
            noise: 0.0,
        }
    }

    #[test]
    fn test_round_message() {
        colored::control::set_override(false);
        assert_eq!(
            ProgressReporter::round_message(&record()),
            "v round 3 confidence 0.0%, 0 conflict(s)"
        );
    }

    #[test]
    fn test_reporter_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_run_start(2, "Test");
        reporter.on_round_complete(&record());
        let state = StateVector::from_values([("revenue", 1.0)]);
        reporter.on_run_complete(&RunTrace::new("Test", state.clone(), state, vec![record()]));
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
