//! Round observer port
//!
//! Defines the interface for reporting progress during a simulation run.

use roundtable_domain::{RoundRecord, RunTrace};

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain text, etc.)
pub trait RoundObserver {
    /// Called once after the reset, before round 1
    fn on_run_start(&self, n_rounds: usize, scenario: &str);

    /// Called after each round's record is appended
    fn on_round_complete(&self, record: &RoundRecord);

    /// Called with the finished trace
    fn on_run_complete(&self, _trace: &RunTrace) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoObserver;

impl RoundObserver for NoObserver {
    fn on_run_start(&self, _n_rounds: usize, _scenario: &str) {}
    fn on_round_complete(&self, _record: &RoundRecord) {}
}
