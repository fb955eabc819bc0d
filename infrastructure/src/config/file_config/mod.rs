//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Missing sections and keys fall back to the business preset.

mod evaluators;
mod negotiation;
mod simulation;
mod state;

pub use evaluators::FileEvaluatorsConfig;
pub use negotiation::FileNegotiationConfig;
pub use simulation::{DEFAULT_MAX_ROUNDS, DEFAULT_ROUNDS, FileSimulationConfig};
pub use state::FileStateConfig;

use roundtable_application::{RunSimulationError, RunSimulationUseCase};
use roundtable_domain::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while loading a configuration or wiring a simulation from it
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("unknown evaluator '{0}'")]
    UnknownEvaluator(String),

    #[error("rounds ({rounds}) exceeds max_rounds ({max_rounds})")]
    TooManyRounds { rounds: usize, max_rounds: usize },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Simulation(#[from] RunSimulationError),
}

/// Severity level of a configuration issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the simulation cannot be wired
    Error,
    /// Non-fatal: the run works but may not behave as expected
    Warning,
}

/// A detected issue in the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub message: String,
}

impl ConfigIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Round loop settings
    pub simulation: FileSimulationConfig,
    /// Resolver settings and producer weights
    pub negotiation: FileNegotiationConfig,
    /// Initial value and bound overrides
    pub state: FileStateConfig,
    /// Enabled default evaluators
    pub evaluators: FileEvaluatorsConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Every `Error` issue would also make [`build_simulation`] fail; this
    /// pass reports all of them at once instead of stopping at the first.
    ///
    /// [`build_simulation`]: FileConfig::build_simulation
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let sim = &self.simulation;
        let neg = &self.negotiation;

        // 1. Round limits
        if sim.rounds > sim.max_rounds {
            issues.push(ConfigIssue::error(format!(
                "simulation.rounds: {} exceeds max_rounds {}",
                sim.rounds, sim.max_rounds
            )));
        }
        if !(sim.noise_factor.is_finite() && sim.noise_factor >= 0.0) {
            issues.push(ConfigIssue::error(format!(
                "simulation.noise_factor: must be finite and non-negative, got {}",
                sim.noise_factor
            )));
        }

        // 2. State fields and bounds
        let initial = self.state.initial_values();
        let bounds = self.state.bounds_table();
        for field in initial.keys().filter(|f| !bounds.contains_field(f)) {
            issues.push(ConfigIssue::error(format!(
                "state.bounds.{field}: no bound configured"
            )));
        }
        for (field, b) in bounds.iter() {
            if b.lo.is_nan() || b.hi.is_nan() || b.lo > b.hi {
                issues.push(ConfigIssue::error(format!(
                    "state.bounds.{field}: lower bound {} exceeds upper bound {}",
                    b.lo, b.hi
                )));
            }
        }
        if !initial.contains_key(&sim.volatility_field) {
            issues.push(ConfigIssue::error(format!(
                "simulation.volatility_field: '{}' is not a state field",
                sim.volatility_field
            )));
        }

        // 3. Resolver settings
        for (name, value) in [
            ("conflict_threshold", neg.conflict_threshold),
            ("conflict_penalty", neg.conflict_penalty),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                issues.push(ConfigIssue::error(format!(
                    "negotiation.{name}: must be in (0, 1], got {value}"
                )));
            }
        }

        // 4. Evaluators and weights
        let mut seen = BTreeSet::new();
        for name in &self.evaluators.enabled {
            if !seen.insert(name.as_str()) {
                issues.push(ConfigIssue::error(format!(
                    "evaluators.enabled: '{name}' is listed more than once"
                )));
            }
            if !neg.weights.contains_key(name) {
                issues.push(ConfigIssue::warning(format!(
                    "negotiation.weights: no weight for '{name}', using 1.0"
                )));
            }
        }
        for name in self.evaluators.unknown() {
            issues.push(ConfigIssue::error(format!(
                "evaluators.enabled: unknown evaluator '{name}'"
            )));
        }
        for (producer, weight) in &neg.weights {
            if !(weight.is_finite() && *weight > 0.0) {
                issues.push(ConfigIssue::error(format!(
                    "negotiation.weights.{producer}: must be positive, got {weight}"
                )));
            }
            if !seen.contains(producer.as_str()) {
                issues.push(ConfigIssue::warning(format!(
                    "negotiation.weights.{producer}: producer is not enabled"
                )));
            }
        }

        issues
    }

    /// Wire the state store, evaluators and resolver into a ready use case
    pub fn build_simulation(&self) -> Result<RunSimulationUseCase, ConfigValidationError> {
        let sim = &self.simulation;
        if sim.rounds > sim.max_rounds {
            return Err(ConfigValidationError::TooManyRounds {
                rounds: sim.rounds,
                max_rounds: sim.max_rounds,
            });
        }

        let store = self.state.to_store()?;
        let evaluators = self
            .evaluators
            .to_evaluators()
            .map_err(ConfigValidationError::UnknownEvaluator)?;
        let resolver = self.negotiation.to_resolver()?;

        Ok(RunSimulationUseCase::new(
            store,
            evaluators,
            resolver,
            sim.to_params(),
        )?)
    }
}
