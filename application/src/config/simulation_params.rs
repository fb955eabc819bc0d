//! Simulation parameters for the round loop
//!
//! [`SimulationParams`] groups the static parameters of the round loop in
//! [`RunSimulationUseCase`](crate::use_cases::run_simulation::RunSimulationUseCase).
//! Round count, scenario label and the stochastic flag are per-run arguments
//! and live on the call instead.

use serde::{Deserialize, Serialize};

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Noise standard deviation per unit of the volatility field
pub const DEFAULT_NOISE_FACTOR: f64 = 0.1;

/// State field whose value scales the perturbation
pub const DEFAULT_VOLATILITY_FIELD: &str = "volatility";

/// Round loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Seed for the run's random source; every run reseeds from it.
    pub seed: u64,
    /// `noise ~ N(0, volatility × noise_factor)`
    pub noise_factor: f64,
    /// Name of the volatility-like state field.
    pub volatility_field: String,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            noise_factor: DEFAULT_NOISE_FACTOR,
            volatility_field: DEFAULT_VOLATILITY_FIELD.to_string(),
        }
    }
}

impl SimulationParams {
    // ==================== Builder Methods ====================

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_noise_factor(mut self, factor: f64) -> Self {
        self.noise_factor = factor;
        self
    }

    pub fn with_volatility_field(mut self, field: impl Into<String>) -> Self {
        self.volatility_field = field.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = SimulationParams::default();
        assert_eq!(params.seed, 42);
        assert_eq!(params.noise_factor, 0.1);
        assert_eq!(params.volatility_field, "volatility");
    }

    #[test]
    fn test_builder_methods() {
        let params = SimulationParams::default()
            .with_seed(7)
            .with_noise_factor(0.25)
            .with_volatility_field("market_vol");

        assert_eq!(params.seed, 7);
        assert_eq!(params.noise_factor, 0.25);
        assert_eq!(params.volatility_field, "market_vol");
    }
}
