//! Simulation configuration from TOML (`[simulation]` section)

use roundtable_application::{
    DEFAULT_NOISE_FACTOR, DEFAULT_SEED, DEFAULT_VOLATILITY_FIELD, SimulationParams,
};
use roundtable_domain::DEFAULT_SCENARIO;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROUNDS: usize = 6;
pub const DEFAULT_MAX_ROUNDS: usize = 12;

/// Raw simulation configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSimulationConfig {
    /// Rounds per run
    pub rounds: usize,
    /// Upper limit for `rounds`, including CLI overrides
    pub max_rounds: usize,
    pub seed: u64,
    /// Apply volatility-scaled noise each round
    pub stochastic: bool,
    pub noise_factor: f64,
    /// State field whose value scales the noise
    pub volatility_field: String,
    /// Label carried into the trace
    pub scenario: String,
}

impl Default for FileSimulationConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            seed: DEFAULT_SEED,
            stochastic: true,
            noise_factor: DEFAULT_NOISE_FACTOR,
            volatility_field: DEFAULT_VOLATILITY_FIELD.to_string(),
            scenario: DEFAULT_SCENARIO.to_string(),
        }
    }
}

impl FileSimulationConfig {
    pub fn to_params(&self) -> SimulationParams {
        SimulationParams::default()
            .with_seed(self.seed)
            .with_noise_factor(self.noise_factor)
            .with_volatility_field(self.volatility_field.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_defaults() {
        let config = FileSimulationConfig::default();
        assert_eq!(config.rounds, 6);
        assert_eq!(config.max_rounds, 12);
        assert!(config.stochastic);
        assert_eq!(config.scenario, "Default Scenario");
    }

    #[test]
    fn test_simulation_partial_override() {
        let toml_str = r#"
[simulation]
seed = 7
stochastic = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert!(!config.simulation.stochastic);
        assert_eq!(config.simulation.noise_factor, 0.1);

        let params = config.simulation.to_params();
        assert_eq!(params.seed, 7);
        assert_eq!(params.volatility_field, "volatility");
    }
}
