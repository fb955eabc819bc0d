//! Application-level configuration.
//!
//! - [`SimulationParams`]: round loop control (seed, noise scaling)

pub mod simulation_params;

pub use simulation_params::{
    DEFAULT_NOISE_FACTOR, DEFAULT_SEED, DEFAULT_VOLATILITY_FIELD, SimulationParams,
};
