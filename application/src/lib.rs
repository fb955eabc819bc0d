//! Application layer for roundtable
//!
//! This crate contains the round orchestration use case, port definitions,
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{
    DEFAULT_NOISE_FACTOR, DEFAULT_SEED, DEFAULT_VOLATILITY_FIELD, SimulationParams,
};
pub use ports::round_observer::{NoObserver, RoundObserver};
pub use use_cases::run_simulation::{RunSimulationError, RunSimulationUseCase};
