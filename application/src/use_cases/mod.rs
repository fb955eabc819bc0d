//! Use cases (application services)
//!
//! - [`run_simulation`]: the seeded round loop over evaluators, resolver
//!   and state store

pub mod run_simulation;
