//! Progress reporting for simulation runs

pub mod reporter;
