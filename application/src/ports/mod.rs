//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that outer layers implement. Evaluators are
//! a domain capability ([`roundtable_domain::Evaluator`]) because they are
//! pure; only progress reporting is an application port.

pub mod round_observer;
