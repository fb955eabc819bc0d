//! Business state preset
//!
//! Initial values, bounds and negotiation weights for the seven-field business
//! model the default evaluators read. Configuration files override entries
//! field by field.

use crate::evaluators::{COST_AGENT, GROWTH_AGENT, RISK_AGENT, REVENUE_AGENT};
use roundtable_domain::{BoundsTable, StateVector};
use std::collections::BTreeMap;

/// `(field, initial value, lo, hi)`
const FIELDS: [(&str, f64, f64, f64); 7] = [
    ("revenue", 1_000_000.0, 1.0, 1e9),
    ("cost", 600_000.0, 1.0, 1e9),
    ("risk_score", 0.35, 0.0, 1.0),
    ("churn", 0.08, 0.0, 1.0),
    ("marketing_budget", 80_000.0, 0.0, 1e8),
    ("growth_rate", 0.05, -0.5, 2.0),
    ("volatility", 0.15, 0.0, 1.0),
];

/// Default producer weights; they sum to 1
pub const DEFAULT_WEIGHTS: [(&str, f64); 4] = [
    (REVENUE_AGENT, 0.30),
    (RISK_AGENT, 0.25),
    (COST_AGENT, 0.25),
    (GROWTH_AGENT, 0.20),
];

pub fn initial_state() -> BTreeMap<String, f64> {
    FIELDS
        .iter()
        .map(|(field, value, _, _)| (field.to_string(), *value))
        .collect()
}

pub fn bounds() -> BoundsTable {
    FIELDS
        .iter()
        .fold(BoundsTable::new(), |table, (field, _, lo, hi)| {
            table.with_bound(*field, *lo, *hi)
        })
}

pub fn default_weights() -> BTreeMap<String, f64> {
    DEFAULT_WEIGHTS
        .iter()
        .map(|(producer, weight)| (producer.to_string(), *weight))
        .collect()
}

/// Preset initial values as a round-0 snapshot
pub fn initial_state_vector() -> StateVector {
    StateVector::from_values(initial_state())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_bounded() {
        let bounds = bounds();
        assert!(bounds.validate().is_ok());
        assert!(bounds.covers(initial_state().keys().map(String::as_str)).is_ok());
        assert_eq!(bounds.len(), 7);
    }

    #[test]
    fn test_initial_values_within_bounds() {
        let bounds = bounds();
        for (field, value) in initial_state() {
            assert!(bounds.get(&field).unwrap().contains(value), "{field}");
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let total: f64 = default_weights().values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
