//! Immutable state snapshot

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of every state field at a round boundary
///
/// Snapshots are never mutated; the [`StateStore`](super::StateStore)
/// produces a fresh one each round.
///
/// # Example
///
/// ```
/// use roundtable_domain::StateVector;
///
/// let state = StateVector::from_values([("revenue", 100.0), ("cost", 60.0)]);
/// assert_eq!(state.get("revenue"), Some(100.0));
/// assert_eq!(state.ratio("cost", "revenue", 1.0), 0.6);
/// assert_eq!(state.round(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    values: BTreeMap<String, f64>,
    round: u64,
}

impl StateVector {
    /// Build a round-0 snapshot from field values
    pub fn from_values<K: Into<String>>(values: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self::new(
            values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            0,
        )
    }

    pub(crate) fn new(values: BTreeMap<String, f64>, round: u64) -> Self {
        Self { values, round }
    }

    /// Value of a field, if the state has it
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    /// Value of a field, or `default` when absent
    pub fn get_or(&self, field: &str, default: f64) -> f64 {
        self.get(field).unwrap_or(default)
    }

    /// Number of completed rounds when this snapshot was taken
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Fields in key order
    pub fn fields(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn values(&self) -> &BTreeMap<String, f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `numerator / denominator`, or `sentinel` when the denominator is zero
    /// or either field is missing
    pub fn ratio(&self, numerator: &str, denominator: &str, sentinel: f64) -> f64 {
        match (self.get(numerator), self.get(denominator)) {
            (Some(n), Some(d)) if d != 0.0 => n / d,
            _ => sentinel,
        }
    }
}
