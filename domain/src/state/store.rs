//! Mutable bounded state with an append-only snapshot log

use super::bounds::BoundsTable;
use super::vector::StateVector;
use crate::core::error::DomainError;
use std::collections::BTreeMap;

/// Owner of the live state
///
/// The store is the only mutable piece of a run. [`apply`](Self::apply) is
/// called once per round; every call appends the new snapshot to the
/// history. [`reset`](Self::reset) restores the construction-time values and
/// clears the history, which is how a run starts.
#[derive(Debug, Clone)]
pub struct StateStore {
    initial: BTreeMap<String, f64>,
    bounds: BoundsTable,
    current: StateVector,
    history: Vec<StateVector>,
}

impl StateStore {
    /// Create a store from initial values and their bounds
    ///
    /// Fails when a field has no bound or a bound is malformed. Initial values
    /// outside their bound are clamped.
    pub fn new(initial: BTreeMap<String, f64>, bounds: BoundsTable) -> Result<Self, DomainError> {
        bounds.validate()?;
        bounds.covers(initial.keys().map(String::as_str))?;

        let current = StateVector::new(Self::clamp_all(&initial, &bounds), 0);
        Ok(Self {
            initial,
            bounds,
            current,
            history: Vec::new(),
        })
    }

    /// Current state; equal across calls until the next `apply`
    pub fn snapshot(&self) -> StateVector {
        self.current.clone()
    }

    /// Apply relative deltas plus signed noise and advance one round
    ///
    /// `new = old * (1 + delta + sign(delta) * noise)`, where the sign is
    /// positive only for a strictly positive delta. Missing fields take a
    /// delta of 0, unknown keys are ignored, and results clamp to the bound.
    pub fn apply(&mut self, deltas: &BTreeMap<String, f64>, noise: f64) -> StateVector {
        let values = self
            .current
            .fields()
            .map(|(field, old)| {
                let delta = deltas.get(field).copied().unwrap_or(0.0);
                let signed_noise = if delta > 0.0 { noise } else { -noise };
                let raw = old * (1.0 + delta + signed_noise);
                let value = match self.bounds.get(field) {
                    Some(b) => b.clamp(raw),
                    None => raw,
                };
                (field.to_string(), value)
            })
            .collect();

        self.current = StateVector::new(values, self.current.round() + 1);
        self.history.push(self.current.clone());
        self.current.clone()
    }

    /// Snapshots produced by `apply` since the last reset, oldest first
    pub fn history(&self) -> &[StateVector] {
        &self.history
    }

    /// Restore construction-time values (merged with `overrides`), round 0,
    /// empty history
    ///
    /// Overrides do not replace the stored initial values; the next plain
    /// reset goes back to them.
    pub fn reset(&mut self, overrides: Option<&BTreeMap<String, f64>>) -> Result<(), DomainError> {
        let mut values = self.initial.clone();
        if let Some(overrides) = overrides {
            self.bounds.covers(overrides.keys().map(String::as_str))?;
            values.extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
        }

        self.current = StateVector::new(Self::clamp_all(&values, &self.bounds), 0);
        self.history.clear();
        Ok(())
    }

    pub fn bounds(&self) -> &BoundsTable {
        &self.bounds
    }

    /// Number of rounds applied since the last reset
    pub fn round(&self) -> u64 {
        self.current.round()
    }

    fn clamp_all(values: &BTreeMap<String, f64>, bounds: &BoundsTable) -> BTreeMap<String, f64> {
        values
            .iter()
            .map(|(field, v)| {
                let clamped = bounds.get(field).map_or(*v, |b| b.clamp(*v));
                (field.clone(), clamped)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store_with(values: &[(&str, f64, f64, f64)]) -> StateStore {
        let initial = values.iter().map(|(k, v, _, _)| (k.to_string(), *v)).collect();
        let bounds = values
            .iter()
            .fold(BoundsTable::new(), |t, (k, _, lo, hi)| t.with_bound(*k, *lo, *hi));
        StateStore::new(initial, bounds).unwrap()
    }

    fn deltas(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_missing_bound_rejected() {
        let initial = deltas(&[("revenue", 100.0), ("cost", 50.0)]);
        let bounds = BoundsTable::new().with_bound("revenue", 1.0, 1e9);

        let err = StateStore::new(initial, bounds).unwrap_err();
        assert_eq!(err, DomainError::MissingBound("cost".to_string()));
    }

    #[test]
    fn test_snapshot_is_stable() {
        let store = store_with(&[("revenue", 100.0, 1.0, 1e9)]);
        assert_eq!(store.snapshot(), store.snapshot());
    }

    #[test]
    fn test_apply_relative_delta() {
        let mut store = store_with(&[("revenue", 100.0, 1.0, 1e9), ("cost", 50.0, 1.0, 1e9)]);
        let after = store.apply(&deltas(&[("revenue", 0.1)]), 0.0);

        assert!((after.get("revenue").unwrap() - 110.0).abs() < 1e-9);
        assert_eq!(after.get("cost"), Some(50.0));
        assert_eq!(after.round(), 1);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_apply_clamps_to_lower_bound() {
        let mut store = store_with(&[("revenue", 100.0, 1.0, 1e9)]);
        let after = store.apply(&deltas(&[("revenue", -2.0)]), 0.0);
        assert_eq!(after.get("revenue"), Some(1.0));
    }

    #[test]
    fn test_noise_sign_follows_delta() {
        let mut store = store_with(&[
            ("up", 100.0, 0.0, 1e9),
            ("down", 100.0, 0.0, 1e9),
            ("flat", 100.0, 0.0, 1e9),
        ]);
        let after = store.apply(&deltas(&[("up", 0.1), ("down", -0.1)]), 0.05);

        assert!((after.get("up").unwrap() - 115.0).abs() < 1e-9);
        assert!((after.get("down").unwrap() - 85.0).abs() < 1e-9);
        // Zero delta takes the negative sign
        assert!((after.get("flat").unwrap() - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_delta_keys_ignored() {
        let mut store = store_with(&[("revenue", 100.0, 1.0, 1e9)]);
        let after = store.apply(&deltas(&[("headcount", 0.5)]), 0.0);

        assert_eq!(after.len(), 1);
        assert_eq!(after.get("headcount"), None);
        assert_eq!(after.get("revenue"), Some(100.0));
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut store = store_with(&[("revenue", 100.0, 1.0, 1e9)]);
        let initial = store.snapshot();
        store.apply(&deltas(&[("revenue", 0.2)]), 0.0);
        store.apply(&deltas(&[("revenue", 0.2)]), 0.0);

        store.reset(None).unwrap();
        assert_eq!(store.snapshot(), initial);
        assert_eq!(store.round(), 0);
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_reset_with_override() {
        let mut store = store_with(&[("revenue", 100.0, 1.0, 1e9)]);
        store.reset(Some(&deltas(&[("revenue", 500.0)]))).unwrap();
        assert_eq!(store.snapshot().get("revenue"), Some(500.0));

        store.reset(None).unwrap();
        assert_eq!(store.snapshot().get("revenue"), Some(100.0));

        let err = store.reset(Some(&deltas(&[("cost", 1.0)]))).unwrap_err();
        assert_eq!(err, DomainError::MissingBound("cost".to_string()));
    }

    #[test]
    fn test_initial_values_clamped() {
        let store = store_with(&[("risk", 1.7, 0.0, 1.0)]);
        assert_eq!(store.snapshot().get("risk"), Some(1.0));
    }

    proptest! {
        #[test]
        fn prop_apply_stays_in_bounds(
            start in 0.0f64..1.0,
            delta in -5.0f64..5.0,
            noise in -1.0f64..1.0,
            rounds in 1usize..8,
        ) {
            let mut store = store_with(&[("risk", start, 0.0, 1.0), ("revenue", 100.0, 1.0, 1e9)]);
            let d = deltas(&[("risk", delta), ("revenue", delta)]);
            for _ in 0..rounds {
                let after = store.apply(&d, noise);
                let risk = after.get("risk").unwrap();
                let revenue = after.get("revenue").unwrap();
                prop_assert!((0.0..=1.0).contains(&risk));
                prop_assert!((1.0..=1e9).contains(&revenue));
            }
            prop_assert_eq!(store.history().len(), rounds);
        }
    }
}
