//! Per-field value bounds

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed interval a state field must stay within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub lo: f64,
    pub hi: f64,
}

impl FieldBounds {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Clamp a value into `[lo, hi]`
    ///
    /// A NaN input collapses to `lo`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.lo).min(self.hi)
    }

    /// Check if a value lies inside the bound
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }

    fn is_valid(&self) -> bool {
        !self.lo.is_nan() && !self.hi.is_nan() && self.lo <= self.hi
    }
}

/// Bounds for every field of the state, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundsTable {
    bounds: BTreeMap<String, FieldBounds>,
}

impl BoundsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bound (builder style)
    pub fn with_bound(mut self, field: impl Into<String>, lo: f64, hi: f64) -> Self {
        self.insert(field, FieldBounds::new(lo, hi));
        self
    }

    /// Insert or replace the bound for a field
    pub fn insert(&mut self, field: impl Into<String>, bounds: FieldBounds) {
        self.bounds.insert(field.into(), bounds);
    }

    pub fn get(&self, field: &str) -> Option<&FieldBounds> {
        self.bounds.get(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.bounds.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldBounds)> {
        self.bounds.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reject bounds with `lo > hi` or NaN endpoints
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.bounds.iter().find(|(_, b)| !b.is_valid()) {
            Some((field, b)) => Err(DomainError::InvalidBound {
                field: field.clone(),
                lo: b.lo,
                hi: b.hi,
            }),
            None => Ok(()),
        }
    }

    /// Check that every given field has a bound
    pub fn covers<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Result<(), DomainError> {
        for field in fields {
            if !self.contains_field(field) {
                return Err(DomainError::MissingBound(field.to_string()));
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, FieldBounds)> for BoundsTable {
    fn from_iter<I: IntoIterator<Item = (String, FieldBounds)>>(iter: I) -> Self {
        Self {
            bounds: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        let b = FieldBounds::new(1.0, 1e9);
        assert_eq!(b.clamp(-100.0), 1.0);
        assert_eq!(b.clamp(2e9), 1e9);
        assert_eq!(b.clamp(50.0), 50.0);
        assert_eq!(b.clamp(f64::NAN), 1.0);
    }

    #[test]
    fn test_validate_rejects_inverted_bound() {
        let table = BoundsTable::new()
            .with_bound("risk", 0.0, 1.0)
            .with_bound("churn", 1.0, 0.0);

        assert_eq!(
            table.validate(),
            Err(DomainError::InvalidBound {
                field: "churn".to_string(),
                lo: 1.0,
                hi: 0.0,
            })
        );
    }

    #[test]
    fn test_covers_reports_missing_field() {
        let table = BoundsTable::new().with_bound("revenue", 1.0, 1e9);

        assert!(table.covers(["revenue"]).is_ok());
        assert_eq!(
            table.covers(["revenue", "cost"]),
            Err(DomainError::MissingBound("cost".to_string()))
        );
    }
}
