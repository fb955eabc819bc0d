//! Base negotiation weights per producer

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight used for a producer that has no entry in the table
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Validated producer → base weight table
///
/// Every weight is finite and strictly positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct NegotiationWeights {
    weights: BTreeMap<String, f64>,
}

impl NegotiationWeights {
    pub fn new(weights: BTreeMap<String, f64>) -> Result<Self, DomainError> {
        if let Some((producer, weight)) = weights
            .iter()
            .find(|(_, w)| !(w.is_finite() && **w > 0.0))
        {
            return Err(DomainError::NonPositiveWeight {
                producer: producer.clone(),
                weight: *weight,
            });
        }
        Ok(Self { weights })
    }

    /// Build from `(producer, weight)` pairs
    pub fn from_pairs<K: Into<String>>(
        pairs: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Self, DomainError> {
        Self::new(pairs.into_iter().map(|(k, w)| (k.into(), w)).collect())
    }

    /// Base weight of a producer, [`DEFAULT_WEIGHT`] when unlisted
    pub fn weight_of(&self, producer: &str) -> f64 {
        self.weights.get(producer).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn contains(&self, producer: &str) -> bool {
        self.weights.contains_key(producer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for NegotiationWeights {
    type Error = DomainError;

    fn try_from(weights: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<NegotiationWeights> for BTreeMap<String, f64> {
    fn from(weights: NegotiationWeights) -> Self {
        weights.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlisted_producer_gets_default() {
        let weights = NegotiationWeights::from_pairs([("RevenueAgent", 0.3)]).unwrap();
        assert_eq!(weights.weight_of("RevenueAgent"), 0.3);
        assert_eq!(weights.weight_of("Unknown"), DEFAULT_WEIGHT);
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let err = NegotiationWeights::from_pairs([("a", 0.5), ("b", 0.0)]).unwrap_err();
        assert_eq!(
            err,
            DomainError::NonPositiveWeight {
                producer: "b".to_string(),
                weight: 0.0,
            }
        );

        assert!(NegotiationWeights::from_pairs([("a", -1.0)]).is_err());
        assert!(NegotiationWeights::from_pairs([("a", f64::NAN)]).is_err());
        assert!(NegotiationWeights::from_pairs([("a", f64::INFINITY)]).is_err());
    }
}
