//! Evaluator trait and the confidence squash every evaluator must use

use crate::core::error::DomainError;
use crate::negotiation::Proposal;
use crate::state::StateVector;
use std::collections::BTreeMap;

/// Named diagnostic scores produced by [`Evaluator::evaluate`]
pub type Diagnostics = BTreeMap<String, f64>;

/// Slope of the logistic squash around its 0.5 midpoint
pub const LOGISTIC_STEEPNESS: f64 = 6.0;

/// Map an unbounded raw score into `[0, 1]`
///
/// `1 / (1 + e^(-6 (raw - 0.5)))`. Evaluators must route their confidence
/// through this so any heuristic magnitude yields a valid proposal.
///
/// ```
/// use roundtable_domain::squash_confidence;
///
/// assert_eq!(squash_confidence(0.5), 0.5);
/// assert!(squash_confidence(1e9) <= 1.0);
/// assert!(squash_confidence(-1e9) >= 0.0);
/// ```
pub fn squash_confidence(raw: f64) -> f64 {
    1.0 / (1.0 + (-LOGISTIC_STEEPNESS * (raw - 0.5)).exp())
}

/// Independent advisor emitting one proposal per round
///
/// Both methods are pure functions of the snapshot. Producer identity is
/// [`name`](Self::name); it must be unique within a run.
pub trait Evaluator: Send + Sync {
    /// Producer identifier used in proposals and negotiation weights
    fn name(&self) -> &str;

    /// Score the state without side effects
    fn evaluate(&self, state: &StateVector) -> Diagnostics;

    /// Recommend deltas for the state
    ///
    /// The proposal's producer must equal [`name`](Self::name); a seat
    /// rejects anything else with [`DomainError::ProducerMismatch`]. Fails
    /// otherwise only when the produced proposal violates its construction
    /// contract.
    fn propose(&self, state: &StateVector) -> Result<Proposal, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squash_midpoint_and_monotonic() {
        assert_eq!(squash_confidence(0.5), 0.5);
        assert!(squash_confidence(0.9) > squash_confidence(0.7));
        assert!((squash_confidence(0.7) - 0.7685).abs() < 1e-4);
    }

    #[test]
    fn test_squash_saturates() {
        assert_eq!(squash_confidence(f64::INFINITY), 1.0);
        assert_eq!(squash_confidence(f64::NEG_INFINITY), 0.0);
        assert!((0.0..=1.0).contains(&squash_confidence(-250.0)));
    }
}
