//! Result of resolving one round of proposals

use super::conflict::ConflictRecord;
use super::proposal::Proposal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary used when a round receives no proposals
pub const NO_PROPOSALS_SUMMARY: &str = "No proposals received.";

/// Consensus produced by the [`ConsensusResolver`](super::ConsensusResolver)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    /// Weighted-average delta for every field proposed by at least one producer
    pub final_deltas: BTreeMap<String, f64>,
    /// Flagged producer pairs
    pub conflicts: Vec<ConflictRecord>,
    /// Weighted mean of proposal confidences (0 to 1)
    pub confidence_index: f64,
    /// Normalized effective weight per producer (reporting only)
    pub vote_shares: BTreeMap<String, f64>,
    /// Human-readable report
    pub summary: String,
    /// The proposals this outcome was computed from
    pub proposals: Vec<Proposal>,
}

impl ConsensusOutcome {
    /// Outcome for an empty batch: no deltas, zero confidence
    pub fn neutral() -> Self {
        Self {
            final_deltas: BTreeMap::new(),
            conflicts: Vec::new(),
            confidence_index: 0.0,
            vote_shares: BTreeMap::new(),
            summary: NO_PROPOSALS_SUMMARY.to_string(),
            proposals: Vec::new(),
        }
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Merged delta for a field, if any producer proposed it
    pub fn delta(&self, field: &str) -> Option<f64> {
        self.final_deltas.get(field).copied()
    }

    /// Vote share of a producer (0 when absent)
    pub fn vote_share(&self, producer: &str) -> f64 {
        self.vote_shares.get(producer).copied().unwrap_or(0.0)
    }

    /// Proposal with the highest raw confidence
    ///
    /// Ties go to the producer name that sorts first.
    pub fn top_proposal(&self) -> Option<&Proposal> {
        top_by_confidence(&self.proposals)
    }
}

pub(crate) fn top_by_confidence<'a>(
    proposals: impl IntoIterator<Item = &'a Proposal>,
) -> Option<&'a Proposal> {
    proposals.into_iter().fold(None, |best: Option<&Proposal>, p| match best {
        Some(b)
            if b.confidence() > p.confidence()
                || (b.confidence() == p.confidence() && b.producer() <= p.producer()) =>
        {
            Some(b)
        }
        _ => Some(p),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_outcome() {
        let outcome = ConsensusOutcome::neutral();
        assert!(outcome.final_deltas.is_empty());
        assert_eq!(outcome.confidence_index, 0.0);
        assert_eq!(outcome.summary, NO_PROPOSALS_SUMMARY);
        assert!(outcome.top_proposal().is_none());
        assert!(!outcome.has_conflicts());
    }

    #[test]
    fn test_top_proposal_tie_breaks_on_producer() {
        let b = Proposal::builder("B", "b").confidence(0.9).build().unwrap();
        let a = Proposal::builder("A", "a").confidence(0.9).build().unwrap();
        let c = Proposal::builder("C", "c").confidence(0.4).build().unwrap();

        let top = top_by_confidence([&b, &c, &a]).unwrap();
        assert_eq!(top.producer(), "A");
    }
}
