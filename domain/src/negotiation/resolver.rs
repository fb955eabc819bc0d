//! Weighted-vote consensus resolver
//!
//! Pipeline for one batch of proposals:
//!
//! 1. Detect conflicting producer pairs
//! 2. Penalise every producer that appears in a flagged pair
//! 3. Effective weight = base weight × confidence × penalty
//! 4. Merge each field as the weighted average over the producers that
//!    proposed it
//! 5. Confidence index = effective-weight mean of confidences
//! 6. Vote share = effective weight / total effective weight
//!
//! Aggregation is keyed by producer and field, and contributions are summed
//! in producer order, so the outcome does not depend on the order in which
//! proposals arrive.

use super::conflict::{ConflictRecord, DEFAULT_CONFLICT_THRESHOLD, detect_conflicts};
use super::outcome::{ConsensusOutcome, top_by_confidence};
use super::proposal::Proposal;
use super::weights::NegotiationWeights;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default weight multiplier for producers involved in a flagged conflict
pub const DEFAULT_CONFLICT_PENALTY: f64 = 0.8;

/// Tunables for [`ConsensusResolver`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Severity at or above which a pair is flagged
    pub conflict_threshold: f64,
    /// Multiplier applied to a flagged producer's weight
    pub conflict_penalty: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            conflict_threshold: DEFAULT_CONFLICT_THRESHOLD,
            conflict_penalty: DEFAULT_CONFLICT_PENALTY,
        }
    }
}

impl ResolverConfig {
    pub fn with_conflict_threshold(mut self, threshold: f64) -> Self {
        self.conflict_threshold = threshold;
        self
    }

    pub fn with_conflict_penalty(mut self, penalty: f64) -> Self {
        self.conflict_penalty = penalty;
        self
    }

    /// Both settings must lie in `(0, 1]`
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("conflict_threshold", self.conflict_threshold),
            ("conflict_penalty", self.conflict_penalty),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(DomainError::InvalidResolverSetting { name, value });
            }
        }
        Ok(())
    }
}

/// Merges a round's proposals into one [`ConsensusOutcome`]
#[derive(Debug, Clone)]
pub struct ConsensusResolver {
    weights: NegotiationWeights,
    config: ResolverConfig,
}

impl ConsensusResolver {
    pub fn new(weights: NegotiationWeights, config: ResolverConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self { weights, config })
    }

    /// Resolver with default threshold and penalty
    pub fn with_weights(weights: NegotiationWeights) -> Self {
        Self {
            weights,
            config: ResolverConfig::default(),
        }
    }

    pub fn weights(&self) -> &NegotiationWeights {
        &self.weights
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a batch of proposals
    pub fn resolve(&self, proposals: &[Proposal]) -> ConsensusOutcome {
        if proposals.is_empty() {
            return ConsensusOutcome::neutral();
        }

        let conflicts = detect_conflicts(proposals, self.config.conflict_threshold);

        let mut ordered: Vec<&Proposal> = proposals.iter().collect();
        ordered.sort_by(|a, b| a.producer().cmp(b.producer()));

        let effective: Vec<f64> = ordered
            .iter()
            .map(|p| self.effective_weight(p, &conflicts))
            .collect();

        let total: f64 = effective.iter().sum();
        let denominator = if total == 0.0 { 1.0 } else { total };

        let final_deltas = Self::merge(&ordered, &effective);

        let confidence_index = ordered
            .iter()
            .zip(&effective)
            .map(|(p, w)| w * p.confidence())
            .sum::<f64>()
            / denominator;

        let mut vote_shares: BTreeMap<String, f64> = BTreeMap::new();
        for (p, w) in ordered.iter().zip(&effective) {
            *vote_shares.entry(p.producer().to_string()).or_insert(0.0) += w / denominator;
        }

        let summary = Self::build_summary(&ordered, &conflicts, confidence_index);

        ConsensusOutcome {
            final_deltas,
            conflicts,
            confidence_index,
            vote_shares,
            summary,
            proposals: proposals.to_vec(),
        }
    }

    fn effective_weight(&self, proposal: &Proposal, conflicts: &[ConflictRecord]) -> f64 {
        let base = self.weights.weight_of(proposal.producer());
        let penalty = if conflicts.iter().any(|c| c.involves(proposal.producer())) {
            self.config.conflict_penalty
        } else {
            1.0
        };
        base * proposal.confidence() * penalty
    }

    fn merge(ordered: &[&Proposal], effective: &[f64]) -> BTreeMap<String, f64> {
        let fields: BTreeSet<&str> = ordered
            .iter()
            .flat_map(|p| p.deltas().keys().map(String::as_str))
            .collect();

        let mut merged = BTreeMap::new();
        for field in fields {
            let mut weighted_sum = 0.0;
            let mut weight_sum = 0.0;
            for (p, w) in ordered.iter().zip(effective) {
                if let Some(delta) = p.delta(field) {
                    weighted_sum += delta * w;
                    weight_sum += w;
                }
            }
            // Every proposer of this field has zero effective weight
            if weight_sum > 0.0 {
                merged.insert(field.to_string(), weighted_sum / weight_sum);
            }
        }
        merged
    }

    fn build_summary(
        ordered: &[&Proposal],
        conflicts: &[ConflictRecord],
        confidence_index: f64,
    ) -> String {
        let mut lines = vec![
            format!(
                "Consensus reached with confidence {:.1}%.",
                confidence_index * 100.0
            ),
            format!(
                "{} producers participated; {} conflict(s) detected.",
                ordered.len(),
                conflicts.len()
            ),
        ];

        for c in conflicts {
            lines.push(format!(
                "  Conflict [{} ↔ {}] on {} (severity {:.0}%).",
                c.producer_a,
                c.producer_b,
                c.fields.join(", "),
                c.severity * 100.0
            ));
        }

        if let Some(top) = top_by_confidence(ordered.iter().copied()) {
            lines.push(format!(
                "Highest-confidence producer: {} ({:.1}%) - {}.",
                top.producer(),
                top.confidence() * 100.0,
                top.action()
            ));
        }

        lines.join("\n")
    }
}
