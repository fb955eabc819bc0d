//! Complete run trace and read-only analytics over it

use super::round::RoundRecord;
use crate::state::StateVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label used when a run is not given one
pub const DEFAULT_SCENARIO: &str = "Default Scenario";

/// Everything a run produced
///
/// # Example
///
/// ```
/// use roundtable_domain::{RunTrace, StateVector};
///
/// let state = StateVector::from_values([("revenue", 100.0)]);
/// let trace = RunTrace::new("Baseline", state.clone(), state, Vec::new());
/// assert_eq!(trace.n_rounds(), 0);
/// assert_eq!(trace.field_change("revenue"), Some(0.0));
/// assert_eq!(trace.mean_confidence(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTrace {
    pub scenario: String,
    pub initial_state: StateVector,
    pub final_state: StateVector,
    pub rounds: Vec<RoundRecord>,
}

/// Per-round highlights for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub round: usize,
    pub top_producer: Option<String>,
    pub action: Option<String>,
    pub confidence: Option<f64>,
    pub consensus_confidence: f64,
    pub conflicts: usize,
    pub noise: f64,
}

/// How well a producer's proposals carried across the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerAlignment {
    pub producer: String,
    pub mean_confidence: f64,
    pub mean_vote_share: f64,
    /// `mean_confidence × mean_vote_share × producer count`; a producer that
    /// carries an equal share at full confidence scores about 1
    pub score: f64,
}

impl RunTrace {
    pub fn new(
        scenario: impl Into<String>,
        initial_state: StateVector,
        final_state: StateVector,
        rounds: Vec<RoundRecord>,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            initial_state,
            final_state,
            rounds,
        }
    }

    pub fn n_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// `final - initial` for a field
    pub fn field_change(&self, field: &str) -> Option<f64> {
        Some(self.final_state.get(field)? - self.initial_state.get(field)?)
    }

    /// Relative change of a field; 0 when the initial value is 0
    pub fn field_change_pct(&self, field: &str) -> Option<f64> {
        let initial = self.initial_state.get(field)?;
        let change = self.field_change(field)?;
        Some(if initial == 0.0 { 0.0 } else { change / initial })
    }

    /// Mean consensus confidence across rounds (0 for an empty run)
    pub fn mean_confidence(&self) -> f64 {
        if self.rounds.is_empty() {
            return 0.0;
        }
        self.rounds
            .iter()
            .map(|r| r.outcome.confidence_index)
            .sum::<f64>()
            / self.rounds.len() as f64
    }

    /// Initial value followed by the value after each round
    pub fn field_series(&self, field: &str) -> Vec<f64> {
        std::iter::once(&self.initial_state)
            .chain(self.rounds.iter().map(|r| &r.state_after))
            .filter_map(|s| s.get(field))
            .collect()
    }

    pub fn timeline(&self) -> Vec<TimelineEntry> {
        self.rounds
            .iter()
            .map(|r| {
                let top = r.outcome.top_proposal();
                TimelineEntry {
                    round: r.round,
                    top_producer: top.map(|p| p.producer().to_string()),
                    action: top.map(|p| p.action().to_string()),
                    confidence: top.map(|p| p.confidence()),
                    consensus_confidence: r.outcome.confidence_index,
                    conflicts: r.outcome.conflicts.len(),
                    noise: r.noise,
                }
            })
            .collect()
    }

    /// Alignment score per producer, sorted by producer
    pub fn producer_alignment(&self) -> Vec<ProducerAlignment> {
        let mut confidences: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        let mut shares: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

        for round in &self.rounds {
            for p in &round.outcome.proposals {
                confidences.entry(p.producer()).or_default().push(p.confidence());
            }
            for (producer, share) in &round.outcome.vote_shares {
                shares.entry(producer.as_str()).or_default().push(*share);
            }
        }

        let producer_count = confidences.len().max(1) as f64;
        confidences
            .iter()
            .map(|(producer, values)| {
                let mean_confidence = mean(values);
                let mean_vote_share = shares.get(producer).map_or(0.0, |v| mean(v));
                ProducerAlignment {
                    producer: producer.to_string(),
                    mean_confidence,
                    mean_vote_share,
                    score: mean_confidence * mean_vote_share * producer_count,
                }
            })
            .collect()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiation::{ConsensusResolver, NegotiationWeights, Proposal};

    fn record(round: usize, before: f64, after: f64, proposals: Vec<Proposal>) -> RoundRecord {
        let resolver = ConsensusResolver::with_weights(NegotiationWeights::default());
        RoundRecord {
            round,
            outcome: resolver.resolve(&proposals),
            proposals,
            state_before: StateVector::from_values([("revenue", before)]),
            state_after: StateVector::from_values([("revenue", after)]),
            noise: 0.0,
        }
    }

    fn proposal(producer: &str, confidence: f64) -> Proposal {
        Proposal::builder(producer, "grow")
            .delta("revenue", 0.1)
            .confidence(confidence)
            .build()
            .unwrap()
    }

    #[test]
    fn test_field_change_and_series() {
        let trace = RunTrace::new(
            DEFAULT_SCENARIO,
            StateVector::from_values([("revenue", 100.0)]),
            StateVector::from_values([("revenue", 121.0)]),
            vec![
                record(1, 100.0, 110.0, vec![proposal("A", 0.6)]),
                record(2, 110.0, 121.0, vec![proposal("A", 0.8)]),
            ],
        );

        assert_eq!(trace.field_change("revenue"), Some(21.0));
        assert!((trace.field_change_pct("revenue").unwrap() - 0.21).abs() < 1e-12);
        assert_eq!(trace.field_series("revenue"), vec![100.0, 110.0, 121.0]);
        assert_eq!(trace.field_change("missing"), None);
        assert!((trace.mean_confidence() - 0.7).abs() < 1e-12);
        assert_eq!(trace.rounds[0].field_change("revenue"), Some(10.0));
    }

    #[test]
    fn test_timeline_and_alignment() {
        let trace = RunTrace::new(
            DEFAULT_SCENARIO,
            StateVector::from_values([("revenue", 100.0)]),
            StateVector::from_values([("revenue", 110.0)]),
            vec![record(1, 100.0, 110.0, vec![proposal("A", 0.5), proposal("B", 0.5)])],
        );

        let timeline = trace.timeline();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].top_producer.as_deref(), Some("A"));
        assert_eq!(timeline[0].conflicts, 0);

        let alignment = trace.producer_alignment();
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment[0].producer, "A");
        assert!((alignment[0].mean_vote_share - 0.5).abs() < 1e-12);
        assert!((alignment[0].score - 0.5).abs() < 1e-12);
    }
}
