//! Producer proposals

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default urgency rank for a proposal (1 = highest)
pub const DEFAULT_PRIORITY: u32 = 1;

/// One producer's recommendation for a single round
///
/// A proposal is validated when it is built and is immutable afterwards.
/// Confidence outside `[0, 1]` (including NaN) is rejected, as is any
/// non-finite delta.
///
/// # Example
///
/// ```
/// use roundtable_domain::Proposal;
///
/// let proposal = Proposal::builder("RiskAgent", "Hold steady")
///     .delta("risk_score", -0.02)
///     .delta("cost", 0.01)
///     .confidence(0.71)
///     .rationale("Moderate risk; minor mitigation")
///     .build()
///     .unwrap();
/// assert_eq!(proposal.delta("cost"), Some(0.01));
///
/// assert!(Proposal::builder("RiskAgent", "Too sure").confidence(1.2).build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProposal")]
pub struct Proposal {
    producer: String,
    action: String,
    deltas: BTreeMap<String, f64>,
    confidence: f64,
    rationale: String,
    priority: u32,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl Proposal {
    /// Start building a proposal
    pub fn builder(producer: impl Into<String>, action: impl Into<String>) -> ProposalBuilder {
        ProposalBuilder::new(producer, action)
    }

    /// Build a proposal with default rationale, priority and metadata
    pub fn new(
        producer: impl Into<String>,
        action: impl Into<String>,
        deltas: BTreeMap<String, f64>,
        confidence: f64,
    ) -> Result<Self, DomainError> {
        Self::builder(producer, action)
            .deltas(deltas)
            .confidence(confidence)
            .build()
    }

    pub fn producer(&self) -> &str {
        &self.producer
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn deltas(&self) -> &BTreeMap<String, f64> {
        &self.deltas
    }

    /// Proposed fractional change for a field
    pub fn delta(&self, field: &str) -> Option<f64> {
        self.deltas.get(field).copied()
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }
}

/// Builder for [`Proposal`]; validation happens in [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct ProposalBuilder {
    producer: String,
    action: String,
    deltas: BTreeMap<String, f64>,
    confidence: f64,
    rationale: String,
    priority: u32,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl ProposalBuilder {
    fn new(producer: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            producer: producer.into(),
            action: action.into(),
            deltas: BTreeMap::new(),
            confidence: 0.0,
            rationale: String::new(),
            priority: DEFAULT_PRIORITY,
            metadata: BTreeMap::new(),
        }
    }

    /// Set one field delta (replaces an earlier value for the same field)
    pub fn delta(mut self, field: impl Into<String>, value: f64) -> Self {
        self.deltas.insert(field.into(), value);
        self
    }

    /// Replace all deltas
    pub fn deltas(mut self, deltas: BTreeMap<String, f64>) -> Self {
        self.deltas = deltas;
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Result<Proposal, DomainError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(DomainError::InvalidConfidence(self.confidence));
        }
        if let Some((field, value)) = self.deltas.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DomainError::InvalidDelta {
                field: field.clone(),
                value: *value,
            });
        }

        Ok(Proposal {
            producer: self.producer,
            action: self.action,
            deltas: self.deltas,
            confidence: self.confidence,
            rationale: self.rationale,
            priority: self.priority,
            metadata: self.metadata,
        })
    }
}

/// Unvalidated wire shape; deserialization goes through the builder
#[derive(Deserialize)]
struct RawProposal {
    producer: String,
    action: String,
    #[serde(default)]
    deltas: BTreeMap<String, f64>,
    confidence: f64,
    #[serde(default)]
    rationale: String,
    #[serde(default = "default_priority")]
    priority: u32,
    #[serde(default)]
    metadata: BTreeMap<String, serde_json::Value>,
}

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

impl TryFrom<RawProposal> for Proposal {
    type Error = DomainError;

    fn try_from(raw: RawProposal) -> Result<Self, Self::Error> {
        let mut builder = Proposal::builder(raw.producer, raw.action)
            .deltas(raw.deltas)
            .confidence(raw.confidence)
            .rationale(raw.rationale)
            .priority(raw.priority);
        for (key, value) in raw.metadata {
            builder = builder.metadata(key, value);
        }
        builder.build()
    }
}
