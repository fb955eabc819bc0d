//! Domain layer for roundtable
//!
//! This crate contains the bounded state model, proposals, and the weighted
//! consensus resolver. It has no dependencies on infrastructure or
//! presentation concerns, performs no I/O and does not log.
//!
//! # Core Concepts
//!
//! ## State
//!
//! A set of named numeric fields, each held inside a configured `[lo, hi]`
//! bound by the [`StateStore`]. Snapshots ([`StateVector`]) are immutable.
//!
//! ## Negotiation
//!
//! Every round, each [`Evaluator`] submits a [`Proposal`] of fractional
//! deltas. The [`ConsensusResolver`] merges them by weighted vote into a
//! [`ConsensusOutcome`], penalising producers that disagree.
//!
//! ## Trace
//!
//! A run is recorded as a [`RunTrace`] of [`RoundRecord`]s.
//!
//! The domain never names a concrete field: it operates over whatever keys
//! the state and the proposals use.

pub mod core;
pub mod evaluator;
pub mod negotiation;
pub mod simulation;
pub mod state;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use evaluator::{Diagnostics, Evaluator, EvaluatorSeat, LOGISTIC_STEEPNESS, squash_confidence};
pub use negotiation::{
    ConflictRecord, ConsensusOutcome, ConsensusResolver, DEFAULT_CONFLICT_PENALTY,
    DEFAULT_CONFLICT_THRESHOLD, DEFAULT_WEIGHT, NegotiationWeights, Proposal, ProposalBuilder,
    ResolverConfig, detect_conflicts,
};
pub use simulation::{DEFAULT_SCENARIO, ProducerAlignment, RoundRecord, RunTrace, TimelineEntry};
pub use state::{BoundsTable, FieldBounds, StateStore, StateVector};
