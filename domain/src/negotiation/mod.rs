//! Proposal negotiation
//!
//! Producers submit [`Proposal`]s; the [`ConsensusResolver`] detects
//! conflicting pairs, weights every producer and merges the deltas into a
//! single [`ConsensusOutcome`].
//!
//! ```text
//! Proposals ──▶ conflict scan ──▶ effective weights ──▶ weighted merge
//!                    │                                      │
//!                    └──────── ConflictRecord[] ────────────┴──▶ ConsensusOutcome
//! ```

pub mod conflict;
pub mod outcome;
pub mod proposal;
pub mod resolver;
pub mod weights;

pub use conflict::{ConflictRecord, DEFAULT_CONFLICT_THRESHOLD, detect_conflicts};
pub use outcome::{ConsensusOutcome, NO_PROPOSALS_SUMMARY};
pub use proposal::{DEFAULT_PRIORITY, Proposal, ProposalBuilder};
pub use resolver::{ConsensusResolver, DEFAULT_CONFLICT_PENALTY, ResolverConfig};
pub use weights::{DEFAULT_WEIGHT, NegotiationWeights};
