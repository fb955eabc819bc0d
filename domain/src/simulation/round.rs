//! Record of one propose → resolve → perturb → apply cycle

use crate::negotiation::{ConsensusOutcome, Proposal};
use crate::state::StateVector;
use serde::{Deserialize, Serialize};

/// Audit record of a single round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round index
    pub round: usize,
    /// Proposals in evaluator registration order
    pub proposals: Vec<Proposal>,
    pub outcome: ConsensusOutcome,
    pub state_before: StateVector,
    pub state_after: StateVector,
    /// Noise magnitude passed to the state store (0 when not stochastic)
    pub noise: f64,
}

impl RoundRecord {
    /// Change of a field across this round
    pub fn field_change(&self, field: &str) -> Option<f64> {
        Some(self.state_after.get(field)? - self.state_before.get(field)?)
    }
}
