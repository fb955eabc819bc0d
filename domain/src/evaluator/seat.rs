//! Evaluator wrapper that records every proposal it makes

use super::traits::{Diagnostics, Evaluator};
use crate::core::error::DomainError;
use crate::negotiation::Proposal;
use crate::state::StateVector;

/// A registered evaluator plus its per-run proposal history
///
/// Only [`act`](Self::act) appends to the history and only
/// [`reset`](Self::reset) clears it.
pub struct EvaluatorSeat {
    evaluator: Box<dyn Evaluator>,
    history: Vec<Proposal>,
}

impl EvaluatorSeat {
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            evaluator,
            history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.evaluator.name()
    }

    pub fn evaluate(&self, state: &StateVector) -> Diagnostics {
        self.evaluator.evaluate(state)
    }

    pub fn propose(&self, state: &StateVector) -> Result<Proposal, DomainError> {
        self.evaluator.propose(state)
    }

    /// Propose and record the proposal
    ///
    /// A proposal signed by anyone but this seat's evaluator is rejected
    /// and not recorded.
    pub fn act(&mut self, state: &StateVector) -> Result<Proposal, DomainError> {
        let proposal = self.evaluator.propose(state)?;
        if proposal.producer() != self.name() {
            return Err(DomainError::ProducerMismatch {
                evaluator: self.name().to_string(),
                producer: proposal.producer().to_string(),
            });
        }
        self.history.push(proposal.clone());
        Ok(proposal)
    }

    /// Proposals recorded since the last reset, oldest first
    pub fn history(&self) -> &[Proposal] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

impl std::fmt::Debug for EvaluatorSeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatorSeat")
            .field("name", &self.name())
            .field("history_len", &self.history.len())
            .finish()
    }
}

impl<E: Evaluator + 'static> From<E> for EvaluatorSeat {
    fn from(evaluator: E) -> Self {
        Self::new(Box::new(evaluator))
    }
}
