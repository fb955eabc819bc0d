//! Evaluator capability
//!
//! An [`Evaluator`] is a pure heuristic over a state snapshot. Concrete
//! evaluators live outside the domain; the orchestration loop only sees the
//! trait and wraps each one in an [`EvaluatorSeat`] that keeps its proposal
//! history for post-run audit.

pub mod seat;
pub mod traits;

pub use seat::EvaluatorSeat;
pub use traits::{Diagnostics, Evaluator, LOGISTIC_STEEPNESS, squash_confidence};
