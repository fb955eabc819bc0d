//! Default evaluator set
//!
//! Four business heuristics implementing [`Evaluator`]. Each one reads a few
//! fields of the business preset (see [`crate::preset`]) and treats a missing
//! field as 0.
//!
//! | Evaluator | Weight | Priority |
//! |-----------|--------|----------|
//! | [`RevenueEvaluator`] | 0.30 | 1 |
//! | [`RiskEvaluator`] | 0.25 | 1 or 2 |
//! | [`CostEvaluator`] | 0.25 | 2 |
//! | [`GrowthEvaluator`] | 0.20 | 3 |

mod cost;
mod growth;
mod revenue;
mod risk;

pub use cost::CostEvaluator;
pub use growth::GrowthEvaluator;
pub use revenue::RevenueEvaluator;
pub use risk::RiskEvaluator;

use roundtable_domain::{DomainError, Evaluator, Proposal, StateVector, squash_confidence};
use std::collections::BTreeMap;

pub const REVENUE_AGENT: &str = "RevenueAgent";
pub const RISK_AGENT: &str = "RiskAgent";
pub const COST_AGENT: &str = "CostAgent";
pub const GROWTH_AGENT: &str = "GrowthAgent";

/// Names of the default evaluators in registration order
pub const DEFAULT_EVALUATORS: [&str; 4] = [REVENUE_AGENT, RISK_AGENT, COST_AGENT, GROWTH_AGENT];

/// All four default evaluators in registration order
pub fn default_evaluators() -> Vec<Box<dyn Evaluator>> {
    DEFAULT_EVALUATORS
        .iter()
        .filter_map(|name| evaluator_by_name(name))
        .collect()
}

/// Look up a default evaluator by producer name
pub fn evaluator_by_name(name: &str) -> Option<Box<dyn Evaluator>> {
    match name {
        REVENUE_AGENT => Some(Box::new(RevenueEvaluator)),
        RISK_AGENT => Some(Box::new(RiskEvaluator)),
        COST_AGENT => Some(Box::new(CostEvaluator)),
        GROWTH_AGENT => Some(Box::new(GrowthEvaluator)),
        _ => None,
    }
}

/// Reasons, deltas and raw confidence gathered by one heuristic pass
#[derive(Debug, Default)]
struct Assessment {
    deltas: BTreeMap<String, f64>,
    reasons: Vec<String>,
}

impl Assessment {
    fn set(&mut self, field: &str, value: f64) {
        self.deltas.insert(field.to_string(), value);
    }

    fn add(&mut self, field: &str, value: f64) {
        *self.deltas.entry(field.to_string()).or_insert(0.0) += value;
    }

    fn reason(&mut self, text: String) {
        self.reasons.push(text);
    }

    /// Text of the first reason up to its first `;`
    fn headline(&self) -> String {
        self.reasons
            .first()
            .and_then(|r| r.split(';').next())
            .unwrap_or_default()
            .to_string()
    }

    fn into_proposal(
        self,
        producer: &str,
        action: String,
        raw_confidence: f64,
        priority: u32,
    ) -> Result<Proposal, DomainError> {
        Proposal::builder(producer, action)
            .deltas(self.deltas)
            .confidence(rounded_confidence(raw_confidence))
            .rationale(self.reasons.join(" | "))
            .priority(priority)
            .build()
    }
}

/// Logistic squash rounded to 4 decimals
fn rounded_confidence(raw: f64) -> f64 {
    (squash_confidence(raw) * 10_000.0).round() / 10_000.0
}

fn field(state: &StateVector, name: &str) -> f64 {
    state.get_or(name, 0.0)
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset;

    #[test]
    fn test_default_evaluators_order() {
        let names: Vec<String> = default_evaluators()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, DEFAULT_EVALUATORS);
    }

    #[test]
    fn test_evaluator_by_name_unknown() {
        assert!(evaluator_by_name("MarketingAgent").is_none());
        assert_eq!(evaluator_by_name(COST_AGENT).unwrap().name(), COST_AGENT);
    }

    #[test]
    fn test_rounded_confidence() {
        assert_eq!(rounded_confidence(0.7), 0.7685);
        assert_eq!(rounded_confidence(0.5), 0.5);
    }

    #[test]
    fn test_headline_cuts_at_semicolon() {
        let mut a = Assessment::default();
        a.reason("First part; second part.".to_string());
        a.reason("Other".to_string());
        assert_eq!(a.headline(), "First part");
    }

    #[test]
    fn test_preset_proposals_are_valid() {
        let state = preset::initial_state_vector();
        for evaluator in default_evaluators() {
            let proposal = evaluator.propose(&state).unwrap();
            assert_eq!(proposal.producer(), evaluator.name());
            assert!(!proposal.deltas().is_empty());
            assert!(!proposal.rationale().is_empty());
        }
    }
}
