//! Cost ratio heuristic

use super::{Assessment, COST_AGENT, field, pct};
use roundtable_domain::{Diagnostics, DomainError, Evaluator, Proposal, StateVector};

pub const TARGET_COST_RATIO: f64 = 0.55;
pub const CRITICAL_COST_RATIO: f64 = 0.80;
/// Below this ratio further cuts start to hurt quality
pub const MIN_COST_RATIO: f64 = 0.40;

/// Keeps cost / revenue near its target ratio
#[derive(Debug, Clone, Copy, Default)]
pub struct CostEvaluator;

impl Evaluator for CostEvaluator {
    fn name(&self) -> &str {
        COST_AGENT
    }

    fn evaluate(&self, state: &StateVector) -> Diagnostics {
        let revenue = field(state, "revenue");
        let cost_ratio = if revenue > 0.0 {
            field(state, "cost") / revenue
        } else {
            1.0
        };

        Diagnostics::from([
            ("cost_ratio".to_string(), cost_ratio),
            ("margin".to_string(), 1.0 - cost_ratio),
            ("cost_gap".to_string(), cost_ratio - TARGET_COST_RATIO),
        ])
    }

    fn propose(&self, state: &StateVector) -> Result<Proposal, DomainError> {
        let diagnostics = self.evaluate(state);
        let cost_ratio = diagnostics["cost_ratio"];
        let cost_gap = diagnostics["cost_gap"];

        let mut assessment = Assessment::default();
        let raw;

        if cost_ratio >= CRITICAL_COST_RATIO {
            let reduction = (cost_gap * 0.70).min(0.15);
            assessment.set("cost", -reduction);
            assessment.set("marketing_budget", -0.05);
            assessment.set("risk_score", 0.03);
            assessment.reason(format!(
                "Critical cost ratio {cost_ratio:.2}; aggressive reduction targeted (cost ↓{}).",
                pct(reduction)
            ));
            raw = 0.88;
        } else if cost_gap > 0.0 {
            let reduction = (cost_gap * 0.50).min(0.08);
            assessment.set("cost", -reduction);
            assessment.set("marketing_budget", -0.02);
            assessment.reason(format!(
                "Cost ratio {cost_ratio:.2} above target {TARGET_COST_RATIO}; moderate reduction (cost ↓{}).",
                pct(reduction)
            ));
            raw = 0.75;
        } else if cost_ratio < MIN_COST_RATIO {
            assessment.set("cost", 0.03);
            assessment.set("revenue", 0.02);
            assessment.set("risk_score", -0.02);
            assessment.reason(format!(
                "Cost ratio {cost_ratio:.2} below minimum; reinvesting to sustain quality and reduce operational risk."
            ));
            raw = 0.68;
        } else {
            assessment.set("cost", -0.01);
            assessment.set("revenue", 0.01);
            assessment.reason(format!(
                "Cost ratio {cost_ratio:.2} near target; maintaining steady-state efficiency."
            ));
            raw = 0.70;
        }

        let action = assessment.headline();
        assessment.into_proposal(COST_AGENT, action, raw, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(revenue: f64, cost: f64) -> StateVector {
        StateVector::from_values([("revenue", revenue), ("cost", cost)])
    }

    #[test]
    fn test_zero_revenue_sentinel() {
        let d = CostEvaluator.evaluate(&state(0.0, 50.0));
        assert_eq!(d["cost_ratio"], 1.0);
        assert_eq!(d["margin"], 0.0);
    }

    #[test]
    fn test_critical_ratio_caps_reduction() {
        let p = CostEvaluator.propose(&state(100.0, 95.0)).unwrap();
        assert_eq!(p.delta("cost"), Some(-0.15));
        assert_eq!(p.delta("risk_score"), Some(0.03));
        assert_eq!(p.action(), "Critical cost ratio 0.95");
        assert_eq!(p.priority(), 2);
    }

    #[test]
    fn test_moderate_reduction() {
        let p = CostEvaluator.propose(&state(1_000_000.0, 600_000.0)).unwrap();
        assert!((p.delta("cost").unwrap() + 0.025).abs() < 1e-9);
        assert_eq!(p.delta("marketing_budget"), Some(-0.02));
        assert_eq!(p.action(), "Cost ratio 0.60 above target 0.55");
        assert_eq!(p.confidence(), 0.8176);
    }

    #[test]
    fn test_over_cut_reinvests() {
        let p = CostEvaluator.propose(&state(100.0, 30.0)).unwrap();
        assert_eq!(p.delta("cost"), Some(0.03));
        assert_eq!(p.delta("revenue"), Some(0.02));
    }

    #[test]
    fn test_steady_state() {
        let p = CostEvaluator.propose(&state(100.0, 50.0)).unwrap();
        assert_eq!(p.delta("cost"), Some(-0.01));
        assert_eq!(p.action(), "Cost ratio 0.50 near target");
    }
}
