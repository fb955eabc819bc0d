//! Risk exposure heuristic

use super::{Assessment, RISK_AGENT, field};
use roundtable_domain::{Diagnostics, DomainError, Evaluator, Proposal, StateVector};

pub const CRITICAL_RISK: f64 = 0.65;
pub const HIGH_RISK: f64 = 0.45;
pub const SAFE_RISK: f64 = 0.25;
pub const HIGH_VOLATILITY: f64 = 0.30;

/// Mitigates elevated risk, allows headroom when risk is low, and dampens
/// growth exposure under high volatility
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskEvaluator;

impl Evaluator for RiskEvaluator {
    fn name(&self) -> &str {
        RISK_AGENT
    }

    fn evaluate(&self, state: &StateVector) -> Diagnostics {
        let risk = field(state, "risk_score");
        Diagnostics::from([
            ("risk_excess".to_string(), (risk - SAFE_RISK).max(0.0)),
            (
                "volatility_excess".to_string(),
                (field(state, "volatility") - HIGH_VOLATILITY).max(0.0),
            ),
            (
                "risk_adjusted_growth".to_string(),
                field(state, "growth_rate") * (1.0 - risk),
            ),
        ])
    }

    fn propose(&self, state: &StateVector) -> Result<Proposal, DomainError> {
        let diagnostics = self.evaluate(state);
        let risk_excess = diagnostics["risk_excess"];
        let volatility_excess = diagnostics["volatility_excess"];
        let risk = field(state, "risk_score");

        let mut assessment = Assessment::default();
        let mut raw: f64;

        if risk >= CRITICAL_RISK {
            let mitigation = risk_excess * 0.40;
            assessment.set("risk_score", -mitigation);
            assessment.set("cost", 0.05);
            assessment.set("revenue", -0.02);
            assessment.set("volatility", -0.05);
            assessment.set("growth_rate", -0.02);
            assessment.reason(format!(
                "CRITICAL risk {risk:.2}; emergency mitigation deployed (risk ↓{mitigation:.2})."
            ));
            raw = 0.90;
        } else if risk >= HIGH_RISK {
            let mitigation = risk_excess * 0.25;
            assessment.set("risk_score", -mitigation);
            assessment.set("cost", 0.02);
            assessment.set("volatility", -0.03);
            assessment.reason(format!(
                "Elevated risk {risk:.2}; moderate mitigation (risk ↓{mitigation:.2})."
            ));
            raw = 0.78;
        } else if risk <= SAFE_RISK {
            assessment.set("risk_score", 0.02);
            assessment.set("growth_rate", 0.01);
            assessment.set("revenue", 0.03);
            assessment.reason(format!(
                "Risk at safe level {risk:.2}; allocating headroom for growth acceleration."
            ));
            raw = 0.72;
        } else {
            assessment.set("risk_score", -0.02);
            assessment.set("cost", 0.01);
            assessment.reason(format!(
                "Moderate risk {risk:.2}; holding steady with minor mitigation."
            ));
            raw = 0.65;
        }

        if volatility_excess > 0.0 {
            let vol_reduction = (volatility_excess * 0.50).min(0.10);
            assessment.add("volatility", -vol_reduction);
            assessment.add("growth_rate", -volatility_excess * 0.15);
            assessment.reason(format!(
                "High volatility {:.2}; dampening growth exposure (volatility ↓{vol_reduction:.2}).",
                field(state, "volatility")
            ));
            raw = (raw + 0.05).min(1.0);
        }

        let priority = if risk < HIGH_RISK { 2 } else { 1 };
        let action = assessment.headline();
        assessment.into_proposal(RISK_AGENT, action, raw, priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(risk: f64, volatility: f64) -> StateVector {
        StateVector::from_values([
            ("risk_score", risk),
            ("volatility", volatility),
            ("growth_rate", 0.05),
        ])
    }

    #[test]
    fn test_diagnostics() {
        let d = RiskEvaluator.evaluate(&state(0.35, 0.40));
        assert!((d["risk_excess"] - 0.10).abs() < 1e-12);
        assert!((d["volatility_excess"] - 0.10).abs() < 1e-12);
        assert!((d["risk_adjusted_growth"] - 0.0325).abs() < 1e-12);
    }

    #[test]
    fn test_critical_risk() {
        let p = RiskEvaluator.propose(&state(0.75, 0.15)).unwrap();
        assert!((p.delta("risk_score").unwrap() + 0.20).abs() < 1e-12);
        assert_eq!(p.delta("cost"), Some(0.05));
        assert_eq!(p.deltas().len(), 5);
        assert_eq!(p.action(), "CRITICAL risk 0.75");
        assert_eq!(p.priority(), 1);
        assert_eq!(p.confidence(), 0.9168);
    }

    #[test]
    fn test_elevated_risk_priority() {
        let p = RiskEvaluator.propose(&state(0.45, 0.15)).unwrap();
        assert_eq!(p.priority(), 1);
        assert!((p.delta("risk_score").unwrap() + 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_safe_risk_headroom() {
        let p = RiskEvaluator.propose(&state(0.20, 0.15)).unwrap();
        assert_eq!(p.delta("risk_score"), Some(0.02));
        assert_eq!(p.priority(), 2);
    }

    #[test]
    fn test_moderate_risk_with_volatility() {
        let p = RiskEvaluator.propose(&state(0.35, 0.40)).unwrap();
        assert_eq!(p.delta("risk_score"), Some(-0.02));
        assert!((p.delta("volatility").unwrap() + 0.05).abs() < 1e-12);
        assert!((p.delta("growth_rate").unwrap() + 0.015).abs() < 1e-12);
        assert_eq!(p.action(), "Moderate risk 0.35");
        // raw 0.65 + 0.05
        assert_eq!(p.confidence(), 0.7685);
        assert_eq!(p.rationale().matches(" | ").count(), 1);
    }
}
