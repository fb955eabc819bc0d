//! Market expansion heuristic

use super::{Assessment, GROWTH_AGENT, field, pct};
use roundtable_domain::{Diagnostics, DomainError, Evaluator, Proposal, StateVector};

pub const AGGRESSIVE_GROWTH: f64 = 0.12;
pub const CONSERVATIVE_GROWTH: f64 = 0.04;
/// Risk score above which growth plans are scaled back
pub const RISK_TOLERANCE: f64 = 0.40;

/// Expands when risk and saturation allow, pulls back when risk is high
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthEvaluator;

impl Evaluator for GrowthEvaluator {
    fn name(&self) -> &str {
        GROWTH_AGENT
    }

    fn evaluate(&self, state: &StateVector) -> Diagnostics {
        let revenue = field(state, "revenue");
        let growth_potential = (AGGRESSIVE_GROWTH - field(state, "growth_rate")).max(0.0);
        // Marketing spend relative to 15% of revenue
        let market_saturation = if revenue > 0.0 {
            (field(state, "marketing_budget") / (revenue * 0.15)).min(1.0)
        } else {
            1.0
        };
        let risk_factor = (1.0 - field(state, "risk_score") / RISK_TOLERANCE).max(0.0);

        Diagnostics::from([
            ("growth_potential".to_string(), growth_potential),
            ("market_saturation".to_string(), market_saturation),
            (
                "risk_adjusted_potential".to_string(),
                growth_potential * risk_factor,
            ),
        ])
    }

    fn propose(&self, state: &StateVector) -> Result<Proposal, DomainError> {
        let diagnostics = self.evaluate(state);
        let market_saturation = diagnostics["market_saturation"];
        let potential = diagnostics["risk_adjusted_potential"];
        let risk = field(state, "risk_score");
        let growth_rate = field(state, "growth_rate");

        let mut assessment = Assessment::default();
        let raw;

        if risk > RISK_TOLERANCE {
            assessment.set("growth_rate", -0.01);
            assessment.set("marketing_budget", -0.05);
            assessment.set("revenue", -0.01);
            assessment.reason(format!(
                "Risk {risk:.2} exceeds tolerance {RISK_TOLERANCE}; scaling back growth strategy."
            ));
            raw = 0.80;
        } else if potential > 0.04 && market_saturation < 0.70 {
            assessment.set("growth_rate", potential * 0.80);
            assessment.set("marketing_budget", (potential * 1.5).min(0.20));
            assessment.set("revenue", potential * 1.2);
            assessment.set("churn", -0.01);
            assessment.reason(format!(
                "Favourable conditions (risk {risk:.2}, saturation {:.0}%); aggressive expansion (growth ↑{}).",
                market_saturation * 100.0,
                pct(potential * 0.80)
            ));
            raw = 0.85;
        } else if growth_rate < CONSERVATIVE_GROWTH {
            assessment.set("growth_rate", 0.02);
            assessment.set("marketing_budget", 0.08);
            assessment.set("revenue", 0.03);
            assessment.reason(format!(
                "Stagnant growth {}; moderate marketing push to reignite expansion.",
                pct(growth_rate)
            ));
            raw = 0.72;
        } else {
            assessment.set("growth_rate", 0.005);
            assessment.set("revenue", 0.015);
            assessment.reason(format!(
                "Growth {} on track; sustaining momentum with incremental optimisation.",
                pct(growth_rate)
            ));
            raw = 0.68;
        }

        let action = assessment.headline();
        assessment.into_proposal(GROWTH_AGENT, action, raw, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(risk: f64, growth_rate: f64, marketing: f64) -> StateVector {
        StateVector::from_values([
            ("revenue", 1_000_000.0),
            ("marketing_budget", marketing),
            ("risk_score", risk),
            ("growth_rate", growth_rate),
        ])
    }

    #[test]
    fn test_diagnostics() {
        let d = GrowthEvaluator.evaluate(&state(0.20, 0.05, 75_000.0));
        assert!((d["growth_potential"] - 0.07).abs() < 1e-12);
        assert!((d["market_saturation"] - 0.5).abs() < 1e-12);
        assert!((d["risk_adjusted_potential"] - 0.035).abs() < 1e-12);
    }

    #[test]
    fn test_high_risk_pulls_back() {
        let p = GrowthEvaluator.propose(&state(0.50, 0.05, 80_000.0)).unwrap();
        assert_eq!(p.delta("marketing_budget"), Some(-0.05));
        assert_eq!(p.action(), "Risk 0.50 exceeds tolerance 0.4");
        assert_eq!(p.priority(), 3);
    }

    #[test]
    fn test_aggressive_expansion() {
        let p = GrowthEvaluator.propose(&state(0.0, 0.02, 50_000.0)).unwrap();
        assert!((p.delta("growth_rate").unwrap() - 0.08).abs() < 1e-12);
        assert!((p.delta("marketing_budget").unwrap() - 0.15).abs() < 1e-12);
        assert_eq!(p.delta("churn"), Some(-0.01));
    }

    #[test]
    fn test_stagnation_push() {
        // saturated market blocks expansion
        let p = GrowthEvaluator.propose(&state(0.0, 0.02, 150_000.0)).unwrap();
        assert_eq!(p.delta("marketing_budget"), Some(0.08));
        assert_eq!(p.action(), "Stagnant growth 2.0%");
    }

    #[test]
    fn test_sustain_on_preset() {
        let p = GrowthEvaluator.propose(&state(0.35, 0.05, 80_000.0)).unwrap();
        assert_eq!(p.delta("growth_rate"), Some(0.005));
        assert_eq!(p.delta("revenue"), Some(0.015));
        assert_eq!(p.action(), "Growth 5.0% on track");
    }
}
