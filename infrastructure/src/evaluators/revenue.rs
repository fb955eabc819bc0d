//! Revenue growth and churn heuristic

use super::{Assessment, REVENUE_AGENT, field, pct};
use roundtable_domain::{Diagnostics, DomainError, Evaluator, Proposal, StateVector};

/// Desired growth rate per round
pub const TARGET_GROWTH_RATE: f64 = 0.08;
/// Churn above this is treated as critical
pub const HIGH_CHURN_THRESHOLD: f64 = 0.10;

/// Pushes marketing when growth lags and retention when churn is high
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueEvaluator;

impl Evaluator for RevenueEvaluator {
    fn name(&self) -> &str {
        REVENUE_AGENT
    }

    fn evaluate(&self, state: &StateVector) -> Diagnostics {
        let marketing = field(state, "marketing_budget");
        let marketing_efficiency = if marketing > 0.0 {
            field(state, "revenue") / marketing
        } else {
            0.0
        };

        Diagnostics::from([
            (
                "revenue_gap".to_string(),
                TARGET_GROWTH_RATE - field(state, "growth_rate"),
            ),
            (
                "churn_severity".to_string(),
                (field(state, "churn") - HIGH_CHURN_THRESHOLD).max(0.0),
            ),
            ("marketing_efficiency".to_string(), marketing_efficiency),
        ])
    }

    fn propose(&self, state: &StateVector) -> Result<Proposal, DomainError> {
        let diagnostics = self.evaluate(state);
        let revenue_gap = diagnostics["revenue_gap"];
        let churn_severity = diagnostics["churn_severity"];

        let mut assessment = Assessment::default();
        let mut factors = Vec::new();

        if revenue_gap > 0.0 {
            let boost = (revenue_gap * 2.0).min(0.20);
            assessment.set("marketing_budget", boost);
            assessment.set("revenue", revenue_gap * 0.80);
            assessment.set("growth_rate", revenue_gap * 0.50);
            assessment.reason(format!(
                "Growth rate {} is below target {}; increasing marketing by {}.",
                pct(field(state, "growth_rate")),
                pct(TARGET_GROWTH_RATE),
                pct(boost)
            ));
            factors.push((revenue_gap / TARGET_GROWTH_RATE).min(1.0));
        }

        if churn_severity > 0.0 {
            let churn_reduction = (churn_severity * 3.0).min(0.25);
            assessment.set("churn", -churn_reduction);
            assessment.add("cost", 0.02);
            assessment.add("revenue", churn_severity * 1.5);
            assessment.reason(format!(
                "Churn {} exceeds threshold; deploying retention programme (churn ↓{}).",
                pct(field(state, "churn")),
                pct(churn_reduction)
            ));
            factors.push((churn_severity / HIGH_CHURN_THRESHOLD).min(1.0));
        }

        if factors.is_empty() {
            assessment.set("revenue", 0.02);
            assessment.set("growth_rate", 0.005);
            assessment.reason("Revenue metrics healthy; maintaining trajectory.".to_string());
            factors.push(0.70);
        }

        let raw = factors.iter().sum::<f64>() / factors.len() as f64;
        let action = if assessment.reasons.len() > 1 {
            "Boost marketing & reduce churn".to_string()
        } else {
            assessment.headline()
        };

        assessment.into_proposal(REVENUE_AGENT, action, raw, 1)
    }
}
