//! Business KPIs derived from a run trace
//!
//! These read the preset's field names, so they live next to the preset
//! rather than in the domain. Missing fields read as zero.

use roundtable_domain::{RunTrace, StateVector};

const REVENUE: &str = "revenue";
const COST: &str = "cost";
const RISK_SCORE: &str = "risk_score";
const CHURN: &str = "churn";
const GROWTH_RATE: &str = "growth_rate";

/// Headline figures for the final state of a run
///
/// Ratios fall back to fixed values when their denominator is not positive:
/// margin and ROI to 0, cost ratio to 1, revenue change to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessKpis {
    pub revenue_final: f64,
    pub revenue_change_pct: f64,
    pub profit_final: f64,
    pub profit_margin: f64,
    pub roi: f64,
    pub cost_ratio: f64,
    pub risk_score_final: f64,
    pub risk_score_change: f64,
    pub churn_final: f64,
    pub growth_rate_final: f64,
    /// Mean consensus confidence over all rounds, 0 for an empty run
    pub consensus_confidence: f64,
    pub total_rounds: usize,
}

impl BusinessKpis {
    pub fn from_trace(trace: &RunTrace) -> Self {
        let initial = &trace.initial_state;
        let last = &trace.final_state;

        let revenue = last.get_or(REVENUE, 0.0);
        let cost = last.get_or(COST, 0.0);
        let initial_revenue = initial.get_or(REVENUE, 0.0);

        Self {
            revenue_final: revenue,
            revenue_change_pct: if initial_revenue > 0.0 {
                (revenue - initial_revenue) / initial_revenue
            } else {
                0.0
            },
            profit_final: profit(last),
            profit_margin: profit_margin(last),
            roi: roi(last),
            cost_ratio: if revenue > 0.0 { cost / revenue } else { 1.0 },
            risk_score_final: last.get_or(RISK_SCORE, 0.0),
            risk_score_change: last.get_or(RISK_SCORE, 0.0) - initial.get_or(RISK_SCORE, 0.0),
            churn_final: last.get_or(CHURN, 0.0),
            growth_rate_final: last.get_or(GROWTH_RATE, 0.0),
            consensus_confidence: trace.mean_confidence(),
            total_rounds: trace.n_rounds(),
        }
    }
}

/// `revenue - cost`
pub fn profit(state: &StateVector) -> f64 {
    state.get_or(REVENUE, 0.0) - state.get_or(COST, 0.0)
}

/// Profit as a fraction of revenue; 0 when revenue is not positive
pub fn profit_margin(state: &StateVector) -> f64 {
    let revenue = state.get_or(REVENUE, 0.0);
    if revenue > 0.0 {
        profit(state) / revenue
    } else {
        0.0
    }
}

/// Profit over cost; 0 when cost is not positive
pub fn roi(state: &StateVector) -> f64 {
    let cost = state.get_or(COST, 0.0);
    if cost > 0.0 { profit(state) / cost } else { 0.0 }
}

/// ROI of the initial state followed by the state after every round
pub fn roi_series(trace: &RunTrace) -> Vec<f64> {
    std::iter::once(&trace.initial_state)
        .chain(trace.rounds.iter().map(|r| &r.state_after))
        .map(roi)
        .collect()
}
