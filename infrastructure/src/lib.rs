//! Infrastructure layer for roundtable
//!
//! This crate contains the concrete collaborators of the simulation core:
//! the default business evaluators, the business state preset, business
//! KPIs over a run trace, and configuration file loading.

pub mod config;
pub mod evaluators;
pub mod kpis;
pub mod preset;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, ConfigValidationError, FileConfig, FileEvaluatorsConfig,
    FileNegotiationConfig, FileSimulationConfig, FileStateConfig, Severity,
};
pub use evaluators::{
    CostEvaluator, DEFAULT_EVALUATORS, GrowthEvaluator, RevenueEvaluator, RiskEvaluator,
    default_evaluators, evaluator_by_name,
};
pub use kpis::{BusinessKpis, roi_series};
