//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Everything except [`DomainError::InvalidConfidence`],
/// [`DomainError::InvalidDelta`] and [`DomainError::ProducerMismatch`] is a
/// static configuration problem and is reported before any round runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("confidence must be in [0, 1], got {0}")]
    InvalidConfidence(f64),

    #[error("delta for field '{field}' must be finite, got {value}")]
    InvalidDelta { field: String, value: f64 },

    #[error("evaluator '{evaluator}' produced a proposal signed by '{producer}'")]
    ProducerMismatch { evaluator: String, producer: String },

    #[error("no bound configured for field '{0}'")]
    MissingBound(String),

    #[error("invalid bound for field '{field}': [{lo}, {hi}]")]
    InvalidBound { field: String, lo: f64, hi: f64 },

    #[error("negotiation weight for '{producer}' must be positive, got {weight}")]
    NonPositiveWeight { producer: String, weight: f64 },

    #[error("volatility field '{0}' is not part of the state")]
    UnknownVolatilityField(String),

    #[error("producer '{0}' is registered more than once")]
    DuplicateProducer(String),

    #[error("invalid resolver setting {name} = {value} (expected a value in (0, 1])")]
    InvalidResolverSetting { name: &'static str, value: f64 },
}

impl DomainError {
    /// Check if this error comes from static setup rather than a running round
    pub fn is_setup_error(&self) -> bool {
        !matches!(
            self,
            DomainError::InvalidConfidence(_)
                | DomainError::InvalidDelta { .. }
                | DomainError::ProducerMismatch { .. }
        )
    }
}
