//! Negotiation configuration from TOML (`[negotiation]` section)

use crate::preset;
use roundtable_domain::{
    ConsensusResolver, DEFAULT_CONFLICT_PENALTY, DEFAULT_CONFLICT_THRESHOLD, DomainError,
    NegotiationWeights, ResolverConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw negotiation configuration from TOML
///
/// ```toml
/// [negotiation]
/// conflict_threshold = 0.5
/// conflict_penalty = 0.8
///
/// [negotiation.weights]
/// RevenueAgent = 0.4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNegotiationConfig {
    pub conflict_threshold: f64,
    pub conflict_penalty: f64,
    /// Producer name -> base weight
    pub weights: BTreeMap<String, f64>,
}

impl Default for FileNegotiationConfig {
    fn default() -> Self {
        Self {
            conflict_threshold: DEFAULT_CONFLICT_THRESHOLD,
            conflict_penalty: DEFAULT_CONFLICT_PENALTY,
            weights: preset::default_weights(),
        }
    }
}

impl FileNegotiationConfig {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::default()
            .with_conflict_threshold(self.conflict_threshold)
            .with_conflict_penalty(self.conflict_penalty)
    }

    pub fn to_resolver(&self) -> Result<ConsensusResolver, DomainError> {
        let weights = NegotiationWeights::new(self.weights.clone())?;
        ConsensusResolver::new(weights, self.resolver_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_merge_over_defaults() {
        let toml_str = r#"
[negotiation]
conflict_penalty = 0.5

[negotiation.weights]
RevenueAgent = 0.4
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        // a table in the file replaces the default table
        assert_eq!(config.negotiation.weights.len(), 1);
        assert_eq!(config.negotiation.conflict_threshold, 0.5);

        let resolver = config.negotiation.to_resolver().unwrap();
        assert_eq!(resolver.config().conflict_penalty, 0.5);
        assert_eq!(resolver.weights().weight_of("RevenueAgent"), 0.4);
    }

    #[test]
    fn test_invalid_penalty_rejected() {
        let config = FileNegotiationConfig {
            conflict_penalty: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.to_resolver(),
            Err(DomainError::InvalidResolverSetting { .. })
        ));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let mut config = FileNegotiationConfig::default();
        config.weights.insert("CostAgent".to_string(), 0.0);
        assert!(matches!(
            config.to_resolver(),
            Err(DomainError::NonPositiveWeight { .. })
        ));
    }
}
