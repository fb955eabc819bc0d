//! Evaluator selection from TOML (`[evaluators]` section)

use crate::evaluators::{DEFAULT_EVALUATORS, evaluator_by_name};
use roundtable_domain::Evaluator;
use serde::{Deserialize, Serialize};

/// Raw evaluator selection from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvaluatorsConfig {
    /// Default evaluator names in registration order
    pub enabled: Vec<String>,
}

impl Default for FileEvaluatorsConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_EVALUATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FileEvaluatorsConfig {
    /// Names that match no default evaluator
    pub fn unknown(&self) -> Vec<&str> {
        self.enabled
            .iter()
            .map(String::as_str)
            .filter(|name| evaluator_by_name(name).is_none())
            .collect()
    }

    /// Instantiate the enabled evaluators, or return the first unknown name
    pub fn to_evaluators(&self) -> Result<Vec<Box<dyn Evaluator>>, String> {
        self.enabled
            .iter()
            .map(|name| evaluator_by_name(name).ok_or_else(|| name.clone()))
            .collect()
    }
}
