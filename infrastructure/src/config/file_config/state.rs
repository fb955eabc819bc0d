//! State configuration from TOML (`[state.initial]` and `[state.bounds]`)

use crate::preset;
use roundtable_domain::{BoundsTable, DomainError, FieldBounds, StateStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw state overrides from TOML
///
/// Entries replace the matching preset field; new fields extend the state.
///
/// ```toml
/// [state.initial]
/// revenue = 2000000.0
///
/// [state.bounds]
/// revenue = [1.0, 5e9]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStateConfig {
    pub initial: BTreeMap<String, f64>,
    /// Field -> `[lo, hi]`
    pub bounds: BTreeMap<String, [f64; 2]>,
}

impl FileStateConfig {
    /// Preset initial values with overrides applied
    pub fn initial_values(&self) -> BTreeMap<String, f64> {
        let mut values = preset::initial_state();
        values.extend(self.initial.iter().map(|(k, v)| (k.clone(), *v)));
        values
    }

    /// Preset bounds with overrides applied
    pub fn bounds_table(&self) -> BoundsTable {
        let mut table = preset::bounds();
        for (field, [lo, hi]) in &self.bounds {
            table.insert(field.clone(), FieldBounds::new(*lo, *hi));
        }
        table
    }

    pub fn to_store(&self) -> Result<StateStore, DomainError> {
        StateStore::new(self.initial_values(), self.bounds_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_merge_with_preset() {
        let toml_str = r#"
[state.initial]
revenue = 2000000.0
headcount = 40.0

[state.bounds]
headcount = [1.0, 500.0]
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let values = config.state.initial_values();
        assert_eq!(values["revenue"], 2_000_000.0);
        assert_eq!(values["cost"], 600_000.0);
        assert_eq!(values.len(), 8);

        let store = config.state.to_store().unwrap();
        assert_eq!(store.snapshot().get("headcount"), Some(40.0));
    }

    #[test]
    fn test_unbounded_field_rejected() {
        let mut config = FileStateConfig::default();
        config.initial.insert("headcount".to_string(), 40.0);
        assert_eq!(
            config.to_store().unwrap_err(),
            DomainError::MissingBound("headcount".to_string())
        );
    }
}
