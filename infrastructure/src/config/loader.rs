//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["roundtable.toml", ".roundtable.toml"];

/// Prefix for environment overrides, e.g. `ROUNDTABLE_SIMULATION__SEED=7`
pub const ENV_PREFIX: &str = "ROUNDTABLE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `ROUNDTABLE_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./roundtable.toml` or `./.roundtable.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/roundtable/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigValidationError> {
        Self::figment(config_path)
            .extract()
            .map_err(|e| ConfigValidationError::Load(Box::new(e)))
    }

    /// The merged provider stack, exposed for inspection
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                debug!("Loading global config {}", global_path.display());
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            debug!("Loading project config {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            debug!("Loading config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/roundtable/config.toml if set,
    /// otherwise falls back to ~/.config/roundtable/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("roundtable").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations in priority order (for --show-config)
    pub fn describe_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] Environment: {ENV_PREFIX}*"));

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{mark:<5}] Explicit: {}", path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!(
                "  [     ] Project: ./{} or ./{}",
                PROJECT_FILES[0], PROJECT_FILES[1]
            )),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{mark}] Global:  {}", path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.simulation.rounds, 6);
        assert_eq!(config.evaluators.enabled.len(), 4);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("roundtable"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[simulation]
rounds = 3
scenario = "Jailed"

[negotiation.weights]
RevenueAgent = 0.9
"#,
            )?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).unwrap();
            assert_eq!(config.simulation.rounds, 3);
            assert_eq!(config.simulation.scenario, "Jailed");
            assert_eq!(config.simulation.seed, 42);
            // tables merge key by key across sources
            assert_eq!(config.negotiation.weights["RevenueAgent"], 0.9);
            assert_eq!(config.negotiation.weights["RiskAgent"], 0.25);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("roundtable.toml", "[simulation]\nseed = 5\nrounds = 4\n")?;
            jail.set_env("ROUNDTABLE_SIMULATION__SEED", "99");

            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.simulation.rounds, 4);
            assert_eq!(config.simulation.seed, 99);
            assert_eq!(
                ConfigLoader::project_config_path(),
                Some(PathBuf::from("roundtable.toml"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("bad.toml", "[simulation]\nrounds = \"many\"\n")?;
            let result = ConfigLoader::load(Some(Path::new("bad.toml")));
            assert!(matches!(result, Err(ConfigValidationError::Load(_))));
            Ok(())
        });
    }
}
