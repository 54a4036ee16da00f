//! Configuration loading and management.

use std::collections::BTreeMap;
use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::filter::{EmptyFactory, FeatureToggles, InterceptorParams};

/// Prefix of environment variables that override file values.
const ENV_PREFIX: &str = "RETEQUIV_";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker threads for filtering units (0 = one per CPU).
    pub jobs: usize,
    /// Feature toggles by name, e.g. `FRETEQUIV = false`.
    pub features: BTreeMap<String, bool>,
    /// Equivalence filter configuration.
    pub equivalence: EquivalenceConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jobs: 0,
            features: BTreeMap::new(),
            equivalence: EquivalenceConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit `--config` flags.
    /// Env vars with `RETEQUIV_` prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))
    }

    /// Load configuration from directory, looking for retequiv.toml or
    /// .retequiv/retequiv.toml.
    ///
    /// Missing files are silently skipped (defaults are used).
    /// Env vars with `RETEQUIV_` prefix override file/default values.
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join("retequiv.toml")))
            .merge(Toml::file(dir.join(".retequiv/retequiv.toml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))
    }

    /// Create default config file content.
    pub fn default_toml() -> &'static str {
        include_str!("default_config.toml")
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn feature_toggles(&self) -> FeatureToggles {
        FeatureToggles::new(&self.features)
    }

    pub fn interceptor_params(&self) -> InterceptorParams {
        InterceptorParams {
            empty_factories: self.equivalence.empty_factories.clone(),
        }
    }
}

/// Equivalence filter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquivalenceConfig {
    /// Zero-argument calls that return an empty value.
    pub empty_factories: Vec<EmptyFactory>,
}

impl Default for EquivalenceConfig {
    fn default() -> Self {
        Self {
            empty_factories: EmptyFactory::defaults(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,
    /// Color output.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// Markdown format.
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown format: {s}. Use 'text', 'json', or 'md'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{default_registry, Feature};
    use figment::Jail;

    fn fretequiv() -> Feature {
        default_registry().features()[0]
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.jobs, 0);
        assert!(config.features.is_empty());
        assert_eq!(config.equivalence.empty_factories.len(), 5);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.color);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "md".parse::<OutputFormat>().unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_config_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "retequiv.toml",
                "jobs = 4\n[features]\nFRETEQUIV = false\n[output]\nformat = \"json\"",
            )?;
            let config = Config::from_file("retequiv.toml").unwrap();
            assert_eq!(config.jobs, 4);
            assert_eq!(config.output.format, OutputFormat::Json);
            assert!(!config.feature_toggles().is_enabled(&fretequiv()));
            Ok(())
        });
    }

    #[test]
    fn test_empty_factories_replace_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                "[equivalence]\nempty_factories = [{ owner = \"java/util/Map\", name = \"of\" }]",
            )?;
            let config = Config::from_file("custom.toml").unwrap();
            assert_eq!(
                config.interceptor_params().empty_factories,
                vec![EmptyFactory::new("java/util/Map", "of")]
            );
            Ok(())
        });
    }

    #[test]
    fn test_config_load_default_dot_dir() {
        Jail::expect_with(|jail| {
            std::fs::create_dir(jail.directory().join(".retequiv")).unwrap();
            jail.create_file(".retequiv/retequiv.toml", "[output]\ncolor = false")?;
            let config = Config::load_default(".").unwrap();
            assert!(!config.output.color);
            Ok(())
        });
    }

    #[test]
    fn test_config_load_default_no_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load_default(".").unwrap();
            assert_eq!(config, Config::default());
            assert!(config.feature_toggles().is_enabled(&fretequiv()));
            Ok(())
        });
    }

    #[test]
    fn test_from_file_errors_on_missing_file() {
        let result = Config::from_file("/nonexistent/path/retequiv.toml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("not found"), "expected 'not found' in: {err}");
    }

    #[test]
    fn test_invalid_value_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("retequiv.toml", "jobs = \"many\"")?;
            let err = Config::from_file("retequiv.toml").unwrap_err();
            assert!(matches!(err, Error::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn test_env_var_overrides_file_value() {
        Jail::expect_with(|jail| {
            jail.create_file("retequiv.toml", "jobs = 4")?;
            jail.set_env("RETEQUIV_JOBS", "2");
            let config = Config::from_file("retequiv.toml").unwrap();
            assert_eq!(config.jobs, 2);
            Ok(())
        });
    }

    #[test]
    fn test_env_var_disables_feature() {
        Jail::expect_with(|jail| {
            jail.set_env("RETEQUIV_FEATURES__FRETEQUIV", "false");
            let config = Config::load_default(".").unwrap();
            assert!(!config.feature_toggles().is_enabled(&fretequiv()));
            Ok(())
        });
    }

    #[test]
    fn test_default_toml_matches_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("retequiv.toml", Config::default_toml())?;
            let config = Config::from_file("retequiv.toml").unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_to_toml_round_trips() {
        let mut config = Config::default();
        config.features.insert("FRETEQUIV".to_string(), false);
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("FRETEQUIV = false"));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
