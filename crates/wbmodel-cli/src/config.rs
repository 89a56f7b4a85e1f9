//! CLI configuration
//!
//! Settings live in a TOML file under the user's config directory. The
//! `WBMODEL_CONFIG` environment variable points to another file.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use wbmodel_core::{DataObjectFactory, InterningFactory, StandardFactory, SITE_WIKIDATA};

use crate::output::OutputFormat;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "WBMODEL_CONFIG";

/// Path of the config file
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wbmodel")
        .join("config.toml")
}

/// Which factory backs model construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FactoryKind {
    #[default]
    Standard,
    Interning,
}

impl FactoryKind {
    pub fn build(self) -> Box<dyn DataObjectFactory> {
        match self {
            Self::Standard => Box::new(StandardFactory::new()),
            Self::Interning => Box::new(InterningFactory::new()),
        }
    }
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Interning => write!(f, "interning"),
        }
    }
}

impl FromStr for FactoryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "interning" => Ok(Self::Interning),
            other => anyhow::bail!("Invalid factory '{}' (expected standard or interning)", other),
        }
    }
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub default_site_iri: String,
    pub factory: FactoryKind,
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_site_iri: SITE_WIKIDATA.to_string(),
            factory: FactoryKind::Standard,
            output_format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it does not exist
    pub fn load() -> anyhow::Result<Self> {
        let path = config_file_path();
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["default_site_iri", "factory", "output_format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_site_iri" => Some(self.default_site_iri.clone()),
            "factory" => Some(self.factory.to_string()),
            "output_format" => Some(self.output_format.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "default_site_iri" => {
                if value.is_empty() {
                    anyhow::bail!("default_site_iri cannot be empty");
                }
                self.default_site_iri = value.to_string();
            }
            "factory" => self.factory = value.parse()?,
            "output_format" => self.output_format = value.parse()?,
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_site_iri, SITE_WIKIDATA);
        assert_eq!(config.factory, FactoryKind::Standard);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        config.set("factory", "interning").unwrap();
        config.set("output_format", "json").unwrap();
        assert_eq!(config.get("factory").as_deref(), Some("interning"));
        assert_eq!(config.get("output_format").as_deref(), Some("json"));
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("factory", "cached").is_err());
        assert!(config.set("output_format", "csv").is_err());
        assert!(config.set("default_site_iri", "").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.set("factory", "interning").unwrap();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("factory = \"interning\"\n").unwrap();
        assert_eq!(parsed.factory, FactoryKind::Interning);
        assert_eq!(parsed.default_site_iri, SITE_WIKIDATA);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<Config>("colour = \"blue\"\n").is_err());
    }
}
