//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - The `--config` flag or `FORMCHECK_CONFIG`

use crate::error::{Error, Result};
use formcheck_core::RuleRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Message template overrides, keyed by rule name
    pub messages: BTreeMap<String, String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when `--output` is not given
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or an EnvFilter directive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format (compact, full, json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in &Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Configuration file paths checked when no file is given, in order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".formcheck.yaml"),
            PathBuf::from(".formcheck.json"),
        ];

        if let Some(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("config.yaml"));
            paths.push(config_dir.join("config.json"));
        }

        paths
    }

    /// `<config_dir>/formcheck`, if the platform has a config directory
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("formcheck"))
    }

    /// Install the configured message overrides into a registry
    pub fn apply_messages(&self, registry: &mut RuleRegistry) -> Result<()> {
        for (rule, template) in &self.messages {
            registry.set_message(rule, template.clone()).map_err(|_| {
                Error::config(format!(
                    "messages: no rule named \"{}\" to override",
                    rule
                ))
            })?;
        }
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.format, "human");
        assert!(config.output.color);
        assert!(config.logging.level.is_none());
        assert!(config.messages.is_empty());
    }

    #[test]
    fn test_load_yaml_with_messages() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("formcheck.yaml");
        std::fs::write(
            &path,
            "output:\n  format: json\nmessages:\n  required: \"Please fill in %field.\"\n",
        )
        .unwrap();

        let config = Config::load_with_file(Some(&path)).unwrap();
        assert_eq!(config.output.format, "json");
        assert!(config.output.color);
        assert_eq!(
            config.messages.get("required").map(String::as_str),
            Some("Please fill in %field.")
        );
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("formcheck.json");
        std::fs::write(&path, r#"{"logging": {"level": "debug", "format": "json"}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.messages.insert("email".into(), "Bad e-mail.".into());
        config.save(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_apply_messages() {
        let mut registry = RuleRegistry::new();
        let mut config = Config::default();
        config.messages.insert("email".into(), "Bad e-mail.".into());
        config.apply_messages(&mut registry).unwrap();
        assert_eq!(registry.lookup("email").unwrap().message_template(), "Bad e-mail.");

        config.messages.insert("phone".into(), "Bad phone.".into());
        let err = config.apply_messages(&mut registry).unwrap_err();
        assert!(err.to_string().contains("phone"));
    }

    #[test]
    fn test_default_paths_order() {
        let paths = Config::default_config_paths();
        assert_eq!(paths[0], PathBuf::from(".formcheck.yaml"));
        assert_eq!(paths[1], PathBuf::from(".formcheck.json"));
    }
}
