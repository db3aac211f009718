//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use formcheck_core::RuleRegistry;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Whether a path names a YAML document
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Load a JSON or YAML document, chosen by file extension
///
/// `expected` describes the document shape for error messages.
pub fn load_document<T: DeserializeOwned>(path: &Path, expected: &str) -> Result<T> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");

    let parsed = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| (e.to_string(), "YAML"))
    } else {
        serde_json::from_str(&content).map_err(|e| (e.to_string(), "JSON"))
    };

    parsed.map_err(|(reason, syntax)| {
        debug!(path = %path.display(), %reason, "Document rejected");
        Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format!("{} {} ({})", syntax, expected, reason),
        }
    })
}

/// The built-in rules with the configured message overrides applied
pub fn configured_registry(config: &Config) -> Result<RuleRegistry> {
    let mut registry = RuleRegistry::new();
    config.apply_messages(&mut registry)?;
    Ok(registry)
}
