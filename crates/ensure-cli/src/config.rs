//! # Enforcement Configuration
//!
//! The process-wide enforcement switch is resolved from three sources, each
//! overriding the one before it:
//!
//! 1. `--config <file>`: a YAML document with an `enforce` key.
//! 2. The `ENSURE_ENFORCE` environment variable.
//! 3. The `--no-enforce` flag.
//!
//! With none of them present, enforcement stays on.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable consulted by [`resolve_enforcement`].
pub const ENFORCE_ENV: &str = "ENSURE_ENFORCE";

/// Contents of the YAML configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnsureConfig {
    /// Whether non-forced checks are enforced.
    pub enforce: bool,
}

impl Default for EnsureConfig {
    fn default() -> Self {
        Self { enforce: true }
    }
}

impl EnsureConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("invalid ensure configuration")
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Interpret an `ENSURE_ENFORCE` value. Unrecognised values yield `None`.
pub fn parse_env_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "0" | "false" | "off" | "no" => Some(false),
        "1" | "true" | "on" | "yes" => Some(true),
        _ => None,
    }
}

/// Combine the three sources into the effective enforcement setting.
pub fn resolve_enforcement(
    config: Option<&EnsureConfig>,
    env_value: Option<&str>,
    no_enforce: bool,
) -> bool {
    if no_enforce {
        return false;
    }
    if let Some(raw) = env_value {
        match parse_env_flag(raw) {
            Some(enabled) => return enabled,
            None => tracing::warn!(value = raw, "ignoring unrecognised {ENFORCE_ENV}"),
        }
    }
    config.map_or(true, |c| c.enforce)
}
