//! Configuration types for allowgate
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables. This is the host-side setup
//! (which file, which entry shape, which roles bypass the gate) — the
//! allowlist itself lives in its own persisted document, managed by
//! [`crate::store`].

use crate::host::Capability;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Allowlist document settings
    pub allowlist: AllowlistConfig,

    /// Join-gate settings
    pub gate: GateConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            allowlist: AllowlistConfig::default(),
            gate: GateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Allowlist document settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AllowlistConfig {
    /// Path of the persisted allowlist document
    pub path: String,

    /// Entry shape used by this deployment. Fixed per deployment; the two
    /// shapes never mix within one list.
    pub shape: EntryShape,
}

impl Default for AllowlistConfig {
    fn default() -> Self {
        Self {
            path: crate::store::DEFAULT_FILE_NAME.to_string(),
            shape: EntryShape::Pattern,
        }
    }
}

impl AllowlistConfig {
    /// Path with the home directory expanded
    pub fn resolved_path(&self) -> String {
        shellexpand::tilde(&self.path).into_owned()
    }
}

/// Entry shape selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryShape {
    /// Multi-field entries; unset fields are wildcards
    #[default]
    Pattern,
    /// Single field-kind + exact-value entries
    Typed,
}

/// Join-gate settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Capabilities that exempt an identity from the allowlist check
    pub bypass_capabilities: Vec<Capability>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            bypass_capabilities: Capability::default_bypass_set(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
