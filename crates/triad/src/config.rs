//! TOML configuration for the `triad` binary.
//!
//! Every field is optional; when no config file is provided, the
//! defaults below apply. CLI flags override config file values.

use std::path::Path;

use serde::Deserialize;
use triad_types::ConsistencyMode;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Cluster shape and starting mode.
    pub cluster: ClusterSection,
    /// Demo script tuning.
    pub demo: DemoSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[cluster]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClusterSection {
    /// Number of replicas to build the cluster with.
    pub replicas: Option<u32>,
    /// Run the demo under a single mode instead of all three.
    ///
    /// Accepts the kebab-case mode names (`"availability-first"`,
    /// `"consistency-first"`, `"no-partition-tolerance"`). Unknown
    /// names are rejected when the file is parsed.
    pub mode: Option<ConsistencyMode>,
}

/// `[demo]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoSection {
    /// Transactions to commit while the cluster is still healthy.
    pub writes: Option<u32>,
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: CliConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Effective replica count (config value or 3, never below 1).
    pub fn replicas(&self) -> u32 {
        self.cluster.replicas.unwrap_or(3).max(1)
    }

    /// Effective number of healthy-phase writes (config value or 2).
    pub fn writes(&self) -> u32 {
        self.demo.writes.unwrap_or(2)
    }
}
