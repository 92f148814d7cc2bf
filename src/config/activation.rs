//! Activation parameters and scheduler configuration structures.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, ConsistencyMode};

/// Environment variable holding the per-block capacity.
pub const ENV_MAX_ACTIVE_TOPICS_PER_BLOCK: &str = "TOPIC_ACTIVATION_MAX_ACTIVE_TOPICS_PER_BLOCK";
/// Environment variable selecting a file store directory.
pub const ENV_STORE_DIR: &str = "TOPIC_ACTIVATION_STORE_DIR";
/// Environment variable selecting the consistency mode.
pub const ENV_CONSISTENCY: &str = "TOPIC_ACTIVATION_CONSISTENCY";
/// Environment variable enabling the in-memory audit buffer.
pub const ENV_AUDIT_CAPACITY: &str = "TOPIC_ACTIVATION_AUDIT_CAPACITY";

/// Governance parameters consulted by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationParams {
    /// Maximum number of topics that may churn at one block.
    pub max_active_topics_per_block: u64,
}

impl Default for ActivationParams {
    fn default() -> Self {
        Self {
            max_active_topics_per_block: 1,
        }
    }
}

impl ActivationParams {
    /// Validate parameter values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_active_topics_per_block == 0 {
            return Err("max_active_topics_per_block must be greater than 0".into());
        }
        Ok(())
    }
}

/// Store backend selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreBackendConfig {
    /// In-memory stores for development/testing.
    #[default]
    InMemory,
    /// JSON-lines files under `dir`.
    File {
        /// Directory holding one file per store.
        dir: PathBuf,
    },
}

/// Root scheduler configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// Initial governance parameters.
    #[serde(default)]
    pub params: ActivationParams,
    /// Store backend selection.
    #[serde(default)]
    pub store: StoreBackendConfig,
    /// Consistency mode for inactivation and updates.
    #[serde(default)]
    pub consistency: ConsistencyMode,
    /// Bounded in-memory audit buffer size; no audit when unset.
    #[serde(default)]
    pub audit_capacity: Option<usize>,
}

impl ActivationConfig {
    /// Validate parameters and backend settings.
    pub fn validate(&self) -> Result<(), String> {
        self.params
            .validate()
            .map_err(|e| format!("params invalid: {e}"))?;
        if let StoreBackendConfig::File { dir } = &self.store {
            if dir.as_os_str().is_empty() {
                return Err("file store dir must not be empty".into());
            }
        }
        if self.audit_capacity == Some(0) {
            return Err("audit_capacity must be greater than 0 when set".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment, loading `.env` first
    /// when present.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup. Unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_MAX_ACTIVE_TOPICS_PER_BLOCK) {
            cfg.params.max_active_topics_per_block = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_MAX_ACTIVE_TOPICS_PER_BLOCK}={raw}"))?;
        }
        if let Some(dir) = lookup(ENV_STORE_DIR) {
            cfg.store = StoreBackendConfig::File { dir: dir.into() };
        }
        if let Some(raw) = lookup(ENV_CONSISTENCY) {
            cfg.consistency = match raw.trim().to_ascii_lowercase().as_str() {
                "compatible" => ConsistencyMode::Compatible,
                "strict" => ConsistencyMode::Strict,
                other => return Err(anyhow!("{ENV_CONSISTENCY}: unknown mode `{other}`")),
            };
        }
        if let Some(raw) = lookup(ENV_AUDIT_CAPACITY) {
            let capacity = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_AUDIT_CAPACITY}={raw}"))?;
            cfg.audit_capacity = Some(capacity);
        }
        cfg.validate().map_err(|e| anyhow!(e))?;
        Ok(cfg)
    }
}
