//! Agent Config
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. global `<config_dir>/agentic/config.json`
//! 3. project `.agentic/config.json`
//! 4. `AGENTIC_MAX_STEPS`
//!
//! Command-line flags are applied on top by the CLI.

use crate::storage::JsonStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Config file name inside a store directory
pub const AGENT_CONFIG_FILE: &str = "config.json";

/// Step budget used when nothing else is configured
pub const DEFAULT_MAX_STEPS: usize = 6;

/// Environment override for the step budget
pub const ENV_MAX_STEPS: &str = "AGENTIC_MAX_STEPS";

// ============================================================================
// Resolved config
// ============================================================================

/// Fully resolved settings for running the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// Step budget per run
    pub max_steps: usize,

    /// Policy name (`rule` or `stub`)
    pub policy: String,

    /// Default evaluation suite
    pub suite_path: PathBuf,

    /// Where evaluation summaries are written
    pub out_dir: PathBuf,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            policy: "rule".to_string(),
            suite_path: PathBuf::from("suites/basic.json"),
            out_dir: PathBuf::from("artifacts"),
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Global + project + env
    ///
    /// Not validated: callers apply their own overrides first, then call
    /// `validate()`.
    pub fn load() -> Result<Self> {
        let mut stores = Vec::new();
        if let Ok(global) = JsonStore::global() {
            stores.push(global);
        }
        if let Ok(project) = JsonStore::current_project() {
            stores.push(project);
        }

        let mut config = Self::load_from(&stores)?;
        config.apply_env_max_steps(std::env::var(ENV_MAX_STEPS).ok())?;
        Ok(config)
    }

    /// Merge config files from `stores` in order over the defaults
    pub fn load_from(stores: &[JsonStore]) -> Result<Self> {
        let mut config = Self::new();
        for store in stores {
            if let Some(file) = store.load_optional::<ConfigFile>(AGENT_CONFIG_FILE)? {
                debug!("Loaded config from {}", store.base_dir().display());
                config.merge(file);
            }
        }
        Ok(config)
    }

    /// Apply a file layer; only fields present in the file override
    pub fn merge(&mut self, file: ConfigFile) {
        if let Some(max_steps) = file.max_steps {
            self.max_steps = max_steps;
        }
        if let Some(policy) = file.policy {
            self.policy = policy;
        }
        if let Some(suite_path) = file.suite_path {
            self.suite_path = suite_path;
        }
        if let Some(out_dir) = file.out_dir {
            self.out_dir = out_dir;
        }
    }

    /// Apply the raw value of `AGENTIC_MAX_STEPS`, if set
    pub fn apply_env_max_steps(&mut self, value: Option<String>) -> Result<()> {
        let Some(raw) = value else {
            return Ok(());
        };
        let max_steps = raw.trim().parse::<usize>().map_err(|_| {
            Error::Config(format!("{} must be a positive integer, got '{}'", ENV_MAX_STEPS, raw))
        })?;
        self.max_steps = max_steps;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(Error::Config("maxSteps must be at least 1".to_string()));
        }
        if self.policy.trim().is_empty() {
            return Err(Error::Config("policy must not be empty".to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = policy.into();
        self
    }
}

// ============================================================================
// File layer
// ============================================================================

/// One config file; every field is optional so layers can be partial
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}
