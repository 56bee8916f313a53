//! # agentic-foundation
//!
//! Foundation layer for agentic:
//! - Error: the workspace-wide `Error` / `Result`
//! - Config: `AgentConfig` merged from global + project JSON files and env
//! - Storage: `JsonStore` and `write_json` for config files and run summaries
//! - Strings: shared tags and small display helpers

pub mod config;
pub mod error;
pub mod storage;
pub mod strings;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config
// ============================================================================
pub use config::{AgentConfig, ConfigFile, AGENT_CONFIG_FILE, DEFAULT_MAX_STEPS};

// ============================================================================
// Storage
// ============================================================================
pub use storage::{write_json, JsonStore};
