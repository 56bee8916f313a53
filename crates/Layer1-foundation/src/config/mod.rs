//! Config - agent run settings
//!
//! - `agent.rs` - `AgentConfig` merged from global + project files and env

mod agent;

pub use agent::{
    AgentConfig, ConfigFile, AGENT_CONFIG_FILE, DEFAULT_MAX_STEPS, ENV_MAX_STEPS,
};
