//! Policies - decide the next action from the prompt and the scratchpad
//!
//! A policy is a pure function of its inputs: it must not panic and must
//! always return an action. The loop owns all state.

mod rule_based;
mod stub;

pub use rule_based::{RuleBasedPolicy, NO_RULE_MATCHED};
pub use stub::{StubPolicy, STUB_ANSWER};

use crate::{Action, Scratchpad};
use agentic_foundation::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Next-action selector
pub trait Policy: Send + Sync {
    /// Policy name, for logs and summaries
    fn name(&self) -> &str;

    /// Pick the next action
    fn act(&self, prompt: &str, scratchpad: &Scratchpad) -> Action;
}

/// Selectable policy implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    RuleBased,
    Stub,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::RuleBased => "rule",
            PolicyKind::Stub => "stub",
        }
    }

    /// Instantiate the policy
    pub fn build(&self) -> Arc<dyn Policy> {
        match self {
            PolicyKind::RuleBased => Arc::new(RuleBasedPolicy::new()),
            PolicyKind::Stub => Arc::new(StubPolicy::new()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rule" | "rule_based" | "rules" => Ok(PolicyKind::RuleBased),
            "stub" | "llm" | "llm_stub" => Ok(PolicyKind::Stub),
            other => Err(Error::Config(format!(
                "unknown policy '{}' (expected 'rule' or 'stub')",
                other
            ))),
        }
    }
}
