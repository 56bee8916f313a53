//! Builtin tools for agentic

pub mod calculator;
pub mod string_ops;

use crate::{ToolRegistry, ToolSpec};

/// Specs of every builtin tool
pub fn all_tools() -> Vec<ToolSpec> {
    vec![calculator::Calculator::spec(), string_ops::StringOps::spec()]
}

/// A registry holding the builtin tools
pub fn build_registry() -> ToolRegistry {
    ToolRegistry::with_builtins()
}
