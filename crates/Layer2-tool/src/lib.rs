//! # agentic-tool
//!
//! Tool system for agentic providing:
//! - Declarative argument schemas and validation
//! - `ToolSpec` / `ToolHandler` and the `ToolRegistry`
//! - Builtin tools (calculator, string_ops)
//! - A small arithmetic expression evaluator used by the calculator
//!
//! Tool failures never escape as `Err`: the registry turns bad arguments,
//! handler errors and handler panics into `[tool_error] ...` strings. The only
//! error `ToolRegistry::call` returns is an unknown tool name.

pub mod builtin;
pub mod expr;
pub mod registry;
pub mod schema;
pub mod r#trait;

pub use r#trait::{ToolError, ToolHandler, ToolSpec, ToolSpecBuilder};
pub use registry::{RegistryError, ToolOutput, ToolRegistry};
pub use schema::{ArgField, ArgSchema, ArgType, ToolArgs, ValidatedArgs, ValidationError};

// Re-export builtin tools
pub use builtin::{
    build_registry,
    calculator::Calculator,
    string_ops::{StringMode, StringOps},
};

pub use agentic_foundation::strings::{is_tool_error, TOOL_ERROR_TAG};
