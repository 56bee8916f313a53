//! Tool Registry - maps tool names to specs and dispatches calls
//!
//! Registration is last-write-wins: registering a second spec under an
//! existing name silently replaces the first (logged at debug). Names are not
//! otherwise checked for uniqueness.

use crate::schema::ToolArgs;
use crate::{ToolSpec, TOOL_ERROR_TAG};
use agentic_foundation::strings::is_tool_error;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{debug, warn};

/// Dispatch-level failure. Everything else a tool does wrong comes back as a
/// `[tool_error]` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl From<RegistryError> for agentic_foundation::Error {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownTool(name) => agentic_foundation::Error::ToolNotFound(name),
        }
    }
}

/// Result of one dispatched call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Observation text; tool errors carry the `[tool_error]` prefix
    pub text: String,

    /// Named intermediate the handler asked to record, only on success
    pub intermediate: Option<String>,

    pub is_error: bool,
}

impl ToolOutput {
    fn success(text: String, intermediate: Option<String>) -> Self {
        let is_error = is_tool_error(&text);
        Self {
            intermediate: if is_error { None } else { intermediate },
            text,
            is_error,
        }
    }

    fn error(message: impl AsRef<str>) -> Self {
        Self {
            text: format!("{} {}", TOOL_ERROR_TAG, message.as_ref()),
            intermediate: None,
            is_error: true,
        }
    }
}

/// Registry of available tools
///
/// Read-only after setup; `call` and `dispatch` take `&self`, so one registry
/// can be shared behind an `Arc` by independent agents.
pub struct ToolRegistry {
    tools: HashMap<String, ToolSpec>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the builtin tools
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_all(crate::builtin::all_tools());
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, spec: ToolSpec) -> Option<ToolSpec> {
        let name = spec.name().to_string();
        let previous = self.tools.insert(name.clone(), spec);
        if previous.is_some() {
            debug!("Tool '{}' re-registered, previous spec replaced", name);
        }
        previous
    }

    /// Register several tools in order
    pub fn register_all(&mut self, specs: Vec<ToolSpec>) {
        for spec in specs {
            self.register(spec);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.get(name)
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Registered specs, sorted by name
    pub fn specs(&self) -> Vec<&ToolSpec> {
        let mut specs: Vec<&ToolSpec> = self.tools.values().collect();
        specs.sort_by(|a, b| a.name().cmp(b.name()));
        specs
    }

    /// Owned copy of the registered specs, sorted by name
    pub fn list_tools(&self) -> Vec<ToolSpec> {
        self.specs().into_iter().cloned().collect()
    }

    /// Call a tool and return its observation text.
    ///
    /// Fails only when `name` is not registered. Invalid arguments, handler
    /// errors and handler panics all produce `[tool_error] ...` text.
    pub fn call(&self, name: &str, arguments: &ToolArgs) -> Result<String, RegistryError> {
        self.dispatch(name, arguments).map(|output| output.text)
    }

    /// Like `call`, but also reports the handler's intermediate key
    pub fn dispatch(&self, name: &str, arguments: &ToolArgs) -> Result<ToolOutput, RegistryError> {
        let spec = self
            .tools
            .get(name)
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))?;

        let args = match spec.schema().validate(arguments) {
            Ok(args) => args,
            Err(e) => {
                debug!("Rejected arguments for '{}': {}", name, e);
                return Ok(ToolOutput::error(format!(
                    "invalid arguments for '{}': {}",
                    name, e
                )));
            }
        };

        let handler = spec.handler();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            handler
                .call(&args)
                .map(|text| (text, handler.intermediate_key(&args)))
        }));

        let output = match outcome {
            Ok(Ok((text, intermediate))) => ToolOutput::success(text, intermediate),
            Ok(Err(e)) => ToolOutput::error(e.to_string()),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("Tool '{}' panicked: {}", name, message);
                ToolOutput::error(format!("exception in '{}': {}", name, message))
            }
        };

        debug!(tool = name, is_error = output.is_error, "Tool call finished");
        Ok(output)
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
