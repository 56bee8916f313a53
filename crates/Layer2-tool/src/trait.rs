//! Tool handler trait and the immutable tool registration record

use crate::schema::{ArgField, ArgSchema, ArgType, ValidatedArgs};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a handler.
///
/// The registry renders it as `[tool_error] {message}`; it never reaches the
/// agent loop as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("{0}")]
    Failed(String),

    #[error("missing argument '{0}'")]
    MissingArgument(String),
}

impl ToolError {
    pub fn failed(message: impl Into<String>) -> Self {
        ToolError::Failed(message.into())
    }
}

/// Executes a tool on validated arguments.
///
/// Handlers placed in a registry that is shared across threads must not hold
/// shared mutable state; dispatch takes no locks.
pub trait ToolHandler: Send + Sync {
    /// Run the tool
    fn call(&self, args: &ValidatedArgs) -> Result<String, ToolError>;

    /// Key under which a successful result is also recorded as a named
    /// intermediate value (`key=result`) in the scratchpad.
    fn intermediate_key(&self, _args: &ValidatedArgs) -> Option<String> {
        None
    }
}

impl<F> ToolHandler for F
where
    F: Fn(&ValidatedArgs) -> Result<String, ToolError> + Send + Sync,
{
    fn call(&self, args: &ValidatedArgs) -> Result<String, ToolError> {
        self(args)
    }
}

/// Registration record of a tool: name, description, argument schema and
/// handler. Immutable once built.
#[derive(Clone)]
pub struct ToolSpec {
    name: String,
    description: String,
    schema: ArgSchema,
    handler: Arc<dyn ToolHandler>,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ArgSchema,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler: Arc::new(handler),
        }
    }

    /// Start building a spec
    pub fn builder(name: impl Into<String>, description: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder::new(name, description)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &ArgSchema {
        &self.schema
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Builder for ToolSpec
pub struct ToolSpecBuilder {
    name: String,
    description: String,
    schema: ArgSchema,
}

impl ToolSpecBuilder {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema: ArgSchema::new(),
        }
    }

    fn param(
        mut self,
        name: impl Into<String>,
        ty: ArgType,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let field = ArgField::new(name, ty, description);
        self.schema
            .insert(if required { field } else { field.optional() });
        self
    }

    /// Add a string parameter
    pub fn string_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.param(name, ArgType::String, description, required)
    }

    /// Add a number parameter
    pub fn number_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.param(name, ArgType::Number, description, required)
    }

    /// Add an integer parameter
    pub fn integer_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.param(name, ArgType::Integer, description, required)
    }

    /// Add a boolean parameter
    pub fn boolean_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.param(name, ArgType::Boolean, description, required)
    }

    /// Add a string parameter restricted to `values`
    pub fn enum_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        required: bool,
    ) -> Self {
        let field = ArgField::new(name, ArgType::String, description).one_of(values);
        self.schema
            .insert(if required { field } else { field.optional() });
        self
    }

    /// Give an already declared parameter a default value
    pub fn default_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Some(field) = self.schema.get_mut(name) {
            field.default = Some(value.into());
            field.required = false;
        }
        self
    }

    /// Finish with the handler
    pub fn handler(self, handler: impl ToolHandler + 'static) -> ToolSpec {
        ToolSpec::new(self.name, self.description, self.schema, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo(args: &ValidatedArgs) -> Result<String, ToolError> {
        let times = args.get_integer("times").unwrap_or(1).max(0) as usize;
        Ok(args.require_str("text")?.repeat(times))
    }

    #[test]
    fn test_builder() {
        let spec = ToolSpec::builder("echo", "Repeat text")
            .string_param("text", "Text to repeat", true)
            .integer_param("times", "How many times", false)
            .default_value("times", 2)
            .handler(echo);

        assert_eq!(spec.name(), "echo");
        assert_eq!(spec.schema().required(), vec!["text"]);

        let args = spec
            .schema()
            .validate(json!({"text": "ab"}).as_object().unwrap())
            .unwrap();
        assert_eq!(spec.handler().call(&args).unwrap(), "abab");
        assert_eq!(spec.handler().intermediate_key(&args), None);
    }

    #[test]
    fn test_closure_handler() {
        let spec = ToolSpec::builder("fail", "Always fails")
            .handler(|_: &ValidatedArgs| -> Result<String, ToolError> {
                Err(ToolError::failed("nope"))
            });
        let result = spec.handler().call(&ValidatedArgs::default());
        assert_eq!(result, Err(ToolError::Failed("nope".to_string())));
    }

    #[test]
    fn test_debug_omits_handler() {
        let spec = ToolSpec::builder("echo", "Repeat text").handler(echo);
        let debug = format!("{:?}", spec);
        assert!(debug.contains("echo"));
        assert!(debug.contains(".."));
    }
}
