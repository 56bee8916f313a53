//! Actions, tool calls and per-step records

use agentic_tool::ToolArgs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A request to run one registered tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Registered tool name
    pub name: String,

    /// Loosely typed arguments, checked against the tool's schema at dispatch
    #[serde(default)]
    pub arguments: ToolArgs,
}

impl ToolCall {
    /// Create a call with no arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: ToolArgs::new(),
        }
    }

    /// Create a call with the given arguments
    pub fn with_arguments(name: impl Into<String>, arguments: ToolArgs) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Add one argument
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }
}

/// Discriminant of an [`Action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Tool,
    Final,
    Think,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Tool => "tool",
            ActionKind::Final => "final",
            ActionKind::Think => "think",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a policy decided to do next
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Run a tool. A missing call makes the step a no-op.
    Tool {
        #[serde(default)]
        tool_call: Option<ToolCall>,
    },

    /// Stop with an answer
    Final {
        #[serde(rename = "final")]
        text: String,
    },

    /// Record a thought on the scratchpad
    Think { thought: String },
}

impl Action {
    /// Tool action calling `name` with `arguments`
    pub fn tool(name: impl Into<String>, arguments: ToolArgs) -> Self {
        Action::Tool {
            tool_call: Some(ToolCall::with_arguments(name, arguments)),
        }
    }

    /// Tool action from a prepared call
    pub fn call(tool_call: ToolCall) -> Self {
        Action::Tool {
            tool_call: Some(tool_call),
        }
    }

    pub fn final_answer(text: impl Into<String>) -> Self {
        Action::Final { text: text.into() }
    }

    pub fn think(thought: impl Into<String>) -> Self {
        Action::Think {
            thought: thought.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Tool { .. } => ActionKind::Tool,
            Action::Final { .. } => ActionKind::Final,
            Action::Think { .. } => ActionKind::Think,
        }
    }

    /// The tool call, if this is a tool action that carries one
    pub fn tool_call(&self) -> Option<&ToolCall> {
        match self {
            Action::Tool { tool_call } => tool_call.as_ref(),
            _ => None,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Action::Final { .. })
    }
}

/// Record of one executed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// 1-based step number
    pub step: usize,

    pub action: Action,

    /// Tool output, present only for tool actions that made a call
    pub observation: Option<String>,
}

impl StepResult {
    pub fn new(step: usize, action: Action, observation: Option<String>) -> Self {
        Self {
            step,
            action,
            observation,
        }
    }

    /// Name of the tool called in this step, if any
    pub fn tool_name(&self) -> Option<&str> {
        self.action.tool_call().map(|call| call.name.as_str())
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The policy returned a final action
    Finalized,

    /// The step budget ran out first
    Exhausted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Finalized => write!(f, "finalized"),
            Termination::Exhausted => write!(f, "exhausted"),
        }
    }
}
