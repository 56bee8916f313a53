//! Core agent implementation
//!
//! One run is a bounded loop: ask the policy for an action, apply it, record
//! the step. It ends when the policy returns a final action or the step
//! budget is spent.

use crate::policy::{Policy, PolicyKind};
use crate::{Action, Scratchpad, StepResult, Termination, ToolCall};
use agentic_foundation::strings::MAX_STEPS_SENTINEL;
use agentic_foundation::{AgentConfig, Error, Result, DEFAULT_MAX_STEPS};
use agentic_tool::ToolRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, debug_span, field, info, warn};

/// Result of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Final answer, or `(max_steps reached)` when exhausted
    pub final_answer: String,

    pub termination: Termination,

    /// One entry per executed step, in order
    pub history: Vec<StepResult>,

    /// Scratchpad as it stood when the run ended
    pub scratchpad: Scratchpad,
}

impl RunOutcome {
    pub fn is_finalized(&self) -> bool {
        self.termination == Termination::Finalized
    }

    /// Number of steps taken
    pub fn steps(&self) -> usize {
        self.history.len()
    }
}

/// Per-run state, dropped when the run returns
struct AgentState {
    prompt: String,
    scratchpad: Scratchpad,
    steps: usize,
}

impl AgentState {
    fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            scratchpad: Scratchpad::new(),
            steps: 0,
        }
    }
}

/// The agent: a policy driving tools from a shared registry
#[derive(Clone)]
pub struct Agent {
    registry: Arc<ToolRegistry>,
    policy: Arc<dyn Policy>,
    max_steps: usize,
}

impl Agent {
    /// Create an agent with the default step budget
    pub fn new(registry: Arc<ToolRegistry>, policy: Arc<dyn Policy>) -> Self {
        Self {
            registry,
            policy,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Create an agent from loaded configuration
    pub fn from_config(registry: Arc<ToolRegistry>, config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        let kind: PolicyKind = config.policy.parse()?;
        Ok(Self::new(registry, kind.build()).with_max_steps(config.max_steps))
    }

    /// Set the step budget used by [`Agent::run`]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn policy(&self) -> &dyn Policy {
        self.policy.as_ref()
    }

    /// Run with the configured step budget
    pub fn run(&self, prompt: &str) -> Result<RunOutcome> {
        self.run_with(prompt, self.max_steps)
    }

    /// Run with an explicit step budget.
    ///
    /// Tool failures are observations, not errors. The only errors are a
    /// zero budget and an action naming an unregistered tool.
    pub fn run_with(&self, prompt: &str, max_steps: usize) -> Result<RunOutcome> {
        if max_steps == 0 {
            return Err(Error::InvalidInput("max_steps must be at least 1".into()));
        }

        info!(policy = self.policy.name(), max_steps, "Agent run started");

        let mut state = AgentState::new(prompt);
        let mut history = Vec::with_capacity(max_steps);

        for step in 1..=max_steps {
            state.steps = step;
            let span = debug_span!("agent_step", step, kind = field::Empty);
            let _enter = span.enter();

            let action = self.policy.act(&state.prompt, &state.scratchpad);
            span.record("kind", action.kind().as_str());

            match &action {
                Action::Final { text } => {
                    let final_answer = text.clone();
                    history.push(StepResult::new(step, action, None));
                    info!(steps = state.steps, "Agent finalized");
                    return Ok(RunOutcome {
                        final_answer,
                        termination: Termination::Finalized,
                        history,
                        scratchpad: state.scratchpad,
                    });
                }
                Action::Think { thought } => {
                    debug!("Thought: {}", thought);
                    state.scratchpad.push_thought(thought.as_str());
                    history.push(StepResult::new(step, action, None));
                }
                Action::Tool {
                    tool_call: Some(call),
                } => {
                    let observation = self.execute(call, &mut state.scratchpad)?;
                    history.push(StepResult::new(step, action, Some(observation)));
                }
                Action::Tool { tool_call: None } => {
                    warn!("Tool action without a tool call, step skipped");
                    history.push(StepResult::new(step, action, None));
                }
            }
        }

        warn!(steps = state.steps, "Max steps reached");
        Ok(RunOutcome {
            final_answer: MAX_STEPS_SENTINEL.to_string(),
            termination: Termination::Exhausted,
            history,
            scratchpad: state.scratchpad,
        })
    }

    /// Dispatch one call and record its intermediate and observation
    fn execute(&self, call: &ToolCall, scratchpad: &mut Scratchpad) -> Result<String> {
        debug!("Executing tool: {}", call.name);

        let output = self
            .registry
            .dispatch(&call.name, &call.arguments)
            .map_err(|e| {
                warn!("Policy requested an unregistered tool: {}", call.name);
                Error::from(e)
            })?;

        if output.is_error {
            debug!("Tool '{}' returned an error: {}", call.name, output.text);
        }

        if let Some(key) = &output.intermediate {
            scratchpad.push_tagged(key.as_str(), output.text.as_str());
        }
        scratchpad.push_observation(output.text.as_str());

        Ok(output.text)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("policy", &self.policy.name())
            .field("max_steps", &self.max_steps)
            .field("tools", &self.registry.names())
            .finish()
    }
}
