//! # agentic-agent
//!
//! The agent loop for agentic: a policy picks the next action from the
//! prompt and a scratchpad, the loop applies it against a shared
//! `ToolRegistry`, and the run ends on a final answer or after `max_steps`.
//!
//! ## Components
//!
//! - **Action**: `tool` / `final` / `think`, plus per-step records
//! - **Scratchpad**: append-only thoughts, observations and tagged intermediates
//! - **Policy**: next-action selection (`RuleBasedPolicy`, `StubPolicy`)
//! - **Agent**: the bounded step loop
//! - **Bench**: suite evaluation and run summaries
//!
//! ## Example
//!
//! ```
//! use agentic_agent::{Agent, RuleBasedPolicy};
//! use agentic_tool::ToolRegistry;
//! use std::sync::Arc;
//!
//! let agent = Agent::new(
//!     Arc::new(ToolRegistry::with_builtins()),
//!     Arc::new(RuleBasedPolicy::new()),
//! );
//! let outcome = agent.run("Compute 19*7 + 3.").unwrap();
//! assert_eq!(outcome.final_answer, "136");
//! ```

pub mod action;
pub mod agent;
pub mod bench;
pub mod policy;
pub mod scratchpad;

// ============================================================================
// Primary Exports
// ============================================================================

pub use action::{Action, ActionKind, StepResult, Termination, ToolCall};
pub use agent::{Agent, RunOutcome};
pub use scratchpad::{Scratchpad, ScratchpadEntry};

// Policies
pub use policy::{Policy, PolicyKind, RuleBasedPolicy, StubPolicy};

// Evaluation
pub use bench::{score_exact, EvalRunner, EvalSummary, Suite, SuiteTask, TaskResult};
