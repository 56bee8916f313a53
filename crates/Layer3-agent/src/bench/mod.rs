//! # Evaluation harness
//!
//! Runs an agent over a suite of prompts with expected answers and scores
//! the results.
//!
//! - **Suite**: tasks loaded from JSON
//! - **Runner**: runs every task through one agent
//! - **Report**: per-task results and the summary written to disk

mod report;
mod runner;
mod suite;

pub use report::{EvalSummary, TaskResult};
pub use runner::{score_exact, EvalRunner};
pub use suite::{Suite, SuiteTask};
