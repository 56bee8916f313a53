//! Evaluation runner

use super::report::{EvalSummary, TaskResult};
use super::suite::{Suite, SuiteTask};
use crate::Agent;
use agentic_foundation::Result;
use chrono::Local;
use tracing::info;

/// 1.0 when the trimmed strings are equal, else 0.0
pub fn score_exact(pred: &str, expected: &str) -> f64 {
    if pred.trim() == expected.trim() {
        1.0
    } else {
        0.0
    }
}

/// Runs every task of a suite through one agent
#[derive(Debug, Clone)]
pub struct EvalRunner {
    agent: Agent,
}

impl EvalRunner {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Run the whole suite.
    ///
    /// An unknown tool aborts the run: it means the policy and registry do
    /// not fit together, not that the task failed.
    pub fn run(&self, suite: &Suite) -> Result<EvalSummary> {
        let started = Local::now();
        info!(suite = %suite.name, tasks = suite.len(), "Eval started");

        let results = suite
            .tasks
            .iter()
            .map(|task| self.run_task(task))
            .collect::<Result<Vec<_>>>()?;

        let summary = EvalSummary::new(suite.name.as_str(), results, started);
        info!("{}", summary.summary_line());
        Ok(summary)
    }

    /// Run and score a single task
    pub fn run_task(&self, task: &SuiteTask) -> Result<TaskResult> {
        let outcome = self.agent.run(&task.prompt)?;
        let score = score_exact(&outcome.final_answer, &task.expected);
        let passed = score >= 1.0;

        info!(
            task = %task.id,
            passed,
            "pred={:?} expected={:?}",
            outcome.final_answer,
            task.expected
        );

        Ok(TaskResult {
            id: task.id.clone(),
            prompt: task.prompt.clone(),
            expected: task.expected.clone(),
            steps: outcome.steps(),
            termination: outcome.termination,
            pred: outcome.final_answer,
            score,
            passed,
            history: outcome.history,
        })
    }
}
