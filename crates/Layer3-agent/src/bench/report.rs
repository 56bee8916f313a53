//! Evaluation results and the summary file

use crate::{StepResult, Termination};
use agentic_foundation::{write_json, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Result of one suite task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub id: String,
    pub prompt: String,
    pub expected: String,

    /// The agent's final answer
    pub pred: String,

    pub score: f64,
    pub passed: bool,
    pub termination: Termination,

    /// Steps the run took
    pub steps: usize,

    /// Per-step trace of the run
    #[serde(default)]
    pub history: Vec<StepResult>,
}

/// Summary of one suite run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
    pub suite: String,

    /// `eval-{suite}-{YYYYmmdd-HHMMSS}`, also the summary file stem
    pub run_id: String,

    pub passed: usize,
    pub total: usize,

    /// `passed / max(1, total)`
    pub accuracy: f64,

    pub results: Vec<TaskResult>,
}

impl EvalSummary {
    /// Build a summary for results produced at `started`
    pub fn new(suite: impl Into<String>, results: Vec<TaskResult>, started: DateTime<Local>) -> Self {
        let suite = suite.into();
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();

        Self {
            run_id: Self::run_id_for(&suite, &started),
            suite,
            passed,
            total,
            accuracy: passed as f64 / total.max(1) as f64,
            results,
        }
    }

    pub fn run_id_for(suite: &str, started: &DateTime<Local>) -> String {
        format!("eval-{}-{}", suite, started.format("%Y%m%d-%H%M%S"))
    }

    /// Path the summary is written to under `out_dir`
    pub fn output_path(&self, out_dir: impl AsRef<Path>) -> PathBuf {
        out_dir.as_ref().join(format!("{}.json", self.run_id))
    }

    /// Write `{out_dir}/{run_id}.json`, creating `out_dir` if needed
    pub fn write(&self, out_dir: impl AsRef<Path>) -> Result<PathBuf> {
        write_json(self.output_path(out_dir), self)
    }

    /// One-line human summary
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {}/{} passed (accuracy {:.2})",
            self.suite, self.passed, self.total, self.accuracy
        )
    }
}
