//! Command implementations

use agentic_agent::{Agent, EvalRunner, EvalSummary, RunOutcome, Suite};
use agentic_foundation::strings::truncate;
use agentic_foundation::{AgentConfig, Result};
use agentic_tool::ToolRegistry;
use std::fmt::Write;
use std::sync::Arc;

/// Observation preview width in step listings
const OBSERVATION_PREVIEW: usize = 120;

fn build_agent(config: &AgentConfig) -> Result<Agent> {
    let registry = Arc::new(ToolRegistry::with_builtins());
    Agent::from_config(registry, config)
}

/// Run a single prompt and print the outcome
pub fn run_once(config: &AgentConfig, prompt: &str) -> Result<()> {
    let agent = build_agent(config)?;
    let outcome = agent.run(prompt)?;
    print!("{}", render_outcome(prompt, &outcome));
    Ok(())
}

/// Run the configured suite, print per-task lines and write the summary
pub fn run_eval(config: &AgentConfig) -> Result<()> {
    let suite = Suite::load(&config.suite_path)?;
    let runner = EvalRunner::new(build_agent(config)?);
    let summary = runner.run(&suite)?;

    print!("{}", render_summary(&summary));
    let path = summary.write(&config.out_dir)?;
    println!("Saved: {}", path.display());
    Ok(())
}

/// List registered tools with their parameters
pub fn list_tools() {
    let registry = ToolRegistry::with_builtins();
    print!("{}", render_tools(&registry));
}

fn render_outcome(prompt: &str, outcome: &RunOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PROMPT: {}", prompt);
    let _ = writeln!(out, "FINAL: {}", outcome.final_answer);
    let _ = writeln!(out, "TERMINATION: {}", outcome.termination);
    let _ = writeln!(out, "--- history ---");

    for step in &outcome.history {
        let tool = step.tool_name().unwrap_or("-");
        let _ = writeln!(
            out,
            "- step {}: {}  tool={}",
            step.step,
            step.action.kind(),
            tool
        );
        if let Some(observation) = &step.observation {
            let _ = writeln!(out, "  obs: {}", truncate(observation, OBSERVATION_PREVIEW));
        }
    }
    out
}

fn render_summary(summary: &EvalSummary) -> String {
    let mut out = String::new();
    for result in &summary.results {
        let status = if result.passed { "✓" } else { "✗" };
        let _ = writeln!(
            out,
            "{} {}: pred={:?} expected={:?} ({} steps, {})",
            status, result.id, result.pred, result.expected, result.steps, result.termination
        );
    }
    let _ = writeln!(out, "{}", summary.summary_line());
    out
}

fn render_tools(registry: &ToolRegistry) -> String {
    let mut out = String::new();
    for spec in registry.specs() {
        let _ = writeln!(out, "{}: {}", spec.name(), spec.description());
        let _ = writeln!(
            out,
            "  parameters: {}",
            spec.schema().to_json_schema()
        );
    }
    out
}
