//! agentic CLI - Main entry point

mod cli;

use agentic_agent::PolicyKind;
use agentic_foundation::AgentConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// agentic - a minimal agent step loop with schema-validated tools
#[derive(Parser, Debug)]
#[command(name = "agentic")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Step budget per run (overrides config)
    #[arg(long, global = true)]
    max_steps: Option<usize>,

    /// Policy to use: rule or stub (overrides config)
    #[arg(long, global = true)]
    policy: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one prompt and print the step history
    Run {
        /// Built-in demo prompt
        #[arg(short, long, value_enum, default_value_t = DemoTask::Quick)]
        task: DemoTask,

        /// Custom prompt (takes precedence over --task)
        #[arg(short, long)]
        prompt: Option<String>,
    },
    /// Run an evaluation suite and write the summary
    Eval {
        /// Suite file (overrides config)
        #[arg(short, long)]
        suite: Option<PathBuf>,

        /// Directory for the summary file (overrides config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// List registered tools
    Tools,
}

impl Args {
    /// Apply the global flags over a loaded config, then validate the result
    fn apply_overrides(&self, config: &mut AgentConfig) -> anyhow::Result<()> {
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(policy) = &self.policy {
            let kind: PolicyKind = policy.parse()?;
            config.policy = kind.as_str().to_string();
        }
        config.validate()?;
        Ok(())
    }
}

/// Demo prompts for `run`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoTask {
    Quick,
    Strings,
    Vowels,
    Shout,
}

impl DemoTask {
    pub fn prompt(&self) -> &'static str {
        match self {
            DemoTask::Quick => "Compute 19*7 + 3.",
            DemoTask::Strings => "Reverse the string: 'QueenUniversity'.",
            DemoTask::Vowels => "Count vowels in: 'Intelligent Mining Systems'.",
            DemoTask::Shout => "Uppercase then reverse: 'agentic'.",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration, then apply command line overrides
    let mut config = AgentConfig::load()?;
    args.apply_overrides(&mut config)?;
    tracing::debug!("Using config: {:?}", config);

    match args.command {
        Command::Run { task, prompt } => {
            let prompt = prompt.unwrap_or_else(|| task.prompt().to_string());
            cli::run_once(&config, &prompt)?;
        }
        Command::Eval { suite, out_dir } => {
            if let Some(suite) = suite {
                config.suite_path = suite;
            }
            if let Some(out_dir) = out_dir {
                config.out_dir = out_dir;
            }
            cli::run_eval(&config)?;
        }
        Command::Tools => cli::list_tools(),
    }

    Ok(())
}
