//! End-to-end runs of the agent loop against the builtin registry

use agentic_agent::{
    Action, ActionKind, Agent, EvalRunner, Policy, RuleBasedPolicy, Scratchpad, Suite,
    Termination, ToolCall,
};
use agentic_foundation::strings::MAX_STEPS_SENTINEL;
use agentic_foundation::Error;
use agentic_tool::{ToolError, ToolRegistry, ToolSpec, ValidatedArgs};
use std::sync::Arc;

fn builtins() -> Arc<ToolRegistry> {
    Arc::new(ToolRegistry::with_builtins())
}

/// Thinks `thoughts` times, then finalizes with the number of thoughts seen
struct ThinkThenFinal {
    thoughts: usize,
}

impl Policy for ThinkThenFinal {
    fn name(&self) -> &str {
        "think-then-final"
    }

    fn act(&self, _prompt: &str, scratchpad: &Scratchpad) -> Action {
        if scratchpad.len() < self.thoughts {
            Action::think(format!("thought {}", scratchpad.len() + 1))
        } else {
            Action::final_answer(scratchpad.len().to_string())
        }
    }
}

/// Never finalizes
struct AlwaysThink;

impl Policy for AlwaysThink {
    fn name(&self) -> &str {
        "always-think"
    }

    fn act(&self, _prompt: &str, _scratchpad: &Scratchpad) -> Action {
        Action::think("still thinking")
    }
}

/// Only ever emits tool actions without a call
struct AlwaysMalformed;

impl Policy for AlwaysMalformed {
    fn name(&self) -> &str {
        "always-malformed"
    }

    fn act(&self, _prompt: &str, _scratchpad: &Scratchpad) -> Action {
        Action::Tool { tool_call: None }
    }
}

/// Malformed once, then final
struct MalformedOnce {
    calls: std::sync::atomic::AtomicUsize,
}

impl Policy for MalformedOnce {
    fn name(&self) -> &str {
        "malformed-once"
    }

    fn act(&self, _prompt: &str, _scratchpad: &Scratchpad) -> Action {
        let n = self
            .calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if n == 0 {
            Action::Tool { tool_call: None }
        } else {
            Action::final_answer("done")
        }
    }
}

#[test]
fn test_uppercase_then_reverse() {
    let agent = Agent::new(builtins(), Arc::new(RuleBasedPolicy::new()));
    let outcome = agent.run("Uppercase then reverse: 'agentic'.").unwrap();

    assert_eq!(outcome.final_answer, "CITNEGA");
    assert_eq!(outcome.termination, Termination::Finalized);

    let kinds: Vec<ActionKind> = outcome.history.iter().map(|s| s.action.kind()).collect();
    assert_eq!(
        kinds,
        vec![ActionKind::Tool, ActionKind::Tool, ActionKind::Final]
    );

    let rendered = outcome.scratchpad.render();
    let tag = rendered.find("uppercased=AGENTIC").unwrap();
    let observation = rendered.find("[observation] AGENTIC").unwrap();
    assert!(tag < observation);
    assert!(rendered.ends_with("[observation] CITNEGA\n"));
}

#[test]
fn test_finalizes_after_exactly_k_plus_one_steps() {
    for k in 0..4 {
        let agent = Agent::new(builtins(), Arc::new(ThinkThenFinal { thoughts: k }))
            .with_max_steps(10);
        let outcome = agent.run("ignored").unwrap();

        assert_eq!(outcome.termination, Termination::Finalized);
        assert_eq!(outcome.steps(), k + 1);
        assert_eq!(outcome.final_answer, k.to_string());
        for (i, step) in outcome.history.iter().enumerate() {
            assert_eq!(step.step, i + 1);
        }
    }
}

#[test]
fn test_thoughts_render_on_scratchpad() {
    let agent = Agent::new(builtins(), Arc::new(ThinkThenFinal { thoughts: 2 }));
    let outcome = agent.run("ignored").unwrap();
    assert_eq!(
        outcome.scratchpad.render(),
        "[thought] thought 1\n[thought] thought 2\n"
    );
    assert!(outcome.history.iter().all(|s| s.observation.is_none()));
}

#[test]
fn test_exhaustion_has_exactly_max_steps_entries() {
    for max_steps in [1, 3, 6] {
        let agent = Agent::new(builtins(), Arc::new(AlwaysThink));
        let outcome = agent.run_with("loop forever", max_steps).unwrap();

        assert_eq!(outcome.final_answer, MAX_STEPS_SENTINEL);
        assert_eq!(outcome.termination, Termination::Exhausted);
        assert_eq!(outcome.history.len(), max_steps);
    }
}

#[test]
fn test_default_budget_is_six() {
    let agent = Agent::new(builtins(), Arc::new(AlwaysThink));
    let outcome = agent.run("loop forever").unwrap();
    assert_eq!(outcome.steps(), 6);
}

#[test]
fn test_malformed_tool_action_is_a_noop_step() {
    let agent = Agent::new(builtins(), Arc::new(AlwaysMalformed));
    let outcome = agent.run_with("x", 3).unwrap();

    assert_eq!(outcome.termination, Termination::Exhausted);
    assert!(outcome.scratchpad.is_empty());
    assert!(outcome.history.iter().all(|s| s.observation.is_none()));

    let agent = Agent::new(
        builtins(),
        Arc::new(MalformedOnce {
            calls: Default::default(),
        }),
    );
    let outcome = agent.run("x").unwrap();
    assert_eq!(outcome.final_answer, "done");
    assert_eq!(outcome.steps(), 2);
    assert_eq!(outcome.history[0].action, Action::Tool { tool_call: None });
}

#[test]
fn test_unknown_tool_propagates() {
    struct Ghost;
    impl Policy for Ghost {
        fn name(&self) -> &str {
            "ghost"
        }
        fn act(&self, _prompt: &str, _scratchpad: &Scratchpad) -> Action {
            Action::call(ToolCall::new("nonexistent_tool"))
        }
    }

    let agent = Agent::new(builtins(), Arc::new(Ghost));
    let err = agent.run("x").unwrap_err();
    assert!(matches!(err, Error::ToolNotFound(name) if name == "nonexistent_tool"));
}

#[test]
fn test_custom_tool_error_becomes_observation() {
    let mut registry = ToolRegistry::with_builtins();
    registry.register(
        ToolSpec::builder("flaky", "Always fails")
            .handler(|_: &ValidatedArgs| -> Result<String, ToolError> {
                Err(ToolError::failed("upstream unavailable"))
            }),
    );

    struct CallFlaky;
    impl Policy for CallFlaky {
        fn name(&self) -> &str {
            "flaky"
        }
        fn act(&self, _prompt: &str, scratchpad: &Scratchpad) -> Action {
            match scratchpad.last_observation() {
                Some(obs) => Action::final_answer(obs),
                None => Action::call(ToolCall::new("flaky")),
            }
        }
    }

    let agent = Agent::new(Arc::new(registry), Arc::new(CallFlaky));
    let outcome = agent.run("x").unwrap();
    assert_eq!(outcome.final_answer, "[tool_error] upstream unavailable");
    assert!(outcome.is_finalized());
}

#[test]
fn test_agents_share_one_registry_across_threads() {
    let registry = builtins();
    let prompts = [
        ("Compute 19*7 + 3.", "136"),
        ("Reverse the string: 'QueenUniversity'.", "ytisrevinUneeuQ"),
        ("Count vowels in: 'Intelligent Mining Systems'.", "7"),
        ("Uppercase then reverse: 'agentic'.", "CITNEGA"),
    ];

    let handles: Vec<_> = prompts
        .iter()
        .map(|(prompt, expected)| {
            let agent = Agent::new(Arc::clone(&registry), Arc::new(RuleBasedPolicy::new()));
            let prompt = prompt.to_string();
            let expected = expected.to_string();
            std::thread::spawn(move || {
                let outcome = agent.run(&prompt).unwrap();
                assert_eq!(outcome.final_answer, expected);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_shipped_suite_passes_with_rule_policy() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../suites/basic.json");
    let suite = Suite::load(&path).unwrap();

    let runner = EvalRunner::new(Agent::new(builtins(), Arc::new(RuleBasedPolicy::new())));
    let summary = runner.run(&suite).unwrap();

    assert_eq!(summary.total, suite.len());
    assert_eq!(summary.passed, summary.total);
    assert_eq!(summary.accuracy, 1.0);

    let dir = tempfile::tempdir().unwrap();
    let written = summary.write(dir.path()).unwrap();
    assert!(written.ends_with(format!("{}.json", summary.run_id)));
    assert!(written.exists());
}
