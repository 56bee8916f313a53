//! Rule-based policy - a deterministic baseline driven by prompt patterns

use super::Policy;
use crate::{Action, Scratchpad, ToolCall};
use agentic_tool::{Calculator, StringMode, StringOps};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Answer when no rule applies
pub const NO_RULE_MATCHED: &str = "(no rule matched)";

/// Tag recorded by `string_ops` in uppercase mode
const UPPERCASED: &str = "uppercased";

struct Rules {
    uppercase_then_reverse: Regex,
    compute: Regex,
    reverse: Regex,
    count_vowels: Regex,
}

fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| {
        let compile = |pattern: &str| Regex::new(pattern).expect("valid rule pattern");
        Rules {
            uppercase_then_reverse: compile(r"(?i)Uppercase\s+then\s+reverse:\s*'([^']+)'"),
            compute: compile(r"(?i)Compute\s+(.+?)(\.|$)"),
            reverse: compile(r"(?i)Reverse\s+the\s+string:\s*'([^']+)'"),
            count_vowels: compile(r"(?i)Count\s+vowels\s+in:\s*'([^']+)'"),
        }
    })
}

fn capture<'a>(regex: &Regex, prompt: &'a str) -> Option<&'a str> {
    regex
        .captures(prompt)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn string_ops(mode: StringMode, text: &str) -> Action {
    Action::call(
        ToolCall::new(StringOps::NAME)
            .arg("mode", mode.as_str())
            .arg("text", text),
    )
}

fn finalize_with_last_observation(scratchpad: &Scratchpad) -> Action {
    Action::final_answer(scratchpad.last_observation().unwrap_or_default().trim())
}

/// Regex-driven baseline policy.
///
/// Rules, first match wins:
/// 1. `Uppercase then reverse: '<t>'` runs uppercase, then reverse on the
///    `uppercased` intermediate, then finalizes
/// 2. any observation on the scratchpad is returned as the answer
/// 3. `Compute <expr>` calls the calculator
/// 4. `Reverse the string: '<t>'` and `Count vowels in: '<t>'` call `string_ops`
/// 5. otherwise finalize with `(no rule matched)`
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedPolicy;

impl RuleBasedPolicy {
    pub fn new() -> Self {
        Self
    }

    fn uppercase_then_reverse(&self, text: &str, scratchpad: &Scratchpad) -> Action {
        match scratchpad.since_tag(UPPERCASED) {
            // The uppercase call failed; surface its error.
            None if scratchpad.has_observation() => finalize_with_last_observation(scratchpad),
            None => string_ops(StringMode::Uppercase, text),
            Some(after) if after.iter().filter(|e| e.is_observation()).count() <= 1 => {
                let upper = scratchpad.latest(UPPERCASED).unwrap_or(text);
                string_ops(StringMode::Reverse, upper)
            }
            Some(_) => finalize_with_last_observation(scratchpad),
        }
    }
}

impl Policy for RuleBasedPolicy {
    fn name(&self) -> &str {
        "rule"
    }

    fn act(&self, prompt: &str, scratchpad: &Scratchpad) -> Action {
        let rules = rules();

        if let Some(text) = capture(&rules.uppercase_then_reverse, prompt) {
            return self.uppercase_then_reverse(text, scratchpad);
        }

        if scratchpad.has_observation() {
            return finalize_with_last_observation(scratchpad);
        }

        if let Some(expr) = capture(&rules.compute, prompt) {
            let expr = expr.replace('×', "*").replace('÷', "/");
            debug!("Compute rule matched: {}", expr);
            return Action::call(ToolCall::new(Calculator::NAME).arg("expr", expr));
        }

        if let Some(text) = capture(&rules.reverse, prompt) {
            return string_ops(StringMode::Reverse, text);
        }

        if let Some(text) = capture(&rules.count_vowels, prompt) {
            return string_ops(StringMode::VowelCount, text);
        }

        Action::final_answer(NO_RULE_MATCHED)
    }
}
