//! Placeholder for a model-backed policy

use super::Policy;
use crate::{Action, Scratchpad};

/// Answer given by [`StubPolicy`]
pub const STUB_ANSWER: &str = "LLM policy not configured.";

/// Always finalizes with [`STUB_ANSWER`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPolicy;

impl StubPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for StubPolicy {
    fn name(&self) -> &str {
        "stub"
    }

    fn act(&self, _prompt: &str, _scratchpad: &Scratchpad) -> Action {
        Action::final_answer(STUB_ANSWER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_finalizes() {
        let policy = StubPolicy::new();
        let mut pad = Scratchpad::new();
        assert_eq!(policy.act("Compute 1+1.", &pad), Action::final_answer(STUB_ANSWER));

        pad.push_observation("2");
        assert_eq!(policy.act("anything", &pad), Action::final_answer(STUB_ANSWER));
    }
}
