//! Shared string constants and display helpers

// ============================================================================
// Scratchpad / observation tags
// ============================================================================

/// Prefix of every tool-level error string
pub const TOOL_ERROR_TAG: &str = "[tool_error]";

/// Prefix of a thought line in the rendered scratchpad
pub const THOUGHT_TAG: &str = "[thought]";

/// Prefix of an observation line in the rendered scratchpad
pub const OBSERVATION_TAG: &str = "[observation]";

/// Final answer reported when the step budget runs out
pub const MAX_STEPS_SENTINEL: &str = "(max_steps reached)";

// ============================================================================
// Helpers
// ============================================================================

/// Whether `s` is a tool error string
pub fn is_tool_error(s: &str) -> bool {
    s.trim_start().starts_with(TOOL_ERROR_TAG)
}

/// Truncate to at most `max_chars` characters on one line, appending `...`
pub fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_chars {
        s
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_tool_error() {
        assert!(is_tool_error("[tool_error] division by zero"));
        assert!(!is_tool_error("136"));
        assert!(!is_tool_error("see [tool_error] later"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("line one\nline two", 8), "line one...");
        assert_eq!(truncate("ÄÖÜäöü", 3), "ÄÖÜ...");
    }
}
