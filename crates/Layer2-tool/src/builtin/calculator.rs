//! Calculator tool - evaluate a basic arithmetic expression

use crate::expr::{evaluate, format_number};
use crate::{ToolError, ToolHandler, ToolSpec, ValidatedArgs};
use regex::Regex;
use std::sync::OnceLock;

/// Characters an expression may contain before it is parsed at all
const ALLOWED_PATTERN: &str = r"^[0-9\s+\-*/().]+$";

/// Calculator tool: digits, `+ - * / ( ) .` and whitespace only
pub struct Calculator;

impl Calculator {
    pub const NAME: &'static str = "calculator";

    pub fn new() -> Self {
        Self
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::builder(Self::NAME, "Evaluate a basic arithmetic expression.")
            .string_param(
                "expr",
                "A simple arithmetic expression, e.g., '19*7+3'",
                true,
            )
            .handler(Self::new())
    }

    /// Whether `expr` passes the character whitelist
    pub fn is_allowed(expr: &str) -> bool {
        static ALLOWED: OnceLock<Regex> = OnceLock::new();
        ALLOWED
            .get_or_init(|| Regex::new(ALLOWED_PATTERN).expect("valid whitelist pattern"))
            .is_match(expr)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for Calculator {
    fn call(&self, args: &ValidatedArgs) -> Result<String, ToolError> {
        let expr = args.require_str("expr")?;
        if !Self::is_allowed(expr) {
            return Err(ToolError::failed("unsupported characters in expression"));
        }

        evaluate(expr)
            .map(format_number)
            .map_err(|e| ToolError::failed(e.to_string()))
    }
}
