//! String ops tool - simple text transforms

use crate::{ToolError, ToolHandler, ToolSpec, ValidatedArgs};
use std::str::FromStr;

/// Supported modes of `string_ops`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringMode {
    Reverse,
    Uppercase,
    Lowercase,
    VowelCount,
    StripSpaces,
}

impl StringMode {
    pub const ALL: [StringMode; 5] = [
        StringMode::Reverse,
        StringMode::Uppercase,
        StringMode::Lowercase,
        StringMode::VowelCount,
        StringMode::StripSpaces,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StringMode::Reverse => "reverse",
            StringMode::Uppercase => "uppercase",
            StringMode::Lowercase => "lowercase",
            StringMode::VowelCount => "vowel_count",
            StringMode::StripSpaces => "strip_spaces",
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            StringMode::Reverse => text.chars().rev().collect(),
            StringMode::Uppercase => text.to_uppercase(),
            StringMode::Lowercase => text.to_lowercase(),
            StringMode::StripSpaces => text.chars().filter(|c| !c.is_whitespace()).collect(),
            StringMode::VowelCount => text
                .chars()
                .filter(|c| "aeiouAEIOU".contains(*c))
                .count()
                .to_string(),
        }
    }

    /// Scratchpad key for modes whose output is commonly fed into a later step
    pub fn intermediate_key(&self) -> Option<&'static str> {
        match self {
            StringMode::Uppercase => Some("uppercased"),
            StringMode::Lowercase => Some("lowercased"),
            _ => None,
        }
    }
}

impl FromStr for StringMode {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StringMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ToolError::failed("unknown mode"))
    }
}

/// String ops tool
pub struct StringOps;

impl StringOps {
    pub const NAME: &'static str = "string_ops";

    pub fn new() -> Self {
        Self
    }

    pub fn spec() -> ToolSpec {
        let modes: Vec<&str> = StringMode::ALL.iter().map(|m| m.as_str()).collect();
        ToolSpec::builder(
            Self::NAME,
            "Simple string operations (reverse/uppercase/lowercase/vowel_count/strip_spaces).",
        )
        .enum_param("mode", "Operation to apply", &modes, true)
        .string_param("text", "Input text", true)
        .handler(Self::new())
    }
}

impl Default for StringOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for StringOps {
    fn call(&self, args: &ValidatedArgs) -> Result<String, ToolError> {
        let mode: StringMode = args.require_str("mode")?.parse()?;
        let text = args.require_str("text")?;
        Ok(mode.apply(text))
    }

    fn intermediate_key(&self, args: &ValidatedArgs) -> Option<String> {
        let mode: StringMode = args.get_str("mode")?.parse().ok()?;
        mode.intermediate_key().map(str::to_string)
    }
}
