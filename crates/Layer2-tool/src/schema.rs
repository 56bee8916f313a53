//! Argument schemas
//!
//! A schema is an ordered list of fields, each with a type, a required flag,
//! an optional default and an optional set of allowed string values. Arguments
//! stay loosely typed (`serde_json` values) until dispatch, where
//! `ArgSchema::validate` checks and coerces them into `ValidatedArgs`.
//!
//! Coercion is lax in the same places a typical declarative model is lax:
//! numeric strings are accepted for `number` / `integer`, and
//! `"true"` / `"false"` (plus `yes`/`no`/`on`/`off`/`1`/`0`) for `boolean`.
//! Strings are never produced from other types. Unknown fields are ignored.

use crate::r#trait::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Raw, unvalidated tool arguments
pub type ToolArgs = Map<String, Value>;

// ============================================================================
// Field types
// ============================================================================

/// Type of a single argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ArgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgType::String => "string",
            ArgType::Number => "number",
            ArgType::Integer => "integer",
            ArgType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgField {
    pub name: String,

    pub description: String,

    #[serde(rename = "type")]
    pub ty: ArgType,

    pub required: bool,

    /// Filled in when the argument is absent or null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Allowed values for string arguments
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl ArgField {
    /// A required field
    pub fn new(name: impl Into<String>, ty: ArgType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ty,
            required: true,
            default: None,
            allowed: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set a default; a field with a default is never reported missing
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    fn is_mandatory(&self) -> bool {
        self.required && self.default.is_none()
    }

    fn coerce(&self, value: &Value) -> Result<Value, String> {
        let coerced = match self.ty {
            ArgType::String => match value {
                Value::String(_) => Some(value.clone()),
                _ => None,
            },
            ArgType::Number => match value {
                Value::Number(_) => Some(value.clone()),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number),
                _ => None,
            },
            ArgType::Integer => match value {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| {
                        n.as_f64()
                            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                            .map(|f| f as i64)
                    })
                    .map(Value::from),
                Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
                _ => None,
            },
            ArgType::Boolean => match value {
                Value::Bool(_) => Some(value.clone()),
                Value::Number(n) => match n.as_i64() {
                    Some(0) => Some(Value::Bool(false)),
                    Some(1) => Some(Value::Bool(true)),
                    _ => None,
                },
                Value::String(s) => parse_bool(s).map(Value::Bool),
                _ => None,
            },
        };

        let coerced = coerced.ok_or_else(|| {
            format!(
                "field '{}' expected {}, got {}",
                self.name,
                self.ty,
                value_kind(value)
            )
        })?;

        if let (Some(allowed), Value::String(s)) = (&self.allowed, &coerced) {
            if !allowed.iter().any(|a| a == s) {
                return Err(format!(
                    "field '{}' must be one of [{}], got '{}'",
                    self.name,
                    allowed.join(", "),
                    s
                ));
            }
        }

        Ok(coerced)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Declared argument shape of a tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgSchema {
    fields: Vec<ArgField>,
}

impl ArgSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: ArgField) -> Self {
        self.insert(field);
        self
    }

    /// Add a field, replacing any field with the same name
    pub fn insert(&mut self, field: ArgField) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ArgField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[ArgField] {
        &self.fields
    }

    /// Names of fields that must be supplied
    pub fn required(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_mandatory())
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check `args` against the schema.
    ///
    /// Every field is checked and all problems are reported together.
    pub fn validate(&self, args: &ToolArgs) -> Result<ValidatedArgs, ValidationError> {
        let mut values = Map::new();
        let mut issues = Vec::new();

        for field in &self.fields {
            match args.get(&field.name) {
                None if field.is_mandatory() => {
                    issues.push(format!("missing required field '{}'", field.name));
                }
                Some(Value::Null) if field.is_mandatory() => {
                    issues.push(format!(
                        "field '{}' expected {}, got null",
                        field.name, field.ty
                    ));
                }
                None | Some(Value::Null) => {
                    if let Some(default) = &field.default {
                        values.insert(field.name.clone(), default.clone());
                    }
                }
                Some(value) => match field.coerce(value) {
                    Ok(v) => {
                        values.insert(field.name.clone(), v);
                    }
                    Err(issue) => issues.push(issue),
                },
            }
        }

        let ignored: Vec<&str> = args
            .keys()
            .filter(|k| self.get(k).is_none())
            .map(|k| k.as_str())
            .collect();
        if !ignored.is_empty() {
            debug!("Ignoring undeclared arguments: {:?}", ignored);
        }

        if issues.is_empty() {
            Ok(ValidatedArgs::new(values))
        } else {
            Err(ValidationError { issues })
        }
    }

    /// JSON Schema view, for listing tools
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            let mut prop = serde_json::json!({
                "type": field.ty.as_str(),
                "description": field.description,
            });
            if let Some(allowed) = &field.allowed {
                prop["enum"] = serde_json::json!(allowed);
            }
            if let Some(default) = &field.default {
                prop["default"] = default.clone();
            }
            properties.insert(field.name.clone(), prop);
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": self.required(),
        })
    }
}

// ============================================================================
// Validation result
// ============================================================================

/// Every reason a set of arguments was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .issues.join("; "))]
pub struct ValidationError {
    issues: Vec<String>,
}

impl ValidationError {
    pub fn issues(&self) -> &[String] {
        &self.issues
    }
}

/// Arguments that passed validation, with defaults filled in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedArgs {
    values: ToolArgs,
}

impl ValidatedArgs {
    pub fn new(values: ToolArgs) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(Value::as_f64)
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(Value::as_bool)
    }

    pub fn require_str(&self, name: &str) -> Result<&str, ToolError> {
        self.get_str(name)
            .ok_or_else(|| ToolError::MissingArgument(name.to_string()))
    }

    pub fn require_number(&self, name: &str) -> Result<f64, ToolError> {
        self.get_number(name)
            .ok_or_else(|| ToolError::MissingArgument(name.to_string()))
    }

    pub fn as_map(&self) -> &ToolArgs {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ToolArgs {
        value.as_object().cloned().unwrap()
    }

    fn string_ops_schema() -> ArgSchema {
        ArgSchema::new()
            .field(
                ArgField::new("mode", ArgType::String, "Operation")
                    .one_of(&["reverse", "uppercase"]),
            )
            .field(ArgField::new("text", ArgType::String, "Input text"))
    }

    #[test]
    fn test_valid_arguments() {
        let validated = string_ops_schema()
            .validate(&args(json!({"mode": "reverse", "text": "abc"})))
            .unwrap();
        assert_eq!(validated.get_str("mode"), Some("reverse"));
        assert_eq!(validated.get_str("text"), Some("abc"));
    }

    #[test]
    fn test_missing_required() {
        let err = string_ops_schema()
            .validate(&args(json!({"mode": "reverse"})))
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field 'text'");
    }

    #[test]
    fn test_all_issues_reported() {
        let err = string_ops_schema()
            .validate(&args(json!({"mode": "shout", "text": 5})))
            .unwrap_err();
        assert_eq!(err.issues().len(), 2);
        assert!(err.issues()[0].contains("must be one of [reverse, uppercase]"));
        assert_eq!(err.issues()[1], "field 'text' expected string, got number");
    }

    #[test]
    fn test_null_required_is_type_error() {
        let err = string_ops_schema()
            .validate(&args(json!({"mode": "reverse", "text": null})))
            .unwrap_err();
        assert_eq!(err.to_string(), "field 'text' expected string, got null");
    }

    #[test]
    fn test_number_coercion() {
        let schema = ArgSchema::new()
            .field(ArgField::new("x", ArgType::Number, "x"))
            .field(ArgField::new("n", ArgType::Integer, "n"));

        let validated = schema
            .validate(&args(json!({"x": "2.5", "n": 4.0})))
            .unwrap();
        assert_eq!(validated.get_number("x"), Some(2.5));
        assert_eq!(validated.get_integer("n"), Some(4));

        assert!(schema.validate(&args(json!({"x": "abc", "n": 1}))).is_err());
        assert!(schema.validate(&args(json!({"x": 1, "n": 1.5}))).is_err());
    }

    #[test]
    fn test_boolean_coercion() {
        let schema = ArgSchema::new().field(ArgField::new("flag", ArgType::Boolean, "flag"));
        for (raw, expected) in [(json!(true), true), (json!("false"), false), (json!(1), true)] {
            let validated = schema.validate(&args(json!({ "flag": raw }))).unwrap();
            assert_eq!(validated.get_bool("flag"), Some(expected));
        }
        assert!(schema.validate(&args(json!({"flag": "maybe"}))).is_err());
    }

    #[test]
    fn test_defaults_and_optional() {
        let schema = ArgSchema::new()
            .field(ArgField::new("text", ArgType::String, "text"))
            .field(ArgField::new("times", ArgType::Integer, "repeat").with_default(1))
            .field(ArgField::new("note", ArgType::String, "note").optional());

        let validated = schema.validate(&args(json!({"text": "a"}))).unwrap();
        assert_eq!(validated.get_integer("times"), Some(1));
        assert!(!validated.contains("note"));
        assert_eq!(schema.required(), vec!["text"]);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let validated = string_ops_schema()
            .validate(&args(json!({"mode": "reverse", "text": "a", "extra": 1})))
            .unwrap();
        assert!(!validated.contains("extra"));
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut schema = string_ops_schema();
        schema.insert(ArgField::new("text", ArgType::Integer, "now a number"));
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("text").map(|f| f.ty), Some(ArgType::Integer));
    }

    #[test]
    fn test_json_schema() {
        let schema = string_ops_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["mode"]["enum"], json!(["reverse", "uppercase"]));
        assert_eq!(schema["required"], json!(["mode", "text"]));
    }

    #[test]
    fn test_require_str() {
        let validated = ValidatedArgs::new(args(json!({"text": "abc"})));
        assert_eq!(validated.require_str("text").unwrap(), "abc");
        assert_eq!(
            validated.require_str("mode"),
            Err(ToolError::MissingArgument("mode".to_string()))
        );
    }
}
