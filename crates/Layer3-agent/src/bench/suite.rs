//! Evaluation suites

use agentic_foundation::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One prompt with its expected answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteTask {
    pub id: String,
    pub prompt: String,
    pub expected: String,
}

impl SuiteTask {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            expected: expected.into(),
        }
    }
}

/// Named list of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub name: String,

    #[serde(default)]
    pub tasks: Vec<SuiteTask>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Add a task
    pub fn with_task(mut self, task: SuiteTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Load and validate a suite file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Suite(format!("cannot read suite '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content).map_err(|e| match e {
            Error::Suite(msg) => Error::Suite(format!("{} ({})", msg, path.display())),
            other => other,
        })
    }

    /// Parse and validate a suite from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let suite: Suite = serde_json::from_str(content)
            .map_err(|e| Error::Suite(format!("invalid suite JSON: {}", e)))?;
        suite.validate()?;
        Ok(suite)
    }

    /// Reject an empty name and duplicate task ids
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Suite("suite name must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(Error::Suite(format!(
                    "duplicate task id '{}' in suite '{}'",
                    task.id, self.name
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json() {
        let suite = Suite::from_json(
            r#"{"name": "basic", "tasks": [
                {"id": "calc", "prompt": "Compute 1+1.", "expected": "2"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(suite.name, "basic");
        assert_eq!(suite.len(), 1);
        assert_eq!(suite.tasks[0], SuiteTask::new("calc", "Compute 1+1.", "2"));
    }

    #[test]
    fn test_missing_tasks_is_empty_suite() {
        let suite = Suite::from_json(r#"{"name": "empty"}"#).unwrap();
        assert!(suite.is_empty());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Suite::new("  ").validate(),
            Err(Error::Suite(_))
        ));

        let dup = Suite::new("dup")
            .with_task(SuiteTask::new("a", "x", "1"))
            .with_task(SuiteTask::new("a", "y", "2"));
        let err = dup.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate task id 'a'"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Suite::from_json("{not json"),
            Err(Error::Suite(_))
        ));
        assert!(matches!(
            Suite::from_json(r#"{"tasks": []}"#),
            Err(Error::Suite(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "disk", "tasks": [{{"id": "t1", "prompt": "p", "expected": "e"}}]}}"#
        )
        .unwrap();

        let suite = Suite::load(file.path()).unwrap();
        assert_eq!(suite.name, "disk");

        let missing = Suite::load("/definitely/not/here.json");
        assert!(matches!(missing, Err(Error::Suite(_))));
    }
}
