//! Scratchpad - append-only working memory of one run
//!
//! Entries are typed, but `render()` produces the line-oriented text form
//! (`[thought] ...`, `[observation] ...`, `key=value`) for policies that only
//! look at serialized history.

use agentic_foundation::strings::{OBSERVATION_TAG, THOUGHT_TAG};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scratchpad line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ScratchpadEntry {
    Thought(String),
    Observation(String),
    Tagged { key: String, value: String },
}

impl ScratchpadEntry {
    pub fn is_observation(&self) -> bool {
        matches!(self, ScratchpadEntry::Observation(_))
    }
}

impl fmt::Display for ScratchpadEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScratchpadEntry::Thought(text) => writeln!(f, "{} {}", THOUGHT_TAG, text),
            ScratchpadEntry::Observation(text) => writeln!(f, "{} {}", OBSERVATION_TAG, text),
            ScratchpadEntry::Tagged { key, value } => writeln!(f, "{}={}", key, value),
        }
    }
}

/// Accumulated thoughts, observations and tagged intermediates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scratchpad {
    entries: Vec<ScratchpadEntry>,
}

impl Scratchpad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_thought(&mut self, thought: impl Into<String>) {
        self.entries.push(ScratchpadEntry::Thought(thought.into()));
    }

    pub fn push_observation(&mut self, observation: impl Into<String>) {
        self.entries
            .push(ScratchpadEntry::Observation(observation.into()));
    }

    pub fn push_tagged(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(ScratchpadEntry::Tagged {
            key: key.into(),
            value: value.into(),
        });
    }

    pub fn entries(&self) -> &[ScratchpadEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All observations, oldest first
    pub fn observations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            ScratchpadEntry::Observation(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_observation(&self) -> Option<&str> {
        self.observations().last()
    }

    pub fn has_observation(&self) -> bool {
        self.entries.iter().any(ScratchpadEntry::is_observation)
    }

    /// Most recent tagged value for `key`
    pub fn latest(&self, key: &str) -> Option<&str> {
        self.entries.iter().rev().find_map(|entry| match entry {
            ScratchpadEntry::Tagged { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn has_tag(&self, key: &str) -> bool {
        self.latest(key).is_some()
    }

    /// Entries recorded after the most recent tag for `key`, or `None` if
    /// the tag was never recorded
    pub fn since_tag(&self, key: &str) -> Option<&[ScratchpadEntry]> {
        let index = self.entries.iter().rposition(|entry| {
            matches!(entry, ScratchpadEntry::Tagged { key: k, .. } if k == key)
        })?;
        Some(&self.entries[index + 1..])
    }

    /// Serialized text form
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scratchpad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let mut pad = Scratchpad::new();
        assert_eq!(pad.render(), "");

        pad.push_thought("plan first");
        pad.push_tagged("uppercased", "AGENTIC");
        pad.push_observation("AGENTIC");

        assert_eq!(
            pad.render(),
            "[thought] plan first\nuppercased=AGENTIC\n[observation] AGENTIC\n"
        );
        assert_eq!(pad.len(), 3);
    }

    #[test]
    fn test_observations() {
        let mut pad = Scratchpad::new();
        assert!(!pad.has_observation());
        assert_eq!(pad.last_observation(), None);

        pad.push_observation("one");
        pad.push_thought("between");
        pad.push_observation("two");

        assert!(pad.has_observation());
        assert_eq!(pad.observations().collect::<Vec<_>>(), vec!["one", "two"]);
        assert_eq!(pad.last_observation(), Some("two"));
    }

    #[test]
    fn test_tags() {
        let mut pad = Scratchpad::new();
        assert!(!pad.has_tag("uppercased"));
        assert!(pad.since_tag("uppercased").is_none());

        pad.push_tagged("uppercased", "AB");
        pad.push_observation("AB");
        pad.push_tagged("uppercased", "CD");

        assert_eq!(pad.latest("uppercased"), Some("CD"));
        assert_eq!(pad.latest("lowercased"), None);
        assert_eq!(pad.since_tag("uppercased").map(|s| s.len()), Some(0));

        pad.push_observation("CD");
        let after = pad.since_tag("uppercased").unwrap();
        assert_eq!(after, &[ScratchpadEntry::Observation("CD".into())]);
    }

    #[test]
    fn test_multiline_observation_is_kept_verbatim() {
        let mut pad = Scratchpad::new();
        pad.push_observation("a\nb");
        assert_eq!(pad.render(), "[observation] a\nb\n");
        assert_eq!(pad.last_observation(), Some("a\nb"));
    }
}
