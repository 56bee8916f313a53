//! Storage module for agentic
//!
//! - `json`: JSON file store (config) and `write_json` (run summaries)

mod json;

pub use json::{write_json, JsonStore};
