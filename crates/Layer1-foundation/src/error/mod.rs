//! Error types for agentic
//!
//! Tool-level failures never show up here: the registry turns them into
//! `[tool_error]` observation strings. What remains are setup and I/O errors.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// agentic error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Config
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Tool dispatch
    // ========================================================================
    /// An action named a tool that was never registered. This is a wiring bug
    /// between a policy and its registry, not something an agent reasons about.
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    // ========================================================================
    // Evaluation suites
    // ========================================================================
    #[error("Suite error: {0}")]
    Suite(String),

    // ========================================================================
    // General
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // External errors
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
