//! Error types for rendering

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A Typst diagnostic, flattened for logs and API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub severity: ErrorSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    Error,
    Warning,
}

/// Rendering failures
///
/// Callers treat every variant except `Timeout` as an opaque rendering
/// failure; nothing here is retried.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    #[error("Rendering timed out after {0}ms")]
    Timeout(u64),

    #[error("Layout compilation failed: {}", join_messages(.0))]
    Compile(Vec<CompileError>),

    #[error("Invalid render input: {0}")]
    InvalidInput(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Path security violation: {0}")]
    PathSecurityViolation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_messages(errors: &[CompileError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl RenderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RenderError::Timeout(_))
    }
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            severity: ErrorSeverity::Error,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn as_warning(mut self) -> Self {
        self.severity = ErrorSeverity::Warning;
        self
    }
}
