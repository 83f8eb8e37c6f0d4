//! Error types for the tracker core
//!
//! Errors are classified by who can fix them:
//! - RequiresUserAction: form validation failures (e.g. missing company name)
//! - NonRetryable: broken seed data or configuration, IO failures at load
//!
//! Malformed filter input and side-table misses are not errors. They degrade
//! to "bound not applied" and zero/placeholder values respectively.

use thiserror::Error;

/// Error types for tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    // Requires user action
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    // Non-retryable errors
    #[error("Failed to parse seed dataset: {0}")]
    SeedParse(String),

    #[error("Seed dataset is inconsistent: {0}")]
    SeedInvariant(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl TrackerError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TrackerError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns true if this error requires user action to resolve
    pub fn requires_user_action(&self) -> bool {
        matches!(self, TrackerError::Validation { .. })
    }

    /// Form field the error is attached to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            TrackerError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TrackerError::Validation { .. } => "Fill in the highlighted field and submit again.",
            TrackerError::SeedParse(_) => "Check the seed file is valid JSON in the tracker format.",
            TrackerError::SeedInvariant(_) => {
                "Every side table needs an entry for each seed company."
            }
            TrackerError::Config(_) => "Check your configuration in ~/.growth-tracker/config.json",
            TrackerError::Io(_) => "Check the file path and permissions.",
        }
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Io(err.to_string())
    }
}

/// Serializable error representation for the display layer
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerErrorPayload {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub error_type: ErrorType,
    pub recovery_suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorType {
    NonRetryable,
    RequiresUserAction,
}

impl From<&TrackerError> for TrackerErrorPayload {
    fn from(err: &TrackerError) -> Self {
        let error_type = if err.requires_user_action() {
            ErrorType::RequiresUserAction
        } else {
            ErrorType::NonRetryable
        };

        TrackerErrorPayload {
            message: err.to_string(),
            field: err.field().map(str::to_string),
            error_type,
            recovery_suggestion: err.recovery_suggestion().to_string(),
        }
    }
}
