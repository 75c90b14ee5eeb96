//! Error types for Model Console
//!
//! This module provides unified error handling across the console crates,
//! covering authoring validation, schema resolution, submission gating,
//! remote store failures, IO and serialization.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Model Console
#[derive(Debug, Error)]
pub enum ConsoleError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field definition validation failed
    #[error("Field validation failed for '{field}': {message}")]
    FieldValidation { field: String, message: String },

    /// Unknown localization language code
    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),

    /// A language set must contain at least one language
    #[error("At least one language must be selected")]
    EmptyLanguageSet,

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Model not found (or not selectable)
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Field not found in a model or draft
    #[error("Field '{field}' not found in '{owner}'")]
    FieldNotFound { owner: String, field: String },

    // ========================================================================
    // Duplicate Errors
    // ========================================================================
    /// Duplicate field key
    #[error("Duplicate field key: '{0}' already exists")]
    DuplicateField(String),

    // ========================================================================
    // Submission Errors
    // ========================================================================
    /// A submission for this draft is already in flight
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// A completion arrived for a ticket that is not the outstanding one
    #[error("Submission ticket '{0}' is not outstanding")]
    StaleSubmission(String),

    // ========================================================================
    // Remote Errors
    // ========================================================================
    /// The remote store rejected or failed an operation
    #[error("Remote {operation} failed: {message}")]
    Remote { operation: String, message: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// A listing document did not have the expected shape
    #[error("Invalid listing format: {0}")]
    InvalidListing(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl ConsoleError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a remote failure for the named operation
    pub fn remote(operation: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::Remote {
            operation: operation.into(),
            message: msg.into(),
        }
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConsoleError::Validation(_)
                | ConsoleError::FieldValidation { .. }
                | ConsoleError::UnknownLanguage(_)
                | ConsoleError::EmptyLanguageSet
                | ConsoleError::DuplicateField(_)
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConsoleError::ModelNotFound(_) | ConsoleError::FieldNotFound { .. }
        )
    }

    /// Check if this error came from the remote store
    pub fn is_remote(&self) -> bool {
        matches!(self, ConsoleError::Remote { .. })
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ConsoleError::Io(_) | ConsoleError::FileRead { .. } | ConsoleError::FileWrite { .. }
        )
    }
}

/// Result type alias using ConsoleError
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> ConsoleResult<T>;
}

impl<T, E: Into<ConsoleError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> ConsoleResult<T> {
        self.map_err(|e| {
            let err: ConsoleError = e.into();
            ConsoleError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = ConsoleError::validation("Title is required");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Validation error: Title is required");
    }

    #[test]
    fn test_field_validation_error() {
        let err = ConsoleError::field_validation("color", "At least one access role is required");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Field validation failed for 'color': At least one access role is required"
        );
    }

    #[test]
    fn test_not_found_errors() {
        let err = ConsoleError::ModelNotFound("m-1".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_remote());
        assert_eq!(err.to_string(), "Model not found: m-1");
    }

    #[test]
    fn test_remote_error() {
        let err = ConsoleError::remote("create instance", "502 Bad Gateway");
        assert!(err.is_remote());
        assert!(!err.is_validation());
        assert_eq!(
            err.to_string(),
            "Remote create instance failed: 502 Bad Gateway"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = ConsoleError::with_context("Loading models", "Permission denied");
        assert_eq!(err.to_string(), "Loading models: Permission denied");
    }

    #[test]
    fn test_result_ext_wraps_io() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result.with_context("Reading access roles").unwrap_err();
        assert_eq!(err.to_string(), "Reading access roles: IO error: missing");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConsoleError = io_err.into();
        assert!(err.is_io());
    }
}
