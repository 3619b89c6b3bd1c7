//! Error types for tradeweb-core
//!
//! Two families live here. Field validation failures (`ValidationError`,
//! `AggregateValidationError`) are ordinary user-input conditions: the form
//! engine captures them into per-field state and never hands them upward.
//! `FormError` covers edits that address no field; the engine logs and
//! skips those. `CoreError` covers lookup and collaborator failures, and
//! carries an error code and severity for reporting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::types::FieldPath;

// ==================== Field validation ====================

/// One failed rule on one field
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Empty or whitespace-only text (or a blank number) where a value is mandatory
    #[error("{message}")]
    RequiredField { message: String },

    /// Numeric value or list length outside its bound
    #[error("{message}")]
    Range { message: String },
}

impl ValidationError {
    pub fn required(message: impl Into<String>) -> Self {
        ValidationError::RequiredField {
            message: message.into(),
        }
    }

    pub fn range(message: impl Into<String>) -> Self {
        ValidationError::Range {
            message: message.into(),
        }
    }

    /// Human-readable message shown next to the field
    pub fn message(&self) -> &str {
        match self {
            ValidationError::RequiredField { message } => message,
            ValidationError::Range { message } => message,
        }
    }
}

/// Whole-form validation failure, keyed by field path
#[derive(Error, Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct AggregateValidationError {
    pub errors: BTreeMap<FieldPath, Vec<ValidationError>>,
}

impl AggregateValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure against `path`
    pub fn push(&mut self, path: FieldPath, error: ValidationError) {
        self.errors.entry(path).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failures recorded for one field (empty slice when the field is clean)
    pub fn get(&self, path: &FieldPath) -> &[ValidationError] {
        self.errors.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.errors.contains_key(path)
    }

    /// Field path → messages, for inline display
    pub fn messages(&self) -> BTreeMap<String, Vec<String>> {
        self.errors
            .iter()
            .map(|(path, errors)| {
                (
                    path.to_string(),
                    errors.iter().map(|e| e.message().to_string()).collect(),
                )
            })
            .collect()
    }
}

// ==================== Engine and collaborator errors ====================

/// Caller errors on the form engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Invalid field path: {path}")]
    InvalidPath { path: String },

    #[error("No item at index {index} (form has {len} items)")]
    NoSuchItem { index: usize, len: usize },
}

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form instance not found
    FormNotFound,
    /// Result sink rejected a submission
    SinkError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FormNotFound => write!(f, "FORM_NOT_FOUND"),
            ErrorCode::SinkError => write!(f, "SINK_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for tradeweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Form not found: {id}")]
    FormNotFound { id: String },

    #[error("Result sink error: {message}")]
    Sink { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FormNotFound { .. } => ErrorCode::FormNotFound,
            CoreError::Sink { .. } => ErrorCode::SinkError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::FormNotFound { .. } => ErrorSeverity::Info,
            CoreError::Sink { .. } => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::InternalError {
            message: error.to_string(),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================
