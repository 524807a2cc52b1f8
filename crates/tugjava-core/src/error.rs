//! Error types and error code constants for tugjava.
//!
//! This module provides a unified error type (`TugError`) that bridges
//! domain-specific errors from different subsystems (pattern compilation,
//! recipe configuration, input loading) into a common format suitable for
//! JSON output.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments or recipe configuration (bad input from caller)
//! - `3`: Resolution errors (input file not found)
//! - `4`: Apply errors (failed to produce or write the rewritten tree)
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! ## Design
//!
//! - **Unified type**: `TugError` is the single error type for CLI output
//! - **Bridging**: `impl From<X> for TugError` bridges domain errors
//! - **Code mapping**: `OutputErrorCode` provides stable integer codes for JSON

use std::fmt;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad input, malformed recipe options).
    InvalidArguments = 2,
    /// Resolution errors (input not found).
    ResolutionError = 3,
    /// Apply errors (failed to write the rewritten output).
    ApplyError = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
///
/// This is the canonical error type that all subsystem errors are converted to
/// before being rendered as JSON output.
#[derive(Debug, Error)]
pub enum TugError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// A recipe option is malformed. Raised before any tree is visited.
    #[error("invalid recipe option '{option}': {message}")]
    InvalidConfiguration { option: String, message: String },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// The serialized syntax tree could not be decoded.
    #[error("malformed input tree in {path}: {message}")]
    MalformedInput { path: String, message: String },

    /// Failed to apply or emit changes.
    #[error("apply error: {message}")]
    ApplyError {
        message: String,
        file: Option<String>,
    },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&TugError> for OutputErrorCode {
    fn from(err: &TugError) -> Self {
        match err {
            TugError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            TugError::InvalidConfiguration { .. } => OutputErrorCode::InvalidArguments,
            TugError::FileNotFound { .. } => OutputErrorCode::ResolutionError,
            TugError::MalformedInput { .. } => OutputErrorCode::InvalidArguments,
            TugError::ApplyError { .. } => OutputErrorCode::ApplyError,
            TugError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<TugError> for OutputErrorCode {
    fn from(err: TugError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Bridge: io::Error / serde_json::Error -> TugError
// ============================================================================

impl From<std::io::Error> for TugError {
    fn from(err: std::io::Error) -> Self {
        TugError::InternalError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<serde_json::Error> for TugError {
    fn from(err: serde_json::Error) -> Self {
        TugError::InternalError {
            message: format!("JSON error: {}", err),
        }
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl TugError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        TugError::InvalidArguments {
            message: message.into(),
            details: None,
        }
    }

    /// Create an invalid arguments error with JSON details.
    pub fn invalid_args_with_details(
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        TugError::InvalidArguments {
            message: message.into(),
            details: Some(details),
        }
    }

    /// Create an invalid configuration error for a named recipe option.
    pub fn invalid_config(option: impl Into<String>, message: impl Into<String>) -> Self {
        TugError::InvalidConfiguration {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        TugError::FileNotFound { path: path.into() }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        TugError::InternalError {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
