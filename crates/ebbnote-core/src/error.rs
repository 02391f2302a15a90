//! Error types and exit codes for ebbnote
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, external processes)
//! - 2: Usage error (bad flags/args, invalid names or schedule values)
//! - 3: Data error (unusable configuration or store)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the ebbnote binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - bad config or store (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during ebbnote operations
#[derive(Error, Debug)]
pub enum EbbError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("{field} contains reserved characters (<>:\"/\\|?*): {value:?}")]
    InvalidName { field: String, value: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("git: {reason}")]
    Vcs { reason: String },

    #[error("editor: {reason}")]
    Editor { reason: String },

    #[error("{0}")]
    Other(String),
}

impl EbbError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        EbbError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        EbbError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a name that cannot be used as a path segment
    pub fn invalid_name(field: &str, value: impl std::fmt::Display) -> Self {
        EbbError::InvalidName {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn vcs(reason: impl std::fmt::Display) -> Self {
        EbbError::Vcs {
            reason: reason.to_string(),
        }
    }

    pub fn editor(reason: impl std::fmt::Display) -> Self {
        EbbError::Editor {
            reason: reason.to_string(),
        }
    }

    /// Whether this error is a rejected input rather than a failed operation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EbbError::InvalidName { .. } | EbbError::InvalidValue { .. }
        )
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            EbbError::UsageError(_)
            | EbbError::InvalidName { .. }
            | EbbError::InvalidValue { .. } => ExitCode::Usage,

            EbbError::InvalidConfig { .. } => ExitCode::Data,

            EbbError::Io(_)
            | EbbError::Json(_)
            | EbbError::FailedOperationWithTarget { .. }
            | EbbError::Vcs { .. }
            | EbbError::Editor { .. }
            | EbbError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            EbbError::UsageError(_) => "usage_error",
            EbbError::InvalidName { .. } => "invalid_name",
            EbbError::InvalidValue { .. } => "invalid_value",
            EbbError::InvalidConfig { .. } => "invalid_config",
            EbbError::Io(_) => "io_error",
            EbbError::Json(_) => "json_error",
            EbbError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            EbbError::Vcs { .. } => "vcs_error",
            EbbError::Editor { .. } => "editor_error",
            EbbError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for ebbnote operations
pub type Result<T> = std::result::Result<T, EbbError>;
