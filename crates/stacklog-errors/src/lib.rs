//! Error facility for stacklog
//!
//! Errors raised by the library itself are limited to programmer misuse
//! (e.g. an unknown time-unit token). Errors produced by wrapped code are
//! never wrapped, converted, or suppressed by the scope; they propagate to
//! the caller unchanged after the failure hooks have fired.

use stacklog_core_types::schema;
use thiserror::Error;

/// Result type alias using StacklogError
pub type Result<T> = std::result::Result<T, StacklogError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and structured log payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StacklogErrorKind {
    /// Caller-supplied input failed validation
    InvalidInput,
    /// A time-unit token did not parse
    UnknownUnit,
    /// A hook surface that this build does not implement
    NotImplemented,

    // Internal
    Internal,
}

impl StacklogErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            StacklogErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            StacklogErrorKind::UnknownUnit => "ERR_UNKNOWN_UNIT",
            StacklogErrorKind::NotImplemented => "ERR_NOT_IMPLEMENTED",
            StacklogErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Error taxonomy for stacklog operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StacklogError {
    /// Caller-supplied input failed validation
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A time-unit token was not one of auto, ns, mks, ms, s, min
    #[error("unknown time unit: '{unit}' (expected one of auto, ns, mks, ms, s, min)")]
    UnknownUnit { unit: String },

    /// A hook surface that this build does not implement
    #[error("hook not implemented: {hook}")]
    NotImplemented { hook: String },

    /// Unexpected internal failure
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl StacklogError {
    /// Get the error kind
    pub fn kind(&self) -> StacklogErrorKind {
        match self {
            StacklogError::InvalidInput { .. } => StacklogErrorKind::InvalidInput,
            StacklogError::UnknownUnit { .. } => StacklogErrorKind::UnknownUnit,
            StacklogError::NotImplemented { .. } => StacklogErrorKind::NotImplemented,
            StacklogError::Internal { .. } => StacklogErrorKind::Internal,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Structured payload for log sinks, keyed by the canonical schema fields
    pub fn as_log_value(&self) -> serde_json::Value {
        let mut payload = serde_json::Map::new();
        payload.insert(
            schema::FIELD_ERR_KIND.to_string(),
            format!("{:?}", self.kind()).into(),
        );
        payload.insert(schema::FIELD_ERR_CODE.to_string(), self.code().into());
        payload.insert("message".to_string(), self.to_string().into());
        serde_json::Value::Object(payload)
    }
}
