//! Error types for reconciliation
//!
//! Everything here is fatal: reconciliation cannot produce settings without
//! a usable storage backend. Bad request entries are not errors at this
//! level; they are reported in [`crate::Reconciliation::rejected_requests`].

use zr_schema::SectionName;

/// Failure reported by a host settings accessor
#[derive(Debug, thiserror::Error)]
pub enum AccessorError {
    /// Backend cannot be reached at all
    #[error("settings backend unavailable: {0}")]
    Unavailable(String),

    /// Backend-specific failure
    #[error("settings backend error: {0}")]
    Backend(String),

    /// IO error in a file-backed store
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal reconciliation error
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// No usable storage backend or settings source
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Accessor failed while reading
    #[error("settings accessor failed: {0}")]
    Accessor(#[from] AccessorError),

    /// Accessor snapshot is neither an object nor empty
    #[error("settings snapshot must be an object, got {kind}")]
    MalformedSnapshot { kind: &'static str },

    /// Persisting a default section failed
    #[error("failed to persist default '{section}' settings: {source}")]
    WriteBack {
        section: SectionName,
        #[source]
        source: AccessorError,
    },
}

impl ReconcileError {
    /// Create a configuration error
    #[inline]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Section whose write-back failed, if that is what happened
    #[inline]
    #[must_use]
    pub fn failed_section(&self) -> Option<SectionName> {
        match self {
            Self::WriteBack { section, .. } => Some(*section),
            _ => None,
        }
    }
}

/// Result type alias for reconciliation
pub type ReconcileResult<T> = Result<T, ReconcileError>;

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
