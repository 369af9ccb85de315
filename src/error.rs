//! Error types for the storage class resolver
//!
//! Every validation failure names the offending option and value so the
//! provisioning service can surface it to the user unchanged.

use thiserror::Error;

/// Unified error type for the resolver
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Option Validation Errors
    // =========================================================================
    /// An integer option failed to parse, or two spellings of one key
    /// (`type` and `TYPE`) carry different values
    #[error("Malformed option {option}={value:?}: {reason}")]
    MalformedOption {
        option: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported volume type {code}")]
    UnsupportedVolumeType { code: i64 },

    #[error("Unsupported filesystem type {fs_type:?}")]
    UnsupportedFilesystem { fs_type: String },

    #[error("Unsupported replica {replica}")]
    UnsupportedReplica { replica: i64 },

    // =========================================================================
    // Capacity Errors
    // =========================================================================
    #[error("Volume required bytes {required} greater than limit bytes {limit}")]
    CapacityRangeInvalid { required: i64, limit: i64 },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a [`Error::MalformedOption`] for an option value that failed to parse
    pub fn malformed(
        option: impl Into<String>,
        value: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Error::MalformedOption {
            option: option.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error rejects the caller's request itself.
    ///
    /// These are deterministic functions of the input and must be surfaced
    /// to the user rather than retried.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MalformedOption { .. }
                | Error::UnsupportedVolumeType { .. }
                | Error::UnsupportedFilesystem { .. }
                | Error::UnsupportedReplica { .. }
                | Error::CapacityRangeInvalid { .. }
        )
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        // Only reading a manifest touches the outside world
        matches!(self, Error::Io(_))
    }

    /// Storage class option the error refers to, if any
    pub fn option(&self) -> Option<&str> {
        match self {
            Error::MalformedOption { option, .. } => Some(option.as_str()),
            Error::UnsupportedVolumeType { .. } => Some(crate::resolver::OPTION_TYPE),
            Error::UnsupportedFilesystem { .. } => Some(crate::resolver::OPTION_FS_TYPE),
            Error::UnsupportedReplica { .. } => Some(crate::resolver::OPTION_REPLICA),
            _ => None,
        }
    }
}

/// Result type alias for the resolver
pub type Result<T> = std::result::Result<T, Error>;
