//! Custom error types with exit codes

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration builder operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// A field value was rejected by its validator
    #[error("invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    /// The package catalog could not be read from disk
    #[error("failed to read package catalog {}: {cause}", path.display())]
    CatalogUnreadable {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    /// The package catalog is not a valid package definition
    #[error("failed to decode package catalog: {cause}")]
    CatalogMalformed {
        #[source]
        cause: serde_yaml::Error,
    },

    /// The configuration document exists but could not be read
    #[error("failed to read config file {}: {cause}", path.display())]
    DocumentUnreadable {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    /// The configuration document is not valid YAML or has the wrong shape
    #[error("failed to decode config file: {cause}")]
    DocumentMalformed { cause: String },

    /// The configuration document carries no `version` key
    #[error("version not found in config file")]
    MissingVersion,

    /// The configuration document has a version this tool cannot migrate
    #[error("unsupported config file version: {found}")]
    UnsupportedVersion { found: i64 },

    /// The user cancelled the form
    #[error("configuration aborted by user")]
    UserAborted,

    /// The form runtime failed for a reason other than cancellation
    #[error("terminal error: {message}")]
    Terminal { message: String },

    /// The final document could not be written back
    #[error("failed to write config file {}: {cause}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },
}

impl ConfigError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::InvalidField { .. } => 1,
            Self::CatalogUnreadable { .. } | Self::CatalogMalformed { .. } => 2,
            Self::DocumentUnreadable { .. }
            | Self::DocumentMalformed { .. }
            | Self::MissingVersion
            | Self::UnsupportedVersion { .. } => 3,
            Self::UserAborted | Self::Terminal { .. } => 4,
            Self::WriteFailed { .. } => 5,
        }
    }

    /// Create an invalid field error
    #[inline]
    pub fn invalid_field<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a malformed document error
    #[inline]
    pub fn malformed<S: Into<String>>(cause: S) -> Self {
        Self::DocumentMalformed {
            cause: cause.into(),
        }
    }

    /// Create a terminal error
    #[inline]
    pub fn terminal<S: Into<String>>(message: S) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }
}
