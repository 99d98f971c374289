//! core::metadata::error
//!
//! Errors raised while rendering or parsing core metadata.

use std::path::PathBuf;

use thiserror::Error;

/// Metadata versions accepted by the writer, for error messages.
pub(crate) const SUPPORTED_VERSIONS: &str = "1.2, 2.1, 2.2, 2.3, 2.4";

/// Errors from core metadata operations.
///
/// All of these are deterministic consequences of the input; nothing is
/// retried.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Missing required core metadata: {0}")]
    MissingRequiredField(&'static str),

    #[error("unsupported metadata version '{0}', supported: {}", SUPPORTED_VERSIONS)]
    UnsupportedVersion(String),

    #[error("malformed {field} value: {value:?}")]
    MalformedField { field: String, value: String },

    #[error("license file pattern '{pattern}' did not match any files")]
    UnresolvableLicenseFile { pattern: String },

    #[error("invalid license file pattern '{pattern}': {message}")]
    InvalidLicensePattern { pattern: String, message: String },

    #[error("failed to read license files under '{path}': {source}")]
    LicenseFileIo {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl MetadataError {
    /// Shorthand for [`MetadataError::MalformedField`].
    pub(crate) fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        MetadataError::MalformedField {
            field: field.into(),
            value: value.into(),
        }
    }
}
