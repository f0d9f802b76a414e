//! Error types for appdesk.
//!
//! Errors fall into two groups. Fatal errors (a missing bundle, a launcher
//! file that cannot be written) stop the run. Recoverable errors (extraction,
//! descriptor parsing, icon installation) are returned like any other error,
//! and the pipeline decides to log them and continue with defaults.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for the appdesk library.
#[derive(Debug, Error)]
pub enum AppdeskError {
    // Bundle validation
    #[error("AppImage not found: {0}")]
    BundleNotFound(PathBuf),

    #[error("Path is not a file: {0}")]
    InvalidTarget(PathBuf),

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Extraction errors
    #[error("Could not extract AppImage info: {message}")]
    Extraction { message: String },

    #[error("Extraction timed out after {0:?}")]
    Timeout(Duration),

    // Metadata errors
    #[error("Could not parse desktop file {path}: {message}")]
    Descriptor { path: PathBuf, message: String },

    #[error("Could not copy icon: {message}")]
    IconInstall { message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for appdesk operations.
pub type Result<T> = std::result::Result<T, AppdeskError>;

impl From<std::io::Error> for AppdeskError {
    fn from(err: std::io::Error) -> Self {
        AppdeskError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl AppdeskError {
    /// Create an IO error with an operation label and path context.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        AppdeskError::Io {
            message: message.into(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Check if this error may be absorbed as a warning.
    ///
    /// Recoverable errors leave the metadata record at its previous stage;
    /// everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppdeskError::Extraction { .. }
                | AppdeskError::Timeout(_)
                | AppdeskError::Descriptor { .. }
                | AppdeskError::IconInstall { .. }
        )
    }
}
