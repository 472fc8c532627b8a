//! Error types for the triphonon packager.
//!
//! This module defines semantic error variants for configuration resolution
//! and backend invocation. Fatal variants abort the run before any packaging
//! backend is invoked; degraded conditions (a missing or unparsable build
//! counter, an absent preferred backend) are handled without an error.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving the build configuration or driving
/// the packaging backend.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The version declaration file could not be read.
    #[error("could not read version declaration at {path}")]
    VersionFileUnreadable {
        /// Path to the declaration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No line in the declaration file carried a `__version__` assignment.
    #[error("version declaration contains no __version__ assignment")]
    VersionDeclarationNotFound,

    /// The declared version has fewer than the three required components.
    #[error("incomplete version declaration: {found} of 3 components present")]
    VersionIncomplete {
        /// Number of components that were present.
        found: usize,
    },

    /// The declared version could not be parsed.
    #[error("malformed version declaration: {reason}")]
    VersionMalformed {
        /// Description of the parse failure.
        reason: String,
    },

    /// Neither the preferred nor the legacy packaging backend responded.
    #[error(
        "no packaging backend available; install sciforge or sciforge-legacy and ensure it is on PATH"
    )]
    BackendUnavailable,

    /// The selected packaging backend exited with a failure status.
    #[error("{backend} failed: {message}")]
    BackendFailed {
        /// Program name of the backend that failed.
        backend: &'static str,
        /// Trimmed stderr from the backend.
        message: String,
    },

    /// The manifest could not be staged for the backend.
    #[error("manifest staging failed: {reason}")]
    ManifestStaging {
        /// Description of the staging failure.
        reason: String,
    },

    /// The manifest could not be serialized.
    #[error("failed to encode manifest: {0}")]
    ManifestEncode(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
