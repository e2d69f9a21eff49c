//! Error types for version resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for version resolution operations.
pub type VersionResult<T> = Result<T, VersionError>;

/// Errors that can occur while resolving or validating build versions.
#[derive(Debug, Error)]
pub enum VersionError {
    /// HTTP retrieval of a version source failed.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// HTTP client could not be constructed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A version string failed strict semantic-version parsing.
    #[error("invalid semantic version {version:?}: {source}")]
    Format {
        version: String,
        source: semver::Error,
    },

    /// Failed to read a file under the build directory.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },

    /// Failed to read an entry out of a release archive.
    #[error("failed to read archive {}: {}", .path.display(), .reason)]
    Archive { path: PathBuf, reason: String },

    /// No usable (non-empty) version was found in any candidate source.
    #[error("no version found: {0}")]
    NotFound(String),
}
