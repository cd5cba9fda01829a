//! Error types for the export module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing output files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File system error (missing directory, permissions, disk full, ...).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file or directory being written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("failed to serialize JSON to {path}: {source}")]
    Json {
        /// The destination file.
        path: PathBuf,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl ExportError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a JSON error. IO failures inside serde are reported as [`ExportError::Io`].
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        let path = path.into();
        if source.is_io() {
            return Self::Io {
                path,
                source: std::io::Error::from(source),
            };
        }
        Self::Json { path, source }
    }

    /// The path that could not be written.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } => path,
        }
    }
}
