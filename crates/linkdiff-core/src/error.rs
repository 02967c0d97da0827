//! Error types for inventory building and file diffing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while inventorying a tree or diffing files.
///
/// There is no partial-success mode: a walk error anywhere aborts the whole
/// inventory, because a file missed on one side would silently show up as
/// "only in the other tree" during classification.
#[derive(Debug, Error)]
pub enum Error {
    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// File exceeds the configured in-memory diff bound.
    #[error("File too large to diff: {path} is {size} bytes (limit {limit})")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },
}

impl Error {
    /// Create an I/O error with path context, mapping the common kinds to
    /// their dedicated variants.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_io_maps_not_found() {
        let err = Error::io(
            "/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_error_io_maps_permission_denied() {
        let err = Error::io(
            "/secret",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, Error::PermissionDenied { .. }));
    }

    #[test]
    fn test_error_io_falls_through() {
        let err = Error::io(
            "/dev/full",
            std::io::Error::new(std::io::ErrorKind::WriteZero, "full"),
        );
        assert!(matches!(err, Error::Io { .. }));
    }
}
