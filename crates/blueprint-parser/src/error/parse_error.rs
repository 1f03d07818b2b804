//! Errors surfaced by the parser's file and directory operations.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures of the parser's I/O boundary.
///
/// Malformed diagram text is never an error; these variants only cover
/// missing inputs, unreadable files, and cancellation.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The requested directory or file does not exist.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading from the source failed.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The operation was cancelled between files.
    #[error("operation cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::NotFound(PathBuf::from("diagrams"));
        assert_eq!(err.to_string(), "path not found: diagrams");

        let err = ParseError::Io {
            path: PathBuf::from("a.puml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read a.puml");
        assert!(std::error::Error::source(&err).is_some());

        assert_eq!(ParseError::Cancelled.to_string(), "operation cancelled");
    }
}
