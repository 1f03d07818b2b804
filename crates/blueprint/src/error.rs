//! Error types for Blueprint operations.
//!
//! This module provides the main error type [`BlueprintError`] which wraps
//! the error conditions of reading, parsing and emitting. Validation
//! findings are not errors; they are reported as issues.

use std::io;

use thiserror::Error;

use blueprint_parser::ParseError;

/// The main error type for Blueprint operations.
#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Raised by callers that treat validation errors as fatal.
    #[error("Validation failed with {errors} error(s)")]
    Validation { errors: usize },

    #[error("Emit error: {0}")]
    Emit(String),
}
