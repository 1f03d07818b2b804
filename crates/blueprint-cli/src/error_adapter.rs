//! Error adapter for converting BlueprintError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's report formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use blueprint::{BlueprintError, ParseError};

/// Adapter rendering a [`BlueprintError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a BlueprintError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BlueprintError::Io(_) => "blueprint::io",
            BlueprintError::Parse(ParseError::NotFound(_)) => "blueprint::parse::not_found",
            BlueprintError::Parse(ParseError::Io { .. }) => "blueprint::parse::io",
            BlueprintError::Parse(ParseError::Cancelled) => "blueprint::parse::cancelled",
            BlueprintError::Config(_) => "blueprint::config",
            BlueprintError::Validation { .. } => "blueprint::validation",
            BlueprintError::Emit(_) => "blueprint::emit",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            BlueprintError::Parse(ParseError::NotFound(_)) => {
                "pass an existing diagram file or directory"
            }
            BlueprintError::Config(_) => "check the TOML configuration file",
            BlueprintError::Validation { .. } => "fix the reported errors or drop `--strict`",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
