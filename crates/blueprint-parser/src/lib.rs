//! # Blueprint Parser
//!
//! Parser and validator for PlantUML architecture diagrams. This crate turns
//! diagram text into the [`blueprint_core::diagram`] model, checks that model
//! against the structure code generation relies on, and translates sequence
//! diagrams into architecture diagrams.
//!
//! ## Usage
//!
//! ```
//! # use blueprint_parser::parse_content;
//! let source = r#"
//! @startuml
//! title Shop
//! package "Shop.Sales.Aggregates.Order" {
//!   class Order <<Aggregate>> {
//!     OrderId : Guid
//!     Total : decimal
//!   }
//! }
//! @enduml
//! "#;
//!
//! let document = parse_content(source, None);
//! assert_eq!(document.title.as_deref(), Some("Shop"));
//! assert_eq!(document.all_classes().count(), 1);
//! ```
//!
//! Parsing never fails on malformed text. Unrecognized lines are skipped;
//! only file-system access through a [`SourceReader`] can fail.

pub mod config;
pub mod error;
pub mod sequence;
pub mod source;
pub mod validate;

mod elaborate;
mod parser;
#[cfg(test)]
mod parser_tests;
mod parser_types;
mod scanner;

pub use config::{DedupPolicy, ParserConfig, ValidationConfig};
pub use error::ParseError;
pub use sequence::translate_sequence;
pub use source::{FsSourceReader, MemorySourceReader, SourceReader};
pub use validate::{DocumentValidationResult, ReportSummary, ValidationReport, Validator};

use std::{io, path::Path};

use log::{debug, info, trace, warn};

use blueprint_core::{
    cancel::CancellationToken,
    diagram::{DiagramDocument, DiagramSolution},
};

use elaborate::Builder;

/// Parse diagram text with the default [`ParserConfig`].
///
/// This is the main entry point for parsing a single in-memory document:
///
/// 1. **Scan** - Split into trimmed lines without comments
/// 2. **Parse** - Build the statement tree with explicit scopes
/// 3. **Elaborate** - Resolve notes and build the document
///
/// # Arguments
///
/// * `source` - PlantUML text
/// * `source_path` - Path recorded on the document, if it came from a file
pub fn parse_content(source: &str, source_path: Option<&Path>) -> DiagramDocument {
    Parser::default().parse_content(source, source_path)
}

/// Read and parse one file with the default [`ParserConfig`].
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns [`ParseError::Io`] when the file exists but cannot be read.
pub fn parse_file(
    reader: &dyn SourceReader,
    path: &Path,
) -> Result<Option<DiagramDocument>, ParseError> {
    Parser::default().parse_file(reader, path)
}

/// Parse every diagram file below a directory with the default [`ParserConfig`].
///
/// # Errors
///
/// See [`Parser::parse_directory`].
pub fn parse_directory(
    reader: &dyn SourceReader,
    path: &Path,
    cancel: &CancellationToken,
) -> Result<DiagramSolution, ParseError> {
    Parser::default().parse_directory(reader, path, cancel)
}

/// Configured parser.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use blueprint_core::cancel::CancellationToken;
/// use blueprint_parser::{MemorySourceReader, Parser, ParserConfig};
///
/// let reader = MemorySourceReader::new()
///     .with_file("docs/a.puml", "@startuml\nclass A\n@enduml")
///     .with_file("docs/b.puml", "@startuml\nclass B\n@enduml");
///
/// let parser = Parser::new(ParserConfig::default());
/// let solution = parser
///     .parse_directory(&reader, Path::new("docs"), &CancellationToken::new())
///     .expect("directory exists");
///
/// assert_eq!(solution.name, "docs");
/// assert_eq!(solution.documents.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse diagram text into a document. Never fails.
    pub fn parse_content(&self, source: &str, source_path: Option<&Path>) -> DiagramDocument {
        let statements = parser::parse(source);
        trace!(statements:?; "Parsed statements");

        Builder::new(&statements, self.config.dedup_policy()).build(source_path)
    }

    /// Read and parse one file.
    ///
    /// Returns `Ok(None)` when the reader reports the file absent.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] when the file exists but cannot be read.
    pub fn parse_file(
        &self,
        reader: &dyn SourceReader,
        path: &Path,
    ) -> Result<Option<DiagramDocument>, ParseError> {
        if !reader.exists(path) {
            warn!(path:? = path; "Diagram file not found");
            return Ok(None);
        }

        debug!(path:? = path; "Parsing diagram file");
        let source = read_source(reader, path)?;
        Ok(Some(self.parse_content(&source, Some(path))))
    }

    /// Parse every diagram file below `path`.
    ///
    /// Files are found recursively by extension and parsed in sorted order.
    /// A file that cannot be read is logged and left out. The solution is
    /// named after the directory.
    ///
    /// # Errors
    ///
    /// - [`ParseError::NotFound`] if `path` is not a directory.
    /// - [`ParseError::Io`] if the directory cannot be listed.
    /// - [`ParseError::Cancelled`] if `cancel` fires between two files.
    pub fn parse_directory(
        &self,
        reader: &dyn SourceReader,
        path: &Path,
        cancel: &CancellationToken,
    ) -> Result<DiagramSolution, ParseError> {
        if !reader.is_dir(path) {
            return Err(ParseError::NotFound(path.to_path_buf()));
        }

        let files = reader
            .list_files(path, self.config.file_extension())
            .map_err(|source| ParseError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path:? = path, files = files.len(); "Parsing diagram directory");

        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            if cancel.is_cancelled() {
                info!("Parsing cancelled");
                return Err(ParseError::Cancelled);
            }

            match read_source(reader, file) {
                Ok(source) => {
                    debug!(path:? = file; "Parsing diagram file");
                    documents.push(self.parse_content(&source, Some(file)));
                }
                Err(err) => warn!(path:? = file, err:%; "Skipping unreadable diagram file"),
            }
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut solution = DiagramSolution::new(name, documents);
        solution.source_path = Some(path.to_path_buf());

        info!(
            documents = solution.documents.len(),
            classes = solution.all_classes().count();
            "Diagram directory parsed",
        );
        Ok(solution)
    }
}

fn read_source(reader: &dyn SourceReader, path: &Path) -> Result<String, ParseError> {
    reader
        .read_to_string(path)
        .map_err(|source: io::Error| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })
}
