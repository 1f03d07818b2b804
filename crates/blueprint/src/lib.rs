//! Blueprint - PlantUML architecture diagrams to layered solution models.
//!
//! Parsing, validation and solution generation for architecture diagrams
//! written in a PlantUML subset. Sequence diagrams can be translated into
//! architecture diagrams first.
//!
//! The pipeline is: text → [`diagram::DiagramDocument`] → [`ValidationReport`]
//! → [`solution::SolutionModel`]. Nothing here writes generated files; the
//! solution model is a plain value for callers to emit.

pub mod config;
pub mod factory;

mod error;

pub use blueprint_core::{cancel, diagram, naming, solution};
pub use blueprint_parser::{
    DocumentValidationResult, FsSourceReader, MemorySourceReader, ParseError, Parser,
    ReportSummary, SourceReader, ValidationReport, Validator,
    error::{Category, Issue, IssueCode, Severity},
};

pub use error::BlueprintError;

use std::path::Path;

use log::{debug, info, trace};

use cancel::CancellationToken;
use config::AppConfig;
use diagram::{DiagramDocument, DiagramSolution};
use factory::SolutionFactory;
use solution::SolutionModel;

/// Entry point tying parsing, validation and generation to one
/// configuration.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use blueprint::{Blueprint, config::AppConfig, diagram::DiagramSolution};
///
/// let source = r#"
/// @startuml
/// title Shop
/// package "Shop.Aggregates.Order" {
///   class Order <<Aggregate>> {
///     OrderId : Guid
///   }
/// }
/// @enduml
/// "#;
///
/// let blueprint = Blueprint::new(AppConfig::default());
/// let document = blueprint.parse_content(source, None);
/// let result = blueprint.validate_content(source, None);
/// assert!(result.is_valid());
///
/// let diagrams = DiagramSolution::new("docs", vec![document]);
/// let solution = blueprint.generate(&diagrams, "Shop", Path::new("out"));
/// assert_eq!(solution.projects.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    config: AppConfig,
    cancel: CancellationToken,
}

impl Blueprint {
    /// Create a pipeline with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Parser, validation and generation settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Use `cancel` for directory-level operations.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A parser configured from the `[parser]` section.
    pub fn parser(&self) -> Parser {
        Parser::new(self.config.parser().clone())
    }

    /// A validator configured from the `[parser]` and `[validation]` sections.
    pub fn validator(&self) -> Validator {
        Validator::new(self.config.validation().clone()).with_parser(self.parser())
    }

    /// Parse diagram text. Never fails.
    pub fn parse_content(&self, source: &str, source_path: Option<&Path>) -> DiagramDocument {
        let document = self.parser().parse_content(source, source_path);
        trace!(document:?; "Parsed document");
        document
    }

    /// Parse one file. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Parse`] when the file cannot be read.
    pub fn parse_file(
        &self,
        reader: &dyn SourceReader,
        path: &Path,
    ) -> Result<Option<DiagramDocument>, BlueprintError> {
        Ok(self.parser().parse_file(reader, path)?)
    }

    /// Parse every diagram file below a directory.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Parse`] when the directory is missing or
    /// cannot be listed, or when the pipeline is cancelled.
    pub fn parse_directory(
        &self,
        reader: &dyn SourceReader,
        path: &Path,
    ) -> Result<DiagramSolution, BlueprintError> {
        info!(path:? = path; "Parsing diagrams");
        let solution = self.parser().parse_directory(reader, path, &self.cancel)?;
        debug!(documents = solution.documents.len(); "Diagrams parsed");
        Ok(solution)
    }

    /// Parse a directory, or a single file as a one-document solution named
    /// after the file stem.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Parse`] when nothing exists at `path` or it
    /// cannot be read.
    pub fn parse_path(
        &self,
        reader: &dyn SourceReader,
        path: &Path,
    ) -> Result<DiagramSolution, BlueprintError> {
        if reader.is_dir(path) {
            return self.parse_directory(reader, path);
        }

        let document = self
            .parse_file(reader, path)?
            .ok_or_else(|| ParseError::NotFound(path.to_path_buf()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut solution = DiagramSolution::new(name, vec![document]);
        solution.source_path = Some(path.to_path_buf());
        Ok(solution)
    }

    /// Validate a directory, or a single file as a one-document report.
    pub fn validate_path(&self, reader: &dyn SourceReader, path: &Path) -> ValidationReport {
        self.validator().validate_path(reader, path, &self.cancel)
    }

    /// Validate every diagram file below a directory.
    pub fn validate_directory(&self, reader: &dyn SourceReader, path: &Path) -> ValidationReport {
        self.validator()
            .validate_directory(reader, path, &self.cancel)
    }

    pub fn validate_file(
        &self,
        reader: &dyn SourceReader,
        path: &Path,
    ) -> DocumentValidationResult {
        self.validator().validate_file(reader, path)
    }

    pub fn validate_content(&self, source: &str, path: Option<&Path>) -> DocumentValidationResult {
        self.validator().validate_content(source, path)
    }

    /// Validate an already parsed model without the raw structural checks.
    pub fn validate_model(&self, solution: &DiagramSolution) -> ValidationReport {
        self.validator().validate_model(solution)
    }

    /// Build the solution model rooted at `output_directory/solution_name`.
    pub fn generate(
        &self,
        diagrams: &DiagramSolution,
        solution_name: &str,
        output_directory: &Path,
    ) -> SolutionModel {
        SolutionFactory::new(self.config.generation().clone()).create(
            diagrams,
            solution_name,
            output_directory,
        )
    }

    /// Translate a sequence diagram into an architecture diagram.
    pub fn translate_sequence(&self, source: &str, solution_name: &str) -> String {
        info!(solution = solution_name; "Translating sequence diagram");
        blueprint_parser::translate_sequence(source, solution_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directory_missing() {
        let blueprint = Blueprint::default();
        let reader = MemorySourceReader::new();

        let err = blueprint
            .parse_directory(&reader, Path::new("missing"))
            .unwrap_err();
        assert!(matches!(err, BlueprintError::Parse(ParseError::NotFound(_))));
    }

    #[test]
    fn test_cancelled_parse() {
        let cancel = CancellationToken::new();
        let blueprint = Blueprint::default().with_cancellation(cancel.clone());
        let reader = MemorySourceReader::new().with_file("docs/a.puml", "@startuml\n@enduml");
        cancel.cancel();

        let err = blueprint
            .parse_directory(&reader, Path::new("docs"))
            .unwrap_err();
        assert!(matches!(err, BlueprintError::Parse(ParseError::Cancelled)));
    }

    #[test]
    fn test_parse_path_single_file() {
        let reader = MemorySourceReader::new()
            .with_file("docs/orders.puml", "@startuml\nclass Order\n@enduml");
        let blueprint = Blueprint::default();

        let solution = blueprint
            .parse_path(&reader, Path::new("docs/orders.puml"))
            .unwrap();
        assert_eq!(solution.name, "orders");
        assert_eq!(solution.documents.len(), 1);

        let err = blueprint
            .parse_path(&reader, Path::new("docs/missing.puml"))
            .unwrap_err();
        assert!(matches!(err, BlueprintError::Parse(ParseError::NotFound(_))));
    }

    #[test]
    fn test_validator_uses_parser_extension() {
        let config = AppConfig::new(
            config::ParserConfig::new("plantuml", config::DedupPolicy::PerLine),
            config::ValidationConfig::default(),
            config::GenerationConfig::default(),
        );
        let reader = MemorySourceReader::new()
            .with_file("docs/shop.plantuml", "@startuml\ntitle Shop\nclass Order\n@enduml")
            .with_file("docs/ignored.puml", "not a diagram");

        let report = Blueprint::new(config).validate_directory(&reader, Path::new("docs"));
        assert_eq!(report.documents.len(), 1);
    }
}
