//! Validation of diagram text and parsed models.
//!
//! The [`Validator`] runs three families of checks:
//!
//! 1. **Raw** - structure of the text itself (markers, braces, notes)
//! 2. **Rules** - per-document checks over the parsed model
//! 3. **Cross** - checks across all documents of a solution
//!
//! Validation never fails and never mutates the model. Every finding is an
//! [`Issue`] in the returned report.

mod cross;
mod raw;
mod report;
mod rules;

pub use report::{DocumentValidationResult, ReportSummary, ValidationReport};

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use blueprint_core::{
    cancel::CancellationToken,
    diagram::{DiagramDocument, DiagramSolution},
};

use crate::{
    Parser,
    config::ValidationConfig,
    error::{Issue, IssueCode, IssueCollector},
    source::SourceReader,
};

use rules::KnownTypes;

/// A document read for validation, or the reason it could not be.
enum Loaded {
    Parsed { text: String, document: DiagramDocument },
    Failed(DocumentValidationResult),
}

/// Configured validator.
///
/// # Examples
///
/// ```
/// use blueprint_parser::{Validator, ValidationConfig, error::IssueCode};
///
/// let validator = Validator::new(ValidationConfig::default());
/// let result = validator.validate_content(
///     "@startuml\ntitle Shop\nclass Order <<Aggregate>> {\n  Total : decimal\n}\n@enduml",
///     None,
/// );
///
/// assert!(!result.is_valid());
/// assert_eq!(result.count(IssueCode::KEY001), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
    parser: Parser,
}

impl Validator {
    /// Create a validator that parses with the default parser settings.
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            parser: Parser::default(),
        }
    }

    /// Use `parser` to read diagram text.
    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = parser;
        self
    }

    /// Validate every diagram file below a directory.
    ///
    /// A missing or empty directory is reported as [`IssueCode::DOC001`].
    /// When `cancel` fires, the files validated so far are reported.
    pub fn validate_directory(
        &self,
        reader: &dyn SourceReader,
        path: &Path,
        cancel: &CancellationToken,
    ) -> ValidationReport {
        let mut report = ValidationReport::new(Some(path.to_path_buf()));
        let mut global = IssueCollector::new();
        let extension = self.parser.config().file_extension();

        let files = match self.list_files(reader, path) {
            Ok(files) => files,
            Err(issue) => {
                global.emit(issue);
                report.global_issues = global.finish();
                return report;
            }
        };
        info!(path:? = path, files = files.len(); "Validating diagram directory");

        let mut loaded = Vec::with_capacity(files.len());
        for file in &files {
            if cancel.is_cancelled() {
                info!("Validation cancelled");
                break;
            }
            loaded.push(self.load(reader, file));
        }

        let documents: Vec<&DiagramDocument> = loaded
            .iter()
            .filter_map(|entry| match entry {
                Loaded::Parsed { document, .. } => Some(document),
                Loaded::Failed(_) => None,
            })
            .collect();
        let known = KnownTypes::from_documents(documents.iter().copied());

        for entry in &loaded {
            let result = match entry {
                Loaded::Parsed { text, document } => {
                    self.check_document(Some(text.as_str()), document, &known)
                }
                Loaded::Failed(result) => result.clone(),
            };
            report.documents.push(result);
        }

        cross::check_recommended(&files, self.config.recommended_documents(), &mut global);
        if documents.is_empty() {
            warn!(path:? = path, extension = extension; "No readable diagram files");
        } else {
            cross::check(&documents, &known, &mut global);
        }
        report.global_issues = global.finish();

        log_summary(&report);
        report
    }

    /// Validate a directory, or a single file as a one-document report.
    pub fn validate_path(
        &self,
        reader: &dyn SourceReader,
        path: &Path,
        cancel: &CancellationToken,
    ) -> ValidationReport {
        if reader.is_dir(path) {
            return self.validate_directory(reader, path, cancel);
        }

        let mut report = ValidationReport::new(Some(path.to_path_buf()));
        report.documents.push(self.validate_file(reader, path));
        log_summary(&report);
        report
    }

    /// Validate one diagram file.
    ///
    /// A missing or unreadable file is reported as [`IssueCode::DOC001`]
    /// inside the result.
    pub fn validate_file(
        &self,
        reader: &dyn SourceReader,
        path: &Path,
    ) -> DocumentValidationResult {
        if !reader.exists(path) {
            warn!(path:? = path; "Diagram file not found");
            return missing_document(
                path,
                Issue::new(
                    IssueCode::DOC001,
                    format!("diagram file `{}` not found", path.display()),
                ),
            );
        }

        match self.load(reader, path) {
            Loaded::Parsed { text, document } => {
                let known = KnownTypes::from_documents([&document]);
                self.check_document(Some(text.as_str()), &document, &known)
            }
            Loaded::Failed(result) => result,
        }
    }

    /// Validate in-memory diagram text with raw and model checks.
    pub fn validate_content(&self, text: &str, path: Option<&Path>) -> DocumentValidationResult {
        let document = self.parser.parse_content(text, path);
        let known = KnownTypes::from_documents([&document]);
        self.check_document(Some(text), &document, &known)
    }

    /// Validate a parsed solution. Performs no I/O.
    pub fn validate_model(&self, solution: &DiagramSolution) -> ValidationReport {
        let mut report = ValidationReport::new(solution.source_path.clone());
        let mut global = IssueCollector::new();

        if solution.documents.is_empty() {
            global.emit(
                Issue::new(
                    IssueCode::DOC001,
                    format!("solution `{}` has no documents", solution.name),
                )
                .with_related_element(&solution.name),
            );
            report.global_issues = global.finish();
            return report;
        }

        let documents: Vec<&DiagramDocument> = solution.documents.iter().collect();
        let known = KnownTypes::from_documents(documents.iter().copied());
        report.documents = documents
            .iter()
            .map(|document| self.check_document(None, document, &known))
            .collect();

        cross::check(&documents, &known, &mut global);
        report.global_issues = global.finish();

        log_summary(&report);
        report
    }

    fn list_files(&self, reader: &dyn SourceReader, path: &Path) -> Result<Vec<PathBuf>, Issue> {
        let extension = self.parser.config().file_extension();

        if !reader.is_dir(path) {
            return Err(Issue::new(
                IssueCode::DOC001,
                format!("directory `{}` not found", path.display()),
            ));
        }

        let files = reader.list_files(path, extension).map_err(|err| {
            Issue::new(
                IssueCode::DOC001,
                format!("directory `{}` cannot be listed", path.display()),
            )
            .with_details(err.to_string())
        })?;

        if files.is_empty() {
            return Err(Issue::new(
                IssueCode::DOC001,
                format!("no `.{extension}` files found in `{}`", path.display()),
            )
            .with_suggested_fix("add at least one diagram file"));
        }

        Ok(files)
    }

    fn load(&self, reader: &dyn SourceReader, path: &Path) -> Loaded {
        match reader.read_to_string(path) {
            Ok(text) => {
                debug!(path:? = path; "Validating diagram file");
                let document = self.parser.parse_content(&text, Some(path));
                Loaded::Parsed { text, document }
            }
            Err(err) => {
                warn!(path:? = path, err:%; "Cannot read diagram file");
                Loaded::Failed(missing_document(
                    path,
                    Issue::new(
                        IssueCode::DOC001,
                        format!("diagram file `{}` cannot be read", path.display()),
                    )
                    .with_details(err.to_string()),
                ))
            }
        }
    }

    /// Raw checks (when text is available) followed by model rules.
    fn check_document(
        &self,
        text: Option<&str>,
        document: &DiagramDocument,
        known: &KnownTypes,
    ) -> DocumentValidationResult {
        let mut issues = IssueCollector::new();
        if let Some(text) = text {
            raw::check(text, &mut issues);
        }
        rules::check(document, known, &mut issues);

        let file_path = document.display_path();
        debug!(
            path = file_path.as_str(),
            issues = issues.len(),
            has_errors = issues.has_errors();
            "Document validated",
        );

        DocumentValidationResult {
            file_path,
            title: document.title.clone(),
            issues: issues.finish(),
        }
    }
}

fn missing_document(path: &Path, issue: Issue) -> DocumentValidationResult {
    DocumentValidationResult {
        file_path: path.display().to_string(),
        title: None,
        issues: vec![issue],
    }
}

fn log_summary(report: &ValidationReport) {
    let summary = report.summary();
    info!(
        documents = report.documents.len(),
        errors = summary.errors,
        warnings = summary.warnings,
        infos = summary.infos;
        "Validation finished",
    );
}
