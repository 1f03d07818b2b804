//! Validation results and their Markdown rendering.

use std::{fmt, path::PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Issue, IssueCode, Severity};

/// Issues found in one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentValidationResult {
    /// Display path of the document, `<memory>` for in-memory text.
    pub file_path: String,
    pub title: Option<String>,
    pub issues: Vec<Issue>,
}

impl DocumentValidationResult {
    /// Returns `true` if no issue is an error.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|issue| issue.severity().is_error())
    }

    /// Number of issues with the given code.
    pub fn count(&self, code: IssueCode) -> usize {
        self.issues.iter().filter(|issue| issue.code() == code).count()
    }
}

/// Issue counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub is_valid: bool,
}

/// Result of validating a directory, a file set or a solution model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub source_path: Option<PathBuf>,
    pub timestamp: DateTime<Utc>,
    pub documents: Vec<DocumentValidationResult>,
    /// Issues that concern the solution as a whole.
    pub global_issues: Vec<Issue>,
}

impl ValidationReport {
    pub(crate) fn new(source_path: Option<PathBuf>) -> Self {
        Self {
            source_path,
            timestamp: Utc::now(),
            documents: Vec::new(),
            global_issues: Vec::new(),
        }
    }

    /// All issues: per-document issues first, then global issues.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.documents
            .iter()
            .flat_map(|document| document.issues.iter())
            .chain(self.global_issues.iter())
    }

    /// Number of issues with the given code.
    pub fn count(&self, code: IssueCode) -> usize {
        self.issues().filter(|issue| issue.code() == code).count()
    }

    /// Returns `true` if there is no error anywhere in the report.
    pub fn is_valid(&self) -> bool {
        !self.issues().any(|issue| issue.severity().is_error())
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for issue in self.issues() {
            match issue.severity() {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        summary.is_valid = summary.errors == 0;
        summary
    }

    /// Render the report as a Markdown document.
    pub fn to_markdown(&self) -> String {
        Markdown(self).to_string()
    }
}

/// Markdown view of a [`ValidationReport`].
struct Markdown<'a>(&'a ValidationReport);

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let summary = report.summary();

        writeln!(f, "# Validation Report\n")?;
        if let Some(path) = &report.source_path {
            writeln!(f, "- **Source:** `{}`", path.display())?;
        }
        writeln!(
            f,
            "- **Generated:** {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            f,
            "- **Status:** {}\n",
            if summary.is_valid { "Valid" } else { "Invalid" }
        )?;

        writeln!(f, "## Summary\n")?;
        writeln!(f, "| Severity | Count |\n|----------|-------|")?;
        writeln!(f, "| Errors | {} |", summary.errors)?;
        writeln!(f, "| Warnings | {} |", summary.warnings)?;
        writeln!(f, "| Info | {} |", summary.infos)?;
        writeln!(f, "| Documents | {} |\n", report.documents.len())?;

        if !report.documents.is_empty() {
            writeln!(f, "## Documents\n")?;
            for document in &report.documents {
                match &document.title {
                    Some(title) => writeln!(f, "### `{}` ({title})\n", document.file_path)?,
                    None => writeln!(f, "### `{}`\n", document.file_path)?,
                }
                write_issues(f, &document.issues)?;
            }
        }

        if !report.global_issues.is_empty() {
            writeln!(f, "## Global Issues\n")?;
            write_issues(f, &report.global_issues)?;
        }
        Ok(())
    }
}

fn write_issues(f: &mut fmt::Formatter<'_>, issues: &[Issue]) -> fmt::Result {
    if issues.is_empty() {
        return writeln!(f, "No issues found.\n");
    }

    for issue in issues {
        writeln!(
            f,
            "- **{}** `{}` [{}]: {}",
            issue.severity(),
            issue.code(),
            issue.category(),
            issue.message()
        )?;
        if let Some(details) = issue.details() {
            writeln!(f, "  - Details: {details}")?;
        }
        if let Some(fix) = issue.suggested_fix() {
            writeln!(f, "  - Suggested fix: {fix}")?;
        }
        if let Some(element) = issue.related_element() {
            writeln!(f, "  - Element: `{element}`")?;
        }
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ValidationReport {
        let mut report = ValidationReport::new(Some(PathBuf::from("docs")));
        report.documents.push(DocumentValidationResult {
            file_path: "docs/aggregates.puml".to_string(),
            title: Some("Aggregates".to_string()),
            issues: vec![
                Issue::new(IssueCode::KEY001, "aggregate `Order` has no key property")
                    .with_suggested_fix("add `OrderId : Guid`")
                    .with_related_element("Order"),
                Issue::new(IssueCode::NAM003, "property `total` should start uppercase"),
            ],
        });
        report.documents.push(DocumentValidationResult {
            file_path: "docs/components.puml".to_string(),
            title: None,
            issues: Vec::new(),
        });
        report
            .global_issues
            .push(Issue::new(IssueCode::CTX001, "found 1 bounded context: Sales"));
        report
    }

    #[test]
    fn test_summary_counts() {
        let report = sample_report();
        assert_eq!(
            report.summary(),
            ReportSummary {
                errors: 1,
                warnings: 1,
                infos: 1,
                is_valid: false,
            }
        );
        assert!(!report.is_valid());
        assert_eq!(report.count(IssueCode::KEY001), 1);
        assert!(!report.documents[0].is_valid());
        assert!(report.documents[1].is_valid());
    }

    #[test]
    fn test_markdown_rendering() {
        let markdown = sample_report().to_markdown();

        assert!(markdown.starts_with("# Validation Report"));
        assert!(markdown.contains("- **Status:** Invalid"));
        assert!(markdown.contains("| Errors | 1 |"));
        assert!(markdown.contains("### `docs/aggregates.puml` (Aggregates)"));
        assert!(markdown.contains(
            "- **error** `KEY001` [Entity]: aggregate `Order` has no key property"
        ));
        assert!(markdown.contains("  - Suggested fix: add `OrderId : Guid`"));
        assert!(markdown.contains("  - Element: `Order`"));
        assert!(markdown.contains("No issues found."));
        assert!(markdown.contains("## Global Issues"));
        assert!(markdown.contains("[Cross-Document]"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let value = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(value["documents"][0]["issues"][0]["code"], "KEY001");
        assert_eq!(value["documents"][0]["issues"][0]["severity"], "Error");
    }
}
