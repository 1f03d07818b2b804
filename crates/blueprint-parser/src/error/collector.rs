//! Collector for accumulating issues while validating one document.
//!
//! The [`IssueCollector`] lets every rule report as many issues as it finds
//! instead of stopping at the first one.

use crate::error::Issue;

/// A collector for accumulating issues during a validation pass.
///
/// # Example
///
/// ```text
/// let mut collector = IssueCollector::new();
///
/// collector.emit(Issue::new(IssueCode::NAM001, "class name `order` should start uppercase"));
/// collector.emit(Issue::new(IssueCode::KEY001, "aggregate `order` has no key property"));
///
/// assert!(collector.has_errors());
/// let issues = collector.finish();
/// ```
#[derive(Debug, Default)]
pub(crate) struct IssueCollector {
    issues: Vec<Issue>,
    has_errors: bool,
}

impl IssueCollector {
    /// Create a new empty collector.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Emit an issue to this collector.
    pub(crate) fn emit(&mut self, issue: Issue) {
        if issue.severity().is_error() {
            self.has_errors = true;
        }
        self.issues.push(issue);
    }

    /// Emit every issue of an iterator, keeping their order.
    pub(crate) fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.emit(issue);
        }
    }

    /// Whether any emitted issue is an error.
    pub(crate) fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub(crate) fn len(&self) -> usize {
        self.issues.len()
    }

    /// Finish collection and return the issues in emission order.
    pub(crate) fn finish(self) -> Vec<Issue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;

    #[test]
    fn test_collector_new_finish_empty() {
        let collector = IssueCollector::new();
        assert!(!collector.has_errors());
        assert!(collector.finish().is_empty());
    }

    #[test]
    fn test_collector_emit_error() {
        let mut collector = IssueCollector::new();

        collector.emit(Issue::new(IssueCode::STR001, "missing @startuml"));

        assert!(collector.has_errors());
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_collector_emit_warning_only() {
        let mut collector = IssueCollector::new();

        collector.emit(Issue::new(IssueCode::NAM003, "property casing"));
        collector.emit(Issue::new(IssueCode::STR007, "missing title"));

        assert!(!collector.has_errors());
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = IssueCollector::new();

        collector.emit(Issue::new(IssueCode::STR002, "first"));
        collector.extend([
            Issue::new(IssueCode::NAM001, "second"),
            Issue::new(IssueCode::KEY001, "third"),
        ]);

        let issues = collector.finish();
        let messages: Vec<_> = issues.iter().map(Issue::message).collect();
        assert_eq!(messages, ["first", "second", "third"]);
    }
}
