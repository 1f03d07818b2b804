//! The core issue type for the Blueprint validator.
//!
//! An [`Issue`] represents a single deviation found in a diagram, with a
//! stable code, fixed severity and category, and optional guidance.

use std::fmt;

use serde::Serialize;

use crate::error::{Category, IssueCode, Severity};

/// A validation issue with guidance for fixing it.
///
/// Issues carry:
/// - A stable [`IssueCode`] that fixes severity and category
/// - A primary message describing the deviation
/// - Optional details with more context
/// - An optional suggested fix
/// - The name of the related element (class, enum, component, ...)
///
/// # Example
///
/// ```text
/// error[DUP001]: class `Customer` is defined in multiple files
///   details: defined in customers.puml, orders.puml
///   fix: keep a single definition and reference it elsewhere
///   element: Customer
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    code: IssueCode,
    severity: Severity,
    category: Category,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_fix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    related_element: Option<String>,
}

impl Issue {
    /// Create an issue for the given code.
    ///
    /// Severity and category are taken from the code.
    ///
    /// # Example
    ///
    /// ```
    /// # use blueprint_parser::error::{Category, Issue, IssueCode};
    /// let issue = Issue::new(IssueCode::NAM001, "class name `order` should start uppercase")
    ///     .with_suggested_fix("rename it to `Order`");
    ///
    /// assert!(issue.severity().is_warning());
    /// assert_eq!(issue.category(), Category::Naming);
    /// ```
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            category: code.category(),
            message: message.into(),
            details: None,
            suggested_fix: None,
            related_element: None,
        }
    }

    /// Get the issue code.
    pub fn code(&self) -> IssueCode {
        self.code
    }

    /// Get the severity of this issue.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the rule family of this issue.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the details, if any.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Get the suggested fix, if any.
    pub fn suggested_fix(&self) -> Option<&str> {
        self.suggested_fix.as_deref()
    }

    /// Get the related element name, if any.
    pub fn related_element(&self) -> Option<&str> {
        self.related_element.as_deref()
    }

    /// Set the details text.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Set the suggested fix.
    pub fn with_suggested_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    /// Set the related element name.
    pub fn with_related_element(mut self, element: impl Into<String>) -> Self {
        self.related_element = Some(element.into());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[KEY001]: message"
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}
