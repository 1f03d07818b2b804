//! Issue codes for the Blueprint validator.
//!
//! Codes are grouped by rule family:
//! - `DOCxxx` - Document presence
//! - `STRxxx` - Raw text structure
//! - `NAMxxx` - Naming conventions
//! - `KEYxxx`, `AUDxxx`, `ENTxxx`, `ENMxxx` - Entity definitions
//! - `PRPxxx` - Properties
//! - `RELxxx` - Relationships
//! - `CMPxxx` - Components
//! - `DUPxxx`, `TYPxxx`, `CTXxxx`, `AGGxxx` - Cross-document checks
//!
//! Severity and category are fixed per code and cannot be configured.

use std::fmt;

use serde::Serialize;

use crate::error::{Category, Severity};

/// Stable identifiers for validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // =========================================================================
    // Document presence
    // =========================================================================
    /// No diagram file found.
    ///
    /// The directory contains no diagram files, or a requested file is missing.
    DOC001,

    /// No entities defined.
    ///
    /// None of the documents declares a class or an enum.
    DOC002,

    /// Recommended document missing.
    ///
    /// A conventionally expected document name was not found.
    DOC003,

    // =========================================================================
    // Raw structure
    // =========================================================================
    /// Missing `@startuml`.
    STR001,

    /// Missing `@enduml`.
    STR002,

    /// Unclosed block.
    ///
    /// A `class`, `enum` or `package` block opened with `{` is never closed.
    STR003,

    /// Unexpected closing brace.
    ///
    /// A `}` appears without a matching open block.
    STR004,

    /// Unbalanced notes.
    ///
    /// The number of multi-line `note` openers differs from `end note` lines.
    STR005,

    /// Component with a body.
    ///
    /// Components must be single-line; details belong in a separate note.
    STR006,

    /// Missing title.
    STR007,

    // =========================================================================
    // Naming
    // =========================================================================
    /// Class name does not start with an uppercase letter.
    NAM001,

    /// Enum name does not start with an uppercase letter.
    NAM002,

    /// Property name does not start with an uppercase letter.
    NAM003,

    /// Enum value does not start with an uppercase letter.
    NAM004,

    /// Package name lacks an `Aggregates` segment.
    NAM005,

    // =========================================================================
    // Entity definitions
    // =========================================================================
    /// Missing key property.
    ///
    /// An aggregate or entity has no property named `{ClassName}Id`.
    KEY001,

    /// Key property not recognized.
    ///
    /// A property matching `{ClassName}Id` exists but is not flagged as a key.
    KEY002,

    /// Unexpected key type.
    ///
    /// Key properties should be `string` or `Guid`.
    KEY003,

    /// Missing audit properties.
    ///
    /// `CreatedAt`/`ModifiedAt` are absent; generation adds them anyway.
    AUD001,

    /// Empty class.
    ENT001,

    /// Enum without values.
    ENM001,

    // =========================================================================
    // Properties
    // =========================================================================
    /// Property without a name.
    PRP001,

    /// Property without a type.
    PRP002,

    /// Unrecognized collection wrapper.
    PRP003,

    // =========================================================================
    // Relationships
    // =========================================================================
    /// Unknown relationship source.
    REL001,

    /// Unknown relationship target.
    REL002,

    /// Whole/part relationship without cardinality.
    REL003,

    // =========================================================================
    // Components
    // =========================================================================
    /// Duplicate component name.
    CMP001,

    /// Duplicate component alias.
    CMP002,

    /// Controller without endpoint description.
    CMP003,

    // =========================================================================
    // Cross-document
    // =========================================================================
    /// Class defined in more than one file.
    DUP001,

    /// Enum defined in more than one file.
    DUP002,

    /// Undefined type reference.
    TYP001,

    /// Bounded contexts discovered.
    CTX001,

    /// Aggregate collections without a whole/part relationship.
    AGG001,

    /// No aggregate defined.
    AGG002,
}

impl IssueCode {
    /// Returns the code as a string (e.g., "KEY001").
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::DOC001 => "DOC001",
            IssueCode::DOC002 => "DOC002",
            IssueCode::DOC003 => "DOC003",
            IssueCode::STR001 => "STR001",
            IssueCode::STR002 => "STR002",
            IssueCode::STR003 => "STR003",
            IssueCode::STR004 => "STR004",
            IssueCode::STR005 => "STR005",
            IssueCode::STR006 => "STR006",
            IssueCode::STR007 => "STR007",
            IssueCode::NAM001 => "NAM001",
            IssueCode::NAM002 => "NAM002",
            IssueCode::NAM003 => "NAM003",
            IssueCode::NAM004 => "NAM004",
            IssueCode::NAM005 => "NAM005",
            IssueCode::KEY001 => "KEY001",
            IssueCode::KEY002 => "KEY002",
            IssueCode::KEY003 => "KEY003",
            IssueCode::AUD001 => "AUD001",
            IssueCode::ENT001 => "ENT001",
            IssueCode::ENM001 => "ENM001",
            IssueCode::PRP001 => "PRP001",
            IssueCode::PRP002 => "PRP002",
            IssueCode::PRP003 => "PRP003",
            IssueCode::REL001 => "REL001",
            IssueCode::REL002 => "REL002",
            IssueCode::REL003 => "REL003",
            IssueCode::CMP001 => "CMP001",
            IssueCode::CMP002 => "CMP002",
            IssueCode::CMP003 => "CMP003",
            IssueCode::DUP001 => "DUP001",
            IssueCode::DUP002 => "DUP002",
            IssueCode::TYP001 => "TYP001",
            IssueCode::CTX001 => "CTX001",
            IssueCode::AGG001 => "AGG001",
            IssueCode::AGG002 => "AGG002",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            IssueCode::DOC001 => "no diagram files",
            IssueCode::DOC002 => "no entities defined",
            IssueCode::DOC003 => "recommended document missing",
            IssueCode::STR001 => "missing start marker",
            IssueCode::STR002 => "missing end marker",
            IssueCode::STR003 => "unclosed block",
            IssueCode::STR004 => "unexpected closing brace",
            IssueCode::STR005 => "unbalanced notes",
            IssueCode::STR006 => "component with body",
            IssueCode::STR007 => "missing title",
            IssueCode::NAM001 => "class name casing",
            IssueCode::NAM002 => "enum name casing",
            IssueCode::NAM003 => "property name casing",
            IssueCode::NAM004 => "enum value casing",
            IssueCode::NAM005 => "package without aggregates segment",
            IssueCode::KEY001 => "missing key property",
            IssueCode::KEY002 => "key property not recognized",
            IssueCode::KEY003 => "unexpected key type",
            IssueCode::AUD001 => "missing audit properties",
            IssueCode::ENT001 => "empty class",
            IssueCode::ENM001 => "enum without values",
            IssueCode::PRP001 => "property without name",
            IssueCode::PRP002 => "property without type",
            IssueCode::PRP003 => "unrecognized collection wrapper",
            IssueCode::REL001 => "unknown relationship source",
            IssueCode::REL002 => "unknown relationship target",
            IssueCode::REL003 => "relationship without cardinality",
            IssueCode::CMP001 => "duplicate component name",
            IssueCode::CMP002 => "duplicate component alias",
            IssueCode::CMP003 => "controller without endpoints",
            IssueCode::DUP001 => "duplicate class",
            IssueCode::DUP002 => "duplicate enum",
            IssueCode::TYP001 => "undefined type",
            IssueCode::CTX001 => "bounded contexts",
            IssueCode::AGG001 => "aggregate collections without composition",
            IssueCode::AGG002 => "no aggregates",
        }
    }

    /// The fixed severity of this code.
    pub fn severity(&self) -> Severity {
        match self {
            IssueCode::DOC001
            | IssueCode::DOC002
            | IssueCode::STR001
            | IssueCode::STR002
            | IssueCode::STR003
            | IssueCode::STR004
            | IssueCode::STR005
            | IssueCode::STR006
            | IssueCode::KEY001
            | IssueCode::PRP001
            | IssueCode::PRP002
            | IssueCode::CMP001
            | IssueCode::CMP002
            | IssueCode::DUP001
            | IssueCode::DUP002 => Severity::Error,

            IssueCode::NAM001
            | IssueCode::NAM002
            | IssueCode::NAM003
            | IssueCode::NAM004
            | IssueCode::NAM005
            | IssueCode::KEY002
            | IssueCode::KEY003
            | IssueCode::ENT001
            | IssueCode::ENM001
            | IssueCode::PRP003
            | IssueCode::REL001
            | IssueCode::REL002
            | IssueCode::TYP001
            | IssueCode::AGG002 => Severity::Warning,

            IssueCode::DOC003
            | IssueCode::STR007
            | IssueCode::AUD001
            | IssueCode::REL003
            | IssueCode::CMP003
            | IssueCode::CTX001
            | IssueCode::AGG001 => Severity::Info,
        }
    }

    /// The rule family of this code.
    pub fn category(&self) -> Category {
        match self {
            IssueCode::DOC001 | IssueCode::DOC002 | IssueCode::DOC003 => Category::Document,
            IssueCode::STR001
            | IssueCode::STR002
            | IssueCode::STR003
            | IssueCode::STR004
            | IssueCode::STR005
            | IssueCode::STR006
            | IssueCode::STR007 => Category::Structure,
            IssueCode::NAM001
            | IssueCode::NAM002
            | IssueCode::NAM003
            | IssueCode::NAM004
            | IssueCode::NAM005 => Category::Naming,
            IssueCode::KEY001
            | IssueCode::KEY002
            | IssueCode::KEY003
            | IssueCode::AUD001
            | IssueCode::ENT001
            | IssueCode::ENM001 => Category::Entity,
            IssueCode::PRP001 | IssueCode::PRP002 | IssueCode::PRP003 => Category::Property,
            IssueCode::REL001 | IssueCode::REL002 | IssueCode::REL003 => Category::Relationship,
            IssueCode::CMP001 | IssueCode::CMP002 | IssueCode::CMP003 => Category::Component,
            IssueCode::DUP001
            | IssueCode::DUP002
            | IssueCode::TYP001
            | IssueCode::CTX001
            | IssueCode::AGG001
            | IssueCode::AGG002 => Category::CrossDocument,
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_code_display() {
        assert_eq!(IssueCode::DOC001.to_string(), "DOC001");
        assert_eq!(IssueCode::KEY001.to_string(), "KEY001");
        assert_eq!(IssueCode::DUP001.to_string(), "DUP001");
    }

    #[test]
    fn test_issue_code_severity() {
        assert!(IssueCode::KEY001.severity().is_error());
        assert!(IssueCode::KEY002.severity().is_warning());
        assert!(IssueCode::AUD001.severity().is_info());
        assert!(IssueCode::DUP001.severity().is_error());
        assert!(IssueCode::TYP001.severity().is_warning());
        assert!(IssueCode::CTX001.severity().is_info());
    }

    #[test]
    fn test_issue_code_category() {
        assert_eq!(IssueCode::STR003.category(), Category::Structure);
        assert_eq!(IssueCode::NAM005.category(), Category::Naming);
        assert_eq!(IssueCode::CMP002.category(), Category::Component);
        assert_eq!(IssueCode::AGG001.category(), Category::CrossDocument);
    }

    #[test]
    fn test_issue_code_description() {
        assert_eq!(IssueCode::KEY001.description(), "missing key property");
        assert_eq!(IssueCode::DUP001.description(), "duplicate class");
    }
}
