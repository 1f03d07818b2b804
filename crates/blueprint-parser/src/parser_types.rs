//! Parser output types
//!
//! The parser turns scanned lines into a tree of [`Statement`]s that mirrors
//! the block structure of the source. Elaboration then builds the
//! [`DiagramDocument`](blueprint_core::diagram::DiagramDocument) from it.
//!
//! Declarations keep the 1-based line they started on for logging.

use blueprint_core::diagram::{MethodSignature, PropertyField, RelationshipEdge, Stereotype};

/// One top-level or package-level construct.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement {
    Title(String),
    Package(PackageDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
    Relationship(RelationshipDecl),
    Component(ComponentDecl),
    Note(NoteDecl),
}

/// `package "Name" <<Stereo>> { ... }`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PackageDecl {
    pub line: usize,
    pub name: String,
    pub stereotype: Option<String>,
    pub body: Vec<Statement>,
}

/// `class Name <<Stereo>> { ... }`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClassDecl {
    pub line: usize,
    pub name: String,
    pub stereotype: Stereotype,
    pub properties: Vec<PropertyField>,
    pub methods: Vec<MethodSignature>,
}

/// `enum Name { A, B }`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EnumDecl {
    pub line: usize,
    pub name: String,
    pub values: Vec<String>,
}

/// A relationship line together with its text.
///
/// `text` is kept for substring de-duplication.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RelationshipDecl {
    pub line: usize,
    pub edge: RelationshipEdge,
    pub text: String,
}

impl RelationshipDecl {
    /// Whether the line used the cardinality form.
    pub fn with_cardinality(&self) -> bool {
        self.edge.has_cardinality()
    }
}

/// `component [Name] as alias` or `[Name] as alias`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ComponentDecl {
    pub line: usize,
    pub name: String,
    pub alias: String,
    /// The declaration opened a brace block.
    pub has_brace_body: bool,
}

/// A note, attached to a target or floating.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NoteDecl {
    pub line: usize,
    /// Element the note is attached to (`note right of Target`).
    pub target: Option<String>,
    /// Inline text of a single-line note (`note "Title" as N`, `note of X : text`).
    pub title: Option<String>,
    /// Body lines of a multi-line note, trimmed.
    pub body: Vec<String>,
}

impl NoteDecl {
    /// Full note text: the inline title followed by body lines.
    pub fn text(&self) -> String {
        self.title
            .iter()
            .map(String::as_str)
            .chain(self.body.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
