//! Rule families that issues belong to.

use std::fmt;

use serde::Serialize;

/// The rule family an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Presence of diagram files and entities.
    Document,
    /// Raw text structure: markers, braces, notes.
    Structure,
    /// Naming conventions.
    Naming,
    /// Entity definitions: keys, audit fields, empty classes.
    Entity,
    /// Property definitions.
    Property,
    /// Relationship edges.
    Relationship,
    /// Components and their endpoint notes.
    Component,
    /// Checks across all documents of a solution.
    CrossDocument,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Document => "Document",
            Category::Structure => "Structure",
            Category::Naming => "Naming",
            Category::Entity => "Entity",
            Category::Property => "Property",
            Category::Relationship => "Relationship",
            Category::Component => "Component",
            Category::CrossDocument => "Cross-Document",
        };
        f.write_str(name)
    }
}
