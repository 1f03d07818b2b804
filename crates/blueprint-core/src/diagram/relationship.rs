//! Relationship edges between classes.

use serde::Serialize;

use crate::diagram::RelationshipType;

/// A relationship line between two named types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationshipEdge {
    pub source: String,
    pub target: String,
    pub source_cardinality: Option<String>,
    pub target_cardinality: Option<String>,
    pub relationship_type: RelationshipType,
    pub label: Option<String>,
}

impl RelationshipEdge {
    /// Create an edge without cardinalities or label.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship_type,
            ..Self::default()
        }
    }

    /// Returns `true` if either end carries a cardinality annotation.
    pub fn has_cardinality(&self) -> bool {
        self.source_cardinality.is_some() || self.target_cardinality.is_some()
    }

    /// Returns `true` if `name` is either end of the edge.
    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }
}
