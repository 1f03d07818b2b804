//! Parsed documents and multi-document solutions.

use std::{collections::BTreeSet, path::PathBuf};

use serde::Serialize;

use crate::{
    diagram::{ClassEntity, ComponentNode, EnumEntity, PackageGroup, RelationshipEdge},
    naming,
};

/// One parsed source unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagramDocument {
    pub title: Option<String>,
    pub source_path: Option<PathBuf>,
    pub packages: Vec<PackageGroup>,
    /// Classes declared outside any package.
    pub classes: Vec<ClassEntity>,
    /// Enums declared outside any package.
    pub enums: Vec<EnumEntity>,
    pub relationships: Vec<RelationshipEdge>,
    pub components: Vec<ComponentNode>,
    pub metadata: Option<Metadata>,
}

impl DiagramDocument {
    /// Every class in the document, package-nested or not, in source order.
    ///
    /// Classes built in code share line 0 and keep package order, then
    /// top-level order.
    pub fn all_classes(&self) -> impl Iterator<Item = &ClassEntity> {
        let mut classes: Vec<&ClassEntity> = self
            .packages
            .iter()
            .flat_map(|p| p.classes.iter())
            .chain(self.classes.iter())
            .collect();
        classes.sort_by_key(|class| class.line);
        classes.into_iter()
    }

    /// Every enum in the document, in the same order as [`all_classes`](Self::all_classes).
    pub fn all_enums(&self) -> impl Iterator<Item = &EnumEntity> {
        let mut enums: Vec<&EnumEntity> = self
            .packages
            .iter()
            .flat_map(|p| p.enums.iter())
            .chain(self.enums.iter())
            .collect();
        enums.sort_by_key(|model| model.line);
        enums.into_iter()
    }

    /// Returns `true` if the document declares no class and no enum.
    pub fn has_no_entities(&self) -> bool {
        self.all_classes().next().is_none() && self.all_enums().next().is_none()
    }

    /// Display form of the source path, or `<memory>` for in-memory text.
    pub fn display_path(&self) -> String {
        self.source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string())
    }
}

/// Fields of the reserved `"Document Metadata"` note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub generated: Option<String>,
    pub version: Option<String>,
    pub source: Option<String>,
    pub target_framework: Option<String>,
    pub ui_framework: Option<String>,
}

impl Metadata {
    /// Returns `true` if no field was found.
    pub fn is_empty(&self) -> bool {
        self.generated.is_none()
            && self.version.is_none()
            && self.source.is_none()
            && self.target_framework.is_none()
            && self.ui_framework.is_none()
    }
}

/// Several documents parsed from one directory tree.
///
/// Every view is recomputed on each call; nothing is cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagramSolution {
    pub name: String,
    pub source_path: Option<PathBuf>,
    pub documents: Vec<DiagramDocument>,
}

impl DiagramSolution {
    /// Create a solution from already parsed documents.
    pub fn new(name: impl Into<String>, documents: Vec<DiagramDocument>) -> Self {
        Self {
            name: name.into(),
            source_path: None,
            documents,
        }
    }

    /// All classes across all documents.
    pub fn all_classes(&self) -> impl Iterator<Item = &ClassEntity> {
        self.documents.iter().flat_map(DiagramDocument::all_classes)
    }

    /// All enums across all documents.
    pub fn all_enums(&self) -> impl Iterator<Item = &EnumEntity> {
        self.documents.iter().flat_map(DiagramDocument::all_enums)
    }

    /// All classes stereotyped as aggregates.
    pub fn all_aggregates(&self) -> impl Iterator<Item = &ClassEntity> {
        self.all_classes().filter(|c| c.is_aggregate())
    }

    /// All relationships across all documents.
    pub fn all_relationships(&self) -> impl Iterator<Item = &RelationshipEdge> {
        self.documents.iter().flat_map(|d| d.relationships.iter())
    }

    /// Sorted, de-duplicated bounded context names inferred from package names.
    pub fn bounded_contexts(&self) -> BTreeSet<String> {
        self.documents
            .iter()
            .flat_map(|d| d.packages.iter())
            .filter_map(|p| naming::bounded_context_of(&p.name))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::Stereotype;

    fn package(name: &str, classes: Vec<ClassEntity>) -> PackageGroup {
        PackageGroup {
            name: name.to_string(),
            classes,
            ..PackageGroup::default()
        }
    }

    #[test]
    fn test_all_classes_includes_packages_and_top_level() {
        let doc = DiagramDocument {
            packages: vec![package(
                "Shop.Sales.Aggregates.Order",
                vec![ClassEntity::new("Order", Stereotype::Aggregate)],
            )],
            classes: vec![ClassEntity::new("Money", Stereotype::ValueObject)],
            ..DiagramDocument::default()
        };

        let names: Vec<_> = doc.all_classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Order", "Money"]);
        assert!(!doc.has_no_entities());
    }

    #[test]
    fn test_all_classes_follow_source_lines() {
        let alpha = ClassEntity {
            line: 1,
            ..ClassEntity::new("Alpha", Stereotype::None)
        };
        let beta = ClassEntity {
            line: 4,
            ..ClassEntity::new("Beta", Stereotype::Aggregate)
        };
        let doc = DiagramDocument {
            packages: vec![package("S.C.Aggregates.B", vec![beta])],
            classes: vec![alpha],
            enums: vec![EnumEntity {
                name: "Late".to_string(),
                line: 9,
                ..EnumEntity::default()
            }],
            ..DiagramDocument::default()
        };

        let names: Vec<_> = doc.all_classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta"]);
        assert_eq!(doc.all_enums().count(), 1);
    }

    #[test]
    fn test_solution_views() {
        let sales = DiagramDocument {
            packages: vec![package(
                "Shop.Sales.Aggregates.Order",
                vec![
                    ClassEntity::new("Order", Stereotype::Aggregate),
                    ClassEntity::new("OrderLine", Stereotype::Entity),
                ],
            )],
            ..DiagramDocument::default()
        };
        let inventory = DiagramDocument {
            packages: vec![
                package(
                    "Shop.Inventory.Aggregates.Item",
                    vec![ClassEntity::new("Item", Stereotype::Aggregate)],
                ),
                package("Shop.Sales.Aggregates.Quote", vec![]),
            ],
            ..DiagramDocument::default()
        };

        let solution = DiagramSolution::new("Shop", vec![sales, inventory]);

        assert_eq!(solution.all_classes().count(), 3);
        assert_eq!(solution.all_aggregates().count(), 2);
        let contexts: Vec<_> = solution.bounded_contexts().into_iter().collect();
        assert_eq!(contexts, ["Inventory", "Sales"]);
    }
}
