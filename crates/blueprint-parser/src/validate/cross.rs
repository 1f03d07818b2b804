//! Checks across all documents of a solution.

use std::{collections::BTreeSet, path::PathBuf};

use indexmap::IndexMap;

use blueprint_core::diagram::{ClassEntity, DiagramDocument};

use crate::{
    error::{Issue, IssueCode, IssueCollector},
    validate::rules::KnownTypes,
};

/// Run the solution-wide checks.
pub(super) fn check(
    documents: &[&DiagramDocument],
    known: &KnownTypes,
    issues: &mut IssueCollector,
) {
    if documents.iter().all(|document| document.has_no_entities()) {
        issues.emit(
            Issue::new(IssueCode::DOC002, "no classes or enums found in any document")
                .with_suggested_fix("declare at least one aggregate class"),
        );
        return;
    }

    check_duplicates(documents, issues);
    check_type_references(documents, known, issues);
    check_aggregates(documents, issues);
}

/// Report recommended file names missing from the listed files.
pub(super) fn check_recommended(
    files: &[PathBuf],
    recommended: &[String],
    issues: &mut IssueCollector,
) {
    for name in recommended {
        let present = files.iter().any(|file| {
            file.file_name()
                .is_some_and(|file_name| file_name.eq_ignore_ascii_case(name.as_str()))
        });
        if !present {
            issues.emit(
                Issue::new(IssueCode::DOC003, format!("recommended document `{name}` is absent"))
                    .with_related_element(name),
            );
        }
    }
}

/// Key identifying a document in cross-document messages.
fn document_key(index: usize, document: &DiagramDocument) -> String {
    match &document.source_path {
        Some(path) => path.display().to_string(),
        None => format!("<document {}>", index + 1),
    }
}

fn check_duplicates(documents: &[&DiagramDocument], issues: &mut IssueCollector) {
    let mut classes: IndexMap<&str, Vec<String>> = IndexMap::new();
    let mut enums: IndexMap<&str, Vec<String>> = IndexMap::new();

    for (index, document) in documents.iter().enumerate() {
        let key = document_key(index, document);
        for class in document.all_classes() {
            let files = classes.entry(class.name.as_str()).or_default();
            if !files.contains(&key) {
                files.push(key.clone());
            }
        }
        for entity in document.all_enums() {
            let files = enums.entry(entity.name.as_str()).or_default();
            if !files.contains(&key) {
                files.push(key.clone());
            }
        }
    }

    for (code, kind, names) in [
        (IssueCode::DUP001, "class", &classes),
        (IssueCode::DUP002, "enum", &enums),
    ] {
        for (name, files) in names.iter().filter(|(_, files)| files.len() > 1) {
            issues.emit(
                Issue::new(code, format!("{kind} `{name}` is defined in multiple files"))
                    .with_details(format!("defined in {}", files.join(", ")))
                    .with_suggested_fix("keep a single definition and reference it elsewhere")
                    .with_related_element(*name),
            );
        }
    }
}

fn check_type_references(
    documents: &[&DiagramDocument],
    known: &KnownTypes,
    issues: &mut IssueCollector,
) {
    let mut undefined: IndexMap<&str, Vec<String>> = IndexMap::new();

    for class in documents.iter().flat_map(|document| document.all_classes()) {
        for property in &class.properties {
            if property.type_name.is_empty() || known.contains(&property.type_name) {
                continue;
            }
            undefined
                .entry(property.type_name.as_str())
                .or_default()
                .push(format!("{}.{}", class.name, property.name));
        }
    }

    for (type_name, usages) in undefined {
        issues.emit(
            Issue::new(
                IssueCode::TYP001,
                format!("type `{type_name}` is referenced but never defined"),
            )
            .with_details(format!("used by {}", usages.join(", ")))
            .with_suggested_fix(format!("declare `{type_name}` as a class or enum"))
            .with_related_element(type_name),
        );
    }
}

fn check_aggregates(documents: &[&DiagramDocument], issues: &mut IssueCollector) {
    let contexts: BTreeSet<&str> = documents
        .iter()
        .flat_map(|document| document.packages.iter())
        .filter_map(|package| package.bounded_context())
        .collect();
    let message = match contexts.len() {
        0 => "no bounded contexts found; a single context will be generated".to_string(),
        count => format!(
            "found {count} bounded context(s): {}",
            contexts.iter().copied().collect::<Vec<_>>().join(", ")
        ),
    };
    issues.emit(Issue::new(IssueCode::CTX001, message));

    let aggregates: Vec<&ClassEntity> = documents
        .iter()
        .flat_map(|document| document.all_classes())
        .filter(|class| class.is_aggregate())
        .collect();

    for aggregate in &aggregates {
        let has_collections = aggregate.properties.iter().any(|p| p.is_collection);
        let has_whole_part = documents
            .iter()
            .flat_map(|document| document.relationships.iter())
            .any(|edge| edge.relationship_type.is_whole_part() && edge.touches(&aggregate.name));
        if has_collections && !has_whole_part {
            issues.emit(
                Issue::new(
                    IssueCode::AGG001,
                    format!(
                        "aggregate `{}` has collections but no composition or aggregation",
                        aggregate.name
                    ),
                )
                .with_suggested_fix(format!(
                    "draw the ownership, e.g. `{} \"1\" *-- \"0..*\" Part`",
                    aggregate.name
                ))
                .with_related_element(&aggregate.name),
            );
        }
    }

    let has_classes = documents
        .iter()
        .any(|document| document.all_classes().next().is_some());
    if has_classes && aggregates.is_empty() {
        issues.emit(
            Issue::new(IssueCode::AGG002, "no class is marked as an aggregate")
                .with_details("features and controllers are generated for aggregates only")
                .with_suggested_fix("add `<<Aggregate>>` to the root classes"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::diagram::{
        EnumEntity, PackageGroup, PropertyField, RelationshipEdge, RelationshipType, Stereotype,
    };

    fn run(documents: &[&DiagramDocument]) -> Vec<Issue> {
        let known = KnownTypes::from_documents(documents.iter().copied());
        let mut issues = IssueCollector::new();
        check(documents, &known, &mut issues);
        issues.finish()
    }

    fn codes(documents: &[&DiagramDocument]) -> Vec<IssueCode> {
        run(documents).iter().map(Issue::code).collect()
    }

    fn file(path: &str, classes: Vec<ClassEntity>) -> DiagramDocument {
        DiagramDocument {
            source_path: Some(PathBuf::from(path)),
            classes,
            ..DiagramDocument::default()
        }
    }

    fn aggregate(name: &str) -> ClassEntity {
        ClassEntity::new(name, Stereotype::Aggregate)
            .with_property(PropertyField::new(format!("{name}Id"), "Guid"))
    }

    #[test]
    fn test_no_entities() {
        let empty = DiagramDocument::default();
        assert_eq!(codes(&[&empty, &empty]), vec![IssueCode::DOC002]);
    }

    #[test]
    fn test_duplicate_class_across_files() {
        let a = file("a.puml", vec![aggregate("Customer")]);
        let b = file("b.puml", vec![aggregate("Customer")]);
        let issues = run(&[&a, &b]);

        let duplicates: Vec<&Issue> = issues
            .iter()
            .filter(|issue| issue.code() == IssueCode::DUP001)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].details(), Some("defined in a.puml, b.puml"));
    }

    #[test]
    fn test_duplicate_in_one_file_is_not_cross_document() {
        let a = file("a.puml", vec![aggregate("Customer"), aggregate("Customer")]);
        assert!(!codes(&[&a]).contains(&IssueCode::DUP001));
    }

    #[test]
    fn test_duplicate_enum_and_in_memory_keys() {
        let status = EnumEntity {
            name: "Status".to_string(),
            namespace: None,
            values: vec!["Open".to_string()],
            line: 0,
        };
        let first = DiagramDocument {
            enums: vec![status.clone()],
            ..DiagramDocument::default()
        };
        let second = first.clone();
        let issues = run(&[&first, &second]);

        assert_eq!(issues[0].code(), IssueCode::DUP002);
        assert_eq!(issues[0].details(), Some("defined in <document 1>, <document 2>"));
    }

    #[test]
    fn test_undefined_types_grouped() {
        let order = aggregate("Order")
            .with_property(PropertyField::new("Billing", "Address"))
            .with_property(PropertyField::new("Shipping", "Address"))
            .with_property(PropertyField::new("Status", "OrderStatus"));
        let document = file("a.puml", vec![order]);
        let issues = run(&[&document]);

        let undefined: Vec<&Issue> = issues
            .iter()
            .filter(|issue| issue.code() == IssueCode::TYP001)
            .collect();
        assert_eq!(undefined.len(), 2);
        assert_eq!(undefined[0].details(), Some("used by Order.Billing, Order.Shipping"));
        assert_eq!(undefined[1].related_element(), Some("OrderStatus"));
    }

    #[test]
    fn test_bounded_contexts_counted() {
        let document = DiagramDocument {
            packages: vec![
                PackageGroup {
                    name: "Shop.Sales.Aggregates.Order".to_string(),
                    classes: vec![aggregate("Order")],
                    ..PackageGroup::default()
                },
                PackageGroup {
                    name: "Shop.Inventory.Aggregates.Item".to_string(),
                    classes: vec![aggregate("Item")],
                    ..PackageGroup::default()
                },
            ],
            ..DiagramDocument::default()
        };
        let issues = run(&[&document]);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code(), IssueCode::CTX001);
        assert_eq!(issues[0].message(), "found 2 bounded context(s): Inventory, Sales");
    }

    #[test]
    fn test_aggregate_rules() {
        let order = aggregate("Order")
            .with_property(PropertyField::new("Lines", "Line").wrapped_in("List"));
        let line = ClassEntity::new("Line", Stereotype::Entity)
            .with_property(PropertyField::new("LineId", "Guid"));
        let mut document = file("a.puml", vec![order, line]);
        assert_eq!(codes(&[&document]), vec![IssueCode::CTX001, IssueCode::AGG001]);

        document
            .relationships
            .push(RelationshipEdge::new("Order", "Line", RelationshipType::Composition));
        assert_eq!(codes(&[&document]), vec![IssueCode::CTX001]);

        let plain = file("b.puml", vec![ClassEntity::new("Money", Stereotype::ValueObject)]);
        assert_eq!(codes(&[&plain]), vec![IssueCode::CTX001, IssueCode::AGG002]);
    }

    #[test]
    fn test_recommended_documents() {
        let files = vec![PathBuf::from("docs/Solution.puml"), PathBuf::from("docs/extra.puml")];
        let recommended = vec!["solution.puml".to_string(), "components.puml".to_string()];
        let mut issues = IssueCollector::new();
        check_recommended(&files, &recommended, &mut issues);
        let issues = issues.finish();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code(), IssueCode::DOC003);
        assert_eq!(issues[0].related_element(), Some("components.puml"));
    }
}
