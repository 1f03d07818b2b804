//! Per-document rules over the parsed model.

use std::collections::HashSet;

use indexmap::IndexMap;

use blueprint_core::{
    diagram::{
        ClassEntity, ComponentNode, DiagramDocument, EnumEntity, PropertyField, RelationshipEdge,
    },
    naming, primitives,
};

use crate::error::{Issue, IssueCode, IssueCollector};

/// Type names a diagram may reference without declaring them.
#[derive(Debug, Default)]
pub(super) struct KnownTypes {
    names: HashSet<String>,
}

impl KnownTypes {
    /// Collect classes, enums and components of the given documents.
    pub(super) fn from_documents<'a>(
        documents: impl IntoIterator<Item = &'a DiagramDocument>,
    ) -> Self {
        let mut names = HashSet::new();
        for document in documents {
            names.extend(document.all_classes().map(|class| class.name.clone()));
            names.extend(document.all_enums().map(|entity| entity.name.clone()));
            for component in &document.components {
                names.insert(component.name.clone());
                names.insert(component.alias.clone());
            }
        }
        Self { names }
    }

    /// Returns `true` for primitives and declared names.
    ///
    /// Qualified references (`Sales.Order`) match on their last segment.
    pub(super) fn contains(&self, name: &str) -> bool {
        let name = name.trim_end_matches('?');
        let simple = name.rsplit('.').next().unwrap_or(name);
        primitives::is_primitive(name) || self.names.contains(name) || self.names.contains(simple)
    }
}

/// Run the model rules over one document.
pub(super) fn check(document: &DiagramDocument, known: &KnownTypes, issues: &mut IssueCollector) {
    for package in &document.packages {
        if !naming::has_aggregates_segment(&package.name) {
            issues.emit(
                Issue::new(
                    IssueCode::NAM005,
                    format!(
                        "package `{}` has no `{}` segment",
                        package.name,
                        naming::AGGREGATES_SEGMENT
                    ),
                )
                .with_suggested_fix(format!(
                    "name it like `Solution.Context.{}.Owner`",
                    naming::AGGREGATES_SEGMENT
                ))
                .with_related_element(&package.name),
            );
        }
    }

    for class in document.all_classes() {
        check_class(class, issues);
    }
    for entity in document.all_enums() {
        check_enum(entity, issues);
    }
    for edge in &document.relationships {
        check_relationship(edge, known, issues);
    }
    check_components(&document.components, issues);
}

fn check_class(class: &ClassEntity, issues: &mut IssueCollector) {
    if !naming::starts_uppercase(&class.name) {
        issues.emit(
            Issue::new(
                IssueCode::NAM001,
                format!("class name `{}` should start uppercase", class.name),
            )
            .with_suggested_fix(format!("rename it to `{}`", naming::to_pascal_case(&class.name)))
            .with_related_element(&class.name),
        );
    }

    if class.is_entity_like() {
        check_key(class, issues);
        check_audit(class, issues);
    }

    if class.is_empty() {
        issues.emit(
            Issue::new(
                IssueCode::ENT001,
                format!("class `{}` has no properties and no methods", class.name),
            )
            .with_related_element(&class.name),
        );
    }

    for property in &class.properties {
        check_property(class, property, issues);
    }
}

fn check_key(class: &ClassEntity, issues: &mut IssueCollector) {
    let key_name = class.key_name();

    match class.key_property() {
        Some(key) => {
            let is_key_type = key.type_name.eq_ignore_ascii_case("string")
                || key.type_name.eq_ignore_ascii_case("guid");
            if !is_key_type {
                issues.emit(
                    Issue::new(
                        IssueCode::KEY003,
                        format!("key `{key_name}` has type `{}`", key.type_name),
                    )
                    .with_details("keys are expected to be `string` or `Guid`")
                    .with_suggested_fix(format!("declare it as `{key_name} : Guid`"))
                    .with_related_element(&class.name),
                );
            }
        }
        None => {
            let near_miss = class
                .properties
                .iter()
                .find(|property| property.name.eq_ignore_ascii_case(&key_name));
            match near_miss {
                Some(property) => issues.emit(
                    Issue::new(
                        IssueCode::KEY002,
                        format!(
                            "property `{}` of `{}` is not recognized as its key",
                            property.name, class.name
                        ),
                    )
                    .with_suggested_fix(format!("rename it to `{key_name}`"))
                    .with_related_element(&class.name),
                ),
                None => issues.emit(
                    Issue::new(
                        IssueCode::KEY001,
                        format!("{} `{}` has no key property", class.stereotype, class.name),
                    )
                    .with_details(format!("expected a property named `{key_name}`"))
                    .with_suggested_fix(format!("add `{key_name} : Guid`"))
                    .with_related_element(&class.name),
                ),
            }
        }
    }
}

fn check_audit(class: &ClassEntity, issues: &mut IssueCollector) {
    let missing: Vec<&str> = ["CreatedAt", "ModifiedAt"]
        .into_iter()
        .filter(|name| class.property(name).is_none())
        .collect();
    if missing.is_empty() {
        return;
    }

    issues.emit(
        Issue::new(
            IssueCode::AUD001,
            format!("`{}` has no {} property", class.name, missing.join("/")),
        )
        .with_details("audit fields are added to generated entities automatically")
        .with_related_element(&class.name),
    );
}

fn check_property(class: &ClassEntity, property: &PropertyField, issues: &mut IssueCollector) {
    if property.name.is_empty() {
        issues.emit(
            Issue::new(
                IssueCode::PRP001,
                format!("`{}` has a property without a name", class.name),
            )
            .with_details(format!("declared type `{}`", property.declared_type()))
            .with_related_element(&class.name),
        );
    } else if !naming::starts_uppercase(&property.name) {
        issues.emit(
            Issue::new(
                IssueCode::NAM003,
                format!(
                    "property `{}.{}` should start uppercase",
                    class.name, property.name
                ),
            )
            .with_suggested_fix(format!(
                "rename it to `{}`",
                naming::to_pascal_case(&property.name)
            ))
            .with_related_element(&class.name),
        );
    }

    if property.type_name.is_empty() {
        issues.emit(
            Issue::new(
                IssueCode::PRP002,
                format!("property `{}.{}` has no type", class.name, property.name),
            )
            .with_suggested_fix(format!("write it as `{} : Type`", property.name))
            .with_related_element(&class.name),
        );
    }

    if let Some(wrapper) = property.collection_type.as_ref().filter(|_| !property.is_collection) {
        issues.emit(
            Issue::new(
                IssueCode::PRP003,
                format!(
                    "property `{}.{}` uses unrecognized wrapper `{wrapper}`",
                    class.name, property.name
                ),
            )
            .with_details(format!(
                "recognized wrappers: {}",
                primitives::COLLECTION_WRAPPERS.join(", ")
            ))
            .with_related_element(&class.name),
        );
    }
}

fn check_enum(entity: &EnumEntity, issues: &mut IssueCollector) {
    if !naming::starts_uppercase(&entity.name) {
        issues.emit(
            Issue::new(
                IssueCode::NAM002,
                format!("enum name `{}` should start uppercase", entity.name),
            )
            .with_suggested_fix(format!("rename it to `{}`", naming::to_pascal_case(&entity.name)))
            .with_related_element(&entity.name),
        );
    }

    if entity.values.is_empty() {
        issues.emit(
            Issue::new(IssueCode::ENM001, format!("enum `{}` has no values", entity.name))
                .with_related_element(&entity.name),
        );
    }

    for value in entity.values.iter().filter(|value| !naming::starts_uppercase(value)) {
        issues.emit(
            Issue::new(
                IssueCode::NAM004,
                format!("enum value `{}.{value}` should start uppercase", entity.name),
            )
            .with_suggested_fix(format!("rename it to `{}`", naming::to_pascal_case(value)))
            .with_related_element(&entity.name),
        );
    }
}

fn check_relationship(edge: &RelationshipEdge, known: &KnownTypes, issues: &mut IssueCollector) {
    let description = format!("{} {} {}", edge.source, edge.relationship_type, edge.target);

    if !known.contains(&edge.source) {
        issues.emit(
            Issue::new(
                IssueCode::REL001,
                format!("relationship source `{}` is not a known type", edge.source),
            )
            .with_details(description.clone())
            .with_related_element(&edge.source),
        );
    }
    if !known.contains(&edge.target) {
        issues.emit(
            Issue::new(
                IssueCode::REL002,
                format!("relationship target `{}` is not a known type", edge.target),
            )
            .with_details(description.clone())
            .with_related_element(&edge.target),
        );
    }
    if edge.relationship_type.is_whole_part() && !edge.has_cardinality() {
        issues.emit(
            Issue::new(
                IssueCode::REL003,
                format!(
                    "{} between `{}` and `{}` has no cardinality",
                    edge.relationship_type, edge.source, edge.target
                ),
            )
            .with_suggested_fix(format!(
                "annotate it like `{} \"1\" *-- \"0..*\" {}`",
                edge.source, edge.target
            )),
        );
    }
}

fn check_components(components: &[ComponentNode], issues: &mut IssueCollector) {
    let mut by_name: IndexMap<&str, usize> = IndexMap::new();
    let mut by_alias: IndexMap<&str, Vec<&ComponentNode>> = IndexMap::new();
    for component in components {
        *by_name.entry(component.name.as_str()).or_default() += 1;
        by_alias.entry(component.alias.as_str()).or_default().push(component);
    }

    for (name, count) in by_name.iter().filter(|(_, count)| **count > 1) {
        issues.emit(
            Issue::new(
                IssueCode::CMP001,
                format!("component `{name}` is declared {count} times"),
            )
            .with_related_element(*name),
        );
    }

    for (alias, group) in by_alias.iter().filter(|(_, group)| group.len() > 1) {
        // Implicit aliases repeat with their names, already reported above.
        if group.iter().all(|component| component.alias == component.name) {
            continue;
        }
        issues.emit(
            Issue::new(
                IssueCode::CMP002,
                format!("alias `{alias}` is used by {} components", group.len()),
            )
            .with_details(
                group
                    .iter()
                    .map(|component| component.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
            .with_related_element(*alias),
        );
    }

    for component in components {
        if component.is_controller() && component.endpoint_spec.is_none() {
            issues.emit(
                Issue::new(
                    IssueCode::CMP003,
                    format!("controller `{}` has no endpoint note", component.name),
                )
                .with_suggested_fix(format!(
                    "add `note right of {}` with a `Route:` line and endpoint lines",
                    component.alias
                ))
                .with_related_element(&component.name),
            );
        }
    }
}
