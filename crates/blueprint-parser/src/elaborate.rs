//! Elaboration of parsed statements into a [`DiagramDocument`].
//!
//! Notes are gathered before any node is built, so every class and component
//! is constructed once with its note already attached. Nested packages are
//! flattened into the document's package list; relationships, components and
//! notes inside packages belong to the document.

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, trace};

use blueprint_core::diagram::{
    ClassEntity, ComponentNode, DiagramDocument, Endpoint, EndpointSpec, EnumEntity, Metadata,
    PackageGroup, RelationshipEdge,
};

use crate::{
    config::DedupPolicy,
    parser::{endpoint_line, key_value, whole_line},
    parser_types::{ClassDecl, ComponentDecl, EnumDecl, NoteDecl, RelationshipDecl, Statement},
};

/// Title of the reserved note that carries document metadata.
const METADATA_TITLE: &str = "Document Metadata";

/// Builds a [`DiagramDocument`] from a statement tree.
pub(crate) struct Builder<'a> {
    statements: &'a [Statement],
    dedup_policy: DedupPolicy,
    class_notes: IndexMap<&'a str, Vec<String>>,
    component_notes: IndexMap<&'a str, Vec<String>>,
    metadata: Option<Metadata>,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(statements: &'a [Statement], dedup_policy: DedupPolicy) -> Self {
        Self {
            statements,
            dedup_policy,
            class_notes: IndexMap::new(),
            component_notes: IndexMap::new(),
            metadata: None,
        }
    }

    pub(crate) fn build(mut self, source_path: Option<&Path>) -> DiagramDocument {
        self.resolve_notes();

        let mut document = DiagramDocument {
            source_path: source_path.map(Path::to_path_buf),
            metadata: self.metadata.take(),
            ..DiagramDocument::default()
        };
        let mut relationships = Vec::new();

        self.build_scope(self.statements, None, &mut document, &mut relationships);
        document.relationships = self.deduplicate(relationships);

        let path = document.display_path();
        debug!(
            path = path.as_str(),
            packages = document.packages.len(),
            classes = document.all_classes().count(),
            enums = document.all_enums().count(),
            relationships = document.relationships.len(),
            components = document.components.len();
            "Document elaborated",
        );
        document
    }

    // ============================================================================
    // Notes
    // ============================================================================

    /// Attach every note to a class (by name) or else a component (by alias).
    fn resolve_notes(&mut self) {
        let mut notes = Vec::new();
        let mut class_names = Vec::new();
        let mut component_aliases = Vec::new();
        collect_note_targets(
            self.statements,
            &mut notes,
            &mut class_names,
            &mut component_aliases,
        );

        for note in notes {
            if is_metadata_note(note) {
                if self.metadata.is_none() {
                    self.metadata = Some(parse_metadata(&note.text()));
                } else {
                    trace!(line = note.line; "Ignoring repeated metadata note");
                }
                continue;
            }

            let Some(target) = note.target.as_deref() else {
                trace!(line = note.line; "Floating note is not attached");
                continue;
            };

            if class_names.contains(&target) {
                self.class_notes.entry(target).or_default().push(note.text());
            } else if component_aliases.contains(&target) {
                self.component_notes
                    .entry(target)
                    .or_default()
                    .push(note.text());
            } else {
                trace!(line = note.line, target = target; "Note target not found");
            }
        }
    }

    // ============================================================================
    // Nodes
    // ============================================================================

    fn build_scope(
        &self,
        statements: &'a [Statement],
        namespace: Option<&str>,
        document: &mut DiagramDocument,
        relationships: &mut Vec<&'a RelationshipDecl>,
    ) {
        for statement in statements {
            match statement {
                Statement::Title(title) => {
                    if document.title.is_none() {
                        document.title = Some(title.clone());
                    }
                }
                Statement::Package(package) => {
                    let mut group = PackageGroup {
                        name: package.name.clone(),
                        stereotype: package.stereotype.clone(),
                        ..PackageGroup::default()
                    };
                    for child in &package.body {
                        match child {
                            Statement::Class(class) => {
                                group.classes.push(self.build_class(class, Some(&package.name)))
                            }
                            Statement::Enum(decl) => {
                                group.enums.push(build_enum(decl, Some(&package.name)))
                            }
                            _ => {}
                        }
                    }
                    document.packages.push(group);
                    // Nested packages and hoisted constructs come after their parent.
                    self.build_scope(&package.body, Some(&package.name), document, relationships);
                }
                Statement::Class(class) => {
                    if namespace.is_none() {
                        document.classes.push(self.build_class(class, None));
                    }
                }
                Statement::Enum(decl) => {
                    if namespace.is_none() {
                        document.enums.push(build_enum(decl, None));
                    }
                }
                Statement::Relationship(relationship) => relationships.push(relationship),
                Statement::Component(component) => {
                    document.components.push(self.build_component(component))
                }
                Statement::Note(_) => {}
            }
        }
    }

    fn build_class(&self, decl: &ClassDecl, namespace: Option<&str>) -> ClassEntity {
        trace!(line = decl.line, name = decl.name.as_str(); "Building class");
        ClassEntity {
            name: decl.name.clone(),
            namespace: namespace.map(String::from),
            stereotype: decl.stereotype,
            properties: decl.properties.clone(),
            methods: decl.methods.clone(),
            note: self
                .class_notes
                .get(decl.name.as_str())
                .map(|notes| notes.join("\n")),
            line: decl.line,
        }
    }

    fn build_component(&self, decl: &ComponentDecl) -> ComponentNode {
        let note = self
            .component_notes
            .get(decl.alias.as_str())
            .map(|notes| notes.join("\n"));
        let endpoint_spec = note.as_deref().and_then(parse_endpoint_spec);

        ComponentNode {
            name: decl.name.clone(),
            alias: decl.alias.clone(),
            note,
            endpoint_spec,
        }
    }

    // ============================================================================
    // Relationships
    // ============================================================================

    fn deduplicate(&self, relationships: Vec<&RelationshipDecl>) -> Vec<RelationshipEdge> {
        match self.dedup_policy {
            DedupPolicy::PerLine => relationships
                .into_iter()
                .map(|decl| decl.edge.clone())
                .collect(),
            DedupPolicy::TextSubstring => {
                let cardinality_texts: Vec<&str> = relationships
                    .iter()
                    .filter(|decl| decl.with_cardinality())
                    .map(|decl| decl.text.as_str())
                    .collect();

                relationships
                    .into_iter()
                    .filter(|decl| {
                        let shadowed = !decl.with_cardinality()
                            && cardinality_texts
                                .iter()
                                .any(|text| text.contains(decl.text.as_str()));
                        if shadowed {
                            trace!(line = decl.line; "Dropping bare relationship shadowed by cardinality form");
                        }
                        !shadowed
                    })
                    .map(|decl| decl.edge.clone())
                    .collect()
            }
        }
    }
}

fn build_enum(decl: &EnumDecl, namespace: Option<&str>) -> EnumEntity {
    EnumEntity {
        name: decl.name.clone(),
        namespace: namespace.map(String::from),
        values: decl.values.clone(),
        line: decl.line,
    }
}

/// Gather notes, class names and component aliases across all scopes.
fn collect_note_targets<'a>(
    statements: &'a [Statement],
    notes: &mut Vec<&'a NoteDecl>,
    class_names: &mut Vec<&'a str>,
    component_aliases: &mut Vec<&'a str>,
) {
    for statement in statements {
        match statement {
            Statement::Note(note) => notes.push(note),
            Statement::Class(class) => class_names.push(&class.name),
            Statement::Component(component) => component_aliases.push(&component.alias),
            Statement::Package(package) => {
                collect_note_targets(&package.body, notes, class_names, component_aliases)
            }
            Statement::Title(_) | Statement::Enum(_) | Statement::Relationship(_) => {}
        }
    }
}

/// Split note text into trimmed lines, honoring literal `\n` in inline notes.
fn note_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .flat_map(|line| line.split("\\n"))
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Strip Markdown/Creole emphasis around a heading line.
fn heading_text(line: &str) -> &str {
    line.trim_matches(|c: char| c == '*' || c == '=' || c == '#' || c == '_' || c.is_whitespace())
}

fn is_metadata_note(note: &NoteDecl) -> bool {
    let text = note.text();
    note_lines(&text)
        .next()
        .is_some_and(|first| heading_text(first).eq_ignore_ascii_case(METADATA_TITLE))
}

fn parse_metadata(text: &str) -> Metadata {
    let mut metadata = Metadata::default();

    for line in note_lines(text).skip(1) {
        let Some((key, value)) = whole_line(line, key_value) else {
            continue;
        };
        let value = Some(value.to_string());
        match key.to_ascii_lowercase().as_str() {
            "generated" => metadata.generated = value,
            "version" => metadata.version = value,
            "source" => metadata.source = value,
            "target framework" | ".net version" | "framework" => metadata.target_framework = value,
            "angular version" | "ui framework" => metadata.ui_framework = value,
            other => trace!(key = other; "Ignoring unknown metadata key"),
        }
    }

    metadata
}

/// Parse an endpoint description from a component note.
///
/// A `Route` line is required; verb lines and the authentication flag are
/// optional.
fn parse_endpoint_spec(note: &str) -> Option<EndpointSpec> {
    let mut route = None;
    let mut authentication_required = false;
    let mut endpoints = Vec::new();

    for line in note_lines(note) {
        if let Some((verb, path, description)) = whole_line(line, endpoint_line) {
            endpoints.push(Endpoint {
                verb,
                path: path.to_string(),
                description: description.map(String::from),
            });
        } else if let Some((key, value)) = whole_line(line, key_value) {
            if key.eq_ignore_ascii_case("route") {
                route = Some(value.to_string());
            } else if key.eq_ignore_ascii_case("authentication") {
                authentication_required = matches!(
                    value.to_ascii_lowercase().as_str(),
                    "required" | "yes" | "true"
                );
            }
        }
    }

    Some(EndpointSpec {
        route: route?,
        authentication_required,
        endpoints,
    })
}
