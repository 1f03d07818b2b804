//! Partitioning of a diagram solution into bounded contexts.

use indexmap::IndexMap;
use log::{debug, trace};

use blueprint_core::{
    diagram::{
        ClassEntity, ComponentNode, DiagramSolution, EndpointSpec, EnumEntity, PropertyField,
    },
    naming,
};

/// Audit properties every generated entity carries.
const STAMPED_AUDIT_PROPERTIES: [&str; 2] = ["CreatedAt", "ModifiedAt"];

/// A class prepared for generation.
#[derive(Debug, Clone)]
pub(super) struct EntityModel {
    /// The class with a guaranteed key and audit timestamps.
    pub class: ClassEntity,
    /// Aggregate folder the entity is generated into.
    pub owner: String,
    pub key: PropertyField,
    pub plural: String,
    /// Endpoint description of a matching `*Controller` component.
    pub endpoint: Option<EndpointSpec>,
}

impl EntityModel {
    fn new(class: &ClassEntity, components: &[&ComponentNode]) -> Self {
        let mut class = class.clone();
        if class.key_property().is_none() {
            let key_name = class.key_name();
            match class.properties.iter_mut().find(|p| p.name == key_name) {
                // `ParentNodeId` on `ParentNode` is not a key by name alone.
                Some(existing) => existing.is_key = true,
                None => {
                    trace!(class = class.name.as_str(); "Adding synthetic key");
                    class.properties.insert(0, PropertyField::new(key_name, "Guid"));
                }
            }
        }
        for audit in STAMPED_AUDIT_PROPERTIES {
            if class.property(audit).is_none() {
                class.properties.push(PropertyField::new(audit, "DateTime"));
            }
        }

        let key = class
            .key_property()
            .cloned()
            .unwrap_or_else(|| PropertyField::new(class.key_name(), "Guid"));
        let owner = class
            .namespace
            .as_deref()
            .and_then(naming::owning_aggregate_of)
            .map(String::from)
            .unwrap_or_else(|| class.name.clone());
        let plural = naming::pluralize(&class.name);

        let controller_names = [
            format!("{}Controller", class.name),
            format!("{plural}Controller"),
        ];
        let endpoint = components
            .iter()
            .find(|component| {
                controller_names
                    .iter()
                    .any(|name| component.name.trim() == name.as_str())
            })
            .and_then(|component| component.endpoint_spec.clone());

        Self {
            class,
            owner,
            key,
            plural,
            endpoint,
        }
    }

    pub(super) fn name(&self) -> &str {
        &self.class.name
    }

    pub(super) fn is_aggregate(&self) -> bool {
        self.class.is_aggregate()
    }

    /// Properties a client may set: everything but the key and audit fields.
    pub(super) fn payload<'a>(
        &'a self,
        plan: &'a ContextPlan,
    ) -> impl Iterator<Item = &'a PropertyField> {
        self.class.properties.iter().filter(move |property| {
            property.name != self.key.name
                && !naming::is_audit_property(&property.name)
                && !plan.is_entity(&property.type_name)
                && !property.name.is_empty()
        })
    }
}

/// An enum and the folder it is generated into.
#[derive(Debug, Clone)]
pub(super) struct EnumModel {
    pub entity: EnumEntity,
    /// Owning aggregate; `None` places the enum under `Models/`.
    pub owner: Option<String>,
}

/// One bounded context and everything generated into its projects.
#[derive(Debug, Clone)]
pub(super) struct ContextPlan {
    /// Context name used in type names (`ISalesContext`).
    pub name: String,
    pub bounded_context: Option<String>,
    /// Project name prefix (`Shop.Sales` or `Shop`).
    pub prefix: String,
    pub entities: Vec<EntityModel>,
    pub enums: Vec<EnumModel>,
}

impl ContextPlan {
    fn new(name: &str, bounded_context: Option<&str>, prefix: String) -> Self {
        Self {
            name: naming::to_pascal_case(name),
            bounded_context: bounded_context.map(String::from),
            prefix,
            entities: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub(super) fn core_project(&self) -> String {
        format!("{}.Core", self.prefix)
    }

    pub(super) fn infrastructure_project(&self) -> String {
        format!("{}.Infrastructure", self.prefix)
    }

    pub(super) fn api_project(&self) -> String {
        format!("{}.Api", self.prefix)
    }

    pub(super) fn context_interface(&self) -> String {
        format!("I{}Context", self.name)
    }

    pub(super) fn db_context(&self) -> String {
        format!("{}DbContext", self.name)
    }

    pub(super) fn aggregates(&self) -> impl Iterator<Item = &EntityModel> {
        self.entities.iter().filter(|entity| entity.is_aggregate())
    }

    pub(super) fn entity(&self, name: &str) -> Option<&EntityModel> {
        self.entities.iter().find(|entity| entity.name() == name)
    }

    pub(super) fn is_entity(&self, name: &str) -> bool {
        self.entity(name).is_some()
    }

    pub(super) fn is_enum(&self, name: &str) -> bool {
        self.enums.iter().any(|model| model.entity.name == name)
    }

    /// Namespace of an aggregate folder in the Core project.
    ///
    /// The `Aggregate` suffix keeps the namespace from shadowing the
    /// aggregate's own type name.
    pub(super) fn aggregate_namespace(&self, owner: &str) -> String {
        format!(
            "{}.{}.{owner}Aggregate",
            self.core_project(),
            naming::AGGREGATES_SEGMENT
        )
    }

    pub(super) fn models_namespace(&self) -> String {
        format!("{}.Models", self.core_project())
    }

    pub(super) fn features_namespace(&self, entity: &EntityModel) -> String {
        format!("{}.Features.{}", self.core_project(), entity.plural)
    }

    pub(super) fn enum_namespace(&self, model: &EnumModel) -> String {
        match &model.owner {
            Some(owner) => self.aggregate_namespace(owner),
            None => self.models_namespace(),
        }
    }

    /// Every namespace holding entities or enums, in first-seen order.
    pub(super) fn model_namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = Vec::new();
        let candidates = self
            .entities
            .iter()
            .map(|entity| self.aggregate_namespace(&entity.owner))
            .chain(self.enums.iter().map(|model| self.enum_namespace(model)));
        for namespace in candidates {
            if !namespaces.contains(&namespace) {
                namespaces.push(namespace);
            }
        }
        namespaces
    }

    fn push_class(&mut self, class: &ClassEntity, components: &[&ComponentNode]) {
        if self.is_entity(&class.name) {
            debug!(class = class.name.as_str(), context = self.name.as_str(); "Skipping duplicate class");
            return;
        }
        self.entities.push(EntityModel::new(class, components));
    }

    fn push_enum(&mut self, entity: &EnumEntity) {
        if self.is_enum(&entity.name) {
            debug!(name = entity.name.as_str(), context = self.name.as_str(); "Skipping duplicate enum");
            return;
        }
        let owner = entity
            .namespace
            .as_deref()
            .and_then(naming::owning_aggregate_of)
            .map(String::from);
        self.enums.push(EnumModel {
            entity: entity.clone(),
            owner,
        });
    }
}

/// Split a solution into one plan per bounded context.
///
/// Without bounded contexts a single plan named after the last segment of
/// `solution_name` holds everything. Otherwise classes and enums whose
/// namespace maps to no context go to the first context in sorted order.
pub(super) fn plan(solution: &DiagramSolution, solution_name: &str) -> Vec<ContextPlan> {
    let components: Vec<&ComponentNode> = solution
        .documents
        .iter()
        .flat_map(|document| document.components.iter())
        .collect();
    let contexts = solution.bounded_contexts();

    if contexts.is_empty() {
        let name = solution_name.rsplit('.').next().unwrap_or(solution_name);
        let mut plan = ContextPlan::new(name, None, solution_name.to_string());
        for class in solution.all_classes() {
            plan.push_class(class, &components);
        }
        for entity in solution.all_enums() {
            plan.push_enum(entity);
        }
        return vec![plan];
    }

    let mut plans: IndexMap<&str, ContextPlan> = contexts
        .iter()
        .map(|context| {
            let prefix = format!("{solution_name}.{context}");
            (context.as_str(), ContextPlan::new(context, Some(context), prefix))
        })
        .collect();

    let index_of = |namespace: Option<&str>| {
        namespace
            .and_then(naming::bounded_context_of)
            .and_then(|context| plans.get_index_of(context))
            .unwrap_or(0)
    };
    let class_targets: Vec<(usize, &ClassEntity)> = solution
        .all_classes()
        .map(|class| (index_of(class.namespace.as_deref()), class))
        .collect();
    let enum_targets: Vec<(usize, &EnumEntity)> = solution
        .all_enums()
        .map(|entity| (index_of(entity.namespace.as_deref()), entity))
        .collect();

    for (index, class) in class_targets {
        if let Some((_, plan)) = plans.get_index_mut(index) {
            plan.push_class(class, &components);
        }
    }
    for (index, entity) in enum_targets {
        if let Some((_, plan)) = plans.get_index_mut(index) {
            plan.push_enum(entity);
        }
    }

    plans.into_values().collect()
}
