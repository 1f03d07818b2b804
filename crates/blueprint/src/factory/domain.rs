//! Core project: entities, DTOs, mappings, enums and the persistence
//! context interface.

use std::path::PathBuf;

use log::debug;

use blueprint_core::{
    diagram::{MethodSignature, PropertyField},
    naming,
    solution::{GeneratedFile, GeneratedFileKind, Project, ProjectKind},
};

use crate::{
    config::GenerationConfig,
    factory::{
        context::{ContextPlan, EntityModel, EnumModel},
        csharp::{self, CodeWriter},
        features,
    },
};

const INDENT: &str = "    ";

/// Build the Core project of a context.
pub(super) fn build(plan: &ContextPlan, config: &GenerationConfig) -> Project {
    let name = plan.core_project();
    let mut project = Project::new(&name, ProjectKind::ClassLibrary);
    project.bounded_context = plan.bounded_context.clone();
    project.package_references = config.core_packages().to_vec();

    for entity in &plan.entities {
        project.files.push(entity_file(plan, entity));
        project.files.push(dto_file(plan, entity));
        project.files.push(mapping_file(plan, entity));
    }
    for model in &plan.enums {
        project.files.push(enum_file(plan, model));
    }
    project.files.push(context_interface_file(plan));

    for aggregate in plan.aggregates() {
        features::generate(plan, aggregate, &mut project.files);
    }

    let mut namespaces = vec![
        "System.Collections.ObjectModel".to_string(),
        "FluentValidation".to_string(),
        "MediatR".to_string(),
        "Microsoft.EntityFrameworkCore".to_string(),
        format!("{name}.Data"),
    ];
    namespaces.extend(plan.model_namespaces());
    project.files.push(GeneratedFile::new(
        "GlobalUsings.cs",
        GeneratedFileKind::GlobalUsings,
        csharp::global_usings(namespaces.iter().map(String::as_str)),
    ));

    project.files.push(GeneratedFile::new(
        format!("{name}.csproj"),
        GeneratedFileKind::ProjectFile,
        csharp::project_file(
            project.kind,
            config.target_framework(),
            &name,
            &project.package_references,
            &project.project_references,
        ),
    ));

    debug!(project = name.as_str(), files = project.files.len(); "Core project built");
    project
}

fn aggregate_path(entity: &EntityModel, file_name: &str) -> PathBuf {
    PathBuf::from(naming::AGGREGATES_SEGMENT)
        .join(&entity.owner)
        .join(file_name)
}

/// Element type of a property as seen from an entity.
fn element_type(property: &PropertyField) -> &str {
    csharp::scalar(&property.type_name)
}

/// A property as carried by a DTO: entity references become DTO lists or
/// DTO references.
fn dto_property(plan: &ContextPlan, property: &PropertyField) -> PropertyField {
    let mut property = property.clone();
    if plan.is_entity(&property.type_name) {
        property.type_name = format!("{}Dto", property.type_name);
        if property.collection_type.is_some() {
            property.collection_type = Some("List".to_string());
            property.is_collection = true;
        }
    }
    property
}

fn default_literal(plan: &ContextPlan, property: &PropertyField, value: &str) -> String {
    let is_identifier = value.chars().all(|c| c.is_alphanumeric() || c == '_');
    if plan.is_enum(&property.type_name) && is_identifier {
        format!("{}.{value}", property.type_name)
    } else if csharp::is_string(property) && !value.starts_with('"') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

fn initializer(plan: &ContextPlan, property: &PropertyField) -> Option<String> {
    if let Some(value) = &property.default_value {
        return Some(default_literal(plan, property, value));
    }
    if property.collection_type.is_some() {
        return csharp::collection_initializer(property, element_type(property));
    }
    if property.is_nullable {
        return None;
    }
    if csharp::is_string(property) {
        return Some("string.Empty".to_string());
    }
    let element = property.type_name.trim_end_matches("Dto");
    plan.is_entity(element).then(|| "null!".to_string())
}

pub(super) fn property_declaration(plan: &ContextPlan, property: &PropertyField) -> String {
    let declaration = format!(
        "public {} {} {{ get; set; }}",
        csharp::property_type(property),
        property.name
    );
    match initializer(plan, property) {
        Some(value) => format!("{declaration} = {value};"),
        None => declaration,
    }
}

fn method_declaration(method: &MethodSignature) -> String {
    let parameters: Vec<String> = method
        .parameters
        .iter()
        .map(|parameter| format!("{} {}", csharp::scalar(&parameter.type_name), parameter.name))
        .collect();
    format!(
        "{} {} {}({})",
        csharp::visibility(method.visibility),
        csharp::scalar(&method.return_type),
        method.name,
        parameters.join(", ")
    )
}

fn entity_file(plan: &ContextPlan, entity: &EntityModel) -> GeneratedFile {
    let class = &entity.class;
    let mut writer = CodeWriter::with_namespace(&plan.aggregate_namespace(&entity.owner));
    if let Some(note) = &class.note {
        writer.summary(note);
    }
    writer.open(&format!("public class {}", class.name));
    for property in class.properties.iter().filter(|p| !p.name.is_empty()) {
        writer.line(&property_declaration(plan, property));
    }
    for method in &class.methods {
        writer.blank();
        writer.open(&method_declaration(method));
        writer.line("throw new NotImplementedException();");
        writer.close();
    }
    writer.close();

    GeneratedFile::new(
        aggregate_path(entity, &format!("{}.cs", class.name)),
        GeneratedFileKind::Entity,
        writer.finish(),
    )
}

fn dto_file(plan: &ContextPlan, entity: &EntityModel) -> GeneratedFile {
    let mut writer = CodeWriter::with_namespace(&plan.aggregate_namespace(&entity.owner));
    writer.open(&format!("public class {}Dto", entity.name()));
    for property in entity.class.properties.iter().filter(|p| !p.name.is_empty()) {
        writer.line(&property_declaration(plan, &dto_property(plan, property)));
    }
    writer.close();

    GeneratedFile::new(
        aggregate_path(entity, &format!("{}Dto.cs", entity.name())),
        GeneratedFileKind::Dto,
        writer.finish(),
    )
}

fn mapping_expression(plan: &ContextPlan, property: &PropertyField) -> String {
    let access = if property.is_nullable { "?." } else { "." };
    let source = format!("entity.{}", property.name);

    if !plan.is_entity(&property.type_name) {
        source
    } else if property.collection_type.is_some() {
        format!("{source}{access}Select(item => item.ToDto()).ToList()")
    } else {
        format!("{source}{access}ToDto()")
    }
}

fn mapping_file(plan: &ContextPlan, entity: &EntityModel) -> GeneratedFile {
    let name = entity.name();
    let mut writer = CodeWriter::with_namespace(&plan.aggregate_namespace(&entity.owner));
    writer.open(&format!("public static class {name}Extensions"));
    writer.open(&format!("public static {name}Dto ToDto(this {name} entity)"));
    writer.line(&format!("return new {name}Dto"));
    writer.line("{");
    for property in entity.class.properties.iter().filter(|p| !p.name.is_empty()) {
        writer.line(&format!(
            "{INDENT}{} = {},",
            property.name,
            mapping_expression(plan, property)
        ));
    }
    writer.line("};");
    writer.close();
    writer.close();

    GeneratedFile::new(
        aggregate_path(entity, &format!("{name}Extensions.cs")),
        GeneratedFileKind::Mapping,
        writer.finish(),
    )
}

fn enum_file(plan: &ContextPlan, model: &EnumModel) -> GeneratedFile {
    let mut writer = CodeWriter::with_namespace(&plan.enum_namespace(model));
    writer.open(&format!("public enum {}", model.entity.name));
    for value in &model.entity.values {
        writer.line(&format!("{value},"));
    }
    writer.close();

    let file_name = format!("{}.cs", model.entity.name);
    let path = match &model.owner {
        Some(owner) => PathBuf::from(naming::AGGREGATES_SEGMENT).join(owner).join(file_name),
        None => PathBuf::from("Models").join(file_name),
    };
    GeneratedFile::new(path, GeneratedFileKind::Enum, writer.finish())
}

fn context_interface_file(plan: &ContextPlan) -> GeneratedFile {
    let interface = plan.context_interface();
    let mut writer = CodeWriter::with_namespace(&format!("{}.Data", plan.core_project()));
    writer.open(&format!("public interface {interface}"));
    for entity in &plan.entities {
        writer.line(&format!(
            "DbSet<{}> {} {{ get; }}",
            entity.name(),
            entity.plural
        ));
    }
    writer.blank();
    writer.line("Task<int> SaveChangesAsync(CancellationToken cancellationToken = default);");
    writer.close();

    GeneratedFile::new(
        PathBuf::from("Data").join(format!("{interface}.cs")),
        GeneratedFileKind::ContextInterface,
        writer.finish(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::diagram::{
        ClassEntity, DiagramDocument, DiagramSolution, EnumEntity, Stereotype,
    };

    use crate::factory::context;

    fn order_plan() -> ContextPlan {
        let mut status = PropertyField::new("Status", "OrderStatus");
        status.default_value = Some("Draft".to_string());
        let mut order = ClassEntity::new("Order", Stereotype::Aggregate)
            .with_namespace("Shop.Aggregates.Order")
            .with_property(PropertyField::new("OrderId", "Guid"))
            .with_property(PropertyField::new("CustomerName", "String"))
            .with_property(PropertyField::new("Lines", "OrderLine").wrapped_in("List"))
            .with_property(status);
        order.note = Some("Root of the order.".to_string());

        let line = ClassEntity::new("OrderLine", Stereotype::Entity)
            .with_namespace("Shop.Aggregates.Order")
            .with_property(PropertyField::new("OrderLineId", "Guid"));
        let document = DiagramDocument {
            classes: vec![order, line],
            enums: vec![EnumEntity {
                name: "OrderStatus".to_string(),
                namespace: None,
                values: vec!["Draft".to_string(), "Submitted".to_string()],
                line: 0,
            }],
            ..DiagramDocument::default()
        };
        context::plan(&DiagramSolution::new("docs", vec![document]), "Shop").remove(0)
    }

    #[test]
    fn test_core_layout() {
        let project = build(&order_plan(), &GenerationConfig::default());

        assert_eq!(project.name, "Shop.Core");
        for path in [
            "Aggregates/Order/Order.cs",
            "Aggregates/Order/OrderDto.cs",
            "Aggregates/Order/OrderExtensions.cs",
            "Aggregates/Order/OrderLine.cs",
            "Models/OrderStatus.cs",
            "Data/IShopContext.cs",
            "GlobalUsings.cs",
            "Shop.Core.csproj",
        ] {
            assert!(project.file(path).is_some(), "missing {path}");
        }
        assert_eq!(project.files_of(GeneratedFileKind::Handler).count(), 5);
    }

    #[test]
    fn test_entity_contents() {
        let project = build(&order_plan(), &GenerationConfig::default());
        let entity = &project.file("Aggregates/Order/Order.cs").unwrap().contents;

        assert!(entity.starts_with("namespace Shop.Core.Aggregates.OrderAggregate;"));
        assert!(entity.contains("/// Root of the order."));
        assert!(entity.contains("    public Guid OrderId { get; set; }\n"));
        assert!(entity.contains("public string CustomerName { get; set; } = string.Empty;"));
        assert!(entity.contains(
            "public List<OrderLine> Lines { get; set; } = new List<OrderLine>();"
        ));
        assert!(entity.contains("public OrderStatus Status { get; set; } = OrderStatus.Draft;"));
        assert!(entity.contains("public DateTime CreatedAt { get; set; }"));
        assert!(entity.contains("public DateTime ModifiedAt { get; set; }"));
    }

    #[test]
    fn test_dto_and_mapping() {
        let project = build(&order_plan(), &GenerationConfig::default());
        let dto = &project.file("Aggregates/Order/OrderDto.cs").unwrap().contents;
        let mapping = &project.file("Aggregates/Order/OrderExtensions.cs").unwrap().contents;

        assert!(dto.contains(
            "public List<OrderLineDto> Lines { get; set; } = new List<OrderLineDto>();"
        ));
        assert!(mapping.contains("public static OrderDto ToDto(this Order entity)"));
        assert!(mapping.contains("Lines = entity.Lines.Select(item => item.ToDto()).ToList(),"));
        assert!(mapping.contains("OrderId = entity.OrderId,"));
    }

    #[test]
    fn test_context_interface() {
        let project = build(&order_plan(), &GenerationConfig::default());
        let interface = &project.file("Data/IShopContext.cs").unwrap().contents;

        assert!(interface.contains("public interface IShopContext"));
        assert!(interface.contains("DbSet<Order> Orders { get; }"));
        assert!(interface.contains("DbSet<OrderLine> OrderLines { get; }"));
        assert!(interface.contains(
            "Task<int> SaveChangesAsync(CancellationToken cancellationToken = default);"
        ));
    }

    #[test]
    fn test_enum_and_usings() {
        let project = build(&order_plan(), &GenerationConfig::default());
        let status = &project.file("Models/OrderStatus.cs").unwrap().contents;
        assert!(status.contains("public enum OrderStatus\n{\n    Draft,\n    Submitted,\n}"));

        let usings = &project.file("GlobalUsings.cs").unwrap().contents;
        assert!(usings.contains("global using Shop.Core.Aggregates.OrderAggregate;"));
        assert!(usings.contains("global using Shop.Core.Models;"));
        assert!(usings.contains("global using Shop.Core.Data;"));
    }
}
