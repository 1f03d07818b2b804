//! Unit tests for the line parser and elaboration
//!
//! These tests run complete documents through [`parse_content`](crate::parse_content)
//! and check the resulting diagram model.

use proptest::prelude::*;

use blueprint_core::diagram::{
    DiagramDocument, HttpVerb, RelationshipType, Stereotype, Visibility,
};

use crate::{DedupPolicy, Parser, ParserConfig, parse_content};

fn parse(source: &str) -> DiagramDocument {
    parse_content(source, None)
}

#[test]
fn test_class_members_in_source_order() {
    let doc = parse(
        r#"@startuml
class Order <<Aggregate>> {
  +OrderId : Guid
  -Total : decimal = 0
  Lines : List<OrderLine>
  Note : string?
  __
  +AddLine(product: Product, quantity: int) : void
  Cancel()
}
@enduml"#,
    );

    assert_eq!(doc.classes.len(), 1);
    let order = &doc.classes[0];
    assert_eq!(order.name, "Order");
    assert_eq!(order.stereotype, Stereotype::Aggregate);
    assert!(order.namespace.is_none());

    let names: Vec<_> = order.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["OrderId", "Total", "Lines", "Note"]);

    let key = &order.properties[0];
    assert!(key.is_key);
    assert_eq!(key.type_name, "Guid");
    assert_eq!(key.visibility, Visibility::Public);

    let total = &order.properties[1];
    assert_eq!(total.visibility, Visibility::Private);
    assert_eq!(total.default_value.as_deref(), Some("0"));

    let lines = &order.properties[2];
    assert!(lines.is_collection);
    assert_eq!(lines.collection_type.as_deref(), Some("List"));
    assert_eq!(lines.type_name, "OrderLine");

    let note = &order.properties[3];
    assert!(note.is_nullable);
    assert!(!note.is_required);

    assert_eq!(order.methods.len(), 2);
    let add_line = &order.methods[0];
    assert_eq!(add_line.name, "AddLine");
    assert_eq!(add_line.return_type, "void");
    assert_eq!(add_line.parameters.len(), 2);
    assert_eq!(add_line.parameters[0].name, "product");
    assert_eq!(add_line.parameters[0].type_name, "Product");
    assert_eq!(order.methods[1].name, "Cancel");
    assert!(order.methods[1].parameters.is_empty());
}

#[test]
fn test_method_return_type_forms() {
    let doc = parse(
        "class Service {\n  Order Find(Guid id)\n  Count() : int\n  Reset()\n}",
    );
    let methods = &doc.classes[0].methods;

    assert_eq!(methods[0].name, "Find");
    assert_eq!(methods[0].return_type, "Order");
    assert_eq!(methods[0].parameters[0].name, "id");
    assert_eq!(methods[0].parameters[0].type_name, "Guid");
    assert_eq!(methods[1].return_type, "int");
    assert_eq!(methods[2].return_type, "void");
}

#[test]
fn test_property_shapes() {
    let doc = parse("class Person {\n  string Name\n  Nickname\n  : int\n  Tags : string[]\n}");
    let properties = &doc.classes[0].properties;

    assert_eq!(properties.len(), 4);
    assert_eq!(properties[0].name, "Name");
    assert_eq!(properties[0].type_name, "string");
    assert_eq!(properties[1].name, "Nickname");
    assert_eq!(properties[1].type_name, "");
    assert_eq!(properties[2].name, "");
    assert_eq!(properties[2].type_name, "int");
    assert_eq!(properties[3].collection_type.as_deref(), Some("Array"));
    assert_eq!(properties[3].type_name, "string");
}

#[test]
fn test_defaults_with_parentheses_stay_properties() {
    let doc = parse(
        r#"class Order <<Aggregate>> {
  OrderId : Guid
  Label : string = "(none)"
  Code : string = Guid.NewGuid().ToString()
  Touch(at: DateTime) : void
}"#,
    );
    let order = &doc.classes[0];

    let properties: Vec<_> = order
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.type_name.as_str(), p.default_value.as_deref()))
        .collect();
    assert_eq!(
        properties,
        [
            ("OrderId", "Guid", None),
            ("Label", "string", Some("\"(none)\"")),
            ("Code", "string", Some("Guid.NewGuid().ToString()")),
        ]
    );
    assert_eq!(order.methods.len(), 1);
    assert_eq!(order.methods[0].name, "Touch");
}

#[test]
fn test_unrecognized_wrapper_is_not_a_collection() {
    let doc = parse("class Cache {\n  Entries : Dictionary<string>\n}");
    let entries = &doc.classes[0].properties[0];

    assert_eq!(entries.collection_type.as_deref(), Some("Dictionary"));
    assert!(!entries.is_collection);
}

#[test]
fn test_packages_scope_classes_and_enums() {
    let doc = parse(
        r#"@startuml
package "Shop.Sales.Aggregates.Order" <<Aggregate>> {
  class Order <<Aggregate>> {
    OrderId : Guid
  }
  enum OrderStatus {
    Pending
    Shipped, Delivered
  }
}
class Customer {}
enum Color { Red, Green }
@enduml"#,
    );

    assert_eq!(doc.packages.len(), 1);
    let package = &doc.packages[0];
    assert_eq!(package.name, "Shop.Sales.Aggregates.Order");
    assert_eq!(package.stereotype.as_deref(), Some("Aggregate"));
    assert_eq!(package.bounded_context(), Some("Sales"));
    assert_eq!(package.classes.len(), 1);
    assert_eq!(
        package.classes[0].namespace.as_deref(),
        Some("Shop.Sales.Aggregates.Order")
    );
    assert_eq!(
        package.enums[0].values,
        ["Pending", "Shipped", "Delivered"]
    );

    assert_eq!(doc.classes.len(), 1);
    assert_eq!(doc.classes[0].name, "Customer");
    assert!(doc.classes[0].is_empty());
    assert_eq!(doc.enums[0].values, ["Red", "Green"]);

    let all: Vec<_> = doc.all_classes().map(|c| c.name.as_str()).collect();
    assert_eq!(all, ["Order", "Customer"]);
}

#[test]
fn test_all_classes_in_source_order() {
    let doc = parse(
        r#"@startuml
class Alpha {
  Name : string
}
enum Mode { On, Off }
package "S.C.Aggregates.B" {
  class Beta <<Aggregate>> {
    BetaId : Guid
  }
  enum Kind { Small }
}
class Gamma {}
@enduml"#,
    );

    let classes: Vec<_> = doc.all_classes().map(|c| c.name.as_str()).collect();
    assert_eq!(classes, ["Alpha", "Beta", "Gamma"]);
    let enums: Vec<_> = doc.all_enums().map(|e| e.name.as_str()).collect();
    assert_eq!(enums, ["Mode", "Kind"]);
    assert_eq!(doc.classes[0].line, 2);
}

#[test]
fn test_nested_packages_are_flattened() {
    let doc = parse(
        r#"package Shop {
  package Shop.Sales.Aggregates.Order {
    class Order
  }
  Order --> Customer
}
class Customer"#,
    );

    let names: Vec<_> = doc.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Shop", "Shop.Sales.Aggregates.Order"]);
    assert!(doc.packages[0].classes.is_empty());
    assert_eq!(doc.packages[1].classes[0].name, "Order");
    assert_eq!(doc.relationships.len(), 1);
    assert_eq!(doc.classes.len(), 1);
}

#[test]
fn test_cardinality_relationship_is_not_duplicated() {
    let doc = parse(r#"Order "1" *-- "0..*" OrderLine : contains"#);

    assert_eq!(doc.relationships.len(), 1);
    let edge = &doc.relationships[0];
    assert_eq!(edge.source, "Order");
    assert_eq!(edge.target, "OrderLine");
    assert_eq!(edge.relationship_type, RelationshipType::Composition);
    assert_eq!(edge.source_cardinality.as_deref(), Some("1"));
    assert_eq!(edge.target_cardinality.as_deref(), Some("0..*"));
    assert_eq!(edge.label.as_deref(), Some("contains"));
}

#[test]
fn test_relationship_glyphs() {
    let doc = parse(
        "Base <|-- Derived\nService ..|> IService\nA ..> B\nC o-- D\nE --> F\nG -up-> H\n[Web] --> [Api] : calls",
    );
    let types: Vec<_> = doc
        .relationships
        .iter()
        .map(|edge| edge.relationship_type)
        .collect();

    assert_eq!(
        types,
        [
            RelationshipType::Inheritance,
            RelationshipType::Implementation,
            RelationshipType::Dependency,
            RelationshipType::Aggregation,
            RelationshipType::Association,
            RelationshipType::Association,
            RelationshipType::Association,
        ]
    );
    assert_eq!(doc.relationships[0].source, "Base");
    assert_eq!(doc.relationships[0].target, "Derived");
    assert_eq!(doc.relationships[6].source, "Web");
    assert_eq!(doc.relationships[6].label.as_deref(), Some("calls"));
    assert!(doc.components.is_empty());
}

#[test]
fn test_text_substring_dedup_policy() {
    let source = "Order \"1\" *-- \"*\" Line : see Order --> Line\nOrder --> Line";

    let per_line = parse(source);
    assert_eq!(per_line.relationships.len(), 2);

    let parser = Parser::new(ParserConfig::new("puml", DedupPolicy::TextSubstring));
    let substring = parser.parse_content(source, None);
    assert_eq!(substring.relationships.len(), 1);
    assert!(substring.relationships[0].has_cardinality());
}

#[test]
fn test_notes_attach_to_classes_and_components() {
    let doc = parse(
        r#"@startuml
class Order
note right of Order
  Root of the sales aggregate
end note
component [Orders Controller] as oc
note left of oc
  **Route:** /api/orders
  **Authentication:** Required
  - **GET** / - List orders
  - POST / - Create order
end note
note "floating" as N1
note bottom of Missing : nowhere
@enduml"#,
    );

    assert_eq!(
        doc.classes[0].note.as_deref(),
        Some("Root of the sales aggregate")
    );

    let component = &doc.components[0];
    assert_eq!(component.name, "Orders Controller");
    assert_eq!(component.alias, "oc");
    assert!(component.is_controller());

    let spec = component.endpoint_spec.as_ref().unwrap();
    assert_eq!(spec.route, "/api/orders");
    assert!(spec.authentication_required);
    assert_eq!(spec.endpoints.len(), 2);
    assert_eq!(spec.endpoints[1].verb, HttpVerb::Post);
}

#[test]
fn test_notes_before_target_and_multiple_notes() {
    let doc = parse(
        "note top of Order : first\nclass Order {\n  OrderId : Guid\n}\nnote bottom of Order : second",
    );

    assert_eq!(doc.classes[0].note.as_deref(), Some("first\nsecond"));
}

#[test]
fn test_metadata_note() {
    let doc = parse(
        r#"@startuml
note as Meta
  **Document Metadata**
  **Generated:** 2024-05-01
  **Version:** 1.0
  **Target Framework:** net8.0
end note
@enduml"#,
    );

    let metadata = doc.metadata.unwrap();
    assert_eq!(metadata.generated.as_deref(), Some("2024-05-01"));
    assert_eq!(metadata.version.as_deref(), Some("1.0"));
    assert_eq!(metadata.target_framework.as_deref(), Some("net8.0"));
    assert!(metadata.ui_framework.is_none());
}

#[test]
fn test_components() {
    let doc = parse(
        "component [Api] as api {\n  [Inner]\n}\n[Web Client] as web\ncomponent Worker\ncomponent \"Billing Service\" as billing",
    );

    let components: Vec<_> = doc
        .components
        .iter()
        .map(|c| (c.name.as_str(), c.alias.as_str()))
        .collect();
    assert_eq!(
        components,
        [
            ("Api", "api"),
            ("Web Client", "web"),
            ("Worker", "Worker"),
            ("Billing Service", "billing"),
        ]
    );
}

#[test]
fn test_first_title_wins() {
    let doc = parse("title First\ntitle Second");
    assert_eq!(doc.title.as_deref(), Some("First"));
}

#[test]
fn test_unrecognized_syntax_is_tolerated() {
    let doc = parse(
        r#"@startuml
' comment
/' block
class Hidden
'/
skinparam classAttributeIconSize 0
hide empty members
left to right direction
skinparam class {
  BackgroundColor White
}
together {
  class A
  class B
}
class C
}
@enduml"#,
    );

    let names: Vec<_> = doc.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert!(doc.relationships.is_empty());
}

#[test]
fn test_class_header_variants() {
    let doc = parse(
        "abstract class Base\ninterface IRepository\nabstract Shape\nclass Box<T> extends Base {\n  Value : T\n}",
    );

    let names: Vec<_> = doc.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Base", "IRepository", "Shape", "Box"]);
    assert_eq!(doc.classes[3].properties.len(), 1);
}

#[test]
fn test_unclosed_blocks_end_at_document_end() {
    let doc = parse("package Shop.Sales.Aggregates.Order {\n  class Order {\n    OrderId : Guid");

    assert_eq!(doc.packages.len(), 1);
    assert_eq!(doc.packages[0].classes[0].properties.len(), 1);
}

#[test]
fn test_empty_source() {
    let doc = parse("");
    assert_eq!(doc, DiagramDocument::default());
}

proptest! {
    #[test]
    fn prop_member_counts_match_lines(properties in 0usize..8, methods in 0usize..8) {
        let mut source = String::from("class Sample {\n");
        for i in 0..properties {
            source.push_str(&format!("  Field{i} : string\n"));
        }
        source.push_str("  __\n");
        for i in 0..methods {
            source.push_str(&format!("  Action{i}(value: int) : bool\n"));
        }
        source.push('}');

        let doc = parse(&source);
        let class = &doc.classes[0];
        prop_assert_eq!(class.properties.len(), properties);
        prop_assert_eq!(class.methods.len(), methods);
        for (i, property) in class.properties.iter().enumerate() {
            prop_assert_eq!(&property.name, &format!("Field{i}"));
        }
        for (i, method) in class.methods.iter().enumerate() {
            prop_assert_eq!(&method.name, &format!("Action{i}"));
        }
    }

    #[test]
    fn prop_parsing_is_idempotent(
        classes in proptest::collection::vec("[A-Z][a-z]{1,8}", 1..5),
        property in "[A-Z][a-z]{1,8}",
    ) {
        let mut source = String::from("@startuml\npackage Shop.Sales.Aggregates.Root {\n");
        for class in &classes {
            source.push_str(&format!("class {class} <<Entity>> {{\n  {property} : string\n}}\n"));
        }
        source.push_str("}\n");
        if let [first, second, ..] = classes.as_slice() {
            source.push_str(&format!("{first} \"1\" *-- \"*\" {second}\n"));
        }
        source.push_str("@enduml\n");

        prop_assert_eq!(parse(&source), parse(&source));
        prop_assert_eq!(parse(&source).all_classes().count(), classes.len());
    }
}
