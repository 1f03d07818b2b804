//! Classes, enums and packages.

use serde::Serialize;

use crate::{
    diagram::{Stereotype, Visibility},
    naming,
};

/// A class declared in a diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassEntity {
    pub name: String,
    /// Name of the enclosing package, if the class is declared inside one.
    pub namespace: Option<String>,
    pub stereotype: Stereotype,
    pub properties: Vec<PropertyField>,
    pub methods: Vec<MethodSignature>,
    pub note: Option<String>,
    /// 1-based line of the declaration, 0 when built in code.
    pub line: usize,
}

impl ClassEntity {
    /// Create an empty class with the given name and stereotype.
    pub fn new(name: impl Into<String>, stereotype: Stereotype) -> Self {
        Self {
            name: name.into(),
            stereotype,
            ..Self::default()
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Append a property.
    pub fn with_property(mut self, property: PropertyField) -> Self {
        self.properties.push(property);
        self
    }

    /// Returns `true` if the class is an aggregate root.
    pub fn is_aggregate(&self) -> bool {
        self.stereotype == Stereotype::Aggregate
    }

    /// Returns `true` if the class is an aggregate or an entity.
    pub fn is_entity_like(&self) -> bool {
        self.stereotype.is_entity_like()
    }

    /// The conventional key property name, `{Name}Id`.
    pub fn key_name(&self) -> String {
        format!("{}Id", self.name)
    }

    /// The property named exactly `{Name}Id` that is recognized as a key.
    pub fn key_property(&self) -> Option<&PropertyField> {
        let key_name = self.key_name();
        self.properties
            .iter()
            .find(|p| p.is_key && p.name == key_name)
    }

    /// Find a property by exact name.
    pub fn property(&self, name: &str) -> Option<&PropertyField> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns `true` if the class has neither properties nor methods.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.methods.is_empty()
    }
}

/// A property line of a class body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyField {
    pub name: String,
    /// Scalar type, or the element type when the property is wrapped.
    pub type_name: String,
    /// Generic wrapper name (`List` in `List<Order>`), recognized or not.
    pub collection_type: Option<String>,
    /// `true` when the wrapper is a recognized collection.
    pub is_collection: bool,
    pub is_nullable: bool,
    pub is_required: bool,
    pub is_key: bool,
    pub default_value: Option<String>,
    pub visibility: Visibility,
}

impl PropertyField {
    /// Create a property with a scalar type.
    ///
    /// `is_required` and `is_key` are derived from the nullability and the
    /// key naming rule.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name = name.into();
        let is_key = naming::is_key_name(&name);
        Self {
            name,
            type_name: type_name.into(),
            is_required: true,
            is_key,
            ..Self::default()
        }
    }

    /// Mark the property as nullable, which also makes it optional.
    pub fn nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self.is_required = !is_nullable;
        self
    }

    /// Wrap the element type in a generic wrapper.
    pub fn wrapped_in(mut self, wrapper: impl Into<String>) -> Self {
        let wrapper = wrapper.into();
        self.is_collection = crate::primitives::is_collection_wrapper(&wrapper);
        self.collection_type = Some(wrapper);
        self
    }

    /// The type as written in the diagram (`List<Order>?`).
    pub fn declared_type(&self) -> String {
        let mut declared = match &self.collection_type {
            Some(wrapper) => format!("{wrapper}<{}>", self.type_name),
            None => self.type_name.clone(),
        };
        if self.is_nullable {
            declared.push('?');
        }
        declared
    }
}

/// A method line of a class body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MethodSignature {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub visibility: Visibility,
}

/// A method parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

/// An enum declared in a diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumEntity {
    pub name: String,
    pub namespace: Option<String>,
    pub values: Vec<String>,
    /// 1-based line of the declaration, 0 when built in code.
    pub line: usize,
}

/// A package block with its nested classes and enums.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackageGroup {
    pub name: String,
    pub stereotype: Option<String>,
    pub classes: Vec<ClassEntity>,
    pub enums: Vec<EnumEntity>,
}

impl PackageGroup {
    /// The bounded context named by this package, if any.
    pub fn bounded_context(&self) -> Option<&str> {
        naming::bounded_context_of(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_new_derives_flags() {
        let key = PropertyField::new("OrderId", "Guid");
        assert!(key.is_key);
        assert!(key.is_required);
        assert!(!key.is_nullable);

        let name = PropertyField::new("Name", "string").nullable(true);
        assert!(!name.is_key);
        assert!(!name.is_required);
    }

    #[test]
    fn test_property_wrapped_in() {
        let lines = PropertyField::new("Lines", "OrderLine").wrapped_in("List");
        assert!(lines.is_collection);
        assert_eq!(lines.declared_type(), "List<OrderLine>");

        let lazy = PropertyField::new("Cache", "Order").wrapped_in("Lazy");
        assert!(!lazy.is_collection);
        assert_eq!(lazy.collection_type.as_deref(), Some("Lazy"));
    }

    #[test]
    fn test_key_property() {
        let class = ClassEntity::new("Order", Stereotype::Aggregate)
            .with_property(PropertyField::new("CustomerId", "Guid"))
            .with_property(PropertyField::new("OrderId", "Guid"));

        assert_eq!(class.key_property().map(|p| p.name.as_str()), Some("OrderId"));
        assert!(class.is_aggregate());
        assert!(!class.is_empty());
    }

    #[test]
    fn test_parent_key_is_not_recognized() {
        let class = ClassEntity::new("ParentNode", Stereotype::Entity)
            .with_property(PropertyField::new("ParentNodeId", "Guid"));

        assert!(class.key_property().is_none());
        assert!(class.property("ParentNodeId").is_some());
    }
}
