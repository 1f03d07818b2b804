//! Recognized scalar types and collection wrappers.

/// Scalar type names that need no declaration in a diagram.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "string", "String", "int", "Int32", "long", "Int64", "short", "Int16", "byte", "Byte",
    "decimal", "Decimal", "double", "Double", "float", "Single", "bool", "Boolean", "char",
    "Char", "object", "Object", "void", "Guid", "DateTime", "DateTimeOffset", "DateOnly",
    "TimeOnly", "TimeSpan", "Uri", "byte[]",
];

/// Generic wrapper names recognized as collections.
pub const COLLECTION_WRAPPERS: &[&str] = &[
    "List",
    "IList",
    "ICollection",
    "Collection",
    "IEnumerable",
    "IReadOnlyList",
    "IReadOnlyCollection",
    "HashSet",
    "ISet",
    "Array",
];

/// Returns `true` if `name` is a recognized primitive type.
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// Returns `true` if `name` is a recognized collection wrapper.
pub fn is_collection_wrapper(name: &str) -> bool {
    COLLECTION_WRAPPERS.contains(&name)
}

/// Returns `true` for `string`/`String`, the types that get length validation.
pub fn is_string(name: &str) -> bool {
    matches!(name, "string" | "String")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert!(is_primitive("string"));
        assert!(is_primitive("Guid"));
        assert!(!is_primitive("Order"));
        assert!(is_string("String"));
        assert!(!is_string("Guid"));
    }

    #[test]
    fn test_collection_wrappers() {
        assert!(is_collection_wrapper("List"));
        assert!(is_collection_wrapper("ICollection"));
        assert!(!is_collection_wrapper("Lazy"));
        assert!(!is_collection_wrapper("Nullable"));
    }
}
