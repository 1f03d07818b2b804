//! Naming conventions shared by the parser, validator and factory.
//!
//! These helpers encode the conventions the generated solution relies on:
//! `{Class}Id` keys, suffix-rule pluralization, and bounded contexts named by
//! the package segment preceding `Aggregates`.

/// Package segment that marks aggregate ownership.
pub const AGGREGATES_SEGMENT: &str = "Aggregates";

/// Audit properties that are stamped server-side and never part of requests.
pub const AUDIT_PROPERTIES: [&str; 4] = ["CreatedAt", "ModifiedAt", "CreatedBy", "ModifiedBy"];

/// Key naming rule: ends with `Id`, longer than two characters, and does not
/// contain `Parent`.
///
/// # Example
///
/// ```
/// # use blueprint_core::naming::is_key_name;
/// assert!(is_key_name("OrderId"));
/// assert!(!is_key_name("Id"));
/// assert!(!is_key_name("ParentOrderId"));
/// assert!(!is_key_name("Orderid"));
/// ```
pub fn is_key_name(name: &str) -> bool {
    name.len() > 2 && name.ends_with("Id") && !name.contains("Parent")
}

/// Returns `true` for the four audit property names.
pub fn is_audit_property(name: &str) -> bool {
    AUDIT_PROPERTIES.contains(&name)
}

/// Returns `true` if the first character is an uppercase letter.
pub fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Pluralize with a fixed suffix rule and no irregular forms.
///
/// - ends with `y` → replace with `ies`
/// - ends with `s`, `x`, `ch` or `sh` → append `es`
/// - otherwise → append `s`
///
/// # Example
///
/// ```
/// # use blueprint_core::naming::pluralize;
/// assert_eq!(pluralize("Category"), "Categories");
/// assert_eq!(pluralize("Address"), "Addresses");
/// assert_eq!(pluralize("Order"), "Orders");
/// ```
pub fn pluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('y') {
        format!("{stem}ies")
    } else if name.ends_with('s')
        || name.ends_with('x')
        || name.ends_with("ch")
        || name.ends_with("sh")
    {
        format!("{name}es")
    } else if name.is_empty() {
        String::new()
    } else {
        format!("{name}s")
    }
}

/// Split an identifier into words on case changes, digits boundaries and
/// separators (`_`, `-`, `.`, space).
fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = name.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | '.' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        let boundary = c.is_uppercase()
            && !current.is_empty()
            && (chars[i - 1].is_lowercase()
                || chars[i - 1].is_ascii_digit()
                || chars.get(i + 1).is_some_and(|n| n.is_lowercase()));
        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `order_line` → `OrderLine`.
pub fn to_pascal_case(name: &str) -> String {
    words(name).iter().map(|w| capitalize(w)).collect()
}

/// `OrderLine` → `orderLine`.
pub fn to_camel_case(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `OrderLine` → `order-line`.
pub fn to_kebab_case(name: &str) -> String {
    words(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Bounded context named by a package: the segment immediately before
/// `Aggregates`, when at least one more segment precedes it.
///
/// # Example
///
/// ```
/// # use blueprint_core::naming::bounded_context_of;
/// assert_eq!(bounded_context_of("Shop.Sales.Aggregates.Order"), Some("Sales"));
/// assert_eq!(bounded_context_of("Shop.Aggregates.Order"), None);
/// assert_eq!(bounded_context_of("Shop.Models"), None);
/// ```
pub fn bounded_context_of(package_name: &str) -> Option<&str> {
    let segments: Vec<&str> = package_name.split('.').map(str::trim).collect();
    let index = segments.iter().position(|s| *s == AGGREGATES_SEGMENT)?;
    if index >= 2 {
        Some(segments[index - 1]).filter(|s| !s.is_empty())
    } else {
        None
    }
}

/// Aggregate that owns a namespace: the segment right after `Aggregates`.
///
/// # Example
///
/// ```
/// # use blueprint_core::naming::owning_aggregate_of;
/// assert_eq!(owning_aggregate_of("Shop.Sales.Aggregates.Order"), Some("Order"));
/// assert_eq!(owning_aggregate_of("Shop.Sales.Aggregates"), None);
/// ```
pub fn owning_aggregate_of(namespace: &str) -> Option<&str> {
    let mut segments = namespace.split('.').map(str::trim);
    segments.find(|s| *s == AGGREGATES_SEGMENT)?;
    segments.next().filter(|s| !s.is_empty())
}

/// Returns `true` if the package name has an `Aggregates` segment.
pub fn has_aggregates_segment(package_name: &str) -> bool {
    package_name
        .split('.')
        .any(|s| s.trim() == AGGREGATES_SEGMENT)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_is_key_name() {
        assert!(is_key_name("OrderId"));
        assert!(is_key_name("CustomerId"));
        assert!(!is_key_name("Id"));
        assert!(!is_key_name("Identifier"));
        assert!(!is_key_name("ParentId"));
        assert!(!is_key_name("ParentCategoryId"));
        assert!(!is_key_name("orderid"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Daies");
        assert_eq!(pluralize("Status"), "Statuses");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Batch"), "Batches");
        assert_eq!(pluralize("Wish"), "Wishes");
        assert_eq!(pluralize("Person"), "Persons");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(to_pascal_case("order_line"), "OrderLine");
        assert_eq!(to_pascal_case("orderLine"), "OrderLine");
        assert_eq!(to_pascal_case("order service"), "OrderService");
        assert_eq!(to_camel_case("OrderLine"), "orderLine");
        assert_eq!(to_camel_case("Id"), "id");
        assert_eq!(to_kebab_case("OrderLine"), "order-line");
        assert_eq!(to_kebab_case("HTTPRequest"), "http-request");
        assert_eq!(to_kebab_case("OrderLines2Go"), "order-lines2-go");
    }

    #[test]
    fn test_bounded_context_and_owner() {
        assert_eq!(bounded_context_of("A.B.Aggregates.C"), Some("B"));
        assert_eq!(bounded_context_of("A.B.C.Aggregates"), Some("C"));
        assert_eq!(bounded_context_of("Aggregates.Order"), None);
        assert_eq!(owning_aggregate_of("A.Aggregates.Order.Lines"), Some("Order"));
        assert_eq!(owning_aggregate_of("A.Models"), None);
        assert!(has_aggregates_segment("Shop.Aggregates"));
        assert!(!has_aggregates_segment("Shop.AggregatesX"));
    }

    proptest! {
        #[test]
        fn prop_pluralize_extends_the_stem(name in "[A-Z][a-z]{0,12}") {
            let plural = pluralize(&name);
            prop_assert!(plural.len() > name.len());
            prop_assert!(plural.ends_with('s'));
        }

        #[test]
        fn prop_pascal_case_is_stable(name in "[A-Z][a-z]{1,8}([A-Z][a-z]{1,8}){0,3}") {
            prop_assert_eq!(to_pascal_case(&name), name);
        }
    }
}
