//! Closed symbol tables of the diagram language.
//!
//! Every textual symbol the parser recognizes maps onto one of the
//! enumerations in this module through a single mapping function with a
//! documented fallback. Unknown input never fails.

use std::fmt;

use serde::Serialize;

/// Role of a class in the architecture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Stereotype {
    /// No stereotype, or one that is not recognized.
    #[default]
    None,
    /// Aggregate root. Receives CQRS operations and a controller.
    Aggregate,
    /// Entity owned by an aggregate.
    Entity,
    /// Immutable value object.
    ValueObject,
    /// Enumeration declared as a class.
    Enum,
    /// Domain or application service.
    Service,
}

impl Stereotype {
    /// Map stereotype text to a [`Stereotype`].
    ///
    /// Matching is case-insensitive and tolerates surrounding `<<` `>>`,
    /// whitespace, and `-`/`_`/space separators (`value object`,
    /// `Value_Object`). Unknown text maps to [`Stereotype::None`].
    ///
    /// # Example
    ///
    /// ```
    /// # use blueprint_core::diagram::Stereotype;
    /// assert_eq!(Stereotype::from_text("<<Aggregate>>"), Stereotype::Aggregate);
    /// assert_eq!(Stereotype::from_text("value object"), Stereotype::ValueObject);
    /// assert_eq!(Stereotype::from_text("widget"), Stereotype::None);
    /// ```
    pub fn from_text(text: &str) -> Self {
        let normalized: String = text
            .trim()
            .trim_start_matches("<<")
            .trim_end_matches(">>")
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "aggregate" | "aggregateroot" => Stereotype::Aggregate,
            "entity" => Stereotype::Entity,
            "valueobject" => Stereotype::ValueObject,
            "enum" | "enumeration" => Stereotype::Enum,
            "service" => Stereotype::Service,
            _ => Stereotype::None,
        }
    }

    /// Returns `true` for [`Stereotype::Aggregate`] and [`Stereotype::Entity`].
    pub fn is_entity_like(self) -> bool {
        matches!(self, Stereotype::Aggregate | Stereotype::Entity)
    }
}

impl fmt::Display for Stereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stereotype::None => "None",
            Stereotype::Aggregate => "Aggregate",
            Stereotype::Entity => "Entity",
            Stereotype::ValueObject => "ValueObject",
            Stereotype::Enum => "Enum",
            Stereotype::Service => "Service",
        };
        f.write_str(name)
    }
}

/// Member visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Visibility {
    /// `+`, and the default when no symbol is present.
    #[default]
    Public,
    /// `-`
    Private,
    /// `#`
    Protected,
    /// `~`
    Package,
}

impl Visibility {
    /// Map a visibility symbol to a [`Visibility`].
    ///
    /// Returns `None` when `symbol` is not one of `+ - # ~`, so callers can
    /// tell whether the symbol was consumed.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }

    /// The symbol used in diagram text.
    pub fn symbol(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

/// Kind of a relationship edge between two classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RelationshipType {
    /// Plain link (`--`, `-->`, `..`). Also the fallback for unknown arrows.
    #[default]
    Association,
    /// Hollow diamond (`o--`, `--o`).
    Aggregation,
    /// Filled diamond (`*--`, `--*`).
    Composition,
    /// Solid line with triangle (`<|--`, `--|>`).
    Inheritance,
    /// Dotted line with triangle (`<|..`, `..|>`).
    Implementation,
    /// Dotted line with arrow head (`..>`, `<..`).
    Dependency,
}

impl RelationshipType {
    /// Map an arrow glyph to a [`RelationshipType`].
    ///
    /// Only the decorations at both ends and the line style matter; direction
    /// hints inside the line (`-up->`, `-left-`) are ignored. Unknown glyphs
    /// map to [`RelationshipType::Association`].
    ///
    /// # Example
    ///
    /// ```
    /// # use blueprint_core::diagram::RelationshipType;
    /// assert_eq!(RelationshipType::from_arrow("*--"), RelationshipType::Composition);
    /// assert_eq!(RelationshipType::from_arrow("..|>"), RelationshipType::Implementation);
    /// assert_eq!(RelationshipType::from_arrow("-down->"), RelationshipType::Association);
    /// ```
    pub fn from_arrow(arrow: &str) -> Self {
        let is_line = |c: char| c == '-' || c == '.';
        let (Some(first), Some(last)) = (arrow.find(is_line), arrow.rfind(is_line)) else {
            return RelationshipType::Association;
        };

        let head = &arrow[..first];
        let tail = &arrow[last + 1..];
        let dotted = arrow[first..=last].contains('.');
        let ends = |c: char| head.contains(c) || tail.contains(c);

        if ends('*') {
            RelationshipType::Composition
        } else if ends('o') {
            RelationshipType::Aggregation
        } else if ends('|') {
            if dotted {
                RelationshipType::Implementation
            } else {
                RelationshipType::Inheritance
            }
        } else if dotted && (ends('>') || ends('<')) {
            RelationshipType::Dependency
        } else {
            RelationshipType::Association
        }
    }

    /// Returns `true` for whole/part relationships (composition and aggregation).
    pub fn is_whole_part(self) -> bool {
        matches!(
            self,
            RelationshipType::Composition | RelationshipType::Aggregation
        )
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationshipType::Association => "Association",
            RelationshipType::Aggregation => "Aggregation",
            RelationshipType::Composition => "Composition",
            RelationshipType::Inheritance => "Inheritance",
            RelationshipType::Implementation => "Implementation",
            RelationshipType::Dependency => "Dependency",
        };
        f.write_str(name)
    }
}
