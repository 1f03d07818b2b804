//! Diagram model produced by the parser.
//!
//! A [`DiagramDocument`] is the result of parsing one source file. A
//! [`DiagramSolution`] groups several documents and exposes derived views
//! (all classes, all aggregates, bounded contexts) that are recomputed on
//! every call.
//!
//! All types are plain data. They are created by the parser and treated as
//! read-only afterwards.

mod class;
mod component;
mod document;
mod relationship;
mod symbols;

pub use class::{ClassEntity, EnumEntity, MethodSignature, PackageGroup, Parameter, PropertyField};
pub use component::{ComponentNode, Endpoint, EndpointSpec, HttpVerb};
pub use document::{DiagramDocument, DiagramSolution, Metadata};
pub use relationship::RelationshipEdge;
pub use symbols::{RelationshipType, Stereotype, Visibility};
