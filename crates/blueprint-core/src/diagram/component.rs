//! Components and their endpoint descriptions.

use std::fmt;

use serde::Serialize;

/// A component line: `component [Display Name] as alias`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentNode {
    pub name: String,
    /// Key used by relationships and notes to refer to the component.
    pub alias: String,
    pub note: Option<String>,
    /// Present only when the attached note describes endpoints.
    pub endpoint_spec: Option<EndpointSpec>,
}

impl ComponentNode {
    /// Create a component without a note.
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if the display name ends in `Controller`.
    pub fn is_controller(&self) -> bool {
        self.name.trim_end().ends_with("Controller")
    }
}

/// Endpoint description parsed from a component note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointSpec {
    pub route: String,
    pub authentication_required: bool,
    pub endpoints: Vec<Endpoint>,
}

/// One `VERB /path - description` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub verb: HttpVerb,
    pub path: String,
    pub description: Option<String>,
}

/// HTTP verbs recognized in endpoint lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpVerb {
    /// Map an upper-case verb to an [`HttpVerb`]. Other text yields `None`.
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "GET" => Some(HttpVerb::Get),
            "POST" => Some(HttpVerb::Post),
            "PUT" => Some(HttpVerb::Put),
            "PATCH" => Some(HttpVerb::Patch),
            "DELETE" => Some(HttpVerb::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
