//! Configuration for parsing and validation.
//!
//! Both types implement [`serde::Deserialize`] so they can be loaded as the
//! `[parser]` and `[validation]` sections of an application config file.

use serde::Deserialize;

/// How bare relationship matches are de-duplicated against cardinality matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    /// A line produces at most one relationship; the cardinality form wins.
    #[default]
    PerLine,

    /// Additionally drop a bare match whose text is a substring of any
    /// cardinality match in the same document.
    TextSubstring,
}

/// Parser settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Extension of diagram files scanned in a directory (without the dot).
    #[serde(default = "default_file_extension")]
    file_extension: String,

    /// Relationship de-duplication policy.
    #[serde(default)]
    dedup_policy: DedupPolicy,
}

impl ParserConfig {
    /// Creates a new [`ParserConfig`].
    pub fn new(file_extension: impl Into<String>, dedup_policy: DedupPolicy) -> Self {
        Self {
            file_extension: file_extension.into(),
            dedup_policy,
        }
    }

    /// Returns the diagram file extension.
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Returns the relationship de-duplication policy.
    pub fn dedup_policy(&self) -> DedupPolicy {
        self.dedup_policy
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new(default_file_extension(), DedupPolicy::default())
    }
}

/// Validator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// File names that a diagram directory is expected to contain.
    #[serde(default = "default_recommended_documents")]
    recommended_documents: Vec<String>,
}

impl ValidationConfig {
    /// Creates a new [`ValidationConfig`].
    pub fn new(recommended_documents: Vec<String>) -> Self {
        Self {
            recommended_documents,
        }
    }

    /// Returns the recommended document file names.
    pub fn recommended_documents(&self) -> &[String] {
        &self.recommended_documents
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new(default_recommended_documents())
    }
}

fn default_file_extension() -> String {
    "puml".to_string()
}

fn default_recommended_documents() -> Vec<String> {
    ["solution.puml", "aggregates.puml", "components.puml"]
        .into_iter()
        .map(String::from)
        .collect()
}
