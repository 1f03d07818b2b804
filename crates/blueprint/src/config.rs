//! Configuration types for the Blueprint pipeline.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every section and field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`ParserConfig`] - File extension and relationship de-duplication.
//! - [`ValidationConfig`] - Recommended document names.
//! - [`GenerationConfig`] - Target framework, package references and the
//!   connection string of generated solutions.
//!
//! # Example
//!
//! ```
//! # use blueprint::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.parser().file_extension(), "puml");
//! assert_eq!(config.generation().target_framework(), "net8.0");
//! ```

use serde::Deserialize;

use blueprint_core::solution::PackageReference;

pub use blueprint_parser::config::{DedupPolicy, ParserConfig, ValidationConfig};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser section.
    #[serde(default)]
    parser: ParserConfig,

    /// Validation section.
    #[serde(default)]
    validation: ValidationConfig,

    /// Code generation section.
    #[serde(default)]
    generation: GenerationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        parser: ParserConfig,
        validation: ValidationConfig,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            parser,
            validation,
            generation,
        }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the validation configuration.
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    /// Returns the code generation configuration.
    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }
}

/// Settings of the generated solution.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Target framework moniker written into every project file.
    target_framework: String,

    /// Packages referenced by Core projects.
    core_packages: Vec<PackageReference>,

    /// Packages referenced by Infrastructure projects.
    infrastructure_packages: Vec<PackageReference>,

    /// Packages referenced by Api projects.
    api_packages: Vec<PackageReference>,

    /// Connection string written into `appsettings.json`.
    connection_string: String,
}

impl GenerationConfig {
    /// Returns the target framework moniker.
    pub fn target_framework(&self) -> &str {
        &self.target_framework
    }

    pub fn core_packages(&self) -> &[PackageReference] {
        &self.core_packages
    }

    pub fn infrastructure_packages(&self) -> &[PackageReference] {
        &self.infrastructure_packages
    }

    pub fn api_packages(&self) -> &[PackageReference] {
        &self.api_packages
    }

    /// Returns the default connection string.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Replace the target framework.
    pub fn with_target_framework(mut self, target_framework: impl Into<String>) -> Self {
        self.target_framework = target_framework.into();
        self
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            target_framework: "net8.0".to_string(),
            core_packages: packages(&[
                ("MediatR", "12.2.0"),
                ("FluentValidation", "11.9.0"),
                ("Microsoft.EntityFrameworkCore", "8.0.0"),
            ]),
            infrastructure_packages: packages(&[(
                "Microsoft.EntityFrameworkCore.SqlServer",
                "8.0.0",
            )]),
            api_packages: packages(&[
                ("Swashbuckle.AspNetCore", "6.5.0"),
                ("Microsoft.EntityFrameworkCore.Design", "8.0.0"),
                ("FluentValidation.DependencyInjectionExtensions", "11.9.0"),
            ]),
            connection_string:
                "Server=(localdb)\\mssqllocaldb;Database={database};Trusted_Connection=True;MultipleActiveResultSets=true"
                    .to_string(),
        }
    }
}

fn packages(entries: &[(&str, &str)]) -> Vec<PackageReference> {
    entries
        .iter()
        .map(|(name, version)| PackageReference {
            name: (*name).to_string(),
            version: (*version).to_string(),
        })
        .collect()
}
