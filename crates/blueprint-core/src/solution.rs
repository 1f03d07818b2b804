//! Solution model produced by the factory.
//!
//! A [`SolutionModel`] is a tree of [`Project`]s, each holding the generated
//! [`GeneratedFile`] descriptors. Nothing in this crate writes files; the
//! model is handed to an emitter.

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// A generated multi-project solution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolutionModel {
    pub name: String,
    pub root_directory: PathBuf,
    pub projects: Vec<Project>,
    pub dependencies: Vec<ProjectDependency>,
}

impl SolutionModel {
    /// Find a project by name.
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Total number of generated files across all projects.
    pub fn file_count(&self) -> usize {
        self.projects.iter().map(|p| p.files.len()).sum()
    }
}

/// Kind of a generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProjectKind {
    ClassLibrary,
    WebApi,
}

impl ProjectKind {
    /// The project SDK used in the project file.
    pub fn sdk(self) -> &'static str {
        match self {
            ProjectKind::ClassLibrary => "Microsoft.NET.Sdk",
            ProjectKind::WebApi => "Microsoft.NET.Sdk.Web",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKind::ClassLibrary => f.write_str("classlib"),
            ProjectKind::WebApi => f.write_str("webapi"),
        }
    }
}

/// One generated project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub name: String,
    pub kind: ProjectKind,
    /// Position in dependency order; dependencies come first.
    pub order: usize,
    pub bounded_context: Option<String>,
    pub package_references: Vec<PackageReference>,
    /// Names of referenced projects.
    pub project_references: Vec<String>,
    pub files: Vec<GeneratedFile>,
}

impl Project {
    /// Create an empty project.
    pub fn new(name: impl Into<String>, kind: ProjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            order: 0,
            bounded_context: None,
            package_references: Vec::new(),
            project_references: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Files of the given kind.
    pub fn files_of(&self, kind: GeneratedFileKind) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    /// Find a file by its relative path, using `/` separators.
    pub fn file(&self, relative_path: &str) -> Option<&GeneratedFile> {
        self.files
            .iter()
            .find(|f| f.relative_path.to_string_lossy().replace('\\', "/") == relative_path)
    }
}

/// A NuGet-style package reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    pub name: String,
    pub version: String,
}

/// `from` depends on `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectDependency {
    pub from: String,
    pub to: String,
}

/// What a generated file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeneratedFileKind {
    Entity,
    Dto,
    Mapping,
    Enum,
    Request,
    Response,
    Handler,
    Validator,
    ContextInterface,
    ContextImplementation,
    Controller,
    EntryPoint,
    Configuration,
    GlobalUsings,
    ProjectFile,
}

/// A generated source file descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Path relative to the project directory.
    pub relative_path: PathBuf,
    pub kind: GeneratedFileKind,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(
        relative_path: impl Into<PathBuf>,
        kind: GeneratedFileKind,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            kind,
            contents: contents.into(),
        }
    }
}
