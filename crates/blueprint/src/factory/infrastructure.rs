//! Infrastructure project: the EF Core context implementing the Core
//! persistence interface.

use std::path::PathBuf;

use log::debug;

use blueprint_core::solution::{GeneratedFile, GeneratedFileKind, Project, ProjectKind};

use crate::{
    config::GenerationConfig,
    factory::{
        context::ContextPlan,
        csharp::{self, CodeWriter},
    },
};

pub(super) fn build(plan: &ContextPlan, config: &GenerationConfig) -> Project {
    let name = plan.infrastructure_project();
    let core = plan.core_project();

    let mut project = Project::new(&name, ProjectKind::ClassLibrary);
    project.bounded_context = plan.bounded_context.clone();
    project.package_references = config.infrastructure_packages().to_vec();
    project.project_references = vec![core.clone()];

    project.files.push(db_context_file(plan));

    let mut namespaces = vec![
        "Microsoft.EntityFrameworkCore".to_string(),
        format!("{core}.Data"),
    ];
    namespaces.extend(plan.model_namespaces());
    project.files.push(GeneratedFile::new(
        "GlobalUsings.cs",
        GeneratedFileKind::GlobalUsings,
        csharp::global_usings(namespaces.iter().map(String::as_str)),
    ));
    project.files.push(GeneratedFile::new(
        format!("{name}.csproj"),
        GeneratedFileKind::ProjectFile,
        csharp::project_file(
            project.kind,
            config.target_framework(),
            &name,
            &project.package_references,
            &project.project_references,
        ),
    ));

    debug!(project = name.as_str(), files = project.files.len(); "Infrastructure project built");
    project
}

fn db_context_file(plan: &ContextPlan) -> GeneratedFile {
    let db_context = plan.db_context();
    let mut writer = CodeWriter::with_namespace(&format!("{}.Data", plan.infrastructure_project()));

    writer.open(&format!(
        "public class {db_context} : DbContext, {}",
        plan.context_interface()
    ));
    writer.open(&format!(
        "public {db_context}(DbContextOptions<{db_context}> options) : base(options)"
    ));
    writer.close();
    writer.blank();
    for entity in &plan.entities {
        writer.line(&format!(
            "public DbSet<{0}> {1} => Set<{0}>();",
            entity.name(),
            entity.plural
        ));
    }
    writer.blank();
    writer.open("protected override void OnModelCreating(ModelBuilder modelBuilder)");
    writer.line("base.OnModelCreating(modelBuilder);");
    for entity in &plan.entities {
        writer.line(&format!(
            "modelBuilder.Entity<{}>().HasKey(e => e.{});",
            entity.name(),
            entity.key.name
        ));
    }
    writer.close();
    writer.close();

    GeneratedFile::new(
        PathBuf::from("Data").join(format!("{db_context}.cs")),
        GeneratedFileKind::ContextImplementation,
        writer.finish(),
    )
}
