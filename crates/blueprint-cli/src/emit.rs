//! Writing a solution model to disk.
//!
//! Projects land in `{root}/src/{Project}/` and a `{Solution}.sln` file at
//! the root lists them. Project GUIDs are name-based, so re-running the
//! generator yields an identical solution file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use uuid::Uuid;

use blueprint::{BlueprintError, solution::SolutionModel};

/// Project type GUID Visual Studio uses for SDK-style C# projects.
const CSHARP_PROJECT_TYPE: &str = "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC";

const CONFIGURATIONS: [&str; 2] = ["Debug|Any CPU", "Release|Any CPU"];

/// Write every generated file and the solution file.
///
/// Returns the number of files written, the solution file included.
///
/// # Errors
///
/// Returns [`BlueprintError::Emit`] when a directory or file cannot be
/// written.
pub fn write_solution(solution: &SolutionModel) -> Result<usize, BlueprintError> {
    let root = &solution.root_directory;
    info!(root:? = root, projects = solution.projects.len(); "Writing solution");

    let mut written = 0;
    for project in &solution.projects {
        let project_dir = root.join("src").join(&project.name);
        for file in &project.files {
            write_file(&project_dir.join(&file.relative_path), &file.contents)?;
            written += 1;
        }
        debug!(project = project.name.as_str(), files = project.files.len(); "Project written");
    }

    write_file(&solution_path(solution), &render_solution_file(solution))?;
    written += 1;

    info!(files = written; "Solution written");
    Ok(written)
}

/// Location of the `.sln` file.
pub fn solution_path(solution: &SolutionModel) -> PathBuf {
    solution
        .root_directory
        .join(format!("{}.sln", solution.name))
}

fn write_file(path: &Path, contents: &str) -> Result<(), BlueprintError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            BlueprintError::Emit(format!("cannot create {}: {err}", parent.display()))
        })?;
    }
    fs::write(path, contents)
        .map_err(|err| BlueprintError::Emit(format!("cannot write {}: {err}", path.display())))
}

fn project_guid(name: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
        .hyphenated()
        .to_string()
        .to_uppercase()
}

/// Render the Visual Studio solution file.
pub fn render_solution_file(solution: &SolutionModel) -> String {
    let mut out = String::new();
    out.push_str("Microsoft Visual Studio Solution File, Format Version 12.00\n");
    out.push_str("# Visual Studio Version 17\n");
    out.push_str("VisualStudioVersion = 17.0.31903.59\n");
    out.push_str("MinimumVisualStudioVersion = 10.0.40219.1\n");

    for project in &solution.projects {
        out.push_str(&format!(
            "Project(\"{{{CSHARP_PROJECT_TYPE}}}\") = \"{0}\", \"src\\{0}\\{0}.csproj\", \"{{{1}}}\"\n",
            project.name,
            project_guid(&project.name)
        ));
        out.push_str("EndProject\n");
    }

    out.push_str("Global\n");
    out.push_str("\tGlobalSection(SolutionConfigurationPlatforms) = preSolution\n");
    for configuration in CONFIGURATIONS {
        out.push_str(&format!("\t\t{configuration} = {configuration}\n"));
    }
    out.push_str("\tEndGlobalSection\n");
    out.push_str("\tGlobalSection(ProjectConfigurationPlatforms) = postSolution\n");
    for project in &solution.projects {
        let guid = project_guid(&project.name);
        for configuration in CONFIGURATIONS {
            out.push_str(&format!(
                "\t\t{{{guid}}}.{configuration}.ActiveCfg = {configuration}\n"
            ));
            out.push_str(&format!(
                "\t\t{{{guid}}}.{configuration}.Build.0 = {configuration}\n"
            ));
        }
    }
    out.push_str("\tEndGlobalSection\n");
    out.push_str("EndGlobal\n");
    out
}
