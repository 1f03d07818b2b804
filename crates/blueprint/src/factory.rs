//! Solution model factory.
//!
//! Turns a validated [`DiagramSolution`] into a [`SolutionModel`]: one
//! Core, Infrastructure and Api project per bounded context, each carrying
//! its generated files, plus the dependency edges between them.
//!
//! Generation never fails. Missing keys are synthesized, unplaced enums go
//! to `Models/`, and an empty diagram still yields an empty project triple.

mod api;
mod context;
mod csharp;
mod domain;
mod features;
mod infrastructure;

use std::{collections::HashMap, path::Path};

use log::{debug, info, warn};
use petgraph::{
    algo::toposort,
    graph::{DiGraph, NodeIndex},
};

use blueprint_core::{
    diagram::DiagramSolution,
    solution::{Project, ProjectDependency, SolutionModel},
};

use crate::config::GenerationConfig;

/// Builds [`SolutionModel`]s from diagram solutions.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use blueprint::{
///     config::GenerationConfig,
///     diagram::{ClassEntity, DiagramDocument, DiagramSolution, Stereotype},
///     factory::SolutionFactory,
/// };
///
/// let document = DiagramDocument {
///     classes: vec![ClassEntity::new("Order", Stereotype::Aggregate)],
///     ..DiagramDocument::default()
/// };
/// let diagrams = DiagramSolution::new("docs", vec![document]);
///
/// let solution = SolutionFactory::new(GenerationConfig::default())
///     .create(&diagrams, "Shop", Path::new("out"));
///
/// let names: Vec<&str> = solution.projects.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, ["Shop.Core", "Shop.Infrastructure", "Shop.Api"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolutionFactory {
    config: GenerationConfig,
}

impl SolutionFactory {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Build the solution model rooted at `output_directory/solution_name`.
    pub fn create(
        &self,
        diagrams: &DiagramSolution,
        solution_name: &str,
        output_directory: &Path,
    ) -> SolutionModel {
        let plans = context::plan(diagrams, solution_name);
        info!(
            solution = solution_name,
            contexts = plans.len(),
            classes = diagrams.all_classes().count();
            "Generating solution model",
        );

        let mut projects = Vec::with_capacity(plans.len() * 3);
        let mut dependencies = Vec::with_capacity(plans.len() * 2);
        for plan in &plans {
            debug!(context = plan.name.as_str(), entities = plan.entities.len(); "Building context");
            let core = domain::build(plan, &self.config);
            let infrastructure = infrastructure::build(plan, &self.config);
            let api = api::build(plan, &self.config);

            dependencies.push(ProjectDependency {
                from: api.name.clone(),
                to: infrastructure.name.clone(),
            });
            dependencies.push(ProjectDependency {
                from: infrastructure.name.clone(),
                to: core.name.clone(),
            });
            projects.extend([core, infrastructure, api]);
        }

        assign_order(&mut projects, &dependencies);

        let solution = SolutionModel {
            name: solution_name.to_string(),
            root_directory: output_directory.join(solution_name),
            projects,
            dependencies,
        };
        info!(
            projects = solution.projects.len(),
            files = solution.file_count();
            "Solution model generated",
        );
        solution
    }
}

/// Number projects so every project comes after the projects it depends on,
/// then sort them by that number.
fn assign_order(projects: &mut [Project], dependencies: &[ProjectDependency]) {
    let mut graph = DiGraph::<usize, ()>::with_capacity(projects.len(), dependencies.len());
    let indices: HashMap<String, NodeIndex> = projects
        .iter()
        .enumerate()
        .map(|(position, project)| (project.name.clone(), graph.add_node(position)))
        .collect();

    for dependency in dependencies {
        let (Some(&from), Some(&to)) = (
            indices.get(dependency.from.as_str()),
            indices.get(dependency.to.as_str()),
        ) else {
            warn!(from = dependency.from.as_str(), to = dependency.to.as_str(); "Dependency names an unknown project");
            continue;
        };
        // Dependency first.
        graph.add_edge(to, from, ());
    }

    let order: Vec<usize> = match toposort(&graph, None) {
        Ok(sorted) => sorted.into_iter().map(|node| graph[node]).collect(),
        Err(cycle) => {
            warn!(project = projects[graph[cycle.node_id()]].name.as_str(); "Project dependency cycle, keeping declaration order");
            (0..projects.len()).collect()
        }
    };

    for (rank, position) in order.into_iter().enumerate() {
        projects[position].order = rank;
    }
    projects.sort_by_key(|project| project.order);
}
