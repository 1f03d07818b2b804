//! Api project: controllers, the host entry point and settings.

use std::path::PathBuf;

use log::debug;
use serde_json::json;

use blueprint_core::{
    naming,
    solution::{GeneratedFile, GeneratedFileKind, Project, ProjectKind},
};

use crate::{
    config::GenerationConfig,
    factory::{
        context::{ContextPlan, EntityModel},
        csharp::{self, CodeWriter},
        features::Operation,
    },
};

const CONNECTION_NAME: &str = "DefaultConnection";

pub(super) fn build(plan: &ContextPlan, config: &GenerationConfig) -> Project {
    let name = plan.api_project();
    let mut project = Project::new(&name, ProjectKind::WebApi);
    project.bounded_context = plan.bounded_context.clone();
    project.package_references = config.api_packages().to_vec();
    project.project_references = vec![plan.infrastructure_project()];

    for aggregate in plan.aggregates() {
        project.files.push(controller_file(plan, aggregate));
    }
    project.files.push(program_file(plan));
    project.files.push(settings_file(plan, config));

    let mut namespaces = vec![
        "FluentValidation".to_string(),
        "MediatR".to_string(),
        "Microsoft.AspNetCore.Authorization".to_string(),
        "Microsoft.AspNetCore.Mvc".to_string(),
        "Microsoft.EntityFrameworkCore".to_string(),
        format!("{}.Data", plan.core_project()),
        format!("{}.Data", plan.infrastructure_project()),
    ];
    namespaces.extend(plan.aggregates().map(|aggregate| plan.features_namespace(aggregate)));
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

    debug!(project = name.as_str(), files = project.files.len(); "Api project built");
    project
}

/// Controller route: the endpoint spec's route, else `api/{kebab plural}`.
fn route(entity: &EntityModel) -> String {
    match &entity.endpoint {
        Some(endpoint) => endpoint.route.trim_start_matches('/').to_string(),
        None => format!("api/{}", naming::to_kebab_case(&entity.plural)),
    }
}

fn controller_file(plan: &ContextPlan, entity: &EntityModel) -> GeneratedFile {
    let name = entity.name();
    let key = &entity.key.name;
    let key_type = csharp::scalar(&entity.key.type_name);
    let stem = |operation: Operation| operation.type_stem(entity);

    let mut writer = CodeWriter::with_namespace(&format!("{}.Controllers", plan.api_project()));
    writer.line("[ApiController]");
    writer.line(&format!("[Route(\"{}\")]", route(entity)));
    if entity
        .endpoint
        .as_ref()
        .is_some_and(|endpoint| endpoint.authentication_required)
    {
        writer.line("[Authorize]");
    }
    writer.open(&format!("public class {name}Controller : ControllerBase"));
    writer.line("private readonly IMediator _mediator;");
    writer.blank();
    writer.open(&format!("public {name}Controller(IMediator mediator)"));
    writer.line("_mediator = mediator;");
    writer.close();

    let create = stem(Operation::Create);
    writer.blank();
    writer.line("[HttpPost]");
    writer.open(&format!(
        "public async Task<ActionResult<{create}Response>> Create({create}Request request, CancellationToken cancellationToken)"
    ));
    writer.line("var response = await _mediator.Send(request, cancellationToken);");
    writer.line(&format!(
        "return CreatedAtAction(nameof(GetById), new {{ id = response.{name}.{key} }}, response);"
    ));
    writer.close();

    let get_by_id = stem(Operation::GetById);
    writer.blank();
    writer.line("[HttpGet(\"{id}\")]");
    writer.open(&format!(
        "public async Task<ActionResult<{get_by_id}Response>> GetById({key_type} id, CancellationToken cancellationToken)"
    ));
    writer.line(&format!(
        "var response = await _mediator.Send(new {get_by_id}Request {{ {key} = id }}, cancellationToken);"
    ));
    not_found_unless(&mut writer, &format!("response.{name} is null"));
    writer.line("return Ok(response);");
    writer.close();

    let get_all = stem(Operation::GetAll);
    writer.blank();
    writer.line("[HttpGet]");
    writer.open(&format!(
        "public async Task<ActionResult<{get_all}Response>> GetAll([FromQuery] {get_all}Request request, CancellationToken cancellationToken)"
    ));
    writer.line("return Ok(await _mediator.Send(request, cancellationToken));");
    writer.close();

    let update = stem(Operation::Update);
    writer.blank();
    writer.line("[HttpPut(\"{id}\")]");
    writer.open(&format!(
        "public async Task<ActionResult<{update}Response>> Update({key_type} id, {update}Request request, CancellationToken cancellationToken)"
    ));
    writer.line(&format!("request.{key} = id;"));
    writer.line("var response = await _mediator.Send(request, cancellationToken);");
    not_found_unless(&mut writer, &format!("response.{name} is null"));
    writer.line("return Ok(response);");
    writer.close();

    let delete = stem(Operation::Delete);
    writer.blank();
    writer.line("[HttpDelete(\"{id}\")]");
    writer.open(&format!(
        "public async Task<ActionResult<{delete}Response>> Delete({key_type} id, CancellationToken cancellationToken)"
    ));
    writer.line(&format!(
        "var response = await _mediator.Send(new {delete}Request {{ {key} = id }}, cancellationToken);"
    ));
    not_found_unless(&mut writer, "!response.Success");
    writer.line("return Ok(response);");
    writer.close();

    writer.close();

    GeneratedFile::new(
        PathBuf::from("Controllers").join(format!("{name}Controller.cs")),
        GeneratedFileKind::Controller,
        writer.finish(),
    )
}

fn not_found_unless(writer: &mut CodeWriter, condition: &str) {
    writer.blank();
    writer.open(&format!("if ({condition})"));
    writer.line("return NotFound();");
    writer.close();
    writer.blank();
}

fn program_file(plan: &ContextPlan) -> GeneratedFile {
    let db_context = plan.db_context();
    let interface = plan.context_interface();
    let mut writer = CodeWriter::new();

    writer.line("var builder = WebApplication.CreateBuilder(args);");
    writer.blank();
    writer.line("builder.Services.AddControllers();");
    writer.line("builder.Services.AddEndpointsApiExplorer();");
    writer.line("builder.Services.AddSwaggerGen();");
    writer.blank();
    writer.line(&format!("builder.Services.AddDbContext<{db_context}>(options =>"));
    writer.line(&format!(
        "    options.UseSqlServer(builder.Configuration.GetConnectionString(\"{CONNECTION_NAME}\")));"
    ));
    writer.line(&format!(
        "builder.Services.AddScoped<{interface}>(provider => provider.GetRequiredService<{db_context}>());"
    ));
    writer.line(&format!(
        "builder.Services.AddMediatR(cfg => cfg.RegisterServicesFromAssembly(typeof({interface}).Assembly));"
    ));
    writer.line(&format!(
        "builder.Services.AddValidatorsFromAssembly(typeof({interface}).Assembly);"
    ));
    writer.blank();
    writer.line("var app = builder.Build();");
    writer.blank();
    writer.open("if (app.Environment.IsDevelopment())");
    writer.line("app.UseSwagger();");
    writer.line("app.UseSwaggerUI();");
    writer.close();
    writer.blank();
    writer.line("app.UseHttpsRedirection();");
    writer.line("app.UseAuthorization();");
    writer.line("app.MapControllers();");
    writer.blank();
    writer.line("app.Run();");

    GeneratedFile::new("Program.cs", GeneratedFileKind::EntryPoint, writer.finish())
}

fn settings_file(plan: &ContextPlan, config: &GenerationConfig) -> GeneratedFile {
    let database = format!("{}Db", plan.prefix.replace('.', ""));
    let connection_string = config.connection_string().replace("{database}", &database);
    let settings = json!({
        "ConnectionStrings": { "DefaultConnection": connection_string },
        "Logging": {
            "LogLevel": {
                "Default": "Information",
                "Microsoft.AspNetCore": "Warning",
            },
        },
        "AllowedHosts": "*",
    });

    GeneratedFile::new(
        "appsettings.json",
        GeneratedFileKind::Configuration,
        format!("{settings:#}\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::diagram::{
        ClassEntity, ComponentNode, DiagramDocument, DiagramSolution, EndpointSpec, PropertyField,
        Stereotype,
    };

    use crate::factory::context;

    fn plan(components: Vec<ComponentNode>) -> ContextPlan {
        let document = DiagramDocument {
            classes: vec![
                ClassEntity::new("Category", Stereotype::Aggregate),
                ClassEntity::new("Product", Stereotype::Aggregate)
                    .with_property(PropertyField::new("ProductId", "int")),
                ClassEntity::new("Price", Stereotype::ValueObject),
            ],
            components,
            ..DiagramDocument::default()
        };
        context::plan(&DiagramSolution::new("docs", vec![document]), "Acme.Store").remove(0)
    }

    #[test]
    fn test_controllers_per_aggregate() {
        let project = build(&plan(Vec::new()), &GenerationConfig::default());

        assert_eq!(project.name, "Acme.Store.Api");
        assert_eq!(project.kind, ProjectKind::WebApi);
        assert_eq!(project.files_of(GeneratedFileKind::Controller).count(), 2);

        let controller = &project.file("Controllers/CategoryController.cs").unwrap().contents;
        assert!(controller.starts_with("namespace Acme.Store.Api.Controllers;"));
        assert!(controller.contains("[Route(\"api/categories\")]"));
        assert!(!controller.contains("[Authorize]"));
        assert_eq!(controller.matches("[Http").count(), 5);
        assert!(controller.contains("GetById(Guid id, CancellationToken cancellationToken)"));
        assert!(controller.contains("new { id = response.Category.CategoryId }"));

        let product = &project.file("Controllers/ProductController.cs").unwrap().contents;
        assert!(product.contains("Delete(int id, CancellationToken cancellationToken)"));
    }

    #[test]
    fn test_endpoint_spec_route_and_auth() {
        let mut component = ComponentNode::new("CategoriesController", "categories");
        component.endpoint_spec = Some(EndpointSpec {
            route: "/api/v1/categories".to_string(),
            authentication_required: true,
            endpoints: Vec::new(),
        });
        let project = build(&plan(vec![component]), &GenerationConfig::default());
        let controller = &project.file("Controllers/CategoryController.cs").unwrap().contents;

        assert!(controller.contains("[Route(\"api/v1/categories\")]"));
        assert!(controller.contains(
            "[Authorize]\npublic class CategoryController : ControllerBase"
        ));
    }

    #[test]
    fn test_program_and_settings() {
        let project = build(&plan(Vec::new()), &GenerationConfig::default());

        let program = &project.file("Program.cs").unwrap().contents;
        assert!(program.contains("builder.Services.AddDbContext<StoreDbContext>(options =>"));
        assert!(program.contains(
            "AddScoped<IStoreContext>(provider => provider.GetRequiredService<StoreDbContext>())"
        ));
        assert!(program.contains("AddValidatorsFromAssembly(typeof(IStoreContext).Assembly)"));

        let settings: serde_json::Value =
            serde_json::from_str(&project.file("appsettings.json").unwrap().contents).unwrap();
        let connection = settings["ConnectionStrings"]["DefaultConnection"].as_str().unwrap();
        assert!(connection.contains("Database=AcmeStoreDb;"));
        assert_eq!(settings["AllowedHosts"], "*");

        let csproj = &project.file("Acme.Store.Api.csproj").unwrap().contents;
        assert!(csproj.starts_with("<Project Sdk=\"Microsoft.NET.Sdk.Web\">"));
        assert!(csproj.contains("Acme.Store.Infrastructure.csproj"));
    }
}
