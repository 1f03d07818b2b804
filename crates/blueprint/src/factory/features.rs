//! CQRS feature files for aggregates: requests, responses, handlers and
//! validators.

use std::path::PathBuf;

use log::trace;

use blueprint_core::{
    diagram::PropertyField,
    naming,
    solution::{GeneratedFile, GeneratedFileKind},
};

use crate::factory::{
    context::{ContextPlan, EntityModel},
    csharp::{self, CodeWriter},
    domain::property_declaration,
};

/// Feature operations generated for every aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Operation {
    Create,
    GetById,
    GetAll,
    Update,
    Delete,
}

impl Operation {
    pub(super) const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::GetById,
        Operation::GetAll,
        Operation::Update,
        Operation::Delete,
    ];

    pub(super) fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::GetById => "GetById",
            Operation::GetAll => "GetAll",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
        }
    }

    /// Type name stem, e.g. `CreateOrder`.
    pub(super) fn type_stem(self, entity: &EntityModel) -> String {
        format!("{}{}", self.as_str(), entity.name())
    }

    fn has_validator(self) -> bool {
        matches!(self, Operation::Create | Operation::Update)
    }
}

/// Append the feature files of one aggregate.
pub(super) fn generate(plan: &ContextPlan, entity: &EntityModel, files: &mut Vec<GeneratedFile>) {
    trace!(entity = entity.name(); "Generating features");
    let features = Features { plan, entity };

    for operation in Operation::ALL {
        files.push(features.request(operation));
        files.push(features.response(operation));
        files.push(features.handler(operation));
        if operation.has_validator() {
            files.push(features.validator(operation));
        }
    }
}

struct Features<'a> {
    plan: &'a ContextPlan,
    entity: &'a EntityModel,
}

impl Features<'_> {
    fn writer(&self) -> CodeWriter {
        CodeWriter::with_namespace(&self.plan.features_namespace(self.entity))
    }

    fn file(
        &self,
        operation: Operation,
        suffix: &str,
        kind: GeneratedFileKind,
        writer: CodeWriter,
    ) -> GeneratedFile {
        let path = PathBuf::from("Features")
            .join(self.entity.name())
            .join(format!("{}{suffix}.cs", operation.type_stem(self.entity)));
        GeneratedFile::new(path, kind, writer.finish())
    }

    fn key(&self) -> &PropertyField {
        &self.entity.key
    }

    fn payload(&self) -> impl Iterator<Item = &PropertyField> {
        self.entity.payload(self.plan)
    }

    // ============================================================================
    // Requests
    // ============================================================================

    fn request(&self, operation: Operation) -> GeneratedFile {
        let stem = operation.type_stem(self.entity);
        let mut writer = self.writer();
        writer.open(&format!("public class {stem}Request : IRequest<{stem}Response>"));

        match operation {
            Operation::Create => {
                for property in self.payload() {
                    writer.line(&property_declaration(self.plan, property));
                }
            }
            Operation::Update => {
                writer.line(&property_declaration(self.plan, self.key()));
                for property in self.payload() {
                    writer.line(&property_declaration(self.plan, property));
                }
            }
            Operation::GetById | Operation::Delete => {
                writer.line(&property_declaration(self.plan, self.key()));
            }
            Operation::GetAll => {
                writer.line("public int PageIndex { get; set; } = 1;");
                writer.line("public int PageSize { get; set; } = 20;");
                writer.line("public string? SearchTerm { get; set; }");
                writer.line("public string? SortBy { get; set; }");
                writer.line("public bool SortDescending { get; set; }");
            }
        }

        writer.close();
        self.file(operation, "Request", GeneratedFileKind::Request, writer)
    }

    // ============================================================================
    // Responses
    // ============================================================================

    fn response(&self, operation: Operation) -> GeneratedFile {
        let name = self.entity.name();
        let mut writer = self.writer();
        writer.open(&format!("public class {}Response", operation.type_stem(self.entity)));

        match operation {
            Operation::Create => {
                writer.line(&format!("public {name}Dto {name} {{ get; set; }} = null!;"));
            }
            Operation::GetById | Operation::Update => {
                writer.line(&format!("public {name}Dto? {name} {{ get; set; }}"));
            }
            Operation::GetAll => {
                writer.line(&format!(
                    "public List<{name}Dto> Items {{ get; set; }} = new List<{name}Dto>();"
                ));
                writer.line("public int TotalCount { get; set; }");
                writer.line("public int PageIndex { get; set; }");
                writer.line("public int PageSize { get; set; }");
            }
            Operation::Delete => {
                writer.line("public bool Success { get; set; }");
            }
        }

        writer.close();
        self.file(operation, "Response", GeneratedFileKind::Response, writer)
    }

    // ============================================================================
    // Handlers
    // ============================================================================

    fn handler(&self, operation: Operation) -> GeneratedFile {
        let stem = operation.type_stem(self.entity);
        let interface = self.plan.context_interface();
        let mut writer = self.writer();

        writer.open(&format!(
            "public class {stem}Handler : IRequestHandler<{stem}Request, {stem}Response>"
        ));
        writer.line(&format!("private readonly {interface} _context;"));
        writer.blank();
        writer.open(&format!("public {stem}Handler({interface} context)"));
        writer.line("_context = context;");
        writer.close();
        writer.blank();
        writer.open(&format!(
            "public async Task<{stem}Response> Handle({stem}Request request, CancellationToken cancellationToken)"
        ));

        match operation {
            Operation::Create => self.create_body(&mut writer),
            Operation::GetById => self.get_by_id_body(&mut writer),
            Operation::GetAll => self.get_all_body(&mut writer),
            Operation::Update => self.update_body(&mut writer),
            Operation::Delete => self.delete_body(&mut writer),
        }

        writer.close();
        writer.close();
        self.file(operation, "Handler", GeneratedFileKind::Handler, writer)
    }

    fn response_type(&self, operation: Operation) -> String {
        format!("{}Response", operation.type_stem(self.entity))
    }

    fn lookup(&self, writer: &mut CodeWriter, tracking: bool) {
        let key = &self.key().name;
        writer.line(&format!("var entity = await _context.{}", self.entity.plural));
        if !tracking {
            writer.line("    .AsNoTracking()");
        }
        writer.line(&format!(
            "    .FirstOrDefaultAsync(e => e.{key} == request.{key}, cancellationToken);"
        ));
    }

    /// Audit timestamps present on the entity.
    fn timestamps(&self) -> impl Iterator<Item = &str> {
        self.entity
            .class
            .properties
            .iter()
            .filter(|property| {
                naming::is_audit_property(&property.name) && property.type_name == "DateTime"
            })
            .map(|property| property.name.as_str())
    }

    fn create_body(&self, writer: &mut CodeWriter) {
        let key = self.key();
        writer.open(&format!("var entity = new {}", self.entity.name()));
        // Numeric keys are left to the database.
        let generated = match csharp::scalar(&key.type_name) {
            "Guid" => Some("Guid.NewGuid()"),
            "string" => Some("Guid.NewGuid().ToString()"),
            _ => None,
        };
        if let Some(value) = generated {
            writer.line(&format!("{} = {value},", key.name));
        }
        for property in self.payload() {
            writer.line(&format!("{0} = request.{0},", property.name));
        }
        for timestamp in self.timestamps() {
            writer.line(&format!("{timestamp} = DateTime.UtcNow,"));
        }
        writer.close_with(";");
        writer.blank();
        writer.line(&format!("_context.{}.Add(entity);", self.entity.plural));
        writer.line("await _context.SaveChangesAsync(cancellationToken);");
        writer.blank();
        writer.line(&format!(
            "return new {} {{ {} = entity.ToDto() }};",
            self.response_type(Operation::Create),
            self.entity.name()
        ));
    }

    fn get_by_id_body(&self, writer: &mut CodeWriter) {
        self.lookup(writer, false);
        writer.blank();
        writer.line(&format!(
            "return new {} {{ {} = entity?.ToDto() }};",
            self.response_type(Operation::GetById),
            self.entity.name()
        ));
    }

    fn get_all_body(&self, writer: &mut CodeWriter) {
        writer.line(&format!(
            "var query = _context.{}.AsNoTracking().AsQueryable();",
            self.entity.plural
        ));

        let searchable: Vec<String> = self
            .payload()
            .filter(|property| csharp::is_string(property))
            .map(|property| {
                if property.is_nullable {
                    format!("(e.{0} != null && e.{0}.Contains(term))", property.name)
                } else {
                    format!("e.{}.Contains(term)", property.name)
                }
            })
            .collect();
        if !searchable.is_empty() {
            writer.blank();
            writer.open("if (!string.IsNullOrWhiteSpace(request.SearchTerm))");
            writer.line("var term = request.SearchTerm;");
            writer.line(&format!("query = query.Where(e => {});", searchable.join(" || ")));
            writer.close();
        }

        writer.blank();
        writer.open("if (!string.IsNullOrWhiteSpace(request.SortBy))");
        writer.line("query = request.SortDescending");
        writer.line("    ? query.OrderByDescending(e => EF.Property<object>(e, request.SortBy))");
        writer.line("    : query.OrderBy(e => EF.Property<object>(e, request.SortBy));");
        writer.close();
        writer.blank();
        writer.line("var totalCount = await query.CountAsync(cancellationToken);");
        writer.line("var items = await query");
        writer.line("    .Skip((request.PageIndex - 1) * request.PageSize)");
        writer.line("    .Take(request.PageSize)");
        writer.line("    .ToListAsync(cancellationToken);");
        writer.blank();
        writer.open(&format!("return new {}", self.response_type(Operation::GetAll)));
        writer.line("Items = items.Select(item => item.ToDto()).ToList(),");
        writer.line("TotalCount = totalCount,");
        writer.line("PageIndex = request.PageIndex,");
        writer.line("PageSize = request.PageSize,");
        writer.close_with(";");
    }

    fn update_body(&self, writer: &mut CodeWriter) {
        let response = self.response_type(Operation::Update);
        self.lookup(writer, true);
        writer.blank();
        writer.open("if (entity is null)");
        writer.line(&format!("return new {response}();"));
        writer.close();
        writer.blank();
        for property in self.payload() {
            writer.line(&format!("entity.{0} = request.{0};", property.name));
        }
        for timestamp in self.timestamps().filter(|name| !name.starts_with("Created")) {
            writer.line(&format!("entity.{timestamp} = DateTime.UtcNow;"));
        }
        writer.line("await _context.SaveChangesAsync(cancellationToken);");
        writer.blank();
        writer.line(&format!(
            "return new {response} {{ {} = entity.ToDto() }};",
            self.entity.name()
        ));
    }

    fn delete_body(&self, writer: &mut CodeWriter) {
        let response = self.response_type(Operation::Delete);
        self.lookup(writer, true);
        writer.blank();
        writer.open("if (entity is null)");
        writer.line(&format!("return new {response} {{ Success = false }};"));
        writer.close();
        writer.blank();
        writer.line(&format!("_context.{}.Remove(entity);", self.entity.plural));
        writer.line("await _context.SaveChangesAsync(cancellationToken);");
        writer.blank();
        writer.line(&format!("return new {response} {{ Success = true }};"));
    }

    // ============================================================================
    // Validators
    // ============================================================================

    fn validator(&self, operation: Operation) -> GeneratedFile {
        let stem = operation.type_stem(self.entity);
        let mut writer = self.writer();
        writer.open(&format!(
            "public class {stem}Validator : AbstractValidator<{stem}Request>"
        ));
        writer.open(&format!("public {stem}Validator()"));
        if operation == Operation::Update {
            writer.line(&format!("RuleFor(x => x.{}).NotEmpty();", self.key().name));
        }
        for property in self
            .payload()
            .filter(|property| property.is_required && csharp::is_string(property))
        {
            writer.line(&format!("RuleFor(x => x.{}).NotEmpty();", property.name));
        }
        writer.close();
        writer.close();
        self.file(operation, "Validator", GeneratedFileKind::Validator, writer)
    }
}
