//! C# source rendering helpers.

use blueprint_core::{
    diagram::{PropertyField, Visibility},
    solution::{PackageReference, ProjectKind},
};

const INDENT: &str = "    ";

/// Line-oriented writer that tracks brace depth.
#[derive(Debug, Default)]
pub(super) struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// File-scoped namespace declaration followed by a blank line.
    pub(super) fn with_namespace(namespace: &str) -> Self {
        let mut writer = Self::new();
        writer.line(&format!("namespace {namespace};"));
        writer.blank();
        writer
    }

    pub(super) fn line(&mut self, text: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub(super) fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Write `header` and open a brace block.
    pub(super) fn open(&mut self, header: &str) -> &mut Self {
        self.line(header);
        self.line("{");
        self.depth += 1;
        self
    }

    pub(super) fn close(&mut self) -> &mut Self {
        self.close_with("")
    }

    /// Close a brace block, appending `suffix` (`;`, `,`) to the brace.
    pub(super) fn close_with(&mut self, suffix: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("}}{suffix}"))
    }

    /// Write a `/// <summary>` block, one line per text line.
    pub(super) fn summary(&mut self, text: &str) -> &mut Self {
        self.line("/// <summary>");
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            self.line(&format!("/// {}", escape_xml(line)));
        }
        self.line("/// </summary>")
    }

    pub(super) fn finish(self) -> String {
        self.out
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// C# keyword for a scalar type written with its framework name.
pub(super) fn scalar(name: &str) -> &str {
    match name {
        "" => "object",
        "String" => "string",
        "Int32" => "int",
        "Int64" => "long",
        "Int16" => "short",
        "Byte" => "byte",
        "Boolean" => "bool",
        "Decimal" => "decimal",
        "Double" => "double",
        "Single" => "float",
        "Char" => "char",
        "Object" => "object",
        other => other,
    }
}

/// C# type of a property, with `element` standing in for the element type.
pub(super) fn property_type_with(property: &PropertyField, element: &str) -> String {
    let mut declared = match property.collection_type.as_deref() {
        Some("Array") => format!("{element}[]"),
        Some(wrapper) => format!("{wrapper}<{element}>"),
        None => element.to_string(),
    };
    if property.is_nullable {
        declared.push('?');
    }
    declared
}

/// C# type of a property.
pub(super) fn property_type(property: &PropertyField) -> String {
    property_type_with(property, scalar(&property.type_name))
}

/// Collection initializer for a wrapped property, if the wrapper is known.
pub(super) fn collection_initializer(property: &PropertyField, element: &str) -> Option<String> {
    if !property.is_collection || property.is_nullable {
        return None;
    }
    match property.collection_type.as_deref() {
        Some("Array") => Some(format!("Array.Empty<{element}>()")),
        Some("HashSet" | "ISet") => Some(format!("new HashSet<{element}>()")),
        Some("Collection") => Some(format!("new Collection<{element}>()")),
        Some(_) => Some(format!("new List<{element}>()")),
        None => None,
    }
}

pub(super) fn is_string(property: &PropertyField) -> bool {
    property.collection_type.is_none() && scalar(&property.type_name) == "string"
}

pub(super) fn visibility(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public",
        Visibility::Private => "private",
        Visibility::Protected => "protected",
        Visibility::Package => "internal",
    }
}

/// Render an SDK-style project file.
pub(super) fn project_file(
    kind: ProjectKind,
    target_framework: &str,
    root_namespace: &str,
    packages: &[PackageReference],
    project_references: &[String],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("<Project Sdk=\"{}\">\n\n", kind.sdk()));
    out.push_str("  <PropertyGroup>\n");
    out.push_str(&format!(
        "    <TargetFramework>{target_framework}</TargetFramework>\n"
    ));
    out.push_str("    <ImplicitUsings>enable</ImplicitUsings>\n");
    out.push_str("    <Nullable>enable</Nullable>\n");
    out.push_str(&format!("    <RootNamespace>{root_namespace}</RootNamespace>\n"));
    out.push_str("  </PropertyGroup>\n");

    if !packages.is_empty() {
        out.push_str("\n  <ItemGroup>\n");
        for package in packages {
            out.push_str(&format!(
                "    <PackageReference Include=\"{}\" Version=\"{}\" />\n",
                package.name, package.version
            ));
        }
        out.push_str("  </ItemGroup>\n");
    }

    if !project_references.is_empty() {
        out.push_str("\n  <ItemGroup>\n");
        for reference in project_references {
            out.push_str(&format!(
                "    <ProjectReference Include=\"..\\{reference}\\{reference}.csproj\" />\n"
            ));
        }
        out.push_str("  </ItemGroup>\n");
    }

    out.push_str("\n</Project>\n");
    out
}

/// Render a `GlobalUsings.cs` file.
pub(super) fn global_usings<'a>(namespaces: impl IntoIterator<Item = &'a str>) -> String {
    namespaces
        .into_iter()
        .map(|namespace| format!("global using {namespace};\n"))
        .collect()
}
