//! CLI logic for the Blueprint tool.
//!
//! This module dispatches the `validate`, `generate` and `translate`
//! subcommands to the [`blueprint`] library and writes their results.

pub mod emit;
pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, GenerateArgs, ReportFormat, TranslateArgs, ValidateArgs};

use std::{fs, path::Path};

use log::{info, warn};

use blueprint::{Blueprint, BlueprintError, FsSourceReader, ValidationReport};

/// Run the Blueprint CLI application
///
/// # Errors
///
/// Returns `BlueprintError` for:
/// - Configuration loading errors
/// - Missing or unreadable inputs
/// - Validation errors when `--strict` is set
/// - Failures writing outputs
pub fn run(args: &Args) -> Result<(), BlueprintError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let blueprint = Blueprint::new(app_config);

    match &args.command {
        Command::Validate(validate) => run_validate(&blueprint, validate),
        Command::Generate(generate) => run_generate(&blueprint, generate),
        Command::Translate(translate) => run_translate(&blueprint, translate),
    }
}

fn run_validate(blueprint: &Blueprint, args: &ValidateArgs) -> Result<(), BlueprintError> {
    info!(input_path = args.input.as_str(); "Validating diagrams");

    let report = blueprint.validate_path(&FsSourceReader, Path::new(&args.input));
    let rendered = render_report(&report, args.format)?;
    write_output(args.output.as_deref(), &rendered)?;

    let summary = report.summary();
    if args.strict && !summary.is_valid {
        return Err(BlueprintError::Validation {
            errors: summary.errors,
        });
    }
    Ok(())
}

fn render_report(
    report: &ValidationReport,
    format: ReportFormat,
) -> Result<String, BlueprintError> {
    match format {
        ReportFormat::Markdown => Ok(report.to_markdown()),
        ReportFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|err| BlueprintError::Emit(format!("cannot serialize report: {err}"))),
    }
}

fn run_generate(blueprint: &Blueprint, args: &GenerateArgs) -> Result<(), BlueprintError> {
    info!(
        input_path = args.input.as_str(),
        solution = args.name.as_str(),
        output_path = args.output.as_str();
        "Generating solution"
    );
    let input = Path::new(&args.input);

    if !args.skip_validation {
        let report = blueprint.validate_path(&FsSourceReader, input);
        let summary = report.summary();
        if !summary.is_valid {
            warn!(errors = summary.errors, warnings = summary.warnings; "Diagrams have validation errors, generating anyway");
            for issue in report.issues().filter(|issue| issue.severity().is_error()) {
                warn!(code = issue.code().as_str(), message = issue.message(); "Validation error");
            }
        }
    }

    let diagrams = blueprint.parse_path(&FsSourceReader, input)?;
    let solution = blueprint.generate(&diagrams, &args.name, Path::new(&args.output));
    let written = emit::write_solution(&solution)?;

    info!(
        solution_path:? = emit::solution_path(&solution),
        files = written;
        "Solution generated successfully"
    );
    Ok(())
}

fn run_translate(blueprint: &Blueprint, args: &TranslateArgs) -> Result<(), BlueprintError> {
    info!(input_path = args.input.as_str(), solution = args.name.as_str(); "Translating sequence diagram");

    let source = fs::read_to_string(&args.input)?;
    let architecture = blueprint.translate_sequence(&source, &args.name);
    write_output(args.output.as_deref(), &architecture)
}

/// Write `contents` to `path`, or to standard output when no path is given.
fn write_output(path: Option<&str>, contents: &str) -> Result<(), BlueprintError> {
    match path {
        Some(path) => {
            fs::write(path, contents)?;
            info!(output_file = path; "Output written");
        }
        None => print!("{contents}"),
    }
    Ok(())
}
