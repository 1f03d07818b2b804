//! Command-line argument definitions for the Blueprint CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global arguments select the configuration file and
//! logging verbosity; each subcommand carries its own paths.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for the Blueprint tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a diagram file or directory
    Validate(ValidateArgs),

    /// Generate a layered solution from diagrams
    Generate(GenerateArgs),

    /// Translate a sequence diagram into an architecture diagram
    Translate(TranslateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Diagram file or directory
    pub input: String,

    /// Write the report to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    pub format: ReportFormat,

    /// Exit with an error when the report contains errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Diagram file or directory
    pub input: String,

    /// Solution name, used as the project name prefix
    #[arg(short, long)]
    pub name: String,

    /// Directory the solution folder is created in
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Generate even when validation reports errors, without logging them
    #[arg(long)]
    pub skip_validation: bool,
}

#[derive(clap::Args, Debug)]
pub struct TranslateArgs {
    /// Sequence diagram file
    pub input: String,

    /// Solution name used in package names
    #[arg(short, long)]
    pub name: String,

    /// Write the architecture diagram to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Markdown,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_arguments() {
        let args = Args::try_parse_from([
            "blueprint",
            "--log-level",
            "debug",
            "validate",
            "docs",
            "--format",
            "json",
            "--strict",
        ])
        .unwrap();

        assert_eq!(args.log_level, "debug");
        match args.command {
            Command::Validate(validate) => {
                assert_eq!(validate.input, "docs");
                assert_eq!(validate.format, ReportFormat::Json);
                assert!(validate.strict);
                assert!(validate.output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_generate_requires_name() {
        assert!(Args::try_parse_from(["blueprint", "generate", "docs"]).is_err());

        let args = Args::try_parse_from([
            "blueprint",
            "generate",
            "docs",
            "--name",
            "Shop",
            "-c",
            "bp.toml",
        ])
        .unwrap();
        assert_eq!(args.config.as_deref(), Some("bp.toml"));
        match args.command {
            Command::Generate(generate) => {
                assert_eq!(generate.name, "Shop");
                assert_eq!(generate.output, ".");
                assert!(!generate.skip_validation);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
