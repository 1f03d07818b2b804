use std::{fs, path::PathBuf};

use tempfile::tempdir;

use blueprint::BlueprintError;
use blueprint_cli::{Args, Command, GenerateArgs, ReportFormat, TranslateArgs, ValidateArgs, run};

/// Demo diagrams live at the workspace root.
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(command: Command) -> Args {
    Args {
        command,
        config: None,
        log_level: "off".to_string(),
    }
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn e2e_validate_demo_solution_strict() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let report_path = temp_dir.path().join("report.json");

    let result = run(&args(Command::Validate(ValidateArgs {
        input: path_string(demos_path().join("shop")),
        output: Some(path_string(report_path.clone())),
        format: ReportFormat::Json,
        strict: true,
    })));
    assert!(result.is_ok(), "demo solution should validate: {result:?}");

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(report["documents"].as_array().unwrap().len(), 3);
}

#[test]
fn e2e_validate_strict_fails_on_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.puml");
    fs::write(&input, "title Broken\nclass Order <<Aggregate>> {\n  Total : decimal\n").unwrap();
    let report_path = temp_dir.path().join("report.md");

    let err = run(&args(Command::Validate(ValidateArgs {
        input: path_string(input),
        output: Some(path_string(report_path.clone())),
        format: ReportFormat::Markdown,
        strict: true,
    })))
    .unwrap_err();

    assert!(matches!(err, BlueprintError::Validation { errors } if errors >= 3));
    let markdown = fs::read_to_string(report_path).unwrap();
    assert!(markdown.starts_with("# Validation Report"));
    assert!(markdown.contains("`KEY001`"));
}

#[test]
fn e2e_generate_demo_solution() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    run(&args(Command::Generate(GenerateArgs {
        input: path_string(demos_path().join("shop")),
        name: "Shop".to_string(),
        output: path_string(temp_dir.path().to_path_buf()),
        skip_validation: false,
    })))
    .expect("generation succeeds");

    let root = temp_dir.path().join("Shop");
    let solution = fs::read_to_string(root.join("Shop.sln")).unwrap();
    for project in [
        "Shop.Sales.Core",
        "Shop.Sales.Infrastructure",
        "Shop.Sales.Api",
        "Shop.Inventory.Core",
        "Shop.Inventory.Infrastructure",
        "Shop.Inventory.Api",
    ] {
        assert!(solution.contains(&format!("\"{project}\"")), "missing {project}");
        assert!(root.join("src").join(project).join(format!("{project}.csproj")).is_file());
    }

    let controller = fs::read_to_string(
        root.join("src/Shop.Inventory.Api/Controllers/ItemController.cs"),
    )
    .unwrap();
    assert!(controller.contains("[Route(\"api/inventory/items\")]"));
    assert!(controller.contains("[Authorize]"));

    let order =
        fs::read_to_string(root.join("src/Shop.Sales.Core/Aggregates/Order/Order.cs")).unwrap();
    assert!(order.contains("public void Submit()"));
}

#[test]
fn e2e_translate_then_generate() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let architecture = temp_dir.path().join("architecture.puml");

    run(&args(Command::Translate(TranslateArgs {
        input: path_string(demos_path().join("sequences/checkout.puml")),
        name: "Checkout".to_string(),
        output: Some(path_string(architecture.clone())),
    })))
    .expect("translation succeeds");

    let text = fs::read_to_string(&architecture).unwrap();
    assert!(text.starts_with("@startuml\ntitle Checkout Architecture\n"));
    assert!(text.contains("class ShoppingCart <<Aggregate>>"));
    assert!(text.contains("+AddItem()"));

    run(&args(Command::Generate(GenerateArgs {
        input: path_string(architecture),
        name: "Checkout".to_string(),
        output: path_string(temp_dir.path().join("out")),
        skip_validation: true,
    })))
    .expect("generation succeeds");

    let api = temp_dir.path().join("out/Checkout/src/Checkout.Api/Controllers");
    assert_eq!(fs::read_dir(api).unwrap().count(), 3);
}

#[test]
fn e2e_missing_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let err = run(&args(Command::Generate(GenerateArgs {
        input: path_string(temp_dir.path().join("nothing-here")),
        name: "Shop".to_string(),
        output: path_string(temp_dir.path().to_path_buf()),
        skip_validation: true,
    })))
    .unwrap_err();

    assert!(matches!(err, BlueprintError::Parse(_)));
}
