use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Copies the fixture project into a scratch directory
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    copy_dir(Path::new("tests/fixtures/project"), dir.path());
    dir
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}

/// Helper to create a Command for the dpt binary
// TODO: Migrate to cargo::cargo_bin_cmd! macro when available
// See: https://github.com/assert-rs/assert_cmd/issues/139
#[allow(deprecated)]
fn dpt(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dpt").expect("Failed to find dpt binary");
    cmd.current_dir(project)
        .env("NO_COLOR", "1")
        .env_remove("GOOGLE_CLOUD_SERVICE_ACCOUNT_KEY")
        .env_remove("GOOGLE_ACCOUNT");
    cmd
}

// ============================================================================
// build-readme tests
// ============================================================================

#[test]
fn test_build_readme() {
    let dir = project();

    dpt(dir.path())
        .arg("build-readme")
        .assert()
        .success()
        .stdout(predicate::str::contains("readme.html"));

    let html = fs::read_to_string(dir.path().join("build/readme.html")).unwrap();
    assert!(html.contains("<h1>Borehole survey</h1>"));
    assert!(html.contains("<h2>measurement</h2>"));
    assert!(html.contains("<td>Drilling date</td>"));
}

#[test]
fn test_build_readme_alias() {
    let dir = project();

    dpt(dir.path()).arg("build_readme").assert().success();

    assert!(dir.path().join("build/readme.html").exists());
}

#[test]
fn test_build_readme_with_project_flag() {
    let dir = project();
    let elsewhere = TempDir::new().unwrap();

    dpt(elsewhere.path())
        .arg("--project")
        .arg(dir.path())
        .arg("build-readme")
        .assert()
        .success();

    assert!(dir.path().join("build/readme.html").exists());
    assert!(!elsewhere.path().join("build").exists());
}

#[test]
fn test_build_readme_missing_template() {
    let dir = project();
    fs::remove_file(dir.path().join("templates/readme.html.jinja")).unwrap();

    dpt(dir.path())
        .arg("build-readme")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("readme.html.jinja"));
}

#[test]
fn test_missing_metadata_file() {
    let dir = TempDir::new().unwrap();

    dpt(dir.path())
        .arg("build-readme")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("Failed to load metadata file"));
}

#[test]
fn test_invalid_metadata_file() {
    let dir = project();
    fs::write(dir.path().join("datapackage.yaml"), "resources: [unclosed").unwrap();

    dpt(dir.path())
        .arg("build-readme")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load metadata file"));
}

// ============================================================================
// build-excel-template tests
// ============================================================================

#[test]
fn test_build_excel_template() {
    let dir = project();

    dpt(dir.path())
        .arg("build-excel-template")
        .assert()
        .success()
        .stdout(predicate::str::contains("template.xlsx"));

    let bytes = fs::read(dir.path().join("build/template.xlsx")).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_build_excel_template_alias() {
    let dir = project();

    dpt(dir.path()).arg("build_excel_template").assert().success();

    assert!(dir.path().join("build/template.xlsx").exists());
}

#[test]
fn test_build_excel_template_missing_header_template() {
    let dir = project();
    fs::remove_file(dir.path().join("templates/header-comment.jinja")).unwrap();

    dpt(dir.path())
        .arg("build-excel-template")
        .assert()
        .failure()
        .stderr(predicate::str::contains("header-comment.jinja"));

    assert!(!dir.path().join("build/template.xlsx").exists());
}

// ============================================================================
// build-gsheets-template tests
// ============================================================================

#[test]
fn test_build_gsheets_template_missing_key() {
    let dir = project();

    dpt(dir.path())
        .arg("build-gsheets-template")
        .arg("Borehole template")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing GOOGLE_CLOUD_SERVICE_ACCOUNT_KEY",
        ));
}

#[test]
fn test_build_gsheets_template_alias_missing_key() {
    let dir = project();

    dpt(dir.path())
        .arg("build_gsheets_template")
        .arg("Borehole template")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing GOOGLE_CLOUD_SERVICE_ACCOUNT_KEY",
        ));
}

#[test]
fn test_build_gsheets_template_reads_project_env_file() {
    let dir = project();
    let elsewhere = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "GOOGLE_CLOUD_SERVICE_ACCOUNT_KEY=not-a-json-key\n",
    )
    .unwrap();

    dpt(elsewhere.path())
        .arg("--project")
        .arg(dir.path())
        .arg("build-gsheets-template")
        .arg("Borehole template")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid service account key"))
        .stderr(predicate::str::contains("Missing").not());
}

#[test]
fn test_build_gsheets_template_requires_name() {
    let dir = project();

    dpt(dir.path())
        .arg("build-gsheets-template")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<NAME>"));
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_reports_failures_without_failing() {
    let dir = project();

    dpt(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("VALIDATION REPORT"))
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("is_on_or_after_borehole_date"))
        .stdout(predicate::str::contains("Not on or after borehole date"))
        .stdout(predicate::str::contains("2019-12-31"));
}

#[test]
fn test_validate_prints_summary_before_details() {
    let dir = project();

    let output = dpt(dir.path()).arg("validate").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let summary = stdout.find("Summary:").unwrap();
    let details = stdout.find("Details:").unwrap();
    assert!(summary < details);
}

#[test]
fn test_validate_passes_on_clean_data() {
    let dir = project();
    fs::write(
        dir.path().join("data/measurement.csv"),
        "borehole_id,date,depth\n1,2020-01-10,1.5\n2,2020-04-01,12.25\n",
    )
    .unwrap();

    dpt(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("Checks failed:  0"))
        .stdout(predicate::str::contains("Details:").not());
}

#[test]
fn test_validate_with_validator_alias() {
    let dir = project();

    dpt(dir.path())
        .arg("validate_with_validator")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not on or after borehole date"));
}

#[test]
fn test_validate_json_output() {
    let dir = project();

    let output = dpt(dir.path())
        .arg("validate")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let outcomes = report["outcomes"].as_array().unwrap();
    let failed: Vec<&serde_json::Value> = outcomes
        .iter()
        .filter(|o| o["status"] == "failed")
        .collect();

    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0]["check"], "is_on_or_after_borehole_date");
    assert_eq!(failed[0]["failures"][0]["row"], 1);
    assert_eq!(report["stats"]["tables_loaded"], 2);
}

#[test]
fn test_validate_missing_checks_file() {
    let dir = project();
    fs::remove_file(dir.path().join("checks.yaml")).unwrap();

    dpt(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load checks file"));
}

#[test]
fn test_validate_missing_table_is_reported() {
    let dir = project();
    fs::remove_file(dir.path().join("data/measurement.csv")).unwrap();

    dpt(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("measurement"));
}

// ============================================================================
// Help and version tests
// ============================================================================

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();

    dpt(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build-readme"))
        .stdout(predicate::str::contains("build-excel-template"))
        .stdout(predicate::str::contains("build-gsheets-template"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();

    dpt(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dpt"));
}

#[test]
fn test_unknown_command() {
    let dir = TempDir::new().unwrap();

    dpt(dir.path()).arg("frobnicate").assert().failure();
}
