/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE_LOCKFILE: &str = "tests/fixtures/sample-solution/project.assets.json";

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("nuget-depgraph")
            .arg(SAMPLE_LOCKFILE)
            .arg("Contoso")
            .arg("--output-dir")
            .arg(out.path())
            .args(["--no-render", "--no-prompt"])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("nuget-depgraph")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--matrix-format"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("nuget-depgraph").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("nuget-depgraph")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid matrix format value
    #[test]
    fn test_exit_code_invalid_matrix_format() {
        cargo_bin_cmd!("nuget-depgraph")
            .args([SAMPLE_LOCKFILE, "--matrix-format", "xlsx"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid duplicate policy value
    #[test]
    fn test_exit_code_invalid_duplicate_policy() {
        cargo_bin_cmd!("nuget-depgraph")
            .args([SAMPLE_LOCKFILE, "--duplicates", "newest"])
            .assert()
            .code(2);
    }

    /// Exit code 1: Application error - lock file does not exist
    #[test]
    fn test_exit_code_application_error_missing_lockfile() {
        cargo_bin_cmd!("nuget-depgraph")
            .args(["/nonexistent/project.assets.json", "--no-prompt", "--no-render"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Lock file not found"));
    }

    /// Exit code 1: Application error - unknown layout engine
    #[test]
    fn test_exit_code_application_error_unknown_layout() {
        cargo_bin_cmd!("nuget-depgraph")
            .args([SAMPLE_LOCKFILE, "--layout", "spiral", "--no-prompt"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Unknown layout engine"));
    }
}

#[test]
fn test_e2e_writes_matrix_and_diagrams() {
    let out = TempDir::new().unwrap();

    cargo_bin_cmd!("nuget-depgraph")
        .arg(SAMPLE_LOCKFILE)
        .arg("Contoso")
        .arg("-o")
        .arg(out.path())
        .args(["--no-render", "--no-prompt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dependency report: original graph (Contoso.* packages)",
        ))
        .stdout(predicate::str::contains(
            "Contoso.Web.Api -> Contoso.Data.Sql 1.1.0 (reachable through Contoso.Web.Core)",
        ))
        .stderr(predicate::str::contains("Removed 3 redundant direct dependencies"));

    let matrix = fs::read_to_string(out.path().join("dependencies-matrix.csv")).unwrap();
    assert!(matrix.starts_with(
        "Package,Contoso.Web.Api,Contoso.Web.Core,Contoso.Data.Sql,Contoso.Logging\n"
    ));

    let original = fs::read_to_string(out.path().join("dependencies-original.dot")).unwrap();
    let reduced = fs::read_to_string(out.path().join("dependencies-reduced.dot")).unwrap();
    assert!(original.starts_with("// nuget-depgraph"));
    assert_eq!(original.matches(" -> ").count(), 6);
    assert_eq!(reduced.matches(" -> ").count(), 3);
    assert!(!out.path().join("dependencies-original.png").exists());
}

#[test]
fn test_e2e_markdown_matrix_and_layout() {
    let out = TempDir::new().unwrap();

    cargo_bin_cmd!("nuget-depgraph")
        .arg(SAMPLE_LOCKFILE)
        .arg("contoso.web")
        .arg("--output-dir")
        .arg(out.path())
        .args(["--matrix-format", "markdown", "--layout", "circo"])
        .args(["--no-render", "--no-prompt"])
        .assert()
        .success();

    let matrix = fs::read_to_string(out.path().join("dependencies-matrix.md")).unwrap();
    assert!(matrix.starts_with("| Package | Contoso.Web.Api | Contoso.Web.Core |"));

    let original = fs::read_to_string(out.path().join("dependencies-original.dot")).unwrap();
    assert!(original.contains("layout=\"circo\";"));
}

#[test]
fn test_e2e_without_prefix_keeps_every_package() {
    let out = TempDir::new().unwrap();

    cargo_bin_cmd!("nuget-depgraph")
        .arg(SAMPLE_LOCKFILE)
        .arg("--output-dir")
        .arg(out.path())
        .args(["--no-render", "--no-prompt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dependency report: original graph (all packages)",
        ))
        .stdout(predicate::str::contains("Packages:            7"));
}

#[test]
fn test_e2e_default_lockfile_in_working_directory() {
    let work = TempDir::new().unwrap();
    fs::copy(SAMPLE_LOCKFILE, work.path().join("project.assets.json")).unwrap();

    cargo_bin_cmd!("nuget-depgraph")
        .current_dir(work.path())
        .args(["--no-render", "--no-prompt"])
        .assert()
        .success();

    assert!(work.path().join("dependencies-reduced.dot").is_file());
}

#[test]
fn test_e2e_no_lockfile_without_prompt() {
    let work = TempDir::new().unwrap();

    cargo_bin_cmd!("nuget-depgraph")
        .current_dir(work.path())
        .arg("--no-prompt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dotnet restore"));
}

#[test]
fn test_e2e_unknown_target_framework() {
    let out = TempDir::new().unwrap();

    cargo_bin_cmd!("nuget-depgraph")
        .arg(SAMPLE_LOCKFILE)
        .arg("--output-dir")
        .arg(out.path())
        .args(["--target", "net48", "--no-render", "--no-prompt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Available target frameworks: net8.0"));
}

#[test]
fn test_e2e_invalid_lockfile() {
    let work = TempDir::new().unwrap();
    let lockfile = work.path().join("project.assets.json");
    fs::write(&lockfile, "{ not json").unwrap();

    cargo_bin_cmd!("nuget-depgraph")
        .arg(&lockfile)
        .arg("--output-dir")
        .arg(work.path())
        .args(["--no-render", "--no-prompt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse lock file"));
}

#[test]
fn test_e2e_missing_output_directory() {
    let work = TempDir::new().unwrap();

    cargo_bin_cmd!("nuget-depgraph")
        .arg(SAMPLE_LOCKFILE)
        .arg("--output-dir")
        .arg(work.path().join("missing"))
        .args(["--no-render", "--no-prompt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Output directory does not exist"));
}
