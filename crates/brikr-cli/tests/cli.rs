//! End-to-end tests that drive the compiled `brikr` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn brikr() -> Command {
    Command::cargo_bin("brikr").expect("binary builds")
}

// ── argument surface ──────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    brikr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("boot"))
        .stdout(predicate::str::contains("root"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_matches_cargo() {
    brikr()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn boot_without_files_is_usage_error() {
    brikr().arg("boot").assert().failure().code(2);
}

#[test]
fn boot_rejects_malformed_data() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("templates")).unwrap();
    fs::write(tmp.path().join("templates/readme.md"), "# x\n").unwrap();

    brikr()
        .current_dir(tmp.path())
        .args(["boot", "templates/**/*", "--data", "not json"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--data"));
}

// ── boot ──────────────────────────────────────────────────────────────────────

#[test]
fn boot_compiles_a_template() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("templates")).unwrap();
    fs::write(tmp.path().join("templates/readme.md"), "# {{name}}\n").unwrap();

    brikr()
        .current_dir(tmp.path())
        .args(["boot", "templates/**/*", "--data", r#"{"name": "Demo"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compiled 1 file(s)"));

    let compiled = fs::read_to_string(tmp.path().join("readme.md")).unwrap();
    assert_eq!(compiled, "# Demo\n");
}

#[test]
fn boot_skips_existing_output_by_default() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("templates")).unwrap();
    fs::write(tmp.path().join("templates/readme.md"), "# {{name}}\n").unwrap();
    fs::write(tmp.path().join("readme.md"), "original\n").unwrap();

    brikr()
        .current_dir(tmp.path())
        .args(["boot", "templates/**/*", "--data", r#"{"name": "Demo"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("already existed"));

    // Existing output untouched without --overwrite.
    let kept = fs::read_to_string(tmp.path().join("readme.md")).unwrap();
    assert_eq!(kept, "original\n");
}

#[test]
fn boot_overwrite_replaces_existing_output() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("templates")).unwrap();
    fs::write(tmp.path().join("templates/readme.md"), "# {{name}}\n").unwrap();
    fs::write(tmp.path().join("readme.md"), "original\n").unwrap();

    brikr()
        .current_dir(tmp.path())
        .args([
            "boot",
            "templates/**/*",
            "--data",
            r#"{"name": "Demo"}"#,
            "--overwrite",
        ])
        .assert()
        .success();

    let compiled = fs::read_to_string(tmp.path().join("readme.md")).unwrap();
    assert_eq!(compiled, "# Demo\n");
}

#[test]
fn boot_writes_into_output_directory() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("templates")).unwrap();
    fs::write(tmp.path().join("templates/notes.md"), "hello\n").unwrap();

    brikr()
        .current_dir(tmp.path())
        .args(["boot", "templates/**/*", "--output", "dist"])
        .assert()
        .success();

    let compiled = fs::read_to_string(tmp.path().join("dist/notes.md")).unwrap();
    assert_eq!(compiled, "hello\n");
}

// ── root ──────────────────────────────────────────────────────────────────────

#[test]
fn root_resolves_a_glob_to_its_directory() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("templates")).unwrap();

    brikr()
        .current_dir(tmp.path())
        .args(["root", "templates/**/*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn root_missing_path_exits_not_found() {
    brikr()
        .args(["root", "/brikr-test-does-not-exist/anywhere/**"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No root directory found"));
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_reports_when_nothing_is_found() {
    let tmp = TempDir::new().unwrap();

    brikr()
        .current_dir(tmp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration file found"));
}

#[test]
fn config_prints_discovered_cascade() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".brikrrc.json"),
        r#"{"_brikr": {"boot": {"overwrite": true}}}"#,
    )
    .unwrap();

    brikr()
        .current_dir(tmp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(".brikrrc.json"))
        .stdout(predicate::str::contains("overwrite"));
}
