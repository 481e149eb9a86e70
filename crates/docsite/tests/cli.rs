//! End-to-end CLI tests. External build tools are replaced by stub
//! commands, so no MkDocs or Leiningen install is required.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docsite() -> Command {
    Command::cargo_bin("docsite").unwrap()
}

/// Lay out a minimal project in a scratch directory.
fn scaffold() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "new").unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs").join("index.md"), "old").unwrap();
    dir
}

#[test]
fn help_lists_subcommands() {
    docsite()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("pages")
                .and(predicate::str::contains("api"))
                .and(predicate::str::contains("site")),
        );
}

#[test]
fn pages_fails_without_readme() {
    let dir = TempDir::new().unwrap();

    docsite()
        .args(["--root", dir.path().to_str().unwrap(), "pages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("README.md"));
}

#[cfg(unix)]
#[test]
fn pages_restores_index_and_echoes_command() {
    let dir = scaffold();

    docsite()
        .args(["--root", dir.path().to_str().unwrap()])
        .args(["--site-cmd", "true", "pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ true"));

    let index = fs::read_to_string(dir.path().join("docs").join("index.md")).unwrap();
    assert_eq!(index, "old");
    assert!(!dir.path().join("index.md_original").exists());
}

#[cfg(unix)]
#[test]
fn quiet_suppresses_echo() {
    let dir = scaffold();

    docsite()
        .args(["--root", dir.path().to_str().unwrap()])
        .args(["--site-cmd", "true", "--quiet", "pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ true").not());
}

#[cfg(unix)]
#[test]
fn site_runs_pages_with_clean_then_api() {
    let dir = scaffold();

    docsite()
        .args(["--root", dir.path().to_str().unwrap()])
        .args(["--site-cmd", "true", "--api-cmd", "true", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ true --clean"));
}

#[cfg(unix)]
#[test]
fn failing_site_command_exits_nonzero_and_restores_index() {
    let dir = scaffold();

    docsite()
        .args(["--root", dir.path().to_str().unwrap()])
        .args(["--site-cmd", "false", "pages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed with"));

    let index = fs::read_to_string(dir.path().join("docs").join("index.md")).unwrap();
    assert_eq!(index, "old");
    assert!(!dir.path().join("index.md_original").exists());
}

#[test]
fn stale_backup_is_reported() {
    let dir = scaffold();
    fs::write(dir.path().join("index.md_original"), "unrelated").unwrap();

    docsite()
        .args(["--root", dir.path().to_str().unwrap()])
        .args(["--site-cmd", "true", "pages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("backup path already exists"));
}

#[test]
fn invalid_command_string_is_rejected() {
    let dir = scaffold();

    docsite()
        .args(["--root", dir.path().to_str().unwrap()])
        .args(["--site-cmd", "mkdocs 'build", "pages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --site-cmd"));
}
