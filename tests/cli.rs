//! CLI integration tests covering the fatal user-facing paths

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn pagepack() -> Command {
    Command::cargo_bin("pagepack").unwrap()
}

fn write_template(root: &Path) {
    let template = root.join("common/template");
    fs::create_dir_all(template.join("js")).unwrap();
    fs::create_dir_all(template.join("views")).unwrap();
    fs::write(template.join("js/index.js"), "console.log('hi');\n").unwrap();
    fs::write(template.join("views/index.html"), "<html></html>\n").unwrap();
}

#[test]
fn create_requires_a_name() {
    pagepack()
        .arg("create")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME"));
}

#[test]
fn create_scaffolds_the_template() {
    let dir = tempfile::tempdir().unwrap();
    write_template(dir.path());

    pagepack()
        .args(["create", "fresh", "--root"])
        .arg(dir.path())
        .write_stdin("n\n")
        .assert()
        .success();

    let target = dir.path().join("src/fresh");
    assert_eq!(
        fs::read_to_string(target.join("js/index.js")).unwrap(),
        "console.log('hi');\n"
    );
    assert_eq!(
        fs::read_to_string(target.join("views/index.html")).unwrap(),
        "<html></html>\n"
    );
}

#[test]
fn create_refuses_duplicate_project() {
    let dir = tempfile::tempdir().unwrap();
    write_template(dir.path());
    let target = dir.path().join("src/taken");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("keep.txt"), "original").unwrap();

    // No stdin provided: the command must fail before any prompt is read.
    pagepack()
        .args(["create", "taken", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(target.join("keep.txt")).unwrap(),
        "original"
    );
    assert!(!target.join("js").exists());
}

#[test]
fn dev_rejects_missing_project() {
    let dir = tempfile::tempdir().unwrap();

    pagepack()
        .args(["dev", "ghost", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn build_rejects_missing_project() {
    let dir = tempfile::tempdir().unwrap();

    pagepack()
        .args(["build", "ghost", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn build_fails_fast_on_missing_template() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("src/app");
    fs::create_dir_all(base.join("js")).unwrap();
    fs::create_dir_all(base.join("views")).unwrap();
    fs::write(base.join("js/home.js"), "").unwrap();

    pagepack()
        .args(["build", "app", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no HTML template"));

    // Resolution aborts before any output is produced.
    assert!(!dir.path().join(".pagepack").exists());
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn build_fails_fast_on_unrecognized_script() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("src/app");
    fs::create_dir_all(base.join("js")).unwrap();
    fs::create_dir_all(base.join("views")).unwrap();
    fs::write(base.join("js/notes.txt"), "").unwrap();

    pagepack()
        .args(["build", "app", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized file"));

    assert!(!dir.path().join(".pagepack").exists());
}
