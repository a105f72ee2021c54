//! End-to-end tests for the `stylestamp compile` command.
//!
//! A plain compile never touches the metadata file or git, so none of these
//! tests need a repository.

mod common;
use common::prelude::*;

#[test]
fn test_compile_writes_plain_css() {
    let fixture = TestFixture::new().with_project(sources::VALID);

    fixture
        .command()
        .arg("compile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compiled"));

    let css = fixture.read("dist/main.css");
    assert!(!css.contains("==UserStyle=="));
    assert!(css.contains("background:#111"));
    assert!(css.contains("-webkit-user-select:none"));
    assert_eq!(fixture.read("package.json"), common::PACKAGE_JSON);
}

#[test]
fn test_compile_without_metadata_file() {
    let fixture = TestFixture::new().with_file("src/main.scss", "a { color: red; }");

    fixture.command().arg("compile").assert().success();

    fixture.child("dist/main.css").assert(predicate::path::exists());
    fixture.child("package.json").assert(predicate::path::missing());
}

#[test]
fn test_compile_no_compress_is_expanded() {
    let fixture = TestFixture::new().with_file("src/main.scss", "a { b { color: red; } }");

    fixture
        .command()
        .args(["compile", "--no-compress", "--no-prefix"])
        .assert()
        .success();

    let css = fixture.read("dist/main.css");
    assert!(css.contains("a b {\n  color: red;\n}"));
}

#[test]
fn test_compile_load_path() {
    let fixture = TestFixture::new()
        .with_file("src/main.scss", "@import 'palette';\na { color: $accent; }")
        .with_file("vendor/_palette.scss", "$accent: #ff0000;");

    fixture
        .command()
        .args(["compile", "--no-prefix", "--load-path", "vendor"])
        .assert()
        .success();

    assert!(fixture.read("dist/main.css").contains("color:"));
}

#[test]
fn test_compile_relative_import() {
    let fixture = TestFixture::new()
        .with_file("src/main.scss", "@import 'partials/base';")
        .with_file("src/partials/_base.scss", "p { margin: 0; }");

    fixture
        .command()
        .args(["compile", "--no-prefix"])
        .assert()
        .success();

    assert!(fixture.read("dist/main.css").contains("p{margin:0}"));
}

#[test]
fn test_compile_syntax_error() {
    let fixture = TestFixture::new().with_project(sources::SYNTAX_ERROR);

    let output = fixture
        .command()
        .arg("compile")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Compile failed"))
        .get_output()
        .clone();

    // The diagnostic is reported once, through the error chain
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Compilation error").count(), 1, "{}", stderr);
    fixture.child("dist/main.css").assert(predicate::path::missing());
}

#[test]
fn test_compile_missing_source() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("compile")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("src/main.scss"));
}

#[test]
fn test_compile_paths_from_environment() {
    let fixture = TestFixture::new().with_file("theme.scss", "a { color: red; }");

    fixture
        .command()
        .env("STYLESTAMP_INPUT", "theme.scss")
        .env("STYLESTAMP_OUTPUT", "out/theme.css")
        .args(["compile", "--no-prefix"])
        .assert()
        .success();

    assert!(fixture.read("out/theme.css").contains("a{color:red}"));
}

#[test]
fn test_compile_quiet() {
    let fixture = TestFixture::new().with_project(sources::VALID);

    fixture
        .command()
        .args(["compile", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
