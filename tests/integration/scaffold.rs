use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_scaffold_package() {
    let project = TestProject::new();

    project
        .cmd(&["scaffold", "internal/parser", "--readme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parser.go"));

    let package = project.work().join("internal").join("parser");
    assert_eq!(std::fs::read_to_string(package.join("parser.go")).unwrap(), "package parser\n");
    assert!(package.join("README.md").exists());
    assert!(!package.join("parser_test.go").exists());
}

#[test]
fn test_scaffold_writes_tests_when_configured() {
    let project = TestProject::new();
    project.write_config("[scaffold]\nwrite_tests = true\n");

    project.cmd(&["scaffold", "lexer"]).assert().success();

    let test_file = project.work().join("lexer").join("lexer_test.go");
    let content = std::fs::read_to_string(test_file).unwrap();
    assert!(content.contains("func TestLexer(t *testing.T)"));
}

#[test]
fn test_scaffold_keeps_existing_files() {
    let project = TestProject::new();
    let package = project.work().join("lexer");
    std::fs::create_dir_all(&package).unwrap();
    std::fs::write(package.join("lexer.go"), "package lexer\n\nvar keep = true\n").unwrap();

    project.cmd(&["scaffold", "lexer"]).assert().success();

    let content = std::fs::read_to_string(package.join("lexer.go")).unwrap();
    assert!(content.contains("var keep = true"));
}
