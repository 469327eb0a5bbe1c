use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestProject;

fn show(project: &TestProject) -> Value {
    let output = project.cmd(&["config", "show"]).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_set_user_and_show() {
    let project = TestProject::new();

    project.cmd(&["config", "set-user", "lou"]).assert().success();

    assert!(project.read_config().contains("user = \"lou\""));
    let summary = show(&project);
    assert_eq!(summary["user"], "lou");
    assert_eq!(summary["site"], "github.com");
    assert_eq!(summary["path"], project.config_path().display().to_string());
    assert_eq!(summary["providers"], Value::Array(vec![]));
}

#[test]
fn test_show_without_user() {
    let project = TestProject::new();

    let summary = show(&project);

    assert_eq!(summary["user"], "");
    assert_eq!(summary["scaffold"]["write_tests"], false);
}

#[test]
fn test_config_defaults_to_show() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"user\": \"lou\""));
}

#[test]
fn test_init_writes_file() {
    let project = TestProject::new();

    project
        .cmd(&["config", "init", "--user", "lou", "--site", "gitlab.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"site\": \"gitlab.com\""));

    let saved = project.read_config();
    assert!(saved.contains("user = \"lou\""));
    assert!(saved.contains("site = \"gitlab.com\""));
}

#[test]
fn test_set_site_requires_full_for_custom() {
    let project = TestProject::new();

    project
        .cmd(&["config", "set-site", "git.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported site"));
    assert!(!project.config_path().exists());

    project.cmd(&["config", "set-site", "git.example.com", "--full"]).assert().success();
    assert!(project.read_config().contains("git.example.com"));
}

#[test]
fn test_configured_custom_site_used_without_full() {
    let project = TestProject::with_user("lou");
    project.cmd(&["config", "set-site", "git.example.com", "--full"]).assert().success();

    project
        .cmd(&["add", "tool", "--dry-run"])
        .assert()
        .success()
        .stdout("go get git.example.com/lou/tool\n");
}

#[test]
fn test_set_scaffold_tests() {
    let project = TestProject::new();

    project.cmd(&["config", "set-scaffold-tests", "true"]).assert().success();
    assert_eq!(show(&project)["scaffold"]["write_tests"], true);

    project
        .cmd(&["config", "set-scaffold-tests", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("enabled must be true or false"));
}

#[test]
fn test_provider_round_trip() {
    let project = TestProject::new();

    project
        .cmd(&["config", "provider", "add", "--name", "gitlab", "--path", "/tmp/gitlab.gitconfig"])
        .assert()
        .success();

    project
        .cmd(&["config", "provider", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlab\t/tmp/gitlab.gitconfig"));

    project.cmd(&["config", "provider", "remove", "--name", "gitlab"]).assert().success();

    project
        .cmd(&["config", "provider", "remove", "--name", "gitlab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("provider name not found"));
}

#[test]
fn test_config_path() {
    let project = TestProject::new();

    project
        .cmd(&["config", "path"])
        .assert()
        .success()
        .stdout(format!("{}\n", project.config_path().display()));
}

#[test]
fn test_invalid_config_file() {
    let project = TestProject::new();
    project.write_config("user = [not toml");

    project
        .cmd(&["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
