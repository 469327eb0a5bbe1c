use go_toolkit::test_utils::write_gitconfig;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_add_dry_run_expands_short_names() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["add", "cobra", "spf13/viper", "golang.org/x/text@v0.14.0", "--dry-run"])
        .assert()
        .success()
        .stdout("go get github.com/lou/cobra github.com/spf13/viper golang.org/x/text@v0.14.0\n");
}

#[test]
fn test_add_user_flag_overrides_config() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["add", "cobra", "--user", "spf13", "--dry-run"])
        .assert()
        .success()
        .stdout("go get github.com/spf13/cobra\n");
}

#[test]
fn test_add_dedupes() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["add", "cobra", "lou/cobra", "github.com/lou/cobra", "--dry-run"])
        .assert()
        .success()
        .stdout("go get github.com/lou/cobra\n");
}

#[test]
fn test_add_rejects_none() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["add", "cobra@none", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("do not use @none with add; use remove instead"));
}

#[test]
fn test_remove_dry_run() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["remove", "cobra@v1.8.0", "spf13/viper", "--dry-run"])
        .assert()
        .success()
        .stdout("go get github.com/lou/cobra@none github.com/spf13/viper@none\n");
}

#[test]
fn test_remove_rejects_none() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["remove", "cobra@none", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("@none is added automatically; omit it from remove"));
}

#[test]
fn test_missing_user_for_short_name() {
    let project = TestProject::new();

    project
        .cmd(&["add", "cobra", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing user"))
        .stderr(predicate::str::contains("config set-user"));
}

#[test]
fn test_two_segments_need_no_user() {
    let project = TestProject::new();

    project
        .cmd(&["add", "spf13/cobra", "--dry-run"])
        .assert()
        .success()
        .stdout("go get github.com/spf13/cobra\n");
}

#[test]
fn test_user_from_home_gitconfig() {
    let project = TestProject::new();
    write_gitconfig(project.home(), "octocat");

    project
        .cmd(&["add", "hello", "--dry-run"])
        .assert()
        .success()
        .stdout("go get github.com/octocat/hello\n");
}

#[test]
fn test_home_gitconfig_ignored_for_other_sites() {
    let project = TestProject::new();
    write_gitconfig(project.home(), "octocat");

    project
        .cmd(&["add", "hello", "--site", "gitlab.com", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing user"));
}

#[test]
fn test_provider_credentials() {
    let project = TestProject::new();
    let credentials = write_gitconfig(project.work(), "group-user");
    project.write_config(&format!(
        "[[providers]]\nname = \"gitlab\"\npath = \"{}\"\n",
        credentials.display().to_string().replace('\\', "/")
    ));

    project
        .cmd(&["add", "tool", "--site", "gitlab.com", "--dry-run"])
        .assert()
        .success()
        .stdout("go get gitlab.com/group-user/tool\n");
}

#[test]
fn test_unknown_site_needs_full() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["add", "acme/tool", "--site", "git.example.com", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported site git.example.com"))
        .stderr(predicate::str::contains("github.com, gitlab.com, bitbucket.org"));

    project
        .cmd(&["add", "acme/tool", "--site", "git.example.com", "--full", "--dry-run"])
        .assert()
        .success()
        .stdout("go get git.example.com/acme/tool\n");
}

#[test]
fn test_malformed_site() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["add", "acme/tool", "--site", "localhost", "--full", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("site must be in the form sitename.domain"));
}

#[test]
fn test_empty_segment_rejected() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["add", "acme//tool", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("module path must not contain empty segments"));
}

#[test]
fn test_init_validates_site_before_running_go() {
    let project = TestProject::with_user("lou");

    project
        .cmd(&["init", "tool", "--site", "git.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported site"));

    assert!(!project.work().join("main.go").exists());
}
