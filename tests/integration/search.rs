use go_toolkit::index::IndexEntry;
use go_toolkit::test_utils::{IndexServer, index_body};
use predicates::prelude::*;
use std::process::Output;

use crate::common::TestProject;

fn entry(path: &str, version: &str, timestamp: &str) -> IndexEntry {
    IndexEntry::new(path, version, timestamp)
}

/// Run the binary off the runtime so the in-process index server keeps serving.
async fn run(project: &TestProject, server: &IndexServer, args: &[&str]) -> Output {
    let mut cmd = project.cmd(&["search"]);
    cmd.args(args).arg("--index-url").arg(server.url());
    tokio::task::spawn_blocking(move || cmd.output().unwrap()).await.unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_pages_and_filters() {
    let project = TestProject::new();
    let first = vec![
        entry("github.com/spf13/cobra", "v1.7.0", "2024-01-01T00:00:00Z"),
        entry("github.com/acme/other", "v0.1.0", "2024-01-01T00:00:01Z"),
    ];
    let second = vec![
        entry("github.com/acme/other", "v0.1.0", "2024-01-01T00:00:01Z"),
        entry("gitlab.com/x/cobra", "v0.2.0", "2024-01-01T00:00:02Z"),
    ];
    let server = IndexServer::start(vec![
        (200, index_body(&first)),
        (200, index_body(&second)),
        (200, String::new()),
    ])
    .await;

    let output = run(&project, &server, &["cobra", "--limit", "2"]).await;

    assert_eq!(stdout(&output), "filtering to github.com\ngithub.com/spf13/cobra\n");
    let requests = server.request_lines();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].starts_with("GET /index?limit=2 "));
    assert!(requests[1].starts_with("GET /index?since=2024-01-01T00%3A00%3A01Z&limit=2 "));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_json_with_dotted_query() {
    let project = TestProject::new();
    let entries = vec![
        entry("gitlab.com/x/cobra", "v0.2.0", "2024-01-01T00:00:02Z"),
        entry("github.com/spf13/cobra", "v1.7.0", "2024-01-01T00:00:03Z"),
    ];
    let server = IndexServer::start(vec![(200, index_body(&entries))]).await;

    let output = run(&project, &server, &["gitlab.com/x", "--json", "--limit", "0"]).await;

    let decoded: Vec<IndexEntry> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(decoded, vec![entries[0].clone()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_max_pages() {
    let project = TestProject::new();
    let server = IndexServer::start(vec![
        (200, index_body(&[entry("github.com/a/tool", "v1.0.0", "t1")])),
        (200, index_body(&[entry("github.com/b/tool", "v1.0.0", "t2")])),
    ])
    .await;

    let output = run(&project, &server, &["tool", "--limit", "1", "--max-pages", "1", "--details"]).await;

    assert_eq!(stdout(&output), "filtering to github.com\ngithub.com/a/tool\tv1.0.0\tt1\n");
    assert_eq!(server.request_lines().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_http_error() {
    let project = TestProject::new();
    let server = IndexServer::start(vec![(404, String::new())]).await;

    let output = run(&project, &server, &["tool"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HTTP 404"), "stderr: {stderr}");
}

#[test]
fn test_search_flag_validation() {
    let project = TestProject::new();

    project
        .cmd(&["search", "tool", "--since-days", "1", "--since-hours", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("since-days and since-hours cannot both be set"));

    project
        .cmd(&["search", "tool", "--since", "last week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("since must be RFC3339"));
}
