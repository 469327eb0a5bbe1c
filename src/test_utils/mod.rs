//! Test utilities for go-toolkit
//!
//! Fakes for the two side-effecting seams of the crate, plus a small local
//! index server for exercising the HTTP fetcher end to end:
//!
//! - [`RecordingRunner`] records `go`/`git` invocations instead of running them
//! - [`ScriptedFetcher`] replays canned index pages
//! - [`IndexServer`] serves canned HTTP responses on `127.0.0.1`
//!
//! # Example
//!
//! ```rust,no_run
//! use go_toolkit::runner::CommandRunner;
//! use go_toolkit::test_utils::RecordingRunner;
//!
//! # async fn example() {
//! let runner = RecordingRunner::default();
//! runner.run("go", &["mod".to_string(), "tidy".to_string()]).await.unwrap();
//! assert_eq!(runner.command_lines(), vec!["go mod tidy"]);
//! # }
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::ToolkitError;
use crate::index::{FetchError, FetchRequest, IndexEntry, IndexFetcher};
use crate::runner::{CommandRunner, render_command};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. With `level` set, that level is used;
/// otherwise `RUST_LOG` is honored, and without it logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// [`CommandRunner`] that records invocations instead of spawning processes.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    /// Runner whose invocations of `program` fail with exit code 1.
    #[must_use]
    pub fn failing_on(program: &str) -> Self {
        Self {
            calls: Mutex::default(),
            fail_on: Some(program.to_string()),
        }
    }

    /// Recorded `(program, args)` pairs, in call order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded invocations rendered as command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|(program, args)| render_command(program, args)).collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<(), ToolkitError> {
        self.calls.lock().unwrap().push((program.to_string(), args.to_vec()));

        if self.fail_on.as_deref() == Some(program) {
            return Err(ToolkitError::CommandFailed {
                command: render_command(program, args),
                code: Some(1),
            });
        }
        Ok(())
    }
}

/// [`IndexFetcher`] that replays a fixed script of pages.
///
/// Each fetch pops the next scripted result; once the script runs out every
/// fetch returns an empty page. A cancelled token short-circuits to
/// [`FetchError::Cancelled`] before the script is consulted.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    pages: Mutex<VecDeque<Result<Vec<IndexEntry>, FetchError>>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedFetcher {
    pub fn new(pages: Vec<Result<Vec<IndexEntry>, FetchError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            requests: Mutex::default(),
        }
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl IndexFetcher for ScriptedFetcher {
    async fn fetch(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<IndexEntry>, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        self.requests.lock().unwrap().push(request.clone());
        self.pages.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Minimal HTTP server answering each request with the next canned response.
///
/// Responses are `(status, body)` pairs served in order; once exhausted the
/// server answers `200` with an empty body. The server stops when dropped.
pub struct IndexServer {
    url: String,
    request_lines: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl IndexServer {
    /// Bind to an ephemeral port on `127.0.0.1` and start serving.
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let request_lines = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::new(Mutex::new(VecDeque::from(responses)));

        let seen = Arc::clone(&request_lines);
        let handle = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buffer = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            buffer.extend_from_slice(&chunk[..n]);
                            if buffer.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }

                let request = String::from_utf8_lossy(&buffer);
                if let Some(line) = request.lines().next() {
                    seen.lock().unwrap().push(line.to_string());
                }

                let (status, body) =
                    queue.lock().unwrap().pop_front().unwrap_or_else(|| (200, String::new()));
                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason_phrase(status),
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            url,
            request_lines,
            handle,
        }
    }

    /// Base URL, e.g. `http://127.0.0.1:54321`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request lines received so far (`GET /index?... HTTP/1.1`).
    pub fn request_lines(&self) -> Vec<String> {
        self.request_lines.lock().unwrap().clone()
    }
}

impl Drop for IndexServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Render entries as a newline-delimited JSON index body.
pub fn index_body(entries: &[IndexEntry]) -> String {
    entries.iter().map(|entry| serde_json::to_string(entry).unwrap() + "\n").collect()
}

/// Write a `.gitconfig` with `[user] name = <name>` into `dir`.
pub fn write_gitconfig(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(".gitconfig");
    std::fs::write(&path, format!("[user]\n\tname = {name}\n\temail = {name}@example.com\n"))
        .unwrap();
    path
}
