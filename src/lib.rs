//! go-toolkit - helpers for everyday Go module work
//!
//! Two engines sit at the core of the crate:
//!
//! - **Path resolution**: short package identifiers (`cobra`, `spf13/cobra`)
//!   are expanded into full module paths (`github.com/spf13/cobra`) using a
//!   configured or discovered user and a validated hosting site.
//! - **Index pagination**: the Go module index is read page by page from a
//!   starting timestamp, with boundary de-duplication and page/result caps,
//!   then filtered locally by query and site.
//!
//! # Architecture Overview
//!
//! ## Resolution
//! - [`site`] - site shape validation and the known-site allowlist
//! - [`packagepath`] - identifier to module path expansion
//! - [`config`] - `gtk-config.toml`, credential files and user resolution
//!
//! ## Index
//! - [`index`] - index records, the fetch capability and its HTTP binding,
//!   pagination and filtering
//!
//! ## Supporting Modules
//! - [`cli`] - the `go-toolkit` command-line interface
//! - [`core`] - error types and user-facing error formatting
//! - [`runner`] - external `go` / `git` execution
//! - [`scaffold`] - package and project skeletons
//! - [`utils`] - filesystem and platform helpers
//! - [`constants`] - defaults shared across modules
//!
//! # Example
//!
//! ```rust
//! use go_toolkit::packagepath::resolve_module_path;
//!
//! let path = resolve_module_path("cobra", "github.com", "spf13").unwrap();
//! assert_eq!(path, "github.com/spf13/cobra");
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod index;
pub mod packagepath;
pub mod runner;
pub mod scaffold;
pub mod site;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
