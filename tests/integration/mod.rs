//! Integration test suite for go-toolkit
//!
//! End-to-end tests that run the compiled binary. None of them need a Go
//! toolchain: commands that would run `go` are exercised with `--dry-run` or
//! stop at validation.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **config**: `config` subcommands and the persisted file
//! - **paths**: module path expansion through `add` / `remove` / `init`
//! - **scaffold**: package folders
//! - **search**: index search against a local index server

mod common;

mod config;
mod paths;
mod scaffold;
mod search;
