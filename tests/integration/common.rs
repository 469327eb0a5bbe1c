//! Shared helpers for driving the `go-toolkit` binary.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home, working directory and config file for one test.
pub struct TestProject {
    _temp: TempDir,
    home: PathBuf,
    work: PathBuf,
    config: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let work = temp.path().join("work");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&work).unwrap();
        let config = temp.path().join("gtk-config.toml");

        Self {
            _temp: temp,
            home,
            work,
            config,
        }
    }

    /// Project with `user = "<user>"` already configured.
    pub fn with_user(user: &str) -> Self {
        let project = Self::new();
        project.write_config(&format!("user = \"{user}\"\n"));
        project
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn work(&self) -> &Path {
        &self.work
    }

    pub fn config_path(&self) -> &Path {
        &self.config
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config, content).unwrap();
    }

    pub fn read_config(&self) -> String {
        std::fs::read_to_string(&self.config).unwrap()
    }

    /// `go-toolkit --config <file> <args>` run from the work directory with
    /// `HOME` pointed at an empty directory.
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("go-toolkit").unwrap();
        cmd.current_dir(&self.work)
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("GO_TOOLKIT_INDEX_URL")
            .arg("--quiet")
            .arg("--config")
            .arg(&self.config)
            .args(args);
        cmd
    }
}
