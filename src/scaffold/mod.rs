//! Package and project skeletons.
//!
//! Nothing here overwrites an existing file: re-running a scaffold over an
//! existing folder only fills in what is missing.

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::utils::fs::{ensure_dir, write_new_file};

const MAIN_TEMPLATE: &str = "package main\n\nfunc main() {}\n";

/// What to generate inside a new package folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Go package name (`package <name>`)
    pub package_name: String,
    /// Write `<name>.go`
    pub write_root_file: bool,
    /// Write `README.md`
    pub write_readme: bool,
    /// Write `<name>_test.go`
    pub write_tests: bool,
}

/// What to generate at a project root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Write a minimal `main.go`
    pub write_main: bool,
    /// Create `internal/`
    pub write_internal: bool,
}

/// Create `folder` and the files selected by `options`.
///
/// Returns the paths of files that were actually written.
pub async fn create_package(folder: &Path, options: &ScaffoldOptions) -> Result<Vec<PathBuf>> {
    let name = options.package_name.trim();
    if name.is_empty() {
        bail!("package name is required");
    }

    ensure_dir(folder).await?;

    let mut files = Vec::new();
    if options.write_root_file {
        files.push((folder.join(format!("{name}.go")), format!("package {name}\n")));
    }
    if options.write_readme {
        files.push((folder.join("README.md"), format!("# {name}\n")));
    }
    if options.write_tests {
        files.push((folder.join(format!("{name}_test.go")), test_template(name)));
    }

    let mut written = Vec::new();
    for (path, content) in files {
        if write_new_file(&path, &content).await? {
            tracing::debug!("Created {}", path.display());
            written.push(path);
        }
    }

    Ok(written)
}

/// Ensure the standard project layout exists under `root`.
pub async fn ensure_project_layout(root: &Path, layout: ProjectLayout) -> Result<()> {
    if root.as_os_str().is_empty() {
        bail!("root path is required");
    }

    if layout.write_internal {
        ensure_dir(&root.join("internal")).await?;
    }

    if layout.write_main {
        write_new_file(&root.join("main.go"), MAIN_TEMPLATE).await?;
    }

    Ok(())
}

fn test_template(name: &str) -> String {
    let mut chars = name.chars();
    let title: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default();

    format!("package {name}\n\nimport \"testing\"\n\nfunc Test{title}(t *testing.T) {{}}\n")
}
