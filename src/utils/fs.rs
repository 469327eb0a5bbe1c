//! File system helpers.
//!
//! All helpers are async and go through `tokio::fs` so commands never block
//! the runtime on disk IO.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Create `path` and all of its parents if it does not exist.
///
/// # Errors
///
/// Fails if the directory cannot be created or `path` exists but is not a
/// directory.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display())),
        Err(_) => fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display())),
    }
}

/// Atomically write `content` to `path` using write-then-rename.
///
/// The content goes to a sibling `.tmp` file which is synced and then renamed
/// over the target, so readers never see a partial file. Parent directories
/// are created as needed.
pub async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&temp_path)
            .await
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        file.write_all(content)
            .await
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;
        file.sync_all().await.context("Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .await
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Write `content` to `path` only if nothing exists there yet.
///
/// Returns `Ok(false)` when the file was already present and left untouched.
pub async fn write_new_file(path: &Path, content: &str) -> Result<bool> {
    let file = fs::OpenOptions::new().write(true).create_new(true).open(path).await;
    let mut file = match file {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            tracing::debug!("Keeping existing file {}", path.display());
            return Ok(false);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create file: {}", path.display()));
        }
    };

    file.write_all(content.as_bytes())
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    file.flush().await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        std::fs::write(&file, "x").unwrap();
        assert!(ensure_dir(&file).await.is_err());
    }

    #[tokio::test]
    async fn test_atomic_write_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sub/config.toml");
        atomic_write(&path, b"one").await.unwrap();
        atomic_write(&path, b"two").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "two");
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_write_new_file_never_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main.go");
        assert!(write_new_file(&path, "first").await.unwrap());
        assert!(!write_new_file(&path, "second").await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
    }
}
