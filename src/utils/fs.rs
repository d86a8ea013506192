//! File system utilities for cross-platform file operations.
//!
//! Small, synchronous helpers with consistent error context. Writes go
//! through a temp-file-then-rename sequence so the generated build file is
//! never observable in a partial state.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads a text file, attaching the path to any failure.
pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Reads a text file that is allowed to be absent.
///
/// Returns `Ok(None)` when the file does not exist; any other failure is an
/// error.
pub fn read_optional_text_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read file: {}", path.display()))
        }
    }
}

/// Creates a directory and all missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Writes a file atomically via a temporary sibling and rename.
///
/// Parent directories are created as needed. Content is synced to disk
/// before the rename, so readers observe either the old file or the
/// complete new one.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
        file.sync_all().context("Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Converts a path to a forward-slash string for storage and target names.
///
/// Backslashes only appear in paths on Windows, so this is an identity
/// transformation elsewhere.
pub fn normalize_path_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Normalizes a declared entry-point path: backslashes become forward
/// slashes and a leading `./` is stripped.
pub fn normalize_entry_path(raw: &str) -> String {
    let slashed = raw.replace('\\', "/");
    slashed.strip_prefix("./").unwrap_or(&slashed).to_string()
}

/// Strips `prefix` from `path` and returns the remainder with forward
/// slashes, or `None` when `path` is not under `prefix`.
pub fn relative_to(path: &Path, prefix: &Path) -> Option<String> {
    path.strip_prefix(prefix).ok().map(|rel| normalize_path_separators(rel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a/b/out.txt");
        atomic_write(&target, b"hello").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
        // No temp file left behind.
        assert!(!dir.path().join("a/b/out.tmp").exists());
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.txt");
        atomic_write(&target, b"first").unwrap();
        atomic_write(&target, b"second").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[test]
    fn test_read_optional_text_file_absent() {
        let dir = TempDir::new().unwrap();
        assert!(read_optional_text_file(&dir.path().join("missing")).unwrap().is_none());
    }

    #[test]
    fn test_normalize_entry_path() {
        assert_eq!(normalize_entry_path("./bin/cli.js"), "bin/cli.js");
        assert_eq!(normalize_entry_path("bin\\cli.js"), "bin/cli.js");
        assert_eq!(normalize_entry_path("bin/cli.js"), "bin/cli.js");
    }

    #[test]
    fn test_relative_to() {
        let base = Path::new("/tmp/ws/node_modules");
        let path = Path::new("/tmp/ws/node_modules/@s/a");
        assert_eq!(relative_to(path, base).as_deref(), Some("@s/a"));
        assert_eq!(relative_to(Path::new("/elsewhere"), base), None);
    }
}
