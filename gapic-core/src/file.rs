use std::{
    collections::BTreeSet,
    fs,
    path::{Component, Path, PathBuf},
};

use eyre::{Result, bail};

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had identical content and was left untouched
    Unchanged,
}

/// A fully rendered file waiting to be materialized.
///
/// The path is relative to the output root chosen at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given relative path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the relative file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file below `base`.
    ///
    /// The content goes to a temporary sibling first and is renamed into place,
    /// so readers never observe a truncated file.
    pub fn write_to(&self, base: &Path) -> Result<WriteResult> {
        let target = base.join(&self.path);
        if fs::read_to_string(&target).is_ok_and(|existing| existing == self.content) {
            tracing::debug!(path = %target.display(), "unchanged");
            return Ok(WriteResult::Unchanged);
        }
        write_atomic(&target, &self.content)?;
        tracing::debug!(path = %target.display(), bytes = self.content.len(), "written");
        Ok(WriteResult::Written)
    }
}

/// Write a batch of rendered files below `base`.
///
/// Every path is checked before the first byte hits the disk: paths must be
/// relative, stay inside `base`, and be unique.
pub fn materialize(base: &Path, files: &[File]) -> Result<Vec<WriteResult>> {
    let mut seen = BTreeSet::new();
    for file in files {
        check_relative(file.path())?;
        if !seen.insert(file.path()) {
            bail!("duplicate output path '{}'", file.path().display());
        }
    }

    files.iter().map(|file| file.write_to(base)).collect()
}

fn check_relative(path: &Path) -> Result<()> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || path.as_os_str().is_empty() {
        bail!(
            "output path '{}' must be relative to the output directory",
            path.display()
        );
    }
    Ok(())
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = path.with_file_name(format!(".{file_name}.tmp"));
    fs::write(&staging, content)?;
    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }
    Ok(())
}
