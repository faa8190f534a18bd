//! Filesystem helpers for locating sources and writing compiled fonts.

use std::{
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};

use crate::{
    config::{UFO_EXTENSION, UFO_PATTERN},
    error::{Error, Result},
};

/// A compiled font file on disk.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write font data, creating the parent directory first if needed.
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        self.ensure_parent_dir()?;
        write(&self.path, data)
            .map_err(|e| Error::io(format!("Failed to write font: {}", self.path.display()), e))
    }

    /// Create parent directory if it doesn't exist.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create directory: {}", parent.display()), e)
            })?;
        }
        Ok(())
    }
}

/// Whether `path` names a UFO package by its extension.
pub fn is_ufo_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == UFO_EXTENSION)
}

/// Immediate children of `dir` with a `.ufo` extension, sorted by name.
pub fn glob_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let escaped = Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join(UFO_PATTERN).to_string_lossy().into_owned();
    Ok(glob(&pattern)
        .map_err(|source| Error::Glob { pattern: pattern.clone(), source })?
        .filter_map(|entry| entry.ok())
        .collect())
}
