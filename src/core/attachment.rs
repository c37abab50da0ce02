//! File references attached to document blocks and export templates

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A file picked from disk and referenced by the presentation.
///
/// Only the reference is kept; the bytes stay on disk until a real export
/// reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl AttachedFile {
    /// Build a reference from a path, reading its metadata
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

        if metadata.is_dir() {
            anyhow::bail!("Not a file: {}", path.display());
        }

        Ok(Self {
            path: path.to_path_buf(),
            name: file_name(path),
            size: metadata.len(),
        })
    }

    /// Lower-case file extension, if any
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Whether the file extension is one of `extensions`
    pub fn has_extension(&self, extensions: &[&str]) -> bool {
        self.extension()
            .map(|ext| extensions.iter().any(|e| *e == ext))
            .unwrap_or(false)
    }

    /// Human-readable size, e.g. `1.5 MB`
    pub fn size_label(&self) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

        let mut size = self.size as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }

        if unit == 0 {
            format!("{} {}", self.size, UNITS[0])
        } else {
            format!("{:.1} {}", size, UNITS[unit])
        }
    }

    /// Open the file in the system's default application
    pub fn open_external(&self) -> Result<()> {
        open::that(&self.path)
            .with_context(|| format!("Failed to open file: {}", self.path.display()))
    }
}

/// Ask the user for a file with one of the given extensions.
///
/// Returns `None` when the dialog is dismissed or the metadata can't be read.
pub fn pick_file(filter_name: &str, extensions: &[&str]) -> Option<AttachedFile> {
    let path = rfd::FileDialog::new()
        .add_filter(filter_name, extensions)
        .pick_file()?;

    match AttachedFile::from_path(&path) {
        Ok(file) => {
            tracing::info!("Attached file: {} ({})", file.name, file.size_label());
            Some(file)
        }
        Err(e) => {
            tracing::error!("Failed to attach file: {:#}", e);
            None
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
