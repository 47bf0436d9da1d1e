//! Directory listing fed to the detector registry

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "vendor",
    "target",
    "dist",
    "build",
    "venv",
    ".venv",
    "__pycache__",
];

/// Default depth: only files directly inside the project root
pub const DEFAULT_SCAN_DEPTH: usize = 1;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

pub struct DirectoryScanner {
    root: PathBuf,
    max_depth: usize,
}

impl DirectoryScanner {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ScanError> {
        let root = root.into();
        if !root.exists() {
            return Err(ScanError::NotFound(root));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }
        Ok(Self {
            root,
            max_depth: DEFAULT_SCAN_DEPTH,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File names (not paths) of every regular file within the depth limit,
    /// sorted and deduplicated. Directories are never listed.
    pub fn scan(&self) -> Result<Vec<String>, ScanError> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(self.max_depth)
            .into_iter()
            .filter_entry(|e| !is_excluded_dir(e))
        {
            let entry = entry.map_err(|source| ScanError::Io {
                path: self.root.clone(),
                source,
            })?;

            if !is_listed_file(&entry) {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                debug!(file = name, depth = entry.depth(), "Listed file");
                names.push(name.to_string());
            }
        }

        names.sort();
        names.dedup();

        info!(
            root = %self.root.display(),
            files = names.len(),
            max_depth = self.max_depth,
            "Directory scan completed"
        );

        Ok(names)
    }
}

/// Regular files, plus symlinks that resolve to one. Links to directories
/// are not descended into.
fn is_listed_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}
