//! Repository root detection.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RepoRootError {
    #[error("cannot resolve repository root {path}: {source}")]
    Resolve {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("repository root {0} is not a directory")]
    NotADirectory(String),
}

/// Canonical, symlink-free absolute path of the directory tools are
/// confined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRoot(PathBuf);

impl RepoRoot {
    /// Resolve the root: an explicit path (relative to `cwd` if needed),
    /// else the nearest ancestor of `cwd` containing `.git`, else `cwd`.
    pub fn detect(explicit: Option<&Path>, cwd: &Path) -> Result<Self, RepoRootError> {
        let candidate = match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => cwd.join(path),
            None => Self::find_git_ancestor(cwd).unwrap_or_else(|| cwd.to_path_buf()),
        };
        debug!("Repository root candidate: {}", candidate.display());
        Self::at(&candidate)
    }

    /// Canonicalize `path` and require a directory.
    pub fn at(path: &Path) -> Result<Self, RepoRootError> {
        let canonical = path.canonicalize().map_err(|source| RepoRootError::Resolve {
            path: path.display().to_string(),
            source,
        })?;
        if !canonical.is_dir() {
            return Err(RepoRootError::NotADirectory(canonical.display().to_string()));
        }
        Ok(Self(canonical))
    }

    fn find_git_ancestor(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(".git").exists())
            .map(Path::to_path_buf)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Whether an already-canonical path lies at or below the root.
    pub fn contains(&self, canonical: &Path) -> bool {
        canonical.starts_with(&self.0)
    }
}

impl AsRef<Path> for RepoRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for RepoRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
