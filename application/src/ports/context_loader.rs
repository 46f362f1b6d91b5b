//! Context loader port
//!
//! Defines how project memory (instruction files for AI assistants) is
//! gathered for the task system prompt.

use delegate_domain::ProjectMemory;
use std::path::Path;

/// Port for loading project memory.
///
/// Loading is best effort: unreadable files are skipped, never reported as
/// errors.
pub trait ContextLoaderPort: Send + Sync {
    /// Load user-wide and project memory for the repository at `repo_root`.
    fn load_project_memory(&self, repo_root: &Path) -> ProjectMemory;
}
