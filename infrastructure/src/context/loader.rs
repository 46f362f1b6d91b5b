//! Local file system project-memory loader
//!
//! [`LocalContextLoader`] implements [`ContextLoaderPort`] by reading the
//! instruction files developers keep for AI assistants.
//!
//! # Lookup order
//!
//! 1. `~/.claude/CLAUDE.md` - user memory
//! 2. `~/.claude/rules/*.md` - user rules, sorted by file name
//! 3. `.claude/CLAUDE.md`, else `CLAUDE.md` - project memory (first found only)
//! 4. `.claude/rules/*.md` - project rules, sorted by file name
//!
//! Missing or unreadable files are skipped.

use delegate_application::ContextLoaderPort;
use delegate_domain::{MemorySection, MemorySource, ProjectMemory};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project-memory loader that reads from the local file system.
#[derive(Debug, Clone, Default)]
pub struct LocalContextLoader {
    /// Overrides the home directory; `None` uses [`dirs::home_dir`].
    home: Option<PathBuf>,
}

impl LocalContextLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader that looks for user memory under `home` instead of the real
    /// home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone().or_else(dirs::home_dir)
    }

    /// Load the first existing memory file of `source` under `base`.
    ///
    /// User memory is labelled with its full path, project memory with the
    /// path relative to the repository.
    fn load_memory_file(&self, base: &Path, source: MemorySource) -> Option<MemorySection> {
        source.memory_file_candidates().iter().find_map(|candidate| {
            let path = base.join(candidate);
            let content = read_file(&path)?;
            let name = if source.is_user_scope() {
                path.display().to_string()
            } else {
                candidate.to_string()
            };
            debug!("Loaded {} from {}", source, path.display());
            Some(MemorySection::new(source, name, content))
        })
    }

    /// Load every `*.md` regular file in the rules directory, sorted by name.
    fn load_rules_dir(&self, base: &Path, source: MemorySource) -> Vec<MemorySection> {
        let Some(rules_dir) = source.rules_dir() else {
            return Vec::new();
        };
        let dir = base.join(rules_dir);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".md"))
            .collect();
        names.sort();

        names
            .into_iter()
            .filter_map(|name| {
                let content = read_file(&dir.join(&name))?;
                Some(MemorySection::new(source, name, content))
            })
            .collect()
    }
}

fn read_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Skipping unreadable memory file {}: {}", path.display(), e);
            None
        }
    }
}

impl ContextLoaderPort for LocalContextLoader {
    fn load_project_memory(&self, repo_root: &Path) -> ProjectMemory {
        let home = self.home_dir();
        let mut sections = Vec::new();

        for &source in MemorySource::all() {
            let base = if source.is_user_scope() {
                match home.as_deref() {
                    Some(home) => home,
                    None => continue,
                }
            } else {
                repo_root
            };

            if source.rules_dir().is_some() {
                sections.extend(self.load_rules_dir(base, source));
            } else if let Some(section) = self.load_memory_file(base, source) {
                sections.push(section);
            }
        }

        let memory = ProjectMemory::from_sections(sections);
        debug!("Project memory: {}", memory.source_description());
        memory
    }
}
