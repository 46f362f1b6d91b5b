//! Value objects for project memory
//!
//! Project memory is the set of instruction files a developer keeps for AI
//! assistants: a personal `CLAUDE.md`, personal rule files, the project's
//! `CLAUDE.md` and the project's rule files. Each loaded file becomes one
//! [`MemorySection`].
//!
//! # Example
//!
//! ```
//! use delegate_domain::context::{MemorySection, MemorySource};
//!
//! let section = MemorySection::new(MemorySource::ProjectRules, "10-style.md", "Use rustfmt.");
//! assert_eq!(section.render(), "### 10-style.md (project rules)\n\nUse rustfmt.");
//! ```

/// Where a memory section was loaded from.
///
/// Variants are declared in rendering order: user-wide sources come first
/// so project sources, which appear later in the prompt, take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemorySource {
    /// `~/.claude/CLAUDE.md`
    UserMemory,
    /// `~/.claude/rules/*.md`
    UserRules,
    /// `.claude/CLAUDE.md` or `CLAUDE.md` in the repository (first found)
    ProjectMemory,
    /// `.claude/rules/*.md` in the repository
    ProjectRules,
}

impl MemorySource {
    /// Label used in section headings.
    pub fn label(&self) -> &'static str {
        match self {
            MemorySource::UserMemory => "user memory",
            MemorySource::UserRules => "user rules",
            MemorySource::ProjectMemory => "project memory",
            MemorySource::ProjectRules => "project rules",
        }
    }

    /// Candidate paths for the single-file sources, relative to their base
    /// directory (home or repository root), in lookup order.
    pub fn memory_file_candidates(&self) -> &'static [&'static str] {
        match self {
            MemorySource::UserMemory => &[".claude/CLAUDE.md"],
            MemorySource::ProjectMemory => &[".claude/CLAUDE.md", "CLAUDE.md"],
            MemorySource::UserRules | MemorySource::ProjectRules => &[],
        }
    }

    /// Rules directory relative to the base directory, for rule sources.
    pub fn rules_dir(&self) -> Option<&'static str> {
        match self {
            MemorySource::UserRules | MemorySource::ProjectRules => Some(".claude/rules"),
            _ => None,
        }
    }

    /// Whether the source lives under the user's home directory.
    pub fn is_user_scope(&self) -> bool {
        matches!(self, MemorySource::UserMemory | MemorySource::UserRules)
    }

    pub fn all() -> &'static [MemorySource] {
        &[
            MemorySource::UserMemory,
            MemorySource::UserRules,
            MemorySource::ProjectMemory,
            MemorySource::ProjectRules,
        ]
    }
}

impl std::fmt::Display for MemorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One loaded memory file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySection {
    pub source: MemorySource,
    /// Display name: the path for memory files, the file name for rules.
    pub name: String,
    pub content: String,
}

impl MemorySection {
    pub fn new(source: MemorySource, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
            content: content.into(),
        }
    }

    /// `### <name> (<source>)` heading followed by the content.
    pub fn render(&self) -> String {
        format!("### {} ({})\n\n{}", self.name, self.source, self.content)
    }
}
