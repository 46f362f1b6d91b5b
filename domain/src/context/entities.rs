//! Entities for project memory
//!
//! [`ProjectMemory`] aggregates loaded [`MemorySection`]s into the
//! "Project Guidelines" block of the task system prompt.
//!
//! # Example
//!
//! ```
//! use delegate_domain::context::{MemorySection, MemorySource, ProjectMemory};
//!
//! let memory = ProjectMemory::from_sections(vec![
//!     MemorySection::new(MemorySource::ProjectMemory, "CLAUDE.md", "Run tests first."),
//!     MemorySection::new(MemorySource::UserMemory, "~/.claude/CLAUDE.md", "Be brief."),
//! ]);
//!
//! // User sources render first regardless of load order
//! assert!(memory.render().starts_with("### ~/.claude/CLAUDE.md (user memory)"));
//! ```

use super::value_objects::{MemorySection, MemorySource};

/// Separator placed between rendered sections.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Aggregated project memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMemory {
    sections: Vec<MemorySection>,
}

impl ProjectMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from sections; ordering by source is stable so rule files keep
    /// their sorted order within a source.
    pub fn from_sections(mut sections: Vec<MemorySection>) -> Self {
        sections.sort_by_key(|s| s.source);
        Self { sections }
    }

    pub fn sections(&self) -> &[MemorySection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn count_from(&self, source: MemorySource) -> usize {
        self.sections.iter().filter(|s| s.source == source).count()
    }

    /// Render all sections; empty memory renders as an empty string.
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(MemorySection::render)
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
    }

    /// One-line summary for logs, e.g. `"2 sections (project memory, project rules)"`.
    pub fn source_description(&self) -> String {
        if self.sections.is_empty() {
            return "none".to_string();
        }
        let mut labels: Vec<&str> = self.sections.iter().map(|s| s.source.label()).collect();
        labels.dedup();
        format!("{} sections ({})", self.sections.len(), labels.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_memory_renders_empty() {
        let memory = ProjectMemory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.render(), "");
        assert_eq!(memory.source_description(), "none");
    }

    #[test]
    fn test_sections_joined_with_separator() {
        let memory = ProjectMemory::from_sections(vec![
            MemorySection::new(MemorySource::ProjectRules, "a.md", "A"),
            MemorySection::new(MemorySource::ProjectRules, "b.md", "B"),
        ]);
        assert_eq!(
            memory.render(),
            "### a.md (project rules)\n\nA\n\n---\n\n### b.md (project rules)\n\nB"
        );
        assert_eq!(memory.count_from(MemorySource::ProjectRules), 2);
    }

    #[test]
    fn test_stable_order_within_source() {
        let memory = ProjectMemory::from_sections(vec![
            MemorySection::new(MemorySource::ProjectRules, "01.md", "x"),
            MemorySection::new(MemorySource::UserRules, "z.md", "y"),
            MemorySection::new(MemorySource::ProjectRules, "02.md", "z"),
        ]);
        let names: Vec<&str> = memory.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["z.md", "01.md", "02.md"]);
        assert_eq!(
            memory.source_description(),
            "3 sections (user rules, project rules)"
        );
    }
}
