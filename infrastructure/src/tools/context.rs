//! Shared state every file tool runs against.

use crate::fs::{RepoRoot, SecureOpener};
use delegate_domain::{PathPolicy, PathViolation, RelativePath, ToolError};
use std::path::Path;

/// Directories skipped by tree walks. Walk speed only; the deny list is
/// what keeps secrets out.
pub const PRUNED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    ".venv",
    "__pycache__",
    "vendor",
    "dist",
    ".codex-sessions",
];

/// Upper bounds on what a single call may return or scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolLimits {
    /// Glob and Grep result cap
    pub max_results: usize,
    /// Read span cap
    pub max_read_lines: usize,
    /// Grep skips larger files
    pub max_grep_file_bytes: u64,
    /// Longest line Read and Grep will scan
    pub max_line_bytes: usize,
}

impl Default for ToolLimits {
    fn default() -> Self {
        Self {
            max_results: 200,
            max_read_lines: 400,
            max_grep_file_bytes: 2 * 1024 * 1024,
            max_line_bytes: 1024 * 1024,
        }
    }
}

impl ToolLimits {
    /// Requested result count, defaulted and capped.
    pub fn results(&self, requested: Option<usize>) -> usize {
        requested.map_or(self.max_results, |n| n.min(self.max_results))
    }

    /// Requested line count, defaulted and capped.
    pub fn read_lines(&self, requested: Option<usize>) -> usize {
        requested.map_or(self.max_read_lines, |n| n.min(self.max_read_lines))
    }

    /// Lower (never raise) the built-in caps.
    pub fn capped_by(self, other: ToolLimits) -> Self {
        Self {
            max_results: self.max_results.min(other.max_results).max(1),
            max_read_lines: self.max_read_lines.min(other.max_read_lines).max(1),
            max_grep_file_bytes: self.max_grep_file_bytes.min(other.max_grep_file_bytes),
            max_line_bytes: self.max_line_bytes.min(other.max_line_bytes),
        }
    }
}

/// Root, opener, policy and limits for one run.
#[derive(Debug, Clone)]
pub struct ToolContext {
    root: RepoRoot,
    opener: SecureOpener,
    policy: PathPolicy,
    limits: ToolLimits,
}

impl ToolContext {
    pub fn new(root: RepoRoot) -> Self {
        Self {
            opener: SecureOpener::new(root.path()),
            root,
            policy: PathPolicy::new(),
            limits: ToolLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ToolLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn root(&self) -> &RepoRoot {
        &self.root
    }

    pub fn opener(&self) -> &SecureOpener {
        &self.opener
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    pub fn limits(&self) -> &ToolLimits {
        &self.limits
    }

    /// Validate and deny-check a model-supplied file path.
    pub fn check_path(&self, raw: &str) -> Result<RelativePath, ToolError> {
        self.policy.check(raw).map_err(|violation| match violation {
            PathViolation::Invalid(e) => ToolError::invalid_path(e.to_string()),
            PathViolation::Denied => ToolError::access_denied(raw),
        })
    }

    /// Root-relative `/`-separated form of a path below the root.
    pub fn relative_display(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.root.path()).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(parts.join("/"))
    }
}
