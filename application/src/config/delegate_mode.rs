//! Delegation mode — review or execute.

use serde::{Deserialize, Serialize};

/// What the remote model is being asked to do.
///
/// | Mode | Tools | Default effort | Session subdirectory |
/// |------|-------|----------------|----------------------|
/// | `Review` | Glob, Grep, Read | `high` | `.codex-sessions/` |
/// | `Execute` | Glob, Grep, Read, Write, Edit | `medium` | `.codex-sessions/tasks/` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelegateMode {
    Review,
    Execute,
}

impl DelegateMode {
    pub fn as_str(&self) -> &str {
        match self {
            DelegateMode::Review => "review",
            DelegateMode::Execute => "execute",
        }
    }

    /// Whether the model may modify the repository.
    pub fn allows_writes(&self) -> bool {
        matches!(self, DelegateMode::Execute)
    }

    pub fn default_reasoning_effort(&self) -> &'static str {
        match self {
            DelegateMode::Review => "high",
            DelegateMode::Execute => "medium",
        }
    }

    /// Session directory relative to the repository root.
    pub fn default_session_subdir(&self) -> &'static str {
        match self {
            DelegateMode::Review => ".codex-sessions",
            DelegateMode::Execute => ".codex-sessions/tasks",
        }
    }
}

impl std::fmt::Display for DelegateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
