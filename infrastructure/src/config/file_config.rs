//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout and deserialize directly;
//! every field has a default so partial files are valid.
//!
//! ```toml
//! [api]
//! model = "gpt-5.2-codex"
//! base_url = "https://api.openai.com/v1"
//! timeout_secs = 60
//! review_effort = "high"
//! execute_effort = "medium"
//!
//! [agent]
//! max_iterations = 50
//!
//! [tools]
//! max_results = 200
//! max_read_lines = 400
//! max_grep_file_bytes = 2097152
//!
//! [session]
//! dir = "/tmp/delegate-sessions"
//!
//! [logging]
//! conversation_log = ".codex-sessions/run.jsonl"
//! ```

use crate::openai::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::tools::ToolLimits;
use delegate_application::config::execution_params::{DEFAULT_MAX_ITERATIONS, DEFAULT_MODEL};
use delegate_application::{DelegateMode, ExecutionParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors; all of them are usage errors for the CLI.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api: FileApiConfig,
    pub agent: FileAgentConfig,
    pub tools: FileToolsConfig,
    pub session: FileSessionConfig,
    pub logging: FileLoggingConfig,
}

/// `[api]` - remote model endpoint and request shaping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Overrides both per-mode efforts when set (`REASONING_EFFORT`)
    pub reasoning_effort: Option<String>,
    pub review_effort: String,
    pub execute_effort: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            reasoning_effort: None,
            review_effort: DelegateMode::Review.default_reasoning_effort().to_string(),
            execute_effort: DelegateMode::Execute.default_reasoning_effort().to_string(),
        }
    }
}

impl FileApiConfig {
    /// Effective reasoning effort for a run; blank means none is sent.
    pub fn effort_for(&self, mode: DelegateMode) -> Option<&str> {
        let effort = match &self.reasoning_effort {
            Some(effort) => effort.as_str(),
            None => match mode {
                DelegateMode::Review => self.review_effort.as_str(),
                DelegateMode::Execute => self.execute_effort.as_str(),
            },
        };
        Some(effort.trim()).filter(|e| !e.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[agent]` - dispatch loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_iterations: usize,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// `[tools]` - result and size limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    pub max_results: usize,
    pub max_read_lines: usize,
    pub max_grep_file_bytes: u64,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        let limits = ToolLimits::default();
        Self {
            max_results: limits.max_results,
            max_read_lines: limits.max_read_lines,
            max_grep_file_bytes: limits.max_grep_file_bytes,
        }
    }
}

impl FileToolsConfig {
    /// Configured limits; they can lower the built-in ceilings, never raise them.
    pub fn to_limits(&self) -> ToolLimits {
        ToolLimits::default().capped_by(ToolLimits {
            max_results: self.max_results,
            max_read_lines: self.max_read_lines,
            max_grep_file_bytes: self.max_grep_file_bytes,
            ..ToolLimits::default()
        })
    }
}

/// `[session]` - where session records are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Replaces the per-mode directory under the repository root (`STATE_DIR`)
    pub dir: Option<PathBuf>,
}

impl FileSessionConfig {
    pub fn dir_for(&self, repo_root: &Path, mode: DelegateMode) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.clone(),
            None => repo_root.join(mode.default_session_subdir()),
        }
    }
}

/// `[logging]` - optional JSONL transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub conversation_log: Option<PathBuf>,
}

impl FileConfig {
    /// Check values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.model.trim().is_empty() {
            return Err(ConfigError::invalid("api.model", "must not be empty"));
        }
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(ConfigError::invalid(
                "api.base_url",
                format!("expected an http(s) URL, got '{}'", self.api.base_url),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::invalid("api.timeout_secs", "must be positive"));
        }
        if self.tools.max_results == 0 {
            return Err(ConfigError::invalid("tools.max_results", "must be positive"));
        }
        if self.tools.max_read_lines == 0 {
            return Err(ConfigError::invalid("tools.max_read_lines", "must be positive"));
        }
        if self.tools.max_grep_file_bytes == 0 {
            return Err(ConfigError::invalid(
                "tools.max_grep_file_bytes",
                "must be positive",
            ));
        }
        Ok(())
    }

    /// Dispatch parameters for a run in `mode`.
    pub fn execution_params(&self, mode: DelegateMode) -> ExecutionParams {
        ExecutionParams::default()
            .with_model(self.api.model.clone())
            .with_max_iterations(self.agent.max_iterations)
            .with_reasoning_effort(self.api.effort_for(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
model = "gpt-5.1"
base_url = "http://localhost:8080/v1"
timeout_secs = 30
execute_effort = "low"

[agent]
max_iterations = 12

[tools]
max_results = 50

[session]
dir = "/tmp/sessions"

[logging]
conversation_log = "run.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.model, "gpt-5.1");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.api.effort_for(DelegateMode::Execute), Some("low"));
        assert_eq!(config.api.effort_for(DelegateMode::Review), Some("high"));
        assert_eq!(config.agent.max_iterations, 12);
        assert_eq!(config.tools.to_limits().max_results, 50);
        assert_eq!(config.tools.to_limits().max_read_lines, 400);
        assert_eq!(config.session.dir, Some(PathBuf::from("/tmp/sessions")));
        assert_eq!(config.logging.conversation_log, Some(PathBuf::from("run.jsonl")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_limits_cannot_exceed_built_in_ceilings() {
        let tools = FileToolsConfig {
            max_results: 10_000,
            max_read_lines: 100_000,
            max_grep_file_bytes: 1 << 40,
        };
        assert_eq!(tools.to_limits(), ToolLimits::default());

        let lowered = FileToolsConfig {
            max_results: 20,
            max_read_lines: 100_000,
            max_grep_file_bytes: 4096,
        }
        .to_limits();
        assert_eq!(lowered.max_results, 20);
        assert_eq!(lowered.max_read_lines, 400);
        assert_eq!(lowered.max_grep_file_bytes, 4096);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.api.model, "gpt-5.2-codex");
        assert_eq!(config.api.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.agent.max_iterations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effort_override_and_blank() {
        let mut api = FileApiConfig {
            reasoning_effort: Some("low".to_string()),
            ..Default::default()
        };
        assert_eq!(api.effort_for(DelegateMode::Review), Some("low"));
        assert_eq!(api.effort_for(DelegateMode::Execute), Some("low"));

        api.reasoning_effort = Some("  ".to_string());
        assert_eq!(api.effort_for(DelegateMode::Review), None);
    }

    #[test]
    fn test_session_dir_per_mode() {
        let root = Path::new("/repo");
        let session = FileSessionConfig::default();
        assert_eq!(
            session.dir_for(root, DelegateMode::Review),
            PathBuf::from("/repo/.codex-sessions")
        );
        assert_eq!(
            session.dir_for(root, DelegateMode::Execute),
            PathBuf::from("/repo/.codex-sessions/tasks")
        );

        let state = FileSessionConfig {
            dir: Some(PathBuf::from("/state")),
        };
        assert_eq!(state.dir_for(root, DelegateMode::Execute), PathBuf::from("/state"));
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let mut config = FileConfig::default();
        config.api.base_url = "ftp://example".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "api.base_url", .. })
        ));

        let mut config = FileConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = FileConfig::default();
        config.tools.max_read_lines = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_execution_params() {
        let mut config = FileConfig::default();
        config.agent.max_iterations = 0;
        let params = config.execution_params(DelegateMode::Review);
        assert_eq!(params.max_iterations, 1);
        assert_eq!(params.reasoning_effort.as_deref(), Some("high"));
    }
}
