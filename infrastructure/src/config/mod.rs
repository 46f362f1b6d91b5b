//! Configuration loading for repo-delegate
//!
//! Sources are merged with figment. Priority (highest to lowest):
//!
//! 1. Environment variables (`OPENAI_MODEL`, `OPENAI_BASE_URL`,
//!    `REASONING_EFFORT`, `MAX_ITERS`, `STATE_DIR`)
//! 2. Project: `delegate.toml` or `.delegate.toml` in the repository root
//! 3. Global: `$XDG_CONFIG_HOME/repo-delegate/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileAgentConfig, FileApiConfig, FileConfig, FileLoggingConfig,
    FileSessionConfig, FileToolsConfig,
};
pub use loader::{ConfigLoader, ENV_KEYS, PROJECT_CONFIG_FILES, PROTECTED_KEYS};
