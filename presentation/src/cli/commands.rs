//! CLI command definitions

use clap::{Parser, Subcommand};
use delegate_application::DelegateMode;
use std::path::PathBuf;

/// CLI arguments for repo-delegate
#[derive(Parser, Debug)]
#[command(name = "repo-delegate")]
#[command(author, version, about = "Delegate code reviews and tasks to a remote model confined to this repository")]
#[command(long_about = r#"
repo-delegate hands a review or a coding task to a remote model. The model
works through a fixed set of tools (Glob, Grep, Read and, for tasks, Write
and Edit) that can only reach files inside the repository root.

Environment:
  OPENAI_API_KEY     API key (required)
  OPENAI_MODEL       Model name (default gpt-5.2-codex)
  OPENAI_BASE_URL    API base URL (default https://api.openai.com/v1)
  REASONING_EFFORT   Overrides the per-mode reasoning effort
  REPO_ROOT          Repository root (default: nearest .git ancestor)
  STATE_DIR          Session directory (default <root>/.codex-sessions[/tasks])
  MAX_ITERS          Model turn ceiling (default 50)

Configuration files are loaded from (in priority order):
1. Environment variables above
2. ./delegate.toml or ./.delegate.toml in the repository root
3. ~/.config/repo-delegate/config.toml

Exit codes: 0 complete, 2 usage or configuration error, 3 execution failure.

Example:
  repo-delegate review pr-42 "Review the error handling in src/net/"
  repo-delegate execute 7 "Add retry to the uploader" docs/plan.md
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read-only review; repeated calls with the same session continue the conversation
    Review {
        /// Session name (A-Za-z0-9._-, max 64 chars, starts alphanumeric)
        session: String,

        /// Review request; multiple words are joined with spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        prompt: Vec<String>,
    },

    /// Execute a planned task with write access to the repository
    Execute {
        /// Task id (A-Za-z0-9._-, max 64 chars, starts alphanumeric)
        task_id: String,

        /// One-line task description
        description: String,

        /// Plan file included in the system prompt
        plan_file: PathBuf,
    },
}

impl Command {
    pub fn mode(&self) -> DelegateMode {
        match self {
            Command::Review { .. } => DelegateMode::Review,
            Command::Execute { .. } => DelegateMode::Execute,
        }
    }

    /// The session or task identifier
    pub fn identifier(&self) -> &str {
        match self {
            Command::Review { session, .. } => session,
            Command::Execute { task_id, .. } => task_id,
        }
    }

    /// Diagnostic printed when the identifier is rejected
    pub fn invalid_identifier_message(&self) -> &'static str {
        match self {
            Command::Review { .. } => {
                "Invalid session name: use A-Za-z0-9._- only, max 64 chars, must start with alphanumeric"
            }
            Command::Execute { .. } => {
                "Invalid task ID: use A-Za-z0-9._- only, max 64 chars, must start with alphanumeric"
            }
        }
    }
}
