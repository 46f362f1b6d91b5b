//! Infrastructure layer for repo-delegate
//!
//! Adapters implementing the ports defined in the application layer:
//! confined file tools, the OpenAI Responses gateway, the JSON session
//! store, project-memory loading, JSONL transcripts and configuration
//! file loading.

pub mod config;
pub mod context;
pub mod fs;
pub mod logging;
pub mod openai;
pub mod session;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use context::LocalContextLoader;
pub use fs::{RepoRoot, RepoRootError, SecureOpener};
pub use logging::JsonlConversationLogger;
pub use openai::OpenAiGateway;
pub use session::JsonSessionStore;
pub use tools::{
    FunctionToolConverter, LocalToolExecutor, ToolContext, ToolLimits, execute_tool_spec,
    review_tool_spec,
};
