//! Domain layer for repo-delegate
//!
//! This crate contains the core rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Path confinement
//!
//! Every path the remote model names is checked by [`PathPolicy`] before any
//! filesystem call: syntactic escapes (absolute, `..`, `~`, drive letters)
//! are rejected and secrets (keys, credentials, `.git`) are denied.
//!
//! ## Tools
//!
//! The model may call a fixed set of tools ([`ToolSpec`]); each call is a
//! [`ToolCall`] and yields exactly one [`ToolResult`].
//!
//! ## Dispatch
//!
//! A run alternates model turns and tool execution ([`DispatchState`])
//! until the model stops calling tools or the turn ceiling is hit.

pub mod context;
pub mod core;
pub mod dispatch;
pub mod path;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use context::{MemorySection, MemorySource, ProjectMemory};
pub use core::error::DomainError;
pub use core::string::{truncate, truncate_str};
pub use dispatch::{DispatchOutcome, DispatchPhase, DispatchState};
pub use path::{PathError, PathPolicy, PathViolation, RelativePath};
pub use prompt::{PromptTemplate, TaskPromptContext};
pub use session::{
    entities::{ConversationHandle, SessionName, SessionRecord, is_valid_identifier},
    response::{ContentBlock, LlmResponse, RequestedCall},
};
pub use tool::{
    entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolErrorKind, ToolResult, ToolResultMetadata},
};
