//! Tool domain module
//!
//! Defines what the remote model is allowed to ask for. The model never
//! touches the filesystem itself: it names one of a fixed set of tools, the
//! local side validates the call, executes it inside the repository root and
//! answers with a [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (offered)    │    │ (invocation) │    │ (JSON reply) │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Tool sets
//!
//! | Tool | Risk | review | execute |
//! |------|------|:---:|:---:|
//! | `Glob` | Low | yes | yes |
//! | `Grep` | Low | yes | yes |
//! | `Read` | Low | yes | yes |
//! | `Write` | High | - | yes |
//! | `Edit` | High | - | yes |
//!
//! # Key Types
//!
//! - [`ToolSpec`] — Ordered registry of offered tools
//! - [`ToolDefinition`] — Schema for a single tool (name, params, risk level)
//! - [`ToolCall`] — An invocation request with arguments
//! - [`ToolResult`] — Outcome, success or typed [`ToolError`]
//! - [`ToolValidator`] — Pure parameter validation
//!
//! The async `ToolExecutorPort` lives in the application layer; the
//! filesystem-backed implementation lives in infrastructure.

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolErrorKind, ToolResult, ToolResultMetadata};
