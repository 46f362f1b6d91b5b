//! Local tool executor — the concrete implementation of [`ToolExecutorPort`].
//!
//! [`LocalToolExecutor`] bridges the application layer's abstract port with
//! the confined file tools. All tools are synchronous; the async entry
//! point runs them inline on the (single-threaded) runtime.
//!
//! ```text
//! ToolExecutorPort::execute()
//!   └─ execute_internal()
//!        ├─ not in the active ToolSpec → UNKNOWN_TOOL
//!        ├─ DefaultToolValidator fails → INVALID_ARGUMENT
//!        └─ Glob | Grep | Read | Write | Edit
//! ```

use async_trait::async_trait;
use delegate_application::ports::tool_executor::ToolExecutorPort;
use delegate_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolErrorKind, ToolResult},
};
use tracing::debug;

use super::{ToolContext, file, search};

/// Executor that runs tools against one repository root.
///
/// | Constructor | Tools | Used by |
/// |-------------|-------|---------|
/// | [`new()`](Self::new) | Glob, Grep, Read, Write, Edit | `execute` |
/// | [`read_only()`](Self::read_only) | Glob, Grep, Read | `review` |
/// | [`with_tools()`](Self::with_tools) | Custom [`ToolSpec`] | Testing |
///
/// A tool outside the active spec is refused even when an implementation
/// exists, so a read-only executor can never write.
#[derive(Debug, Clone)]
pub struct LocalToolExecutor {
    tool_spec: ToolSpec,
    context: ToolContext,
}

impl LocalToolExecutor {
    /// Executor with the full read/write tool set.
    pub fn new(context: ToolContext) -> Self {
        Self::with_tools(context, super::execute_tool_spec())
    }

    /// Executor with read-only tools only.
    pub fn read_only(context: ToolContext) -> Self {
        Self::with_tools(context, super::review_tool_spec())
    }

    pub fn with_tools(context: ToolContext, tool_spec: ToolSpec) -> Self {
        Self { tool_spec, context }
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    fn execute_internal(&self, call: &ToolCall) -> ToolResult {
        let Some(definition) = self.tool_spec.get(&call.tool_name) else {
            let allowed: Vec<&str> = self.tool_spec.names().collect();
            return ToolResult::failure(
                &call.tool_name,
                ToolError::new(
                    ToolErrorKind::UnknownTool,
                    format!(
                        "Unknown tool: {} (only {} allowed)",
                        call.tool_name,
                        allowed.join(", ")
                    ),
                ),
            );
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            return ToolResult::failure(&call.tool_name, e);
        }

        debug!("Executing {} {}", call.tool_name, call.arguments_json());
        let ctx = &self.context;
        match call.tool_name.as_str() {
            search::GLOB => search::execute_glob(ctx, call),
            search::GREP => search::execute_grep(ctx, call),
            file::READ => file::execute_read(ctx, call),
            file::WRITE => file::execute_write(ctx, call),
            file::EDIT => file::execute_edit(ctx, call),
            other => ToolResult::failure(other, ToolError::unknown_tool(other)),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.execute_internal(call)
    }

    fn execute_sync(&self, call: &ToolCall) -> ToolResult {
        self.execute_internal(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::RepoRoot;
    use std::fs;
    use tempfile::TempDir;

    fn executor(read_only: bool) -> (TempDir, LocalToolExecutor) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "content\n").unwrap();
        let ctx = ToolContext::new(RepoRoot::at(dir.path()).unwrap());
        let executor = if read_only {
            LocalToolExecutor::read_only(ctx)
        } else {
            LocalToolExecutor::new(ctx)
        };
        (dir, executor)
    }

    #[test]
    fn test_executor_has_all_tools() {
        let (_dir, executor) = executor(false);
        assert_eq!(
            executor.tool_names(),
            ["Glob", "Grep", "Read", "Write", "Edit"]
        );
    }

    #[test]
    fn test_read_only_executor_refuses_writes() {
        let (dir, executor) = executor(true);
        assert_eq!(executor.tool_names(), ["Glob", "Grep", "Read"]);

        let call = ToolCall::new("Write")
            .with_arg("path", "new.txt")
            .with_arg("content", "x");
        let result = executor.execute_sync(&call);

        let error = result.error().unwrap();
        assert_eq!(error.code(), "UNKNOWN_TOOL");
        assert_eq!(
            error.message,
            "Unknown tool: Write (only Glob, Grep, Read allowed)"
        );
        assert!(!dir.path().join("new.txt").exists());
    }

    #[test]
    fn test_executor_validation_error() {
        let (_dir, executor) = executor(false);
        let result = executor.execute_sync(&ToolCall::new("Read"));
        assert_eq!(result.error().unwrap().code(), "INVALID_ARGUMENT");

        let mistyped = ToolCall::new("Read")
            .with_arg("path", "a.txt")
            .with_arg("max_lines", "ten");
        assert_eq!(
            executor.execute_sync(&mistyped).error().unwrap().code(),
            "INVALID_ARGUMENT"
        );
    }

    #[tokio::test]
    async fn test_executor_async() {
        let (_dir, executor) = executor(false);
        let call = ToolCall::new("Read").with_arg("path", "a.txt");
        let result = executor.execute(&call).await;

        assert!(result.is_success());
        assert_eq!(result.content.as_deref(), Some("000001\tcontent"));
    }
}
