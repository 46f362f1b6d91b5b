//! Port for the repository tools the model may call

use async_trait::async_trait;
use delegate_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::ToolResult,
};

/// Runs model-requested tool calls against one repository root.
///
/// The executor's [`ToolSpec`] is the whole tool surface offered to the
/// model for a run: a review executor carries Glob, Grep and Read, a task
/// executor adds Write and Edit. Calls are never rejected with an `Err`;
/// unknown tools, bad arguments and refused paths all come back as failed
/// [`ToolResult`]s for the model to read.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    fn tool_spec(&self) -> &ToolSpec;

    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().contains(name)
    }

    /// Tool names in registration order
    fn tool_names(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Run one call; the dispatch loop awaits each call before the next.
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Same as [`execute`](Self::execute) for callers outside a runtime.
    fn execute_sync(&self, call: &ToolCall) -> ToolResult;
}
