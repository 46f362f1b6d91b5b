//! Tool schema conversion port.
//!
//! Separates "which tools to offer" (domain) from "how to serialize for the
//! API" (infrastructure).

use delegate_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to the remote API's function format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to a function schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools, in registration order.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.all().map(|t| self.tool_to_schema(t)).collect()
    }

    /// Convert read-only tools only, in registration order.
    fn read_only_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.read_only_tools().map(|t| self.tool_to_schema(t)).collect()
    }
}
