//! Function-tool schema converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the function-tool
//! objects the Responses API expects in its `tools` array.

use delegate_application::ports::tool_schema::ToolSchemaPort;
use delegate_domain::tool::entities::ToolDefinition;
use serde_json::{Map, Value, json};

/// Converts [`ToolDefinition`]s to Responses API function tools:
///
/// ```json
/// {"type": "function", "name": "Read", "description": "...",
///  "parameters": {"type": "object", "properties": {...}, "required": [...]}}
/// ```
///
/// Tools keep their registration order.
pub struct FunctionToolConverter;

impl ToolSchemaPort for FunctionToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.param_type.as_str(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "function",
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{execute_tool_spec, review_tool_spec};

    #[test]
    fn read_schema_matches_wire_contract() {
        let converter = FunctionToolConverter;
        let spec = execute_tool_spec();
        let schema = converter.tool_to_schema(spec.get("Read").unwrap());

        assert_eq!(schema["type"], "function");
        assert_eq!(schema["name"], "Read");
        assert_eq!(
            schema["description"],
            "Read a file snippet by line range (relative path)."
        );
        assert_eq!(schema["parameters"]["type"], "object");
        assert_eq!(schema["parameters"]["properties"]["path"]["type"], "string");
        assert_eq!(
            schema["parameters"]["properties"]["max_lines"]["type"],
            "integer"
        );
        assert_eq!(schema["parameters"]["required"], json!(["path"]));
    }

    #[test]
    fn edit_requires_all_three_arguments() {
        let schema = FunctionToolConverter.tool_to_schema(execute_tool_spec().get("Edit").unwrap());
        assert_eq!(
            schema["parameters"]["required"],
            json!(["path", "old_string", "new_string"])
        );
    }

    #[test]
    fn schemas_keep_registration_order() {
        let names = |tools: Vec<Value>| -> Vec<String> {
            tools
                .iter()
                .map(|t| t["name"].as_str().unwrap().to_string())
                .collect()
        };

        let converter = FunctionToolConverter;
        assert_eq!(
            names(converter.all_tools_schema(&execute_tool_spec())),
            ["Glob", "Grep", "Read", "Write", "Edit"]
        );
        assert_eq!(
            names(converter.all_tools_schema(&review_tool_spec())),
            ["Glob", "Grep", "Read"]
        );
        assert_eq!(
            names(converter.read_only_tools_schema(&execute_tool_spec())),
            ["Glob", "Grep", "Read"]
        );
    }
}
