//! Tool domain entities

use super::value_objects::ToolError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Risk level of a tool operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk - read-only operations (Glob, Grep, Read)
    Low,
    /// High risk - operations that modify the repository (Write, Edit)
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
        }
    }

    pub fn is_mutating(&self) -> bool {
        matches!(self, RiskLevel::High)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JSON type of a tool parameter as advertised in the function schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
        }
    }
}

/// Definition of a tool that the remote model may call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Wire name of the tool (e.g., "Read")
    pub name: String,
    /// Human-readable description sent to the model
    pub description: String,
    /// Risk level of this tool
    pub risk_level: RiskLevel,
    /// Parameter specifications, in schema order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// JSON type
    pub param_type: ParamType,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            risk_level,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn is_mutating(&self) -> bool {
        self.risk_level.is_mutating()
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }
}

/// Ordered set of tools offered to the model.
///
/// Registration order is preserved so the emitted schema is stable.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: Vec<ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool; a later registration with the same name replaces the earlier one.
    pub fn register(mut self, tool: ToolDefinition) -> Self {
        if let Some(existing) = self.tools.iter_mut().find(|t| t.name == tool.name) {
            *existing = tool;
        } else {
            self.tools.push(tool);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn mutating_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().filter(|t| t.is_mutating())
    }

    pub fn read_only_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().filter(|t| !t.is_mutating())
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
    /// API-assigned call id, echoed back with the result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            native_id: None,
        }
    }

    /// Build a call from a function-call item as returned by the API.
    ///
    /// `raw_arguments` is the JSON-encoded argument object. An empty string
    /// means "no arguments"; anything that is not a JSON object is rejected
    /// as `INVALID_ARGUMENT`.
    pub fn from_native(
        id: impl Into<String>,
        name: impl Into<String>,
        raw_arguments: &str,
    ) -> Result<Self, ToolError> {
        let arguments = if raw_arguments.trim().is_empty() {
            HashMap::new()
        } else {
            match serde_json::from_str::<serde_json::Value>(raw_arguments) {
                Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
                Ok(_) => {
                    return Err(ToolError::invalid_argument(
                        "tool arguments must be a JSON object",
                    ));
                }
                Err(e) => {
                    return Err(ToolError::invalid_argument(format!(
                        "invalid tool arguments: {}",
                        e
                    )));
                }
            }
        };

        Ok(Self {
            tool_name: name.into(),
            arguments,
            native_id: Some(id.into()),
        })
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_native_id(mut self, id: impl Into<String>) -> Self {
        self.native_id = Some(id.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument
    pub fn require_string(&self, key: &str) -> Result<&str, ToolError> {
        self.get_string(key).ok_or_else(|| {
            ToolError::invalid_argument(format!("Missing required argument: {}", key))
        })
    }

    /// Get an optional i64 argument
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(|v| v.as_i64())
    }

    /// Get an optional count argument; zero and negative values read as absent.
    pub fn get_positive(&self, key: &str) -> Option<usize> {
        self.get_i64(key)
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Compact JSON rendering of the arguments, for logs.
    pub fn arguments_json(&self) -> String {
        serde_json::to_string(&self.arguments).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_def() -> ToolDefinition {
        ToolDefinition::new("Read", "Read a file", RiskLevel::Low)
            .with_parameter(ToolParameter::new("path", "Relative path", true))
            .with_parameter(
                ToolParameter::new("start_line", "First line", false).with_type(ParamType::Integer),
            )
    }

    #[test]
    fn test_risk_level() {
        assert!(!RiskLevel::Low.is_mutating());
        assert!(RiskLevel::High.is_mutating());
        assert_eq!(RiskLevel::High.to_string(), "high");
    }

    #[test]
    fn test_tool_definition() {
        let tool = read_def();
        assert_eq!(tool.name, "Read");
        assert!(!tool.is_mutating());
        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.required_parameters().count(), 1);
        assert_eq!(tool.parameters[1].param_type, ParamType::Integer);
    }

    #[test]
    fn test_tool_spec_keeps_registration_order() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("Glob", "g", RiskLevel::Low))
            .register(ToolDefinition::new("Write", "w", RiskLevel::High))
            .register(ToolDefinition::new("Read", "r", RiskLevel::Low));

        assert_eq!(spec.names().collect::<Vec<_>>(), vec!["Glob", "Write", "Read"]);
        assert_eq!(spec.mutating_tools().count(), 1);
        assert_eq!(spec.read_only_tools().count(), 2);
        assert!(spec.contains("Read"));
        assert!(!spec.contains("read"));
    }

    #[test]
    fn test_tool_spec_register_replaces_same_name() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("Read", "old", RiskLevel::Low))
            .register(ToolDefinition::new("Read", "new", RiskLevel::Low));

        assert_eq!(spec.len(), 1);
        assert_eq!(spec.get("Read").unwrap().description, "new");
    }

    #[test]
    fn test_tool_call_accessors() {
        let call = ToolCall::new("Read")
            .with_arg("path", "src/lib.rs")
            .with_arg("start_line", 10)
            .with_arg("max_lines", -3);

        assert_eq!(call.get_string("path"), Some("src/lib.rs"));
        assert_eq!(call.require_string("path").unwrap(), "src/lib.rs");
        assert_eq!(call.require_string("missing").unwrap_err().code(), "INVALID_ARGUMENT");
        assert_eq!(call.get_positive("start_line"), Some(10));
        assert_eq!(call.get_positive("max_lines"), None);
    }

    #[test]
    fn from_native_parses_argument_object() {
        let call = ToolCall::from_native("call_1", "Glob", r#"{"pattern":"**/*.rs"}"#).unwrap();
        assert_eq!(call.tool_name, "Glob");
        assert_eq!(call.native_id.as_deref(), Some("call_1"));
        assert_eq!(call.get_string("pattern"), Some("**/*.rs"));
    }

    #[test]
    fn from_native_treats_empty_as_no_arguments() {
        let call = ToolCall::from_native("call_2", "Glob", "  ").unwrap();
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn from_native_rejects_malformed_arguments() {
        let err = ToolCall::from_native("c", "Read", "{not json").unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");

        let err = ToolCall::from_native("c", "Read", "[1,2]").unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }
}
