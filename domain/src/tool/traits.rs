//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ParamType, ToolCall, ToolDefinition};
use super::value_objects::ToolError;

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError>;
}

/// Default implementation of ToolValidator
///
/// Required parameters must be present and every supplied parameter that the
/// definition knows must have the advertised JSON type. Unknown arguments
/// are ignored; models occasionally add extras and they carry no authority.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError> {
        for param in &definition.parameters {
            match call.arguments.get(&param.name) {
                None | Some(serde_json::Value::Null) if param.required => {
                    return Err(ToolError::invalid_argument(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    )));
                }
                None | Some(serde_json::Value::Null) => {}
                Some(value) => {
                    let type_ok = match param.param_type {
                        ParamType::String => value.is_string(),
                        ParamType::Integer => value.is_i64() || value.is_u64(),
                    };
                    if !type_ok {
                        return Err(ToolError::invalid_argument(format!(
                            "Parameter '{}' for tool '{}' must be {}",
                            param.name,
                            definition.name,
                            param.param_type.as_str()
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{RiskLevel, ToolParameter};

    fn definition() -> ToolDefinition {
        ToolDefinition::new("Read", "read", RiskLevel::Low)
            .with_parameter(ToolParameter::new("path", "path", true))
            .with_parameter(
                ToolParameter::new("start_line", "start", false).with_type(ParamType::Integer),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let err = DefaultToolValidator
            .validate(&ToolCall::new("Read"), &definition())
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
        assert!(err.message.contains("Missing required parameter 'path'"));
    }

    #[test]
    fn test_validator_null_counts_as_missing() {
        let call = ToolCall::new("Read").with_arg("path", serde_json::Value::Null);
        assert!(DefaultToolValidator.validate(&call, &definition()).is_err());
    }

    #[test]
    fn test_validator_wrong_type() {
        let call = ToolCall::new("Read")
            .with_arg("path", "a.txt")
            .with_arg("start_line", "ten");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert!(err.message.contains("must be integer"));
    }

    #[test]
    fn test_validator_ignores_unknown_params() {
        let call = ToolCall::new("Read")
            .with_arg("path", "a.txt")
            .with_arg("encoding", "utf-8");
        assert!(DefaultToolValidator.validate(&call, &definition()).is_ok());
    }

    #[test]
    fn test_validator_valid_call() {
        let call = ToolCall::new("Read")
            .with_arg("path", "a.txt")
            .with_arg("start_line", 5);
        assert!(DefaultToolValidator.validate(&call, &definition()).is_ok());
    }
}
