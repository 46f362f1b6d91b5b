//! Model response types for native function calling.
//!
//! A single turn of the remote model yields an ordered list of content
//! blocks: free text and function calls. The dispatch loop executes the
//! calls and feeds their results back; a turn without calls ends the loop.

use crate::tool::entities::ToolCall;
use crate::tool::value_objects::ToolError;
use serde::{Deserialize, Serialize};

/// A single block of content within a model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model.
    Text { text: String },

    /// A function call request from the model.
    ///
    /// `arguments` is kept as the raw JSON string the API returned; it is
    /// only decoded when the call is dispatched so a malformed payload can
    /// be answered as a tool failure instead of aborting the turn.
    ToolUse {
        /// API-assigned call id, echoed back with the result.
        id: String,
        /// Tool name as chosen by the model.
        name: String,
        /// JSON-encoded argument object.
        arguments: String,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn tool_use(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns `(id, name, arguments)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &str)> {
        match self {
            ContentBlock::ToolUse {
                id,
                name,
                arguments,
            } => Some((id, name, arguments)),
            _ => None,
        }
    }
}

/// A function call as requested by the model, possibly with undecodable
/// arguments.
#[derive(Debug, Clone)]
pub struct RequestedCall {
    pub call_id: String,
    pub tool_name: String,
    /// Argument string exactly as the model sent it
    pub raw_arguments: String,
    pub parsed: Result<ToolCall, ToolError>,
}

/// A structured response from the remote model.
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or function calls).
    pub content: Vec<ContentBlock>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
}

impl LlmResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Decode every function call block, in order.
    pub fn tool_calls(&self) -> Vec<RequestedCall> {
        self.content
            .iter()
            .filter_map(|b| b.as_tool_use())
            .map(|(id, name, arguments)| RequestedCall {
                call_id: id.to_string(),
                tool_name: name.to_string(),
                raw_arguments: arguments.to_string(),
                parsed: ToolCall::from_native(id, name, arguments),
            })
            .collect()
    }

    /// Returns `true` if the response contains any function calls.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}
