//! Responses API wire types.
//!
//! Only the fields the dispatch loop needs are modelled; unknown output
//! item and content types are ignored.

use delegate_application::ports::llm_gateway::InputItem;
use delegate_domain::{ContentBlock, LlmResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /conversations`
#[derive(Debug, Serialize)]
pub struct CreateConversationRequest<'a> {
    pub items: Vec<ConversationItem<'a>>,
}

impl<'a> CreateConversationRequest<'a> {
    /// Conversation seeded with a single developer message.
    pub fn with_developer_prompt(prompt: &'a str) -> Self {
        Self {
            items: vec![ConversationItem {
                role: "developer",
                content: prompt,
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConversationItem<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CreateConversationResponse {
    #[serde(default)]
    pub id: Option<String>,
}

/// `POST /responses`
#[derive(Debug, Serialize)]
pub struct ResponsesRequest<'a> {
    pub model: &'a str,
    pub conversation: &'a str,
    pub tools: &'a [Value],
    pub tool_choice: &'static str,
    pub parallel_tool_calls: bool,
    pub input: Vec<WireInputItem<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Reasoning<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Reasoning<'a> {
    pub effort: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WireInputItem<'a> {
    Message {
        role: &'static str,
        content: &'a str,
    },
    FunctionCallOutput {
        #[serde(rename = "type")]
        kind: &'static str,
        call_id: &'a str,
        output: &'a str,
    },
}

impl<'a> From<&'a InputItem> for WireInputItem<'a> {
    fn from(item: &'a InputItem) -> Self {
        match item {
            InputItem::UserMessage(text) => WireInputItem::Message {
                role: "user",
                content: text,
            },
            InputItem::ToolOutput { call_id, output } => WireInputItem::FunctionCallOutput {
                kind: "function_call_output",
                call_id,
                output,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    FunctionCall {
        #[serde(default)]
        call_id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        arguments: Option<String>,
    },
    Message {
        #[serde(default)]
        content: Vec<MessageContent>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    OutputText {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Other,
}

impl ResponsesResponse {
    /// Output items in order; calls without an id or name are dropped.
    pub fn into_llm_response(self) -> LlmResponse {
        let mut content = Vec::new();
        for item in self.output {
            match item {
                OutputItem::FunctionCall {
                    call_id: Some(id),
                    name: Some(name),
                    arguments,
                } => content.push(ContentBlock::tool_use(id, name, arguments.unwrap_or_default())),
                OutputItem::Message { content: parts } => {
                    content.extend(parts.into_iter().filter_map(|part| match part {
                        MessageContent::OutputText { text } => Some(ContentBlock::text(text)),
                        MessageContent::Other => None,
                    }));
                }
                _ => {}
            }
        }
        LlmResponse {
            content,
            model: self.model,
        }
    }
}
