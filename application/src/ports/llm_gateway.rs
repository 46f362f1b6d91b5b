//! LLM Gateway port
//!
//! Defines the interface for talking to the remote model: opening a
//! conversation and running one turn of it.

use async_trait::async_trait;
use delegate_domain::{ConversationHandle, LlmResponse};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
///
/// Every variant is fatal for a dispatch run; the gateway never retries.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Timeout")]
    Timeout,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One item of turn input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputItem {
    /// A user message (the task or review prompt)
    UserMessage(String),
    /// The JSON result of a function call from the previous turn
    ToolOutput { call_id: String, output: String },
}

impl InputItem {
    pub fn user(text: impl Into<String>) -> Self {
        InputItem::UserMessage(text.into())
    }

    pub fn tool_output(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        InputItem::ToolOutput {
            call_id: call_id.into(),
            output: output.into(),
        }
    }
}

/// Everything the gateway needs to run one model turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnRequest<'a> {
    pub conversation: &'a ConversationHandle,
    pub model: &'a str,
    pub reasoning_effort: Option<&'a str>,
    /// Function schemas as produced by the [`ToolSchemaPort`](super::tool_schema::ToolSchemaPort)
    pub tools: &'a [serde_json::Value],
    pub input: &'a [InputItem],
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with the remote
/// model. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Open a server-side conversation seeded with a developer prompt
    async fn create_conversation(
        &self,
        system_prompt: &str,
    ) -> Result<ConversationHandle, GatewayError>;

    /// Run one turn of an existing conversation
    async fn respond(&self, request: TurnRequest<'_>) -> Result<LlmResponse, GatewayError>;
}
