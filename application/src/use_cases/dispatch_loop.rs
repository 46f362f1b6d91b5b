//! Tool dispatch loop use case.
//!
//! Drives one delegated run: send the current input to the remote model,
//! execute the function calls it returns, feed their results back, and
//! repeat until the model answers without calling a tool or the turn
//! ceiling is reached.
//!
//! ```text
//! input ──▶ LlmGateway::respond ──▶ tool calls? ──no──▶ Complete(text)
//!   ▲                                   │yes
//!   └── function_call_output items ◀── ToolExecutorPort::execute (in order)
//! ```
//!
//! Tool failures are data and never stop the loop. Only transport failures
//! from the gateway end a run early.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::{GatewayError, InputItem, LlmGateway, TurnRequest};
use crate::ports::progress::DispatchProgress;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use delegate_domain::{
    ConversationHandle, DispatchOutcome, DispatchState, RequestedCall, ToolResult,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a dispatch run early
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("API error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Use case running the model ↔ tool loop over one conversation.
pub struct DispatchLoopUseCase<G: LlmGateway, T: ToolExecutorPort> {
    gateway: Arc<G>,
    tool_executor: Arc<T>,
    tools: Vec<serde_json::Value>,
    params: ExecutionParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway, T: ToolExecutorPort> DispatchLoopUseCase<G, T> {
    /// The executor's tool set is offered to the model, serialized once here.
    pub fn new(
        gateway: Arc<G>,
        tool_executor: Arc<T>,
        schema: &dyn ToolSchemaPort,
        params: ExecutionParams,
    ) -> Self {
        let tools = schema.all_tools_schema(tool_executor.tool_spec());
        Self {
            gateway,
            tool_executor,
            tools,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Run the loop until completion or the turn ceiling.
    pub async fn run(
        &self,
        conversation: &ConversationHandle,
        initial_input: &str,
        progress: &dyn DispatchProgress,
    ) -> Result<DispatchOutcome, DispatchError> {
        let mut state = DispatchState::new(self.params.max_iterations);
        let mut input = vec![InputItem::user(initial_input)];
        let mut last_output: Option<String> = None;

        let outcome = loop {
            if !state.begin_turn() {
                warn!(
                    "Reached max iterations ({}) without completion",
                    state.max_turns()
                );
                break DispatchOutcome::Aborted {
                    turns: state.turns(),
                    last_output,
                };
            }
            let turn = state.turns();
            progress.on_turn_start(turn, state.max_turns());
            debug!("Turn {}: sending {} input item(s)", turn, input.len());

            let request = TurnRequest {
                conversation,
                model: &self.params.model,
                reasoning_effort: self.params.reasoning_effort.as_deref(),
                tools: &self.tools,
                input: &input,
            };
            let response = match self.gateway.respond(request).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Turn {} failed: {}", turn, e);
                    self.conversation_logger.log(ConversationEvent::new(
                        "gateway_error",
                        json!({ "turn": turn, "error": e.to_string() }),
                    ));
                    return Err(e.into());
                }
            };

            let text = response.text_content();
            if !text.is_empty() {
                progress.on_model_text(&text);
                last_output = Some(text.clone());
            }

            let calls = response.tool_calls();
            self.conversation_logger.log(ConversationEvent::new(
                "model_turn",
                json!({
                    "turn": turn,
                    "text": text,
                    "tool_calls": calls.len(),
                }),
            ));

            state.model_replied(!calls.is_empty());
            if calls.is_empty() {
                info!("Model finished after {} turn(s)", turn);
                break DispatchOutcome::Complete {
                    output: text,
                    turns: turn,
                };
            }

            if calls.len() > 1 {
                debug!("Turn {} requested {} calls; running them in order", turn, calls.len());
            }

            let mut next_input = Vec::with_capacity(calls.len());
            for call in calls {
                let result = self.execute_call(turn, &call, progress).await;
                next_input.push(InputItem::tool_output(call.call_id, result.to_json()));
            }
            input = next_input;
            state.tools_finished();
        };

        self.conversation_logger.log(ConversationEvent::new(
            "dispatch_complete",
            json!({
                "phase": outcome.phase().as_str(),
                "turns": outcome.turns(),
            }),
        ));
        progress.on_finished(&outcome);
        Ok(outcome)
    }

    /// Execute one requested call; malformed arguments become an
    /// `INVALID_ARGUMENT` result without reaching the executor.
    async fn execute_call(
        &self,
        turn: usize,
        call: &RequestedCall,
        progress: &dyn DispatchProgress,
    ) -> ToolResult {
        progress.on_tool_call(&call.tool_name, &call.raw_arguments);
        self.conversation_logger.log(ConversationEvent::new(
            "tool_call",
            json!({
                "turn": turn,
                "call_id": call.call_id,
                "tool": call.tool_name,
                "arguments": call.raw_arguments,
            }),
        ));

        let result = match &call.parsed {
            Ok(tool_call) => self.tool_executor.execute(tool_call).await,
            Err(e) => {
                debug!("Rejecting call {} to {}: {}", call.call_id, call.tool_name, e);
                ToolResult::failure(&call.tool_name, e.clone())
            }
        };

        if let Some(err) = result.error() {
            debug!("{} failed: {}", call.tool_name, err);
        }
        progress.on_tool_result(&call.tool_name, &result);
        self.conversation_logger.log(ConversationEvent::new(
            "tool_result",
            json!({
                "turn": turn,
                "call_id": call.call_id,
                "tool": call.tool_name,
                "ok": result.is_success(),
                "error": result.error().map(|e| e.code()),
            }),
        ));
        result
    }
}
