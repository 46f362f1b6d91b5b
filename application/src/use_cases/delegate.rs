//! Delegate use case.
//!
//! Entry point for one CLI invocation: bind the session name to a remote
//! conversation (resuming a stored one or opening a new one), then hand the
//! conversation to the [`DispatchLoopUseCase`].

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::DispatchProgress;
use crate::ports::session_store::SessionStore;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::dispatch_loop::{DispatchError, DispatchLoopUseCase};
use delegate_domain::{ConversationHandle, DispatchOutcome, SessionName, SessionRecord};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from a delegated run
#[derive(Error, Debug)]
pub enum DelegateError {
    #[error("Failed to create conversation: {0}")]
    CreateConversation(#[source] GatewayError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Input for a delegated run
#[derive(Debug, Clone)]
pub struct DelegateInput {
    pub session: SessionName,
    /// Developer prompt used only when a new conversation is opened
    pub system_prompt: String,
    /// First user turn of this run
    pub initial_input: String,
}

impl DelegateInput {
    pub fn new(
        session: SessionName,
        system_prompt: impl Into<String>,
        initial_input: impl Into<String>,
    ) -> Self {
        Self {
            session,
            system_prompt: system_prompt.into(),
            initial_input: initial_input.into(),
        }
    }
}

/// Output of a delegated run
#[derive(Debug, Clone)]
pub struct DelegateOutput {
    pub conversation: ConversationHandle,
    /// Whether a stored conversation was continued
    pub resumed: bool,
    pub outcome: DispatchOutcome,
}

/// Use case for one delegated review or task run.
pub struct DelegateUseCase<G: LlmGateway, T: ToolExecutorPort> {
    gateway: Arc<G>,
    sessions: Arc<dyn SessionStore>,
    dispatch: DispatchLoopUseCase<G, T>,
}

impl<G: LlmGateway, T: ToolExecutorPort> DelegateUseCase<G, T> {
    pub fn new(
        gateway: Arc<G>,
        sessions: Arc<dyn SessionStore>,
        dispatch: DispatchLoopUseCase<G, T>,
    ) -> Self {
        Self {
            gateway,
            sessions,
            dispatch,
        }
    }

    pub async fn execute(
        &self,
        input: DelegateInput,
        progress: &dyn DispatchProgress,
    ) -> Result<DelegateOutput, DelegateError> {
        let (conversation, resumed) = self.resolve_conversation(&input).await?;

        let outcome = self
            .dispatch
            .run(&conversation, &input.initial_input, progress)
            .await?;

        Ok(DelegateOutput {
            conversation,
            resumed,
            outcome,
        })
    }

    /// Stored conversation if there is a usable one, otherwise a new one.
    ///
    /// Store failures never abort the run: an unreadable record starts a
    /// fresh conversation and a failed save only costs resumability.
    async fn resolve_conversation(
        &self,
        input: &DelegateInput,
    ) -> Result<(ConversationHandle, bool), DelegateError> {
        match self.sessions.load(&input.session) {
            Ok(Some(record)) if record.is_usable() => {
                info!(
                    "Resuming session '{}' (conversation {})",
                    input.session, record.conversation_id
                );
                return Ok((record.conversation_id, true));
            }
            Ok(_) => debug!("No stored conversation for session '{}'", input.session),
            Err(e) => warn!("Ignoring unreadable session '{}': {}", input.session, e),
        }

        let conversation = self
            .gateway
            .create_conversation(&input.system_prompt)
            .await
            .map_err(DelegateError::CreateConversation)?;
        info!(
            "Created conversation {} for session '{}'",
            conversation, input.session
        );

        if let Err(e) = self
            .sessions
            .save(&input.session, &SessionRecord::new(conversation.clone()))
        {
            warn!("Warning: failed to save session: {}", e);
        }

        Ok((conversation, false))
    }
}
