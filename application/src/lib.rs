//! Application layer for repo-delegate
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DelegateMode, ExecutionParams};
pub use ports::{
    context_loader::ContextLoaderPort,
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, InputItem, LlmGateway, TurnRequest},
    progress::{DispatchProgress, NoProgress},
    session_store::{SessionStore, SessionStoreError},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::delegate::{DelegateError, DelegateInput, DelegateOutput, DelegateUseCase};
pub use use_cases::dispatch_loop::{DispatchError, DispatchLoopUseCase};
