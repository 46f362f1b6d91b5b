//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod context_loader;
pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
pub mod session_store;
pub mod tool_executor;
pub mod tool_schema;
