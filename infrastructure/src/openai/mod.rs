//! OpenAI Responses API adapter
//!
//! Implements [`LlmGateway`](delegate_application::LlmGateway) over two
//! endpoints: `POST /conversations` to open a server-side conversation and
//! `POST /responses` to run one turn of it.

mod gateway;
mod protocol;

pub use gateway::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, OpenAiGateway};
