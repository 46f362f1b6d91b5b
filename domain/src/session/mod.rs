//! Session domain.
//!
//! - [`entities::SessionName`] — validated caller-chosen session identifier
//! - [`entities::ConversationHandle`] — opaque remote conversation id
//! - [`entities::SessionRecord`] — persisted session ↔ conversation binding
//! - [`response::LlmResponse`] — one model turn (text and function calls)

pub mod entities;
pub mod response;
