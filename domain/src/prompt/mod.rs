//! Prompt domain
//!
//! Developer prompts that open a remote conversation and the first user
//! turn of each run.

mod template;

pub use template::{PromptTemplate, TaskPromptContext};
