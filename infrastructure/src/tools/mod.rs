//! Tool implementations for delegated runs
//!
//! Five tools confined to the repository root, in two sets:
//!
//! - `review`: Glob, Grep, Read
//! - `execute`: Glob, Grep, Read, Write, Edit
//!
//! Every tool validates its path arguments with the domain `PathPolicy` and
//! touches the filesystem only through [`SecureOpener`](crate::fs::SecureOpener).

pub mod file;
pub mod search;

mod context;
mod executor;
mod schema;

pub use context::{PRUNED_DIRS, ToolContext, ToolLimits};
pub use executor::LocalToolExecutor;
pub use schema::FunctionToolConverter;

use delegate_domain::tool::entities::ToolSpec;

/// Full tool set for task execution
pub fn execute_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(search::glob_definition())
        .register(search::grep_definition())
        .register(file::read_definition())
        .register(file::write_definition())
        .register(file::edit_definition())
}

/// Read-only tool set for reviews
pub fn review_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(search::glob_definition())
        .register(search::grep_definition())
        .register(file::read_definition())
}
