//! Presentation layer for repo-delegate
//!
//! This crate contains the CLI definition, console formatting of run
//! results and the progress reporter that streams a run to the terminal.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use progress::console::ConsoleProgress;
